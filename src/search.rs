// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Adversarial search.
//!
//! The search engine scores every legal move of the side to move with a depth-limited minimax search, pruned with
//! alpha-beta, and picks the best one. Successor boards are produced by `game::submit_action`, exactly as a real
//! game would produce them, and their topology is memoized in the engine's transposition table.
//!
//! The evaluation function scores boards from one fixed perspective. The root side is always the maximizing side,
//! so the evaluator is expected to score for the color that is asking for a move.

use std::{
    cmp::{max, min},
    fmt,
    sync::atomic::{AtomicBool, Ordering},
    sync::Arc,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use crate::{
    core::{Board, Color, Move},
    eval::{self, Evaluator, Value},
    game, movegen,
    table::{Child, Children, NodeKey, Table},
    tracing::constants,
};

/// Immutable configuration of a search engine.
#[derive(Clone)]
pub struct SearchConfig {
    /// Static evaluation applied at the leaves of the search.
    pub evaluator: Evaluator,

    /// Depth of the search, in plies. The root move itself is the first ply.
    pub max_depth: u32,

    /// If set, the transposition table is cleared at the start of a search whenever it holds more nodes than this.
    /// If unset the table grows without bound for the lifetime of the engine.
    pub cache_limit: Option<usize>,
}

impl SearchConfig {
    pub fn new(evaluator: Evaluator, max_depth: u32) -> SearchConfig {
        SearchConfig {
            evaluator,
            max_depth,
            cache_limit: None,
        }
    }

    pub fn with_cache_limit(mut self, limit: usize) -> SearchConfig {
        self.cache_limit = Some(limit);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig::new(eval::zero(), 1)
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("max_depth", &self.max_depth)
            .field("cache_limit", &self.cache_limit)
            .finish()
    }
}

/// Options for a single search.
#[derive(Default, Clone, Copy)]
pub struct SearchOptions<'a> {
    /// Maximum amount of time to dedicate to this search.
    pub time_limit: Option<Duration>,

    /// Maximum amount of nodes to evaluate.
    pub node_limit: Option<u64>,

    /// Reference to a hard stop flag, which (if set) should immediately terminate the search.
    pub hard_stop: Option<&'a AtomicBool>,
}

/// Why a search stopped before exploring its full tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    Explicit,
    Time,
    Nodes,
}

impl TerminationReason {
    fn as_str(self) -> &'static str {
        match self {
            TerminationReason::Explicit => "explicit",
            TerminationReason::Time => "duration",
            TerminationReason::Nodes => "nodes",
        }
    }
}

/// A root move together with its minimax score.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankedMove {
    pub mov: Move,
    pub score: Value,
}

#[derive(Clone, Debug, Serialize)]
pub struct SearchResult {
    /// The chosen move, or `None` if the side to move has no legal move.
    pub best_move: Option<Move>,

    /// The score of the chosen move. `None` if there was no move, or if the search was stopped before any move
    /// was completely scored.
    pub best_score: Option<Value>,

    /// Every completely scored root move, in move generation order.
    pub ranked_moves: Vec<RankedMove>,

    /// Number of leaves statically evaluated.
    pub nodes_evaluated: u64,

    /// Set if a time limit, node limit or stop flag cut the search short.
    pub termination: Option<TerminationReason>,
}

impl SearchResult {
    /// Selects the best of the ranked moves: the highest score, ties going to the move generated first. If no
    /// move was scored but there are moves, the first generated one is chosen.
    pub(crate) fn from_ranked(
        moves: &[Move],
        ranked_moves: Vec<RankedMove>,
        nodes_evaluated: u64,
        termination: Option<TerminationReason>,
    ) -> SearchResult {
        let mut best: Option<RankedMove> = None;
        for candidate in &ranked_moves {
            match best {
                Some(current) if candidate.score <= current.score => {}
                _ => best = Some(*candidate),
            }
        }

        let (best_move, best_score) = match best {
            Some(ranked) => (Some(ranked.mov), Some(ranked.score)),
            None => (moves.first().copied(), None),
        };

        SearchResult {
            best_move,
            best_score,
            ranked_moves,
            nodes_evaluated,
            termination,
        }
    }
}

/// A configured minimax search engine with its own transposition table.
///
/// The engine can be shared between threads: the table is a concurrent map and the configuration never changes
/// while the engine is borrowed.
pub struct SearchEngine {
    config: SearchConfig,
    table: Table,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> SearchEngine {
        SearchEngine {
            config,
            table: Table::new(),
        }
    }

    /// Builds an engine with the given evaluation function and depth.
    pub fn configure(evaluator: Evaluator, max_depth: u32) -> SearchEngine {
        SearchEngine::new(SearchConfig::new(evaluator, max_depth))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replaces the configuration. The table's static scores belong to the old evaluator, so it is cleared.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
        self.table.clear();
    }

    /// Number of distinct boards in the transposition table.
    pub fn cache_len(&self) -> usize {
        self.table.len()
    }

    pub fn is_cache_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Empties the transposition table.
    pub fn reset(&self) {
        if self.table.is_empty() {
            return;
        }

        tracing::debug!(len = self.table.len(), "clearing transposition table");
        self.table.clear();
    }

    pub(crate) fn table(&self) -> &Table {
        &self.table
    }

    /// Returns the best move for `color`, or `None` if `color` has no legal move.
    pub fn get_best_move(&self, board: &Board, color: Color) -> Option<Move> {
        self.search(board, color, &SearchOptions::default()).best_move
    }

    /// Runs a full search for `color`, subject to the limits in `options`.
    pub fn search(&self, board: &Board, color: Color, options: &SearchOptions) -> SearchResult {
        let _span = tracing::info_span!(
            constants::SEARCH,
            board = %board,
            color = ?color,
            depth = self.config.max_depth
        )
        .entered();

        self.enforce_cache_limit();
        let mut moves = Vec::new();
        movegen::generate_moves(color, board, &mut moves);
        let mut searcher = Searcher::new(&self.config, &self.table, options);
        let mut ranked = Vec::with_capacity(moves.len());
        for &mov in &moves {
            match searcher.score_root_move(board, color, mov) {
                Some(score) => ranked.push(RankedMove { mov, score }),
                None => break,
            }
        }

        let result =
            SearchResult::from_ranked(&moves, ranked, searcher.nodes_evaluated, searcher.termination);
        report(board, &result);
        result
    }

    pub(crate) fn enforce_cache_limit(&self) {
        if let Some(limit) = self.config.cache_limit {
            let len = self.table.len();
            if len > limit {
                tracing::debug!(len, limit, "clearing transposition table");
                self.table.clear();
            }
        }
    }
}

pub(crate) fn report(board: &Board, result: &SearchResult) {
    tracing::debug!(ranked = ?result.ranked_moves, "ranked root moves");
    let best_move = match result.best_move {
        Some(mov) => mov.as_notation_squares(board.size()),
        None => "none".to_string(),
    };
    let best_score = match result.best_score {
        Some(score) => score.to_string(),
        None => "none".to_string(),
    };
    tracing::info!(
        event = constants::SEARCH_COMPLETE,
        best_move = %best_move,
        best_score = %best_score,
        nodes = result.nodes_evaluated
    );
}

pub(crate) struct Searcher<'a, 'b> {
    config: &'a SearchConfig,
    table: &'a Table,
    options: &'a SearchOptions<'b>,
    search_start_time: Instant,
    pub(crate) nodes_evaluated: u64,
    pub(crate) termination: Option<TerminationReason>,
}

impl<'a, 'b> Searcher<'a, 'b> {
    pub(crate) fn new(
        config: &'a SearchConfig,
        table: &'a Table,
        options: &'a SearchOptions<'b>,
    ) -> Searcher<'a, 'b> {
        Searcher {
            config,
            table,
            options,
            search_start_time: Instant::now(),
            nodes_evaluated: 0,
            termination: None,
        }
    }

    /// Scores one root move: the opponent minimizes over the successor with the remaining depth. Returns `None` if
    /// the search was stopped before the score was complete.
    pub(crate) fn score_root_move(&mut self, board: &Board, color: Color, mov: Move) -> Option<Value> {
        let _span = tracing::debug_span!(constants::ROOT_MOVE, mov = %mov).entered();
        if !self.can_continue_search() {
            return None;
        }

        let child = self.expand(board, color, mov);
        let score = self.minimax(
            &child,
            Value::NEGATIVE_INFINITY,
            Value::POSITIVE_INFINITY,
            false,
            color.toggle(),
            self.config.max_depth.saturating_sub(1),
        );

        if self.termination.is_some() {
            None
        } else {
            Some(score)
        }
    }

    fn minimax(
        &mut self,
        node: &Child,
        mut min_cutoff: Value,
        mut max_cutoff: Value,
        take_max: bool,
        color: Color,
        depth: u32,
    ) -> Value {
        if depth == 0 {
            self.nodes_evaluated += 1;
            return node.score;
        }

        let mut score = if take_max {
            Value::NEGATIVE_INFINITY
        } else {
            Value::POSITIVE_INFINITY
        };

        if !self.can_continue_search() {
            return score;
        }

        let children = self.children(node);
        for child in children.for_color(color) {
            let child_score = self.minimax(
                child,
                min_cutoff,
                max_cutoff,
                !take_max,
                color.toggle(),
                depth - 1,
            );

            if take_max {
                score = max(score, child_score);
                if score >= max_cutoff {
                    tracing::trace!(event = constants::BETA_CUTOFF, depth);
                    break;
                }
                min_cutoff = max(min_cutoff, score);
            } else {
                score = min(score, child_score);
                if score <= min_cutoff {
                    tracing::trace!(event = constants::ALPHA_CUTOFF, depth);
                    break;
                }
                max_cutoff = min(max_cutoff, score);
            }

            if !self.can_continue_search() {
                break;
            }
        }

        score
    }

    /// Produces the node reached by `mover` playing `mov` on `board`, recording it in the table if it is new.
    fn expand(&mut self, board: &Board, mover: Color, mov: Move) -> Child {
        let key = NodeKey::new(game::submit_action(board, mover, mov).board);
        if let Some(score) = self.table.score(&key) {
            return Child { key, score };
        }

        let score = (self.config.evaluator)(key.board());
        self.table.record_unexplored(key.clone(), score);
        Child { key, score }
    }

    /// Returns the children of a node, generating and recording them if the node has not been expanded yet.
    fn children(&mut self, node: &Child) -> Arc<Children> {
        if let Some(children) = self.table.children(&node.key) {
            return children;
        }

        let board = node.key.board();
        let (white_moves, black_moves) = movegen::generate_all_moves(board);
        let white = white_moves
            .into_iter()
            .map(|mov| self.expand(board, Color::White, mov))
            .collect();
        let black = black_moves
            .into_iter()
            .map(|mov| self.expand(board, Color::Black, mov))
            .collect();

        let children = Arc::new(Children::new(white, black));
        self.table
            .record_children(node.key.clone(), node.score, children.clone());
        children
    }

    fn can_continue_search(&mut self) -> bool {
        if self.termination.is_some() {
            return false;
        }

        let reason = self.termination_reason();
        if let Some(reason) = reason {
            tracing::info!(event = constants::SEARCH_TERMINATION, reason = reason.as_str());
            self.termination = Some(reason);
            return false;
        }

        true
    }

    fn termination_reason(&self) -> Option<TerminationReason> {
        if let Some(limit) = self.options.time_limit {
            if Instant::now().saturating_duration_since(self.search_start_time) > limit {
                return Some(TerminationReason::Time);
            }
        }

        if let Some(limit) = self.options.node_limit {
            if self.nodes_evaluated > limit {
                return Some(TerminationReason::Nodes);
            }
        }

        if let Some(flag) = self.options.hard_stop {
            if flag.load(Ordering::Acquire) {
                return Some(TerminationReason::Explicit);
            }
        }

        None
    }
}
