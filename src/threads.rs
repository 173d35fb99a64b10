// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parallel search.
//!
//! The root moves of a search are independent of one another, so they can be scored on separate threads. Each
//! worker thread takes every `workers`-th root move and scores it with its own searcher; all workers share the
//! engine's transposition table. The per-move scores are merged back in move generation order before a move is
//! chosen, so a parallel search picks exactly the move a sequential search would.
//!
//! Budgets apply to each worker separately: the node limit bounds the nodes each worker evaluates, and the time
//! limit and stop flag are observed by every worker.

use std::{panic, thread};

use crate::{
    core::{Board, Color},
    eval::Value,
    movegen,
    search::{self, RankedMove, SearchEngine, SearchOptions, SearchResult, Searcher, TerminationReason},
    tracing::constants,
};

/// The number of workers to use when none is requested: one per logical CPU.
pub fn default_workers() -> usize {
    num_cpus::get()
}

struct WorkerReport {
    scores: Vec<(usize, Value)>,
    nodes_evaluated: u64,
    termination: Option<TerminationReason>,
}

/// Searches `board` for `color` with up to `workers` threads.
pub fn parallel_search(
    engine: &SearchEngine,
    board: &Board,
    color: Color,
    options: &SearchOptions,
    workers: usize,
) -> SearchResult {
    let search_span = tracing::info_span!(
        constants::SEARCH,
        board = %board,
        color = ?color,
        depth = engine.config().max_depth
    );
    let _enter = search_span.enter();

    engine.enforce_cache_limit();
    let mut moves = Vec::new();
    movegen::generate_moves(color, board, &mut moves);
    let workers = workers.clamp(1, moves.len().max(1));
    tracing::debug!(workers, moves = moves.len(), "starting parallel search");

    let reports: Vec<WorkerReport> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let moves = &moves;
                let search_span = &search_span;
                scope.spawn(move || {
                    let _span = tracing::info_span!(parent: search_span, constants::WORKER, worker).entered();
                    let mut searcher = Searcher::new(engine.config(), engine.table(), options);
                    let mut scores = Vec::new();
                    for idx in (worker..moves.len()).step_by(workers) {
                        match searcher.score_root_move(board, color, moves[idx]) {
                            Some(score) => scores.push((idx, score)),
                            None => break,
                        }
                    }

                    WorkerReport {
                        scores,
                        nodes_evaluated: searcher.nodes_evaluated,
                        termination: searcher.termination,
                    }
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(report) => report,
                Err(payload) => {
                    tracing::error!("search worker panicked");
                    panic::resume_unwind(payload)
                }
            })
            .collect()
    });

    let mut scores: Vec<Option<Value>> = vec![None; moves.len()];
    let mut nodes_evaluated = 0;
    let mut termination = None;
    for report in reports {
        for (idx, score) in report.scores {
            scores[idx] = Some(score);
        }
        nodes_evaluated += report.nodes_evaluated;
        termination = termination.or(report.termination);
    }

    let ranked = moves
        .iter()
        .zip(scores)
        .filter_map(|(&mov, score)| score.map(|score| RankedMove { mov, score }))
        .collect();

    let result = SearchResult::from_ranked(&moves, ranked, nodes_evaluated, termination);
    search::report(board, &result);
    result
}
