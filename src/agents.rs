// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Players and the game loop that drives them.
//!
//! A player is anything that can pick a move for a color on a board. The game loop doesn't care how the move was
//! picked, and it doesn't check it either: whatever a player returns is fed straight into `game::submit_action`, so a
//! player that returns a bad move pays for it under the usual forfeiture rules. A player with nothing to do returns
//! the null move, which wastes its turn.

use std::time::Duration;

use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::Serialize;

use crate::{
    config::SearchSettings,
    core::{Board, Color, Move},
    eval::{self, material},
    game::{self, LastMove},
    movegen,
    search::{SearchEngine, SearchOptions},
    threads,
};

pub trait Player {
    fn name(&self) -> &str;

    fn choose_move(&mut self, board: &Board, color: Color) -> Move;
}

/// A player that searches with a material evaluation from its own point of view.
///
/// The evaluation depends on which color is moving, so the player keeps one engine (and one transposition table)
/// per color.
pub struct SearchPlayer {
    white: SearchEngine,
    black: SearchEngine,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    workers: usize,
}

impl SearchPlayer {
    pub const DEFAULT_DEPTH: u32 = 4;

    pub fn new(depth: u32) -> SearchPlayer {
        SearchPlayer::from_settings(&SearchSettings {
            depth,
            ..SearchSettings::default()
        })
    }

    pub fn from_settings(settings: &SearchSettings) -> SearchPlayer {
        SearchPlayer {
            white: SearchEngine::new(settings.search_config(material(Color::White))),
            black: SearchEngine::new(settings.search_config(material(Color::Black))),
            time_limit: settings.time_limit(),
            node_limit: settings.node_limit,
            workers: settings.workers(),
        }
    }

    fn engine(&self, color: Color) -> &SearchEngine {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

impl Default for SearchPlayer {
    fn default() -> SearchPlayer {
        SearchPlayer::new(SearchPlayer::DEFAULT_DEPTH)
    }
}

impl Player for SearchPlayer {
    fn name(&self) -> &str {
        "search"
    }

    fn choose_move(&mut self, board: &Board, color: Color) -> Move {
        let options = SearchOptions {
            time_limit: self.time_limit,
            node_limit: self.node_limit,
            hard_stop: None,
        };

        let engine = self.engine(color);
        let result = if self.workers > 1 {
            threads::parallel_search(engine, board, color, &options, self.workers)
        } else {
            engine.search(board, color, &options)
        };

        result.best_move.unwrap_or_else(Move::null)
    }
}

/// A player that picks uniformly among its legal moves.
pub struct RandomPlayer {
    rng: SmallRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> RandomPlayer {
        RandomPlayer {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> RandomPlayer {
        RandomPlayer {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, board: &Board, color: Color) -> Move {
        let mut moves = Vec::new();
        movegen::generate_moves(color, board, &mut moves);
        if moves.is_empty() {
            return Move::null();
        }

        moves[self.rng.gen_range(0..moves.len())]
    }
}

/// A player that takes the most valuable piece it can without walking into check, and otherwise makes its first
/// safe move.
#[derive(Default)]
pub struct GreedyPlayer;

impl Player for GreedyPlayer {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_move(&mut self, board: &Board, color: Color) -> Move {
        let mut moves = Vec::new();
        movegen::generate_safe_moves(color, board, &mut moves);
        if moves.is_empty() {
            movegen::generate_moves(color, board, &mut moves);
        }

        let mut best: Option<(Move, i32)> = None;
        for mov in moves {
            let gain = board
                .piece_at(mov.to)
                .map_or(0, |piece| eval::piece_value(piece.kind));
            match best {
                Some((_, best_gain)) if gain <= best_gain => {}
                _ => best = Some((mov, gain)),
            }
        }

        best.map_or_else(Move::null, |(mov, _)| mov)
    }
}

/// Everything that happened in one game.
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    pub initial: Board,
    pub moves: Vec<LastMove>,
    pub winner: Option<Color>,
    pub final_board: Board,
}

impl GameRecord {
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }
}

/// Plays a game between two players, starting from `board` with White to move, until a king falls or `max_turns`
/// moves have been submitted.
pub fn play_game(
    white: &mut dyn Player,
    black: &mut dyn Player,
    board: Board,
    max_turns: usize,
) -> GameRecord {
    let _span = tracing::info_span!("game", white = white.name(), black = black.name()).entered();
    let initial = board.clone();
    let mut board = board;
    let mut color = Color::White;
    let mut moves = Vec::new();
    let mut winner = None;

    for turn in 0..max_turns {
        let player: &mut dyn Player = match color {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        let mov = player.choose_move(&board, color);
        let state = game::submit_action(&board, color, mov);
        tracing::info!(turn, %state);

        moves.push(state.last_move);
        winner = state.winner;
        board = state.board;
        match state.turn {
            game::Turn::ToMove(next) => color = next,
            game::Turn::GameOver => break,
        }
    }

    GameRecord {
        white: white.name().to_string(),
        black: black.name().to_string(),
        initial,
        moves,
        winner,
        final_board: board,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{Coord, Piece, PieceKind},
        layouts, rules,
    };

    fn board(layout: &str) -> Board {
        Board::from_layout(layout).unwrap()
    }

    #[test]
    fn search_player_wastes_turn_without_moves() {
        let mut player = SearchPlayer::new(2);
        assert_eq!(Move::null(), player.choose_move(&board("4/4/4/K3"), Color::Black));
    }

    #[test]
    fn search_player_takes_free_rook() {
        let mut player = SearchPlayer::default();
        let b = board("k5/6/2r3/6/2Q3/5K");
        assert_eq!(
            Move::new(Coord::new(4, 2), Coord::new(2, 2)),
            player.choose_move(&b, Color::White)
        );
    }

    #[test]
    fn parallel_search_player_agrees() {
        let b = layouts::standard();
        let mut sequential = SearchPlayer::new(3);
        let mut parallel = SearchPlayer::from_settings(&SearchSettings {
            depth: 3,
            threads: Some(3),
            ..SearchSettings::default()
        });
        for color in [Color::White, Color::Black] {
            assert_eq!(sequential.choose_move(&b, color), parallel.choose_move(&b, color));
        }
    }

    #[test]
    fn random_player_is_legal_and_reproducible() {
        let b = layouts::standard();
        let mut first = RandomPlayer::new(7);
        let mut second = RandomPlayer::new(7);
        for _ in 0..20 {
            let mov = first.choose_move(&b, Color::Black);
            assert!(rules::is_legal_move(&b, mov));
            assert_eq!(
                Some(Color::Black),
                b.piece_at(mov.from).map(|p| p.color)
            );
            assert_eq!(mov, second.choose_move(&b, Color::Black));
        }
        assert_eq!(Move::null(), first.choose_move(&board("4/4/4/K3"), Color::Black));
    }

    #[test]
    fn greedy_player_prefers_valuable_captures() {
        // the rook can take either the pawn or the queen
        let b = board("k3/q3/4/R1pK");
        let mov = GreedyPlayer.choose_move(&b, Color::White);
        assert_eq!(Some(Piece::new(Color::Black, PieceKind::Queen)), b.piece_at(mov.to));
    }

    #[test]
    fn random_games_stay_within_turn_cap() {
        let mut white = RandomPlayer::new(1);
        let mut black = RandomPlayer::new(2);
        let record = play_game(&mut white, &mut black, layouts::standard(), 30);
        assert!(record.moves.len() <= 30);
        assert!(record.moves.iter().all(|m| m.was_legal));
        if record.moves.len() < 30 {
            assert!(record.is_finished());
        }
        assert_eq!(layouts::standard(), record.initial);
    }

    #[test]
    fn search_beats_nobody_moving() {
        struct Idle;
        impl Player for Idle {
            fn name(&self) -> &str {
                "idle"
            }

            fn choose_move(&mut self, _: &Board, _: Color) -> Move {
                Move::null()
            }
        }

        let mut white = SearchPlayer::new(2);
        let record = play_game(&mut white, &mut Idle, board("k3/4/4/R2K"), 10);
        assert_eq!(Some(Color::White), record.winner);
        assert_eq!(1, record.moves.len());
        assert_eq!(None, record.final_board.king(Color::Black));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!("search", json["white"]);
        assert_eq!("idle", json["black"]);
    }

    #[test]
    fn config_of_search_player() {
        let player = SearchPlayer::new(3);
        let config: &crate::search::SearchConfig = player.engine(Color::Black).config();
        assert_eq!(3, config.max_depth);
    }
}
