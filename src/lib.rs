// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `skirmish` board-game engine and library.
//!
//! `skirmish` plays a Chess-like game on square boards of any size from 1×1 to 26×26. The rules are Chess with the
//! complicated parts taken out (no castling, no en passant, pawns always promote to queens) and one harsh twist:
//! a move that breaks the rules isn't rejected, it costs the moving piece. The game ends when a king is captured.
//!
//! The library is split along those lines:
//!   * `rules` decides whether a move is legal and whether a king is in check,
//!   * `game` applies a submitted move and reports the resulting state,
//!   * `search` picks moves with a cached minimax search,
//!   * `agents` wraps move pickers as players and runs games between them.

pub mod agents;
pub mod config;
pub mod core;
pub mod eval;
pub mod game;
pub mod layouts;
pub mod movegen;
pub mod rules;
pub mod search;
mod table;
pub mod threads;
pub mod tracing;
mod zobrist;

pub use crate::core::{Board, Color, Coord, Move, Piece, PieceKind};
pub use crate::game::{submit_action, GameState};
