// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Module `core` contains core datatypes and data structures used pervasively throughout `skirmish`.

mod board;
mod r#move;
mod types;

pub use board::{Board, BoardError, BoardParseError, Grid, MAX_BOARD_SIZE};
pub use r#move::{square_name, Move};
pub use types::{
    colors, piece_kinds, Color, ColorParseError, Coord, Piece, PieceKind, PieceParseError,
};
