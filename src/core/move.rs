// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

use crate::core::{Coord, Piece};

/// A proposed relocation of a piece from one coordinate to another.
///
/// A Move is not validated when it is constructed; whether or not it is legal can only be determined against a
/// specific board, see `rules::is_legal_move`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub const fn new(from: Coord, to: Coord) -> Move {
        Move { from, to }
    }

    /// The move players submit when they have nothing to play. It is never legal, so submitting it wastes the
    /// turn (or forfeits whatever sits on the top-left square).
    pub const fn null() -> Move {
        Move {
            from: Coord::new(0, 0),
            to: Coord::new(0, 0),
        }
    }

    pub fn is_null(self) -> bool {
        self == Move::null()
    }

    pub fn row_delta(self) -> i32 {
        self.to.row - self.from.row
    }

    pub fn col_delta(self) -> i32 {
        self.to.col - self.from.col
    }

    /// Renders this move as a piece glyph followed by the source and destination squares, e.g. `Pa2a3`.
    pub fn as_notation(self, piece: Piece, size: usize) -> String {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{}{}", piece, self.as_notation_squares(size));
        buf
    }

    /// Renders only the source and destination squares of this move, e.g. `a2a3`.
    pub fn as_notation_squares(self, size: usize) -> String {
        format!("{}{}", square_name(self.from, size), square_name(self.to, size))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Names a square with a column letter and a row number counted from White's side of the board, so that on an
/// N×N board row `N-1` is `1` and row `0` is `N`. Coordinates off of the board render as `?`.
pub fn square_name(coord: Coord, size: usize) -> String {
    let size = size as i32;
    if coord.row < 0 || coord.row >= size || coord.col < 0 || coord.col >= size {
        return "?".to_string();
    }

    let file = (b'a' + coord.col as u8) as char;
    format!("{}{}", file, size - coord.row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, PieceKind};

    #[test]
    fn notation_counts_rows_from_white() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let mov = Move::new(Coord::new(4, 0), Coord::new(3, 0));
        assert_eq!("Pa2a3", mov.as_notation(pawn, 6));
    }

    #[test]
    fn notation_black_glyph_is_lowercase() {
        let knight = Piece::new(Color::Black, PieceKind::Knight);
        let mov = Move::new(Coord::new(0, 1), Coord::new(2, 2));
        assert_eq!("nb8c6", mov.as_notation(knight, 8));
    }

    #[test]
    fn off_board_square_name() {
        assert_eq!("?", square_name(Coord::new(-1, 0), 6));
        assert_eq!("?", square_name(Coord::new(0, 6), 6));
    }

    #[test]
    fn null_move() {
        assert!(Move::null().is_null());
        assert_eq!(0, Move::null().row_delta());
        assert_eq!(0, Move::null().col_delta());
    }
}
