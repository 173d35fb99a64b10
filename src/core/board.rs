// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{
    convert::TryFrom,
    fmt::{self, Write},
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::{
    core::{Color, Coord, Piece, PieceKind, PieceParseError},
    zobrist,
};

/// The largest supported board. Columns are named by a single letter, which caps the width at 26.
pub const MAX_BOARD_SIZE: usize = 26;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size {0} is not in 1..={max}", max = MAX_BOARD_SIZE)]
    InvalidSize(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("empty board layout")]
    Empty,
    #[error("invalid piece: {0}")]
    InvalidPiece(#[from] PieceParseError),
    #[error("row {row} has width {width}, expected {expected} (boards must be square)")]
    NotSquare {
        row: usize,
        width: usize,
        expected: usize,
    },
    #[error(transparent)]
    InvalidSize(#[from] BoardError),
}

/// An N×N game board. Every square is either empty or holds exactly one piece.
///
/// Boards are plain values: every operation that produces a new game state clones the board it starts from, so a
/// board handed out by the rules engine is never mutated afterwards. The Zobrist hash of the board is maintained
/// incrementally and is used as its `Hash`, so that boards can be used directly as content-addressed cache keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    squares: Box<[Option<Piece>]>,
    zobrist_hash: u64,
}

impl Board {
    /// Creates an empty board of the given size, failing if the size is not supported.
    pub fn try_new(size: usize) -> Result<Board, BoardError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidSize(size));
        }

        Ok(Board {
            size,
            squares: vec![None; size * size].into_boxed_slice(),
            zobrist_hash: 0,
        })
    }

    /// Creates an empty board of the given size. Panics if the size is not in `1..=MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Board {
        match Board::try_new(size) {
            Ok(board) => board,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn zobrist_hash(&self) -> u64 {
        self.zobrist_hash
    }

    /// Returns whether or not the given coordinate lies on this board.
    pub fn contains(&self, coord: Coord) -> bool {
        let size = self.size as i32;
        coord.row >= 0 && coord.row < size && coord.col >= 0 && coord.col < size
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.row as usize * self.size + coord.col as usize)
        } else {
            None
        }
    }

    /// The piece on the given square, or `None` if the square is empty or off of the board.
    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.index(coord).and_then(|idx| self.squares[idx])
    }

    /// Places a piece on a square, returning whatever was there before. Placing a piece off of the board does
    /// nothing.
    pub fn set_piece(&mut self, coord: Coord, piece: Piece) -> Option<Piece> {
        let idx = self.index(coord)?;
        let previous = self.squares[idx].replace(piece);
        if let Some(previous) = previous {
            zobrist::modify_piece(&mut self.zobrist_hash, idx, previous);
        }
        zobrist::modify_piece(&mut self.zobrist_hash, idx, piece);
        previous
    }

    /// Clears a square, returning the piece that was on it.
    pub fn remove_piece(&mut self, coord: Coord) -> Option<Piece> {
        let idx = self.index(coord)?;
        let previous = self.squares[idx].take();
        if let Some(previous) = previous {
            zobrist::modify_piece(&mut self.zobrist_hash, idx, previous);
        }
        previous
    }

    /// Iterates over every square of the board in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = (Coord, Option<Piece>)> + '_ {
        let size = self.size;
        self.squares.iter().enumerate().map(move |(idx, &square)| {
            let coord = Coord::new((idx / size) as i32, (idx % size) as i32);
            (coord, square)
        })
    }

    /// Iterates over every piece of the given color in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.squares()
            .filter_map(move |(coord, square)| match square {
                Some(piece) if piece.color == color => Some((coord, piece)),
                _ => None,
            })
    }

    /// Number of pieces of the given color on the board.
    pub fn count(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    /// Locates the first king of the given color, scanning in row-major order.
    pub fn king(&self, color: Color) -> Option<Coord> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(coord, _)| coord)
    }

    /// Produces the canonical layout string for this board: rows from row 0 downwards separated by `/`, pieces as
    /// letters (upper case for White) and runs of empty squares as decimal numbers.
    pub fn as_layout(&self) -> String {
        let mut buf = String::new();
        for (row, chunk) in self.squares.chunks(self.size).enumerate() {
            if row != 0 {
                buf.push('/');
            }

            let mut empty_run = 0;
            for square in chunk {
                match square {
                    Some(piece) => {
                        if empty_run != 0 {
                            let _ = write!(&mut buf, "{}", empty_run);
                            empty_run = 0;
                        }
                        let _ = write!(&mut buf, "{}", piece);
                    }
                    None => empty_run += 1,
                }
            }

            if empty_run != 0 {
                let _ = write!(&mut buf, "{}", empty_run);
            }
        }

        buf
    }

    /// Parses a layout string, as produced by `as_layout`.
    pub fn from_layout<S: AsRef<str>>(layout: S) -> Result<Board, BoardParseError> {
        let layout = layout.as_ref().trim();
        if layout.is_empty() {
            return Err(BoardParseError::Empty);
        }

        let rows: Vec<&str> = layout.split('/').collect();
        let size = rows.len();
        let mut board = Board::try_new(size)?;
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0usize;
            let mut chars = text.chars().peekable();
            while let Some(c) = chars.next() {
                if let Some(digit) = c.to_digit(10) {
                    let mut run = digit as usize;
                    while let Some(next) = chars.peek().and_then(|n| n.to_digit(10)) {
                        run = run.saturating_mul(10).saturating_add(next as usize);
                        chars.next();
                    }
                    col = col.saturating_add(run);
                } else {
                    let piece = Piece::try_from(c)?;
                    if col < size {
                        board.set_piece(Coord::new(row as i32, col as i32), piece);
                    }
                    col += 1;
                }

                // a row that is already too wide can't become valid
                if col > size {
                    break;
                }
            }

            if col != size {
                return Err(BoardParseError::NotSquare {
                    row,
                    width: col,
                    expected: size,
                });
            }
        }

        Ok(board)
    }
}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.zobrist_hash);
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_layout(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_layout())
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_layout())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let layout = String::deserialize(deserializer)?;
        Board::from_layout(layout).map_err(de::Error::custom)
    }
}

/// Pretty-prints a board as a grid, one rank per line, for terminal output.
pub struct Grid<'a>(pub &'a Board);

impl fmt::Display for Grid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for (coord, square) in board.squares() {
            if coord.col == 0 {
                write!(f, " {:>2} ", board.size() as i32 - coord.row)?;
            }
            match square {
                Some(piece) => write!(f, " {}", piece)?,
                None => write!(f, " .")?,
            }
            if coord.col as usize == board.size() - 1 {
                writeln!(f)?;
            }
        }

        write!(f, "    ")?;
        for col in 0..board.size() {
            write!(f, " {}", (b'a' + col as u8) as char)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of(board: &Board) -> u64 {
        let mut hasher = DefaultHasher::new();
        board.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn layout_round_trip() {
        let layout = "rnqknr/pppppp/6/6/PPPPPP/RNQKNR";
        let board = Board::from_layout(layout).unwrap();
        assert_eq!(6, board.size());
        assert_eq!(layout, board.as_layout());
        assert_eq!(
            Some(Piece::new(Color::Black, PieceKind::King)),
            board.piece_at(Coord::new(0, 3))
        );
        assert_eq!(
            Some(Piece::new(Color::White, PieceKind::Queen)),
            board.piece_at(Coord::new(5, 2))
        );
        assert_eq!(None, board.piece_at(Coord::new(2, 2)));
    }

    #[test]
    fn multi_digit_runs() {
        let mut rows = vec!["12".to_string(); 12];
        rows[0] = "k11".to_string();
        rows[11] = "10PK".to_string();
        let board = Board::from_layout(rows.join("/")).unwrap();
        assert_eq!(12, board.size());
        assert_eq!(rows.join("/"), board.as_layout());
    }

    #[test]
    fn rejects_non_square() {
        assert_eq!(
            Err(BoardParseError::NotSquare {
                row: 1,
                width: 2,
                expected: 3
            }),
            Board::from_layout("3/2/3")
        );
        assert_eq!(
            Err(BoardParseError::NotSquare {
                row: 0,
                width: 4,
                expected: 3
            }),
            Board::from_layout("kppp/3/3")
        );
    }

    #[test]
    fn rejects_huge_empty_runs() {
        assert!(matches!(
            Board::from_layout("k99999999999999999999999/2"),
            Err(BoardParseError::NotSquare { row: 0, expected: 2, .. })
        ));
        assert!(matches!(
            Board::from_layout("18446744073709551615k/2"),
            Err(BoardParseError::NotSquare { row: 0, expected: 2, .. })
        ));
        assert!(matches!(
            Board::from_layout("18446744073709551615kkk/2"),
            Err(BoardParseError::NotSquare { row: 0, expected: 2, .. })
        ));
        assert!("2/99999999999999999999999999999999".parse::<Board>().is_err());
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Err(BoardParseError::Empty), Board::from_layout("  "));
        assert_eq!(
            Err(BoardParseError::InvalidPiece(PieceParseError::InvalidChar(
                'x'
            ))),
            Board::from_layout("x1/2")
        );
        assert_eq!(Err(BoardError::InvalidSize(0)), Board::try_new(0));
        assert_eq!(
            Err(BoardError::InvalidSize(MAX_BOARD_SIZE + 1)),
            Board::try_new(MAX_BOARD_SIZE + 1)
        );
    }

    #[test]
    fn out_of_range_squares_are_empty() {
        let board = Board::from_layout("K1/1k").unwrap();
        assert_eq!(None, board.piece_at(Coord::new(-1, 0)));
        assert_eq!(None, board.piece_at(Coord::new(0, 2)));
        assert!(!board.contains(Coord::new(2, 0)));
    }

    #[test]
    fn hash_tracks_content() {
        let a = Board::from_layout("k2/3/2K").unwrap();
        let mut b = Board::from_layout("3/3/2K").unwrap();
        assert_ne!(a.zobrist_hash(), b.zobrist_hash());
        b.set_piece(Coord::new(0, 0), Piece::new(Color::Black, PieceKind::King));
        assert_eq!(a, b);
        assert_eq!(a.zobrist_hash(), b.zobrist_hash());
        assert_eq!(hash_of(&a), hash_of(&b));

        b.remove_piece(Coord::new(0, 0));
        assert_eq!(Board::from_layout("3/3/2K").unwrap().zobrist_hash(), b.zobrist_hash());
    }

    #[test]
    fn replacing_a_piece_updates_hash() {
        let mut board = Board::from_layout("r1/2").unwrap();
        let old = board.set_piece(Coord::new(0, 0), Piece::new(Color::White, PieceKind::Queen));
        assert_eq!(Some(Piece::new(Color::Black, PieceKind::Rook)), old);
        assert_eq!(Board::from_layout("Q1/2").unwrap(), board);
        assert_eq!(
            Board::from_layout("Q1/2").unwrap().zobrist_hash(),
            board.zobrist_hash()
        );
    }

    #[test]
    fn king_lookup_is_row_major() {
        let board = Board::from_layout("3/1K1/K2").unwrap();
        assert_eq!(Some(Coord::new(1, 1)), board.king(Color::White));
        assert_eq!(None, board.king(Color::Black));
        assert_eq!(2, board.count(Color::White));
    }

    #[test]
    fn serde_uses_layout_string() {
        let board = Board::from_layout("k1/1K").unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!("\"k1/1K\"", json);
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, back);
        assert!(serde_json::from_str::<Board>("\"k/1K\"").is_err());
    }
}
