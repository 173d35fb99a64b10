// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Built-in starting layouts.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::core::{Board, BoardParseError};

/// 6×6 board with a rook, knight, queen, king, knight, rook back rank.
pub const STANDARD: &str = "rnqknr/pppppp/6/6/PPPPPP/RNQKNR";

/// 6×6 board with bishops in place of the knights.
pub const WITH_BISHOPS: &str = "rbqkbr/pppppp/6/6/PPPPPP/RBQKBR";

/// The classic 8×8 arrangement.
pub const FULL_SIZED: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

lazy_static::lazy_static! {
    static ref STANDARD_BOARD: Board = Board::from_layout(STANDARD).expect("built-in layout is well-formed");
    static ref WITH_BISHOPS_BOARD: Board = Board::from_layout(WITH_BISHOPS).expect("built-in layout is well-formed");
    static ref FULL_SIZED_BOARD: Board = Board::from_layout(FULL_SIZED).expect("built-in layout is well-formed");
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    Standard,
    WithBishops,
    FullSized,
}

impl Layout {
    pub fn board(self) -> Board {
        match self {
            Layout::Standard => STANDARD_BOARD.clone(),
            Layout::WithBishops => WITH_BISHOPS_BOARD.clone(),
            Layout::FullSized => FULL_SIZED_BOARD.clone(),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layout::Standard => "standard",
            Layout::WithBishops => "bishops",
            Layout::FullSized => "full",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
#[error("unknown layout: {0}")]
pub struct LayoutParseError(String);

impl FromStr for Layout {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Layout::Standard),
            "bishops" => Ok(Layout::WithBishops),
            "full" => Ok(Layout::FullSized),
            other => Err(LayoutParseError(other.to_owned())),
        }
    }
}

/// Resolves either a built-in layout name or a literal layout string into a board.
pub fn resolve(name: &str) -> Result<Board, BoardParseError> {
    match name.parse::<Layout>() {
        Ok(layout) => Ok(layout.board()),
        Err(_) => Board::from_layout(name),
    }
}

pub fn standard() -> Board {
    Layout::Standard.board()
}
