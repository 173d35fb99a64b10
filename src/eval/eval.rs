// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::sync::Arc;

use crate::{
    core::{Board, Color, PieceKind},
    eval::Value,
};

const KING_WEIGHT: i32 = 900;
const QUEEN_WEIGHT: i32 = 90;
const ROOK_WEIGHT: i32 = 50;
const BISHOP_WEIGHT: i32 = 30;
const KNIGHT_WEIGHT: i32 = 30;
const PAWN_WEIGHT: i32 = 10;

/// A static evaluation function. Evaluators score a board from one fixed perspective, chosen when the evaluator is
/// built, and are shared between search threads.
pub type Evaluator = Arc<dyn Fn(&Board) -> Value + Send + Sync>;

pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_WEIGHT,
        PieceKind::Knight => KNIGHT_WEIGHT,
        PieceKind::Bishop => BISHOP_WEIGHT,
        PieceKind::Rook => ROOK_WEIGHT,
        PieceKind::Queen => QUEEN_WEIGHT,
        PieceKind::King => KING_WEIGHT,
    }
}

/// Material balance from `side`'s perspective: its pieces count for it, its opponent's pieces count against it.
pub fn material(side: Color) -> Evaluator {
    Arc::new(move |board: &Board| {
        let mut total = 0;
        for (_, square) in board.squares() {
            if let Some(piece) = square {
                let value = piece_value(piece.kind);
                if piece.color == side {
                    total += value;
                } else {
                    total -= value;
                }
            }
        }

        Value::new(total)
    })
}

/// Scores every board as zero.
pub fn zero() -> Evaluator {
    Arc::new(|_: &Board| Value::new(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts;

    #[test]
    fn starting_material_is_balanced() {
        let board = layouts::standard();
        assert_eq!(Value::new(0), material(Color::White)(&board));
        assert_eq!(Value::new(0), material(Color::Black)(&board));
    }

    #[test]
    fn material_is_perspective_relative() {
        let board = Board::from_layout("k3/4/1q2/R2K").unwrap();
        assert_eq!(Value::new(50 - 90), material(Color::White)(&board));
        assert_eq!(Value::new(90 - 50), material(Color::Black)(&board));
    }

    #[test]
    fn zero_is_zero() {
        assert_eq!(Value::new(0), zero()(&layouts::standard()));
    }
}
