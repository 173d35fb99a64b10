// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move legality.
//!
//! Every function in this module is pure and total: malformed input (coordinates off of the board, empty source
//! squares) never panics, it simply makes a move illegal. None of these functions consider whether a move leaves
//! the mover in check; `will_be_in_check` exists for callers that want to filter on that.

use crate::core::{Board, Color, Coord, Move, Piece, PieceKind};

/// Determines whether or not a move is legal on the given board, ignoring king safety.
///
/// The checks are, in order:
///   1. both coordinates lie on the board,
///   2. the source square holds a piece,
///   3. the destination does not hold a piece of the mover's color,
///   4. the move has the shape the moving piece is allowed to make,
///   5. nothing obstructs the path, unless the mover is a knight.
pub fn is_legal_move(board: &Board, mov: Move) -> bool {
    if !board.contains(mov.from) || !board.contains(mov.to) {
        return false;
    }

    let mover = match board.piece_at(mov.from) {
        Some(piece) => piece,
        None => return false,
    };

    let destination = board.piece_at(mov.to);
    if destination.map(|p| p.color) == Some(mover.color) {
        return false;
    }

    if !is_allowed_shape(mover, mov, destination.is_some()) {
        return false;
    }

    if mover.kind != PieceKind::Knight && pieces_between(board, mov.from, mov.to) {
        return false;
    }

    true
}

/// Whether the row and column deltas of `mov` match the movement pattern of `piece`. `is_capture` tells pawns
/// whether the destination is occupied.
pub fn is_allowed_shape(piece: Piece, mov: Move, is_capture: bool) -> bool {
    match piece.kind {
        PieceKind::Pawn => is_allowed_pawn_move(piece.color, mov, is_capture),
        PieceKind::Rook => is_allowed_rook_move(mov),
        PieceKind::Knight => is_allowed_knight_move(mov),
        PieceKind::Bishop => is_allowed_bishop_move(mov),
        PieceKind::Queen => is_allowed_queen_move(mov),
        PieceKind::King => is_allowed_king_move(mov),
    }
}

/// Pawns step exactly one row forward. They move straight onto empty squares and capture one column to either
/// side. There is no double step and no en passant.
pub fn is_allowed_pawn_move(color: Color, mov: Move, is_capture: bool) -> bool {
    let expected_col_delta = if is_capture { 1 } else { 0 };
    mov.row_delta() == color.forward() && mov.col_delta().abs() == expected_col_delta
}

pub fn is_allowed_rook_move(mov: Move) -> bool {
    let (dr, dc) = (mov.row_delta(), mov.col_delta());
    (dr == 0) != (dc == 0)
}

pub fn is_allowed_knight_move(mov: Move) -> bool {
    let (dr, dc) = (mov.row_delta().abs(), mov.col_delta().abs());
    (dr == 1 && dc == 2) || (dr == 2 && dc == 1)
}

pub fn is_allowed_bishop_move(mov: Move) -> bool {
    let (dr, dc) = (mov.row_delta().abs(), mov.col_delta().abs());
    dr == dc && dr != 0
}

pub fn is_allowed_queen_move(mov: Move) -> bool {
    is_allowed_rook_move(mov) || is_allowed_bishop_move(mov)
}

pub fn is_allowed_king_move(mov: Move) -> bool {
    let (dr, dc) = (mov.row_delta().abs(), mov.col_delta().abs());
    dr <= 1 && dc <= 1 && (dr, dc) != (0, 0)
}

/// Whether any square strictly between `start` and `end` is occupied. Only straight and diagonal lines have
/// squares in between; any other pair of squares (e.g. a knight's jump) reports `false`.
pub fn pieces_between(board: &Board, start: Coord, end: Coord) -> bool {
    let (dr, dc) = (end.row - start.row, end.col - start.col);
    let is_line = dr == 0 || dc == 0 || dr.abs() == dc.abs();
    if !is_line || (dr, dc) == (0, 0) {
        return false;
    }

    let step = (dr.signum(), dc.signum());
    let mut cursor = start.offset(step.0, step.1);
    while cursor != end {
        if board.piece_at(cursor).is_some() {
            return true;
        }
        cursor = cursor.offset(step.0, step.1);
    }

    false
}

/// Whether `color`'s king could be captured by any opposing piece on this board.
///
/// If `color` has no king, it is reported as not in check. Only raw shape and obstruction legality is used to
/// detect attackers, never king safety, so this never recurses into itself.
pub fn is_in_check(color: Color, board: &Board) -> bool {
    let king = match board.king(color) {
        Some(king) => king,
        None => return false,
    };

    board
        .pieces(color.toggle())
        .any(|(attacker, _)| is_legal_move(board, Move::new(attacker, king)))
}

/// Whether the mover would be in check after playing `mov`.
///
/// The move is simulated by relocating the piece on a copy of the board (without promotion). The caller is
/// expected to have already checked `is_legal_move`; if the source square is empty or off the board this
/// conservatively reports `true`.
pub fn will_be_in_check(board: &Board, mov: Move) -> bool {
    let mover = match board.piece_at(mov.from) {
        Some(piece) => piece,
        None => return true,
    };

    if !board.contains(mov.to) {
        return true;
    }

    let mut hypothetical = board.clone();
    hypothetical.remove_piece(mov.from);
    hypothetical.set_piece(mov.to, mover);
    is_in_check(mover.color, &hypothetical)
}
