// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move generation.
//!
//! Moves are generated by brute force: for every source square holding a piece of the side to move, every square
//! of the board is tried as a destination against `rules::is_legal_move`. The resulting order (row-major source,
//! then row-major destination) is relied upon by the search for deterministic tie-breaking.

use crate::core::{Board, Color, Coord, Move};
use crate::rules;

/// Appends every legal move starting at `from` to `moves`.
pub fn generate_moves_from(board: &Board, from: Coord, moves: &mut Vec<Move>) {
    for (to, _) in board.squares() {
        let mov = Move::new(from, to);
        if rules::is_legal_move(board, mov) {
            moves.push(mov);
        }
    }
}

/// Appends every legal move for `us` to `moves`. King safety is not considered.
pub fn generate_moves(us: Color, board: &Board, moves: &mut Vec<Move>) {
    for (from, _) in board.pieces(us) {
        generate_moves_from(board, from, moves);
    }
}

/// Appends every legal move for `us` that does not leave `us` in check.
pub fn generate_safe_moves(us: Color, board: &Board, moves: &mut Vec<Move>) {
    let start = moves.len();
    generate_moves(us, board, moves);
    let generated = moves.split_off(start);
    moves.extend(
        generated
            .into_iter()
            .filter(|&mov| !rules::will_be_in_check(board, mov)),
    );
}

/// Generates the legal moves for both colors at once, in the same order `generate_moves` would produce them.
pub fn generate_all_moves(board: &Board) -> (Vec<Move>, Vec<Move>) {
    let mut white = Vec::new();
    let mut black = Vec::new();
    for (from, square) in board.squares() {
        match square {
            Some(piece) if piece.color == Color::White => {
                generate_moves_from(board, from, &mut white)
            }
            Some(_) => generate_moves_from(board, from, &mut black),
            None => {}
        }
    }

    (white, black)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts;

    #[test]
    fn standard_opening_moves() {
        let board = layouts::standard();
        let mut moves = Vec::new();
        generate_moves(Color::White, &board, &mut moves);
        // six pawn pushes and two knight moves for each knight
        assert_eq!(10, moves.len());
        assert_eq!(Move::new(Coord::new(4, 0), Coord::new(3, 0)), moves[0]);
        assert!(moves.iter().all(|m| m.row_delta() < 0));
    }

    #[test]
    fn moves_are_row_major() {
        let board = Board::from_layout("4/1R2/4/R3").unwrap();
        let mut moves = Vec::new();
        generate_moves(Color::White, &board, &mut moves);
        let sources: Vec<_> = moves.iter().map(|m| m.from).collect();
        let mut sorted = sources.clone();
        sorted.sort();
        assert_eq!(sorted, sources);
        for pair in moves.windows(2) {
            if pair[0].from == pair[1].from {
                assert!(pair[0].to < pair[1].to);
            }
        }
    }

    #[test]
    fn safe_moves_exclude_self_check() {
        let board = Board::from_layout("4/1k2/4/R2K").unwrap();
        let mut all = Vec::new();
        let mut safe = Vec::new();
        generate_moves(Color::Black, &board, &mut all);
        generate_safe_moves(Color::Black, &board, &mut safe);
        assert!(all.contains(&Move::new(Coord::new(1, 1), Coord::new(1, 0))));
        assert!(!safe.contains(&Move::new(Coord::new(1, 1), Coord::new(1, 0))));
        assert!(safe.len() < all.len());
        assert!(safe.iter().all(|m| !rules::will_be_in_check(&board, *m)));
    }

    #[test]
    fn safe_moves_keep_existing_entries_and_order() {
        let board = Board::from_layout("4/1k2/4/R2K").unwrap();
        let sentinel = Move::null();
        let mut moves = vec![sentinel];
        generate_safe_moves(Color::Black, &board, &mut moves);
        assert_eq!(sentinel, moves[0]);

        let mut all = Vec::new();
        generate_moves(Color::Black, &board, &mut all);
        let expected: Vec<_> = all
            .into_iter()
            .filter(|&m| !rules::will_be_in_check(&board, m))
            .collect();
        assert_eq!(expected, moves[1..]);
    }

    #[test]
    fn all_moves_split_by_color() {
        let board = layouts::standard();
        let (white, black) = generate_all_moves(&board);
        let mut expected_white = Vec::new();
        let mut expected_black = Vec::new();
        generate_moves(Color::White, &board, &mut expected_white);
        generate_moves(Color::Black, &board, &mut expected_black);
        assert_eq!(expected_white, white);
        assert_eq!(expected_black, black);
    }
}
