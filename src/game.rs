// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! State transitions.
//!
//! `submit_action` is the only way a game progresses. Its rules are deliberately punitive:
//!   * touching a square that does not hold one of your pieces wastes your turn,
//!   * asking one of your pieces to make a move it can't make forfeits that piece,
//!   * capturing a king (including forfeiting your own) ends the game.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Board, Color, Move, Piece, PieceKind};
use crate::rules;

/// Whose turn it is, or whether the game is over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    ToMove(Color),
    GameOver,
}

/// A record of the move that produced a game state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    /// The piece that attempted to move, if there was one on the source square.
    pub piece: Option<Piece>,
    pub mov: Move,
    pub was_legal: bool,
    /// Whether or not the destination square was occupied.
    pub was_attack: bool,
}

impl LastMove {
    /// Renders this move in notation (see `Move::as_notation`) for a board of the given size.
    pub fn as_notation(&self, size: usize) -> String {
        match self.piece {
            Some(piece) => self.mov.as_notation(piece, size),
            None => format!("-{}", self.mov.as_notation_squares(size)),
        }
    }
}

/// The state of a game after a move has been submitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Turn,
    pub winner: Option<Color>,
    pub last_move: LastMove,
}

impl GameState {
    pub fn color_to_move(&self) -> Option<Color> {
        match self.turn {
            Turn::ToMove(color) => Some(color),
            Turn::GameOver => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.turn == Turn::GameOver
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.last_move.as_notation(self.board.size()))?;
        if !self.last_move.was_legal {
            write!(f, " (illegal)")?;
        }
        match (self.turn, self.winner) {
            (Turn::GameOver, Some(winner)) => write!(f, ", {} wins", winner),
            (Turn::ToMove(color), _) => write!(f, ", {} to move", color),
            (Turn::GameOver, None) => write!(f, ", game over"),
        }
    }
}

/// Applies `mov` on behalf of `to_move` and produces the next game state. The input board is never modified.
pub fn submit_action(board: &Board, to_move: Color, mov: Move) -> GameState {
    let piece = board.piece_at(mov.from);
    let was_attack = board.piece_at(mov.to).is_some();
    let opponent = to_move.toggle();
    let mut next = board.clone();

    let owned = match piece {
        Some(p) if p.color == to_move => p,
        _ => {
            // Not the mover's piece (or not a piece, or not a square): the turn is wasted.
            tracing::debug!(%mov, color = ?to_move, "rejected move, turn wasted");
            return GameState {
                board: next,
                turn: Turn::ToMove(opponent),
                winner: None,
                last_move: LastMove {
                    piece,
                    mov,
                    was_legal: false,
                    was_attack,
                },
            };
        }
    };

    if !rules::is_legal_move(board, mov) {
        tracing::debug!(%mov, piece = %owned, "illegal move, piece forfeited");
        next.remove_piece(mov.from);
        let (turn, winner) = if owned.kind == PieceKind::King {
            (Turn::GameOver, Some(opponent))
        } else {
            (Turn::ToMove(opponent), None)
        };

        return GameState {
            board: next,
            turn,
            winner,
            last_move: LastMove {
                piece,
                mov,
                was_legal: false,
                was_attack,
            },
        };
    }

    let captured = next.remove_piece(mov.to);
    next.remove_piece(mov.from);
    let landed = if owned.kind == PieceKind::Pawn && mov.to.row == to_move.promotion_row(board.size())
    {
        Piece::new(to_move, PieceKind::Queen)
    } else {
        owned
    };
    next.set_piece(mov.to, landed);

    let (turn, winner) = match captured {
        Some(Piece {
            kind: PieceKind::King,
            ..
        }) => (Turn::GameOver, Some(to_move)),
        _ => (Turn::ToMove(opponent), None),
    };

    GameState {
        board: next,
        turn,
        winner,
        last_move: LastMove {
            piece,
            mov,
            was_legal: true,
            was_attack,
        },
    }
}
