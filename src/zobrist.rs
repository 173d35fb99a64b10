// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Zobrist keys for boards of any supported size.
//!
//! Every (square index, piece) pair gets a random 64-bit key; the hash of a board is the XOR of the keys of every
//! occupied square. Hashes are updated incrementally as pieces are placed and removed.

use crate::core::{Piece, MAX_BOARD_SIZE};

struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    pub const fn new(seed: u64) -> Xorshift64 {
        Xorshift64 { state: seed }
    }

    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        self.state
    }
}

const PIECE_KEYS: usize = 12;
const SQUARE_COUNT: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE;

struct ZobristHasher {
    magic_hashes: Vec<u64>,
}

impl ZobristHasher {
    pub fn new(seed: u64) -> ZobristHasher {
        let mut rng = Xorshift64::new(seed);
        let magic_hashes = (0..SQUARE_COUNT * PIECE_KEYS).map(|_| rng.next()).collect();
        ZobristHasher { magic_hashes }
    }

    pub fn square_hash(&self, index: usize, piece: Piece) -> u64 {
        // One block of twelve keys per square, white pieces first.
        self.magic_hashes[PIECE_KEYS * index + piece.index()]
    }
}

const ZOBRIST_SEED: u64 = 0xf68e34a4e8ccf09a;

lazy_static::lazy_static! {
    static ref ZOBRIST_HASHER: ZobristHasher = ZobristHasher::new(ZOBRIST_SEED);
}

/// Toggles `piece` on the square with row-major index `index` in `hash`.
pub fn modify_piece(hash: &mut u64, index: usize, piece: Piece) {
    *hash ^= ZOBRIST_HASHER.square_hash(index, piece);
}
