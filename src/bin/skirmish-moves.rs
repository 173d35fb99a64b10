// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::Context;
use structopt::StructOpt;

use skirmish::{core::Color, layouts, movegen};

/// Lists the legal moves of one color.
#[derive(Debug, StructOpt)]
struct Options {
    /// Layout of the position: `standard`, `bishops`, `full`, or a layout string.
    #[structopt(name = "LAYOUT")]
    layout: String,
    /// Color whose moves to list.
    #[structopt(short, long, default_value = "white")]
    color: Color,
    /// Leave out moves that would put the mover's own king in check.
    #[structopt(short, long)]
    safe: bool,
}

fn main() -> anyhow::Result<()> {
    let ops = Options::from_args();
    let board = layouts::resolve(&ops.layout)
        .with_context(|| format!("invalid layout `{}`", ops.layout))?;
    let mut moves = Vec::new();
    if ops.safe {
        movegen::generate_safe_moves(ops.color, &board, &mut moves);
    } else {
        movegen::generate_moves(ops.color, &board, &mut moves);
    }

    for mov in moves {
        let piece = board
            .piece_at(mov.from)
            .context("generated a move from an empty square")?;
        println!("{}", mov.as_notation(piece, board.size()));
    }

    Ok(())
}
