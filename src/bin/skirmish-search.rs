// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::{fs::File, path::PathBuf};

use anyhow::Context;
use skirmish::{
    config::SearchSettings,
    core::{Color, Grid},
    eval::material,
    layouts,
    search::SearchEngine,
    threads,
    tracing::search::SearchLogLayer,
};
use structopt::StructOpt;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Shortcut program for debugging skirmish's search routines.
#[derive(Debug, StructOpt)]
struct Options {
    /// Layout of the position to analyze: `standard`, `bishops`, `full`, or a layout string.
    #[structopt(name = "LAYOUT")]
    layout: String,

    /// Color to search for.
    #[structopt(short, long, default_value = "white")]
    color: Color,
    /// Maximum amount of time to spend searching, in milliseconds.
    #[structopt(short, long)]
    time_ms: Option<u64>,
    /// Maximum number of nodes to search.
    #[structopt(short, long)]
    nodes: Option<u64>,
    /// Depth to search to.
    #[structopt(short, long)]
    depth: Option<u32>,
    /// Number of search threads. Defaults to one per CPU.
    #[structopt(long)]
    threads: Option<usize>,
    /// JSON settings file; command line options take precedence.
    #[structopt(long)]
    config: Option<PathBuf>,
    /// File to write a search event log to.
    #[structopt(long)]
    search_log: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Options::from_args();
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_env("SKIRMISH_LOG"));
    let log_layer = match args.search_log {
        Some(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to open search log {}", path.display()))?;
            Some(SearchLogLayer::new(file))
        }
        None => None,
    };
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(log_layer)
        .try_init()?;

    let mut settings = match args.config {
        Some(ref path) => SearchSettings::load(path)?,
        None => SearchSettings::default(),
    };
    if let Some(depth) = args.depth {
        settings.depth = depth;
    }
    if let Some(time_ms) = args.time_ms {
        settings.time_limit_ms = Some(time_ms);
    }
    if let Some(nodes) = args.nodes {
        settings.node_limit = Some(nodes);
    }
    let workers = args
        .threads
        .or(settings.threads)
        .unwrap_or_else(threads::default_workers);

    let board = layouts::resolve(&args.layout)
        .with_context(|| format!("invalid layout `{}`", args.layout))?;
    let engine = SearchEngine::new(settings.search_config(material(args.color)));
    let result =
        threads::parallel_search(&engine, &board, args.color, &settings.search_options(), workers);

    println!("===========================");
    print!("{}", Grid(&board));
    println!("===========================");
    match result.best_move {
        Some(mov) => {
            let piece = board
                .piece_at(mov.from)
                .context("best move starts on an empty square")?;
            println!("{:<15} {}", "Best Move:", mov.as_notation(piece, board.size()));
        }
        None => println!("{:<15} none", "Best Move:"),
    }
    match result.best_score {
        Some(score) => println!("{:<15} {}", "Best Score:", score),
        None => println!("{:<15} none", "Best Score:"),
    }
    println!("{:<15} {}", "Nodes:", result.nodes_evaluated);
    println!("{:<15} {}", "Cached Boards:", engine.cache_len());
    if let Some(reason) = result.termination {
        println!("{:<15} {:?}", "Terminated:", reason);
    }
    for ranked in &result.ranked_moves {
        println!("  {:<12} {}", ranked.mov.as_notation_squares(board.size()), ranked.score);
    }

    Ok(())
}
