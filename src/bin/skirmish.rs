// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{fs::File, path::PathBuf, str::FromStr};

use anyhow::{anyhow, Context};
use skirmish::{
    agents::{self, GreedyPlayer, Player, RandomPlayer, SearchPlayer},
    config::SearchSettings,
    core::Grid,
    layouts,
};
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Clone, Copy)]
enum PlayerKind {
    Search,
    Random,
    Greedy,
}

impl FromStr for PlayerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<PlayerKind> {
        match s {
            "search" => Ok(PlayerKind::Search),
            "random" => Ok(PlayerKind::Random),
            "greedy" => Ok(PlayerKind::Greedy),
            _ => Err(anyhow!("unknown player `{}` (expected search, random or greedy)", s)),
        }
    }
}

/// Plays a game between two computer players.
#[derive(Debug, StructOpt)]
struct Options {
    /// Starting layout: `standard`, `bishops`, `full`, or a layout string.
    #[structopt(short, long, default_value = "standard")]
    layout: String,
    /// Player for White: `search`, `random` or `greedy`.
    #[structopt(short, long, default_value = "search")]
    white: PlayerKind,
    /// Player for Black: `search`, `random` or `greedy`.
    #[structopt(short, long, default_value = "random")]
    black: PlayerKind,
    /// Search depth for search players. Overrides the settings file.
    #[structopt(short, long)]
    depth: Option<u32>,
    /// JSON settings file for search players.
    #[structopt(long)]
    config: Option<PathBuf>,
    /// Seed for random players.
    #[structopt(long)]
    seed: Option<u64>,
    /// Maximum number of moves to play before giving up on the game.
    #[structopt(long, default_value = "200")]
    max_turns: usize,
    /// File to write the game record to, as JSON.
    #[structopt(long)]
    record: Option<PathBuf>,
}

fn make_player(kind: PlayerKind, settings: &SearchSettings, seed: Option<u64>) -> Box<dyn Player> {
    match kind {
        PlayerKind::Search => Box::new(SearchPlayer::from_settings(settings)),
        PlayerKind::Random => match seed {
            Some(seed) => Box::new(RandomPlayer::new(seed)),
            None => Box::new(RandomPlayer::from_entropy()),
        },
        PlayerKind::Greedy => Box::new(GreedyPlayer),
    }
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_env("SKIRMISH_LOG"))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Options::from_args();
    let mut settings = match args.config {
        Some(ref path) => SearchSettings::load(path)?,
        None => SearchSettings::default(),
    };
    if let Some(depth) = args.depth {
        settings.depth = depth;
    }

    let board = layouts::resolve(&args.layout)
        .with_context(|| format!("invalid layout `{}`", args.layout))?;
    let mut white = make_player(args.white, &settings, args.seed);
    let mut black = make_player(args.black, &settings, args.seed.map(|s| s.wrapping_add(1)));
    let record = agents::play_game(white.as_mut(), black.as_mut(), board, args.max_turns);

    print!("{}", Grid(&record.initial));
    let size = record.initial.size();
    for (i, mov) in record.moves.iter().enumerate() {
        let legality = if mov.was_legal { "" } else { " (illegal)" };
        println!("{:>4}. {}{}", i + 1, mov.as_notation(size), legality);
    }
    print!("{}", Grid(&record.final_board));
    match record.winner {
        Some(winner) => println!("{} wins after {} moves", winner, record.moves.len()),
        None => println!("no winner after {} moves", record.moves.len()),
    }

    if let Some(ref path) = args.record {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &record)?;
    }

    Ok(())
}
