// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skirmish::core::Color;
use skirmish::eval::{self, material};
use skirmish::layouts;
use skirmish::search::{SearchEngine, SearchOptions};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("material-eval", |b| {
        let board = layouts::standard();
        let evaluator = material(Color::White);
        b.iter(|| evaluator(black_box(&board)));
    });

    c.bench_function("search-depth-3-cold", |b| {
        let board = layouts::standard();
        b.iter(|| {
            let engine = SearchEngine::configure(material(Color::White), 3);
            engine.search(black_box(&board), Color::White, &SearchOptions::default())
        });
    });

    c.bench_function("search-depth-3-warm", |b| {
        let board = layouts::standard();
        let engine = SearchEngine::configure(material(Color::White), 3);
        engine.search(&board, Color::White, &SearchOptions::default());
        b.iter(|| engine.search(black_box(&board), Color::White, &SearchOptions::default()));
    });

    c.bench_function("search-depth-2-zero-eval", |b| {
        let board = layouts::resolve("bishops").unwrap();
        b.iter(|| {
            let engine = SearchEngine::configure(eval::zero(), 2);
            engine.get_best_move(black_box(&board), Color::Black)
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
