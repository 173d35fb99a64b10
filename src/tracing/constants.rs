// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tracing constants that are used elsewhere in skirmish.
//!
//! The search creates spans and events with known string values, so that `tracing` Layers can interpret them. This
//! module collects them all in one place.

/// The name of a span representing one call to `SearchEngine::search`.
pub const SEARCH: &str = "search";

/// The name of a span representing the scoring of a single root move.
pub const ROOT_MOVE: &str = "root_move";

/// The name of a span representing one worker of a parallel search.
pub const WORKER: &str = "search_worker";

/// A search was prematurely ended, either through a time limit, node limit, or explicit stop.
pub const SEARCH_TERMINATION: &str = "explicit search termination";

/// A search finished and selected a move.
pub const SEARCH_COMPLETE: &str = "search complete";

/// A maximizing node's score reached the minimizer's cutoff.
pub const BETA_CUTOFF: &str = "beta cutoff";

/// A minimizing node's score reached the maximizer's cutoff.
pub const ALPHA_CUTOFF: &str = "alpha cutoff";
