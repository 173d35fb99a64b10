// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use serde::{Deserialize, Serialize};

const VALUE_MAX: i32 = i32::MAX;
const VALUE_MIN: i32 = -i32::MAX;

/// A Value is the score given to a board, either by static evaluation or by search. Larger is better for the side
/// the evaluation function scores for.
///
/// # Representation
/// A Value wraps an i32. The two extremes of the (symmetric) range are reserved for the search's infinities: they
/// are the initial bounds of an alpha-beta window and the result of searching a node whose side to move has no
/// moves at all. `Value::new` never produces them; scores outside the finite range are clamped into it.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(i32);

impl Value {
    pub const NEGATIVE_INFINITY: Value = Value(VALUE_MIN);
    pub const POSITIVE_INFINITY: Value = Value(VALUE_MAX);

    /// Largest finite score.
    pub const MAX: Value = Value(VALUE_MAX - 1);

    /// Smallest finite score.
    pub const MIN: Value = Value(VALUE_MIN + 1);

    pub fn new(score: i32) -> Value {
        Value(score.clamp(VALUE_MIN + 1, VALUE_MAX - 1))
    }

    pub fn is_infinite(self) -> bool {
        self.0 == VALUE_MIN || self.0 == VALUE_MAX
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            VALUE_MAX => write!(f, "+inf"),
            VALUE_MIN => write!(f, "-inf"),
            v => write!(f, "{}", v),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
