// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The search engine's transposition table, which memoizes the topology of the game tree.
//!
//! Many different sequences of moves lead to the same board; borrowing from Chess parlance, these are called
//! "transpositions". The table stores one node per distinct board it has seen. A node records the static score of
//! its board and, once the node has been expanded, the lists of successor boards reachable by White and by Black.
//! Expanding a transposed board a second time reuses those lists instead of regenerating every legal move.
//!
//! The table deliberately does *not* memoize minimax values. A node's value depends on the alpha-beta window it
//! was searched with, and that window differs from call to call; only the children are safe to reuse.
//!
//! Nodes are never evicted by the table itself. The table grows for as long as its owner keeps searching, unless
//! the owner clears it (see `SearchConfig::cache_limit`).
//!
//! The table is backed by a concurrent hash map, so that the workers of a parallel search can share it. Callers
//! must never hold on to an entry while inserting into the table; every accessor here copies what it needs out of
//! the map before returning.
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use chashmap::CHashMap;

use crate::{
    core::{Board, Color},
    eval::Value,
};

/// The key of a node: the board itself, shared. Keys compare by full board content and hash by the board's Zobrist
/// hash.
#[derive(Clone, PartialEq, Eq)]
pub struct NodeKey(Arc<Board>);

impl NodeKey {
    pub fn new(board: Board) -> NodeKey {
        NodeKey(Arc::new(board))
    }

    pub fn board(&self) -> &Board {
        &self.0
    }
}

impl Hash for NodeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeKey({})", self.0)
    }
}

/// A successor of a node, together with its static score.
#[derive(Clone, Debug)]
pub struct Child {
    pub key: NodeKey,
    pub score: Value,
}

/// The successors of a node, split by the color that moves to reach them. Both lists are in move generation order.
#[derive(Debug, Default)]
pub struct Children {
    white: Vec<Child>,
    black: Vec<Child>,
}

impl Children {
    pub fn new(white: Vec<Child>, black: Vec<Child>) -> Children {
        Children { white, black }
    }

    pub fn for_color(&self, color: Color) -> &[Child] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

struct Node {
    score: Value,
    children: Option<Arc<Children>>,
}

pub struct Table {
    map: CHashMap<NodeKey, Node>,
}

impl Table {
    pub fn new() -> Table {
        Table {
            map: CHashMap::new(),
        }
    }

    /// Number of distinct boards in the table.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&self) {
        let _ = self.map.clear();
    }

    /// The static score recorded for a board, if the board has been seen.
    pub fn score(&self, key: &NodeKey) -> Option<Value> {
        self.map.get(key).map(|node| node.score)
    }

    /// The children of a board, if the board has been seen and expanded.
    pub fn children(&self, key: &NodeKey) -> Option<Arc<Children>> {
        self.map.get(key).and_then(|node| node.children.clone())
    }

    /// Records a newly seen board with its static score, leaving it unexpanded. If the board is already present it
    /// is left untouched.
    pub fn record_unexplored(&self, key: NodeKey, score: Value) {
        self.map.upsert(
            key,
            || Node {
                score,
                children: None,
            },
            |_| {},
        );
    }

    /// Records the children of a board, inserting the board if it is not present.
    pub fn record_children(&self, key: NodeKey, score: Value, children: Arc<Children>) {
        let inserted = children.clone();
        self.map.upsert(
            key,
            move || Node {
                score,
                children: Some(inserted),
            },
            move |node| node.children = Some(children),
        );
    }
}

impl Default for Table {
    fn default() -> Table {
        Table::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts;

    #[test]
    fn keys_compare_by_content() {
        let a = NodeKey::new(layouts::standard());
        let b = NodeKey::new(layouts::standard());
        assert_eq!(a, b);
        let table = Table::new();
        table.record_unexplored(a, Value::new(3));
        assert_eq!(Some(Value::new(3)), table.score(&b));
        assert_eq!(1, table.len());
    }

    #[test]
    fn unexplored_until_children_recorded() {
        let key = NodeKey::new(layouts::standard());
        let table = Table::new();
        table.record_unexplored(key.clone(), Value::new(0));
        assert!(table.children(&key).is_none());

        let child = Child {
            key: NodeKey::new(Board::from_layout("k1/1K").unwrap()),
            score: Value::new(7),
        };
        table.record_children(
            key.clone(),
            Value::new(0),
            Arc::new(Children::new(vec![child], vec![])),
        );
        let children = table.children(&key).unwrap();
        assert_eq!(1, children.for_color(Color::White).len());
        assert!(children.for_color(Color::Black).is_empty());
    }

    #[test]
    fn record_unexplored_keeps_existing_node() {
        let key = NodeKey::new(layouts::standard());
        let table = Table::new();
        table.record_children(key.clone(), Value::new(1), Arc::new(Children::default()));
        table.record_unexplored(key.clone(), Value::new(99));
        assert_eq!(Some(Value::new(1)), table.score(&key));
        assert!(table.children(&key).is_some());
    }

    #[test]
    fn clear_empties_table() {
        let table = Table::new();
        table.record_unexplored(NodeKey::new(layouts::standard()), Value::new(0));
        assert!(!table.is_empty());
        table.clear();
        assert!(table.is_empty());
    }
}
