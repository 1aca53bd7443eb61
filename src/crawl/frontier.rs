// src/crawl/frontier.rs
// =============================================================================
// The list of pages still waiting to be crawled.
//
// Breadth-first vs depth-first is just a question of which end we pop from:
// - Breadth-first: a FIFO queue (VecDeque), pages come out level by level
// - Depth-first: a LIFO stack (Vec), we follow the newest link first
//
// A stack would normally hand back a page's links in reverse order. To keep
// depth-first deterministic, a page's children are pushed in reverse, so the
// first link in the markup is the first one popped.
// =============================================================================

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::error::CrawlError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalMode {
    Bfs,
    Dfs,
}

impl FromStr for TraversalMode {
    type Err = CrawlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BFS" => Ok(TraversalMode::Bfs),
            "DFS" => Ok(TraversalMode::Dfs),
            _ => Err(CrawlError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalMode::Bfs => f.write_str("BFS"),
            TraversalMode::Dfs => f.write_str("DFS"),
        }
    }
}

#[derive(Debug)]
pub enum Frontier {
    Fifo(VecDeque<String>),
    Lifo(Vec<String>),
}

impl Frontier {
    pub fn new(mode: TraversalMode, seed: String) -> Self {
        match mode {
            TraversalMode::Bfs => Frontier::Fifo(VecDeque::from([seed])),
            TraversalMode::Dfs => Frontier::Lifo(vec![seed]),
        }
    }

    pub fn pop(&mut self) -> Option<String> {
        match self {
            Frontier::Fifo(queue) => queue.pop_front(),
            Frontier::Lifo(stack) => stack.pop(),
        }
    }

    // Adds the new pages discovered on one page, given in markup order
    pub fn push_children(&mut self, children: Vec<String>) {
        match self {
            Frontier::Fifo(queue) => queue.extend(children),
            Frontier::Lifo(stack) => stack.extend(children.into_iter().rev()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Frontier::Fifo(queue) => queue.is_empty(),
            Frontier::Lifo(stack) => stack.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Frontier::Fifo(queue) => queue.len(),
            Frontier::Lifo(stack) => stack.len(),
        }
    }
}
