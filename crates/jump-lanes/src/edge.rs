//! Edge model: jumps between two document positions.
//!
//! A [`Jump`] is the raw form handed over by a trace/disassembly layer, including its execution
//! count. Only executed jumps take part in layout; [`live_edges`] turns the raw list into the
//! [`Edge`] list a [`Sweep`](crate::Sweep) is built from.

use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an edge inside one sweep: its index in the sweep's edge list.
///
/// Two edges with identical endpoints are still distinct edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub usize);

impl EdgeId {
    /// Index of the edge in the sweep's edge list.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which way a jump points in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Target lies after the source (`to > from`).
    Forward,
    /// Target lies before the source (`to < from`), e.g. a loop back-edge.
    Backward,
    /// Source and target are the same position.
    SelfLoop,
}

/// A raw jump as reported by the trace data, before filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jump<P> {
    /// Position where the jump is taken.
    pub from: P,
    /// Position the jump targets.
    pub to: P,
    /// Conditional branch (`true`) or unconditional jump (`false`).
    #[serde(default)]
    pub conditional: bool,
    /// Number of observed executions.
    pub executed: u64,
}

impl<P: Position> Jump<P> {
    /// Create an unconditional jump.
    pub fn new(from: P, to: P, executed: u64) -> Self {
        Self {
            from,
            to,
            conditional: false,
            executed,
        }
    }

    /// Mark the jump as conditional (or not).
    pub fn conditional(mut self, conditional: bool) -> Self {
        self.conditional = conditional;
        self
    }

    /// A jump is live when it was executed at least once.
    pub fn is_live(&self) -> bool {
        self.executed > 0
    }
}

/// One live jump, as laid out by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<P> {
    /// Position where the jump is taken.
    pub from: P,
    /// Position the jump targets.
    pub to: P,
    /// Conditional branch flag. Layout ignores it; painters use it for styling.
    #[serde(default)]
    pub conditional: bool,
    /// Execution count, passed through for painters/labels.
    pub executed: u64,
}

impl<P: Position> Edge<P> {
    /// Create an unconditional edge executed once.
    pub fn new(from: P, to: P) -> Self {
        Self {
            from,
            to,
            conditional: false,
            executed: 1,
        }
    }

    /// Set the conditional flag.
    pub fn with_conditional(mut self, conditional: bool) -> Self {
        self.conditional = conditional;
        self
    }

    /// Set the execution count.
    pub fn with_executed(mut self, executed: u64) -> Self {
        self.executed = executed;
        self
    }

    /// Lower bound of the interval covered by the edge.
    pub fn low(&self) -> P {
        self.from.min(self.to)
    }

    /// Upper bound of the interval covered by the edge.
    pub fn high(&self) -> P {
        self.from.max(self.to)
    }

    /// Direction of the jump in document order.
    pub fn direction(&self) -> Direction {
        match self.to.cmp(&self.from) {
            std::cmp::Ordering::Greater => Direction::Forward,
            std::cmp::Ordering::Less => Direction::Backward,
            std::cmp::Ordering::Equal => Direction::SelfLoop,
        }
    }

    /// Returns `true` if [`low`](Self::low) is the jump target.
    ///
    /// Self-loops count as target on both ends.
    pub fn low_is_target(&self) -> bool {
        self.to <= self.from
    }

    /// Returns `true` if [`high`](Self::high) is the jump target.
    ///
    /// Self-loops count as target on both ends.
    pub fn high_is_target(&self) -> bool {
        self.to >= self.from
    }

    /// Returns `true` if `position` lies within `[low, high]`.
    pub fn spans(&self, position: P) -> bool {
        self.low() <= position && position <= self.high()
    }
}

impl<P: Position> From<Jump<P>> for Edge<P> {
    fn from(jump: Jump<P>) -> Self {
        Self {
            from: jump.from,
            to: jump.to,
            conditional: jump.conditional,
            executed: jump.executed,
        }
    }
}

/// Keep only executed jumps, in input order.
///
/// No deduplication happens: two jumps with the same endpoints become two edges.
pub fn live_edges<P: Position>(jumps: impl IntoIterator<Item = Jump<P>>) -> Vec<Edge<P>> {
    let mut dropped = 0usize;
    let edges: Vec<Edge<P>> = jumps
        .into_iter()
        .filter(|jump| {
            let live = jump.is_live();
            if !live {
                dropped += 1;
            }
            live
        })
        .map(Edge::from)
        .collect();
    tracing::trace!(kept = edges.len(), dropped, "filtered jumps");
    edges
}
