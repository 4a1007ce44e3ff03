//! Sweep orderings over an edge set.
//!
//! A sweep discovers edge lifetimes in one forward pass. Two orders drive it:
//!
//! - **start order**: ascending by `low`; on equal `low`, an edge whose `low` is its target sorts
//!   before an edge whose `low` is its source;
//! - **end order**: ascending by `high`; on equal `high`, an edge whose `high` is its target sorts
//!   before an edge whose `high` is its source.
//!
//! Both sorts are stable, so edges with equal keys keep their input order. The orders are
//! computed once and then consumed through forward-only [`OrderCursor`]s.

use crate::edge::{Edge, EdgeId};
use crate::position::Position;

/// Start order of `edges`, as edge ids.
pub fn start_order<P: Position>(edges: &[Edge<P>]) -> Vec<EdgeId> {
    let mut order: Vec<EdgeId> = (0..edges.len()).map(EdgeId).collect();
    order.sort_by(|a, b| {
        let a = &edges[a.index()];
        let b = &edges[b.index()];
        a.low()
            .cmp(&b.low())
            .then_with(|| b.low_is_target().cmp(&a.low_is_target()))
    });
    order
}

/// End order of `edges`, as edge ids.
pub fn end_order<P: Position>(edges: &[Edge<P>]) -> Vec<EdgeId> {
    let mut order: Vec<EdgeId> = (0..edges.len()).map(EdgeId).collect();
    order.sort_by(|a, b| {
        let a = &edges[a.index()];
        let b = &edges[b.index()];
        a.high()
            .cmp(&b.high())
            .then_with(|| b.high_is_target().cmp(&a.high_is_target()))
    });
    order
}

/// A forward-only cursor over a precomputed order.
#[derive(Debug, Clone)]
pub struct OrderCursor {
    order: Vec<EdgeId>,
    next: usize,
}

impl OrderCursor {
    /// Create a cursor positioned before the first element of `order`.
    pub fn new(order: Vec<EdgeId>) -> Self {
        Self { order, next: 0 }
    }

    /// The next edge, without consuming it.
    pub fn peek(&self) -> Option<EdgeId> {
        self.order.get(self.next).copied()
    }

    /// Consume the next edge.
    pub fn advance(&mut self) {
        if self.next < self.order.len() {
            self.next += 1;
        }
    }

    /// Number of edges already consumed.
    pub fn consumed(&self) -> usize {
        self.next
    }

    /// Number of edges not yet consumed.
    pub fn remaining(&self) -> usize {
        self.order.len() - self.next
    }

    /// Returns `true` once every edge was consumed.
    pub fn is_exhausted(&self) -> bool {
        self.next >= self.order.len()
    }
}

/// The pair of cursors a sweep consumes.
#[derive(Debug, Clone)]
pub struct SweepOrders {
    /// Cursor over the start order.
    pub starts: OrderCursor,
    /// Cursor over the end order.
    pub ends: OrderCursor,
}

impl SweepOrders {
    /// Sort `edges` once into both orders.
    pub fn new<P: Position>(edges: &[Edge<P>]) -> Self {
        Self {
            starts: OrderCursor::new(start_order(edges)),
            ends: OrderCursor::new(end_order(edges)),
        }
    }
}
