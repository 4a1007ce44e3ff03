//! Track allocation: a grow-only vector of reusable slots.
//!
//! Each slot is either free or held by exactly one edge. Starting an edge takes the lowest free
//! slot (or appends a new one); ending an edge frees its slot without renumbering anything, so
//! `levels` (the slot count) only ever grows during a sweep.

use crate::edge::{Edge, EdgeId};
use crate::ordering::SweepOrders;
use crate::position::Position;
use serde::{Deserialize, Serialize};

/// A track index paired with the edge that starts or ends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMark {
    /// Track index in `[0, levels)`.
    pub track: usize,
    /// The edge that starts or ends on the track.
    pub edge: EdgeId,
}

/// Reusable-slot allocator driven by the sweep orderings.
#[derive(Debug, Clone)]
pub struct TrackAllocator {
    orders: SweepOrders,
    tracks: Vec<Option<EdgeId>>,
    // Edges whose end was consumed before they could be started.
    retired: Vec<bool>,
    inconsistencies: usize,
}

impl TrackAllocator {
    /// Build the allocator for `edges`, sorting both orderings once.
    pub fn new<P: Position>(edges: &[Edge<P>]) -> Self {
        Self {
            orders: SweepOrders::new(edges),
            tracks: Vec::new(),
            retired: vec![false; edges.len()],
            inconsistencies: 0,
        }
    }

    /// Current number of tracks (free or occupied).
    pub fn levels(&self) -> usize {
        self.tracks.len()
    }

    /// Current track assignment.
    pub fn tracks(&self) -> &[Option<EdgeId>] {
        &self.tracks
    }

    /// Track currently held by `edge`, if any.
    pub fn track_of(&self, edge: EdgeId) -> Option<usize> {
        self.tracks.iter().position(|slot| *slot == Some(edge))
    }

    /// Number of allocator invariant violations seen so far.
    pub fn inconsistencies(&self) -> usize {
        self.inconsistencies
    }

    /// Returns `true` once every edge was started and ended.
    pub fn is_drained(&self) -> bool {
        self.orders.starts.is_exhausted() && self.orders.ends.is_exhausted()
    }

    /// Start every edge whose `low` is at or before `position`.
    ///
    /// The walk stops early at the first edge that must not be claimed on this row:
    /// - with `ignore_from_starts`, an edge whose `low` is its source and equals `position`
    ///   (a detail row for that source claims it instead);
    /// - with `edge_at_row` set, any edge other than the named one.
    ///
    /// Returns the claimed `(track, edge)` pairs in claim order.
    pub fn advance_starts<P: Position>(
        &mut self,
        edges: &[Edge<P>],
        position: P,
        edge_at_row: Option<EdgeId>,
        ignore_from_starts: bool,
    ) -> Vec<TrackMark> {
        let mut claimed = Vec::new();

        while let Some(id) = self.orders.starts.peek() {
            if self.retired[id.index()] {
                self.orders.starts.advance();
                continue;
            }

            let edge = &edges[id.index()];
            let low = edge.low();
            if low > position {
                break;
            }
            if ignore_from_starts && !edge.low_is_target() && low == position {
                break;
            }
            if edge_at_row.is_some_and(|named| named != id) {
                break;
            }

            let track = self.claim(id);
            tracing::trace!(edge = id.index(), track, ?position, "track claimed");
            claimed.push(TrackMark { track, edge: id });
            self.orders.starts.advance();
        }

        claimed
    }

    /// End every edge whose `high` is at or before `position`.
    ///
    /// With `ignore_to_ends`, the walk stops at the first edge whose `high` is its target and
    /// equals `position`.
    ///
    /// Returns the freed `(track, edge)` pairs in end order.
    pub fn advance_ends<P: Position>(
        &mut self,
        edges: &[Edge<P>],
        position: P,
        ignore_to_ends: bool,
    ) -> Vec<TrackMark> {
        let mut freed = Vec::new();

        while let Some(id) = self.orders.ends.peek() {
            let edge = &edges[id.index()];
            let high = edge.high();
            if high > position {
                break;
            }
            if ignore_to_ends && edge.high_is_target() && high == position {
                break;
            }

            match self.track_of(id) {
                Some(track) => {
                    self.tracks[track] = None;
                    tracing::trace!(edge = id.index(), track, ?position, "track freed");
                    freed.push(TrackMark { track, edge: id });
                }
                None => {
                    self.inconsistencies += 1;
                    self.retired[id.index()] = true;
                    tracing::error!(
                        edge = id.index(),
                        ?high,
                        ?position,
                        "edge ends without holding a track; skipping it"
                    );
                }
            }
            self.orders.ends.advance();
        }

        freed
    }

    fn claim(&mut self, edge: EdgeId) -> usize {
        match self.tracks.iter().position(Option::is_none) {
            Some(track) => {
                self.tracks[track] = Some(edge);
                track
            }
            None => {
                self.tracks.push(Some(edge));
                self.tracks.len() - 1
            }
        }
    }
}
