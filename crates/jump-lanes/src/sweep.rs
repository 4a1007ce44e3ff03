//! Row annotation: the per-row entry point of a layout pass.
//!
//! A [`Sweep`] is created for one listing with the full edge set, then driven with one
//! [`Sweep::annotate`] call per displayed row, top to bottom. Each call advances the track
//! allocator to the row's position and returns a [`RowSnapshot`]: a copy of the whole track array
//! plus the tracks whose arrows start or end on that row.
//!
//! # Row roles
//!
//! - [`RowRole::Anchor`]: the primary row of a position. Starts whose lower bound is a jump
//!   *source* at this position are left for the detail row that describes that jump.
//! - [`RowRole::Detail`] with [`DetailSide::JumpFrom`]: a row describing one jump leaving the
//!   position. Only the named edge may start here; ends arriving at this position are left for a
//!   later row.
//! - [`RowRole::Detail`] with [`DetailSide::JumpInto`]: a row describing one jump arriving at the
//!   position. Uses the anchor-row rules, restricted to the named edge for starts.
//!
//! # Lifecycle
//!
//! `NotStarted → Running → Finished`. Rows must come in non-decreasing position order; a row
//! that goes backwards finishes the sweep with [`SweepError::OutOfOrder`].

use crate::edge::{Edge, EdgeId};
use crate::error::SweepError;
use crate::position::Position;
use crate::tracks::{TrackAllocator, TrackMark};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Which end of a jump a detail row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailSide {
    /// The row describes the jump leaving this position (source side).
    JumpFrom,
    /// The row describes the jump arriving at this position (target side).
    JumpInto,
}

/// The role of a row in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowRole {
    /// The primary row of a position.
    Anchor,
    /// A synthetic row describing one edge touching the position.
    Detail {
        /// The edge the row describes.
        edge: EdgeId,
        /// Which end of the edge the row describes.
        side: DetailSide,
    },
}

impl RowRole {
    /// Detail row for the source side of `edge`.
    pub const fn jump_from(edge: EdgeId) -> Self {
        Self::Detail {
            edge,
            side: DetailSide::JumpFrom,
        }
    }

    /// Detail row for the target side of `edge`.
    pub const fn jump_into(edge: EdgeId) -> Self {
        Self::Detail {
            edge,
            side: DetailSide::JumpInto,
        }
    }

    /// The edge named by a detail row.
    pub fn edge(self) -> Option<EdgeId> {
        match self {
            Self::Anchor => None,
            Self::Detail { edge, .. } => Some(edge),
        }
    }

    /// Returns `true` for anchor rows.
    pub fn is_anchor(self) -> bool {
        matches!(self, Self::Anchor)
    }

    /// Whether source-side starts at this row's position are deferred.
    pub fn ignore_from_starts(self) -> bool {
        !matches!(
            self,
            Self::Detail {
                side: DetailSide::JumpFrom,
                ..
            }
        )
    }

    /// Whether target-side ends at this row's position are deferred.
    pub fn ignore_to_ends(self) -> bool {
        matches!(
            self,
            Self::Detail {
                side: DetailSide::JumpFrom,
                ..
            }
        )
    }
}

/// Lifecycle of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    /// No row processed yet.
    NotStarted,
    /// At least one row processed; more may follow.
    Running,
    /// Finished explicitly or by a fatal error; no more rows accepted.
    Finished,
}

/// The track state attached to one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSnapshot<P> {
    /// Position of the row.
    pub position: P,
    /// Role of the row.
    pub role: RowRole,
    /// Full track array after this row (`tracks[i]` is the edge holding track `i`).
    pub tracks: Vec<Option<EdgeId>>,
    /// Tracks whose arrow starts on this row, in claim order.
    pub starts: Vec<TrackMark>,
    /// Tracks whose arrow ends on this row, in end order.
    pub ends: Vec<TrackMark>,
    /// Track count reached so far. Only the count after the last row is final.
    pub levels_so_far: usize,
}

impl<P> RowSnapshot<P> {
    /// The start decoration of this row (the last start claimed), if any.
    pub fn start(&self) -> Option<TrackMark> {
        self.starts.last().copied()
    }

    /// The end decoration of this row (the last end recorded), if any.
    pub fn end(&self) -> Option<TrackMark> {
        self.ends.last().copied()
    }

    /// Edge holding `track` after this row.
    pub fn track(&self, track: usize) -> Option<EdgeId> {
        self.tracks.get(track).copied().flatten()
    }

    /// Returns `true` if `track` carries an arrow on this row: it is held after the row, or an
    /// arrow ended on it here.
    pub fn is_active(&self, track: usize) -> bool {
        self.track(track).is_some() || self.ends.iter().any(|mark| mark.track == track)
    }

    /// Number of tracks held after this row.
    pub fn occupied(&self) -> usize {
        self.tracks.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` if no track is held after this row.
    pub fn is_empty(&self) -> bool {
        self.tracks.iter().all(Option::is_none)
    }
}

/// State of one layout pass over a listing.
#[derive(Debug, Clone)]
pub struct Sweep<P> {
    edges: Vec<Edge<P>>,
    allocator: TrackAllocator,
    state: SweepState,
    last_position: Option<P>,
}

impl<P: Position> Sweep<P> {
    /// Create a sweep over `edges`.
    ///
    /// Edges are expected to be live (see [`live_edges`](crate::live_edges)).
    pub fn new(edges: Vec<Edge<P>>) -> Self {
        let allocator = TrackAllocator::new(&edges);
        tracing::debug!(edges = edges.len(), "sweep created");
        Self {
            edges,
            allocator,
            state: SweepState::NotStarted,
            last_position: None,
        }
    }

    /// Create a sweep over `edges`, rejecting edges that leave the visualized `range`.
    pub fn with_range(edges: Vec<Edge<P>>, range: RangeInclusive<P>) -> Result<Self, SweepError> {
        for (index, edge) in edges.iter().enumerate() {
            for endpoint in [edge.from, edge.to] {
                if !range.contains(&endpoint) {
                    return Err(SweepError::EdgeOutOfRange {
                        edge: EdgeId(index),
                        position: format!("{endpoint:?}"),
                    });
                }
            }
        }
        Ok(Self::new(edges))
    }

    /// The edges of this sweep, indexed by [`EdgeId`].
    pub fn edges(&self) -> &[Edge<P>] {
        &self.edges
    }

    /// Look up an edge.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge<P>> {
        self.edges.get(id.index())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SweepState {
        self.state
    }

    /// Track count reached so far.
    pub fn levels(&self) -> usize {
        self.allocator.levels()
    }

    /// Current track assignment.
    pub fn tracks(&self) -> &[Option<EdgeId>] {
        self.allocator.tracks()
    }

    /// Number of allocator invariant violations seen so far.
    ///
    /// Non-zero means some arrow could not be ended cleanly and the diagram is degraded.
    pub fn inconsistencies(&self) -> usize {
        self.allocator.inconsistencies()
    }

    /// Annotate one row.
    pub fn annotate(&mut self, position: P, role: RowRole) -> Result<RowSnapshot<P>, SweepError> {
        self.enter(position)?;
        self.check_edge(role.edge())?;

        let starts = self.allocator.advance_starts(
            &self.edges,
            position,
            role.edge(),
            role.ignore_from_starts(),
        );
        let ends = self
            .allocator
            .advance_ends(&self.edges, position, role.ignore_to_ends());

        Ok(RowSnapshot {
            position,
            role,
            tracks: self.allocator.tracks().to_vec(),
            starts,
            ends,
            levels_so_far: self.allocator.levels(),
        })
    }

    /// Start edges up to `position` with explicit flags (see
    /// [`TrackAllocator::advance_starts`]).
    pub fn advance_starts(
        &mut self,
        position: P,
        edge_at_row: Option<EdgeId>,
        ignore_from_starts: bool,
    ) -> Result<Vec<TrackMark>, SweepError> {
        self.enter(position)?;
        self.check_edge(edge_at_row)?;
        Ok(self
            .allocator
            .advance_starts(&self.edges, position, edge_at_row, ignore_from_starts))
    }

    /// End edges up to `position` with explicit flags (see [`TrackAllocator::advance_ends`]).
    pub fn advance_ends(
        &mut self,
        position: P,
        ignore_to_ends: bool,
    ) -> Result<Vec<TrackMark>, SweepError> {
        self.enter(position)?;
        Ok(self
            .allocator
            .advance_ends(&self.edges, position, ignore_to_ends))
    }

    /// Finish the sweep and return the final track count.
    pub fn finish(&mut self) -> Result<usize, SweepError> {
        if self.state == SweepState::Finished {
            return Err(SweepError::Finished);
        }
        self.state = SweepState::Finished;

        let open = self.tracks().iter().filter(|slot| slot.is_some()).count();
        tracing::debug!(
            levels = self.levels(),
            open,
            drained = self.allocator.is_drained(),
            inconsistencies = self.inconsistencies(),
            "sweep finished"
        );
        Ok(self.levels())
    }

    fn check_edge(&mut self, edge: Option<EdgeId>) -> Result<(), SweepError> {
        match edge {
            Some(edge) if edge.index() >= self.edges.len() => {
                self.state = SweepState::Finished;
                Err(SweepError::UnknownEdge(edge))
            }
            _ => Ok(()),
        }
    }

    fn enter(&mut self, position: P) -> Result<(), SweepError> {
        if self.state == SweepState::Finished {
            return Err(SweepError::Finished);
        }
        if let Some(previous) = self.last_position
            && position < previous
        {
            self.state = SweepState::Finished;
            return Err(SweepError::OutOfOrder {
                previous: format!("{previous:?}"),
                current: format!("{position:?}"),
            });
        }
        self.state = SweepState::Running;
        self.last_position = Some(position);
        Ok(())
    }
}
