//! Row plans: the row stream a host feeds into a sweep.
//!
//! A listing view shows one anchor row per position and, optionally, one detail row per jump
//! below it. The sweep relies on those rows arriving in a specific order (positions ascending,
//! jump-from rows in the same order the start ordering uses). [`RowPlan::build`] produces exactly
//! that order, and [`layout_listing`] drives a fresh [`Sweep`] over a plan.

use crate::edge::{Edge, EdgeId};
use crate::error::SweepError;
use crate::position::Position;
use crate::sweep::{RowRole, RowSnapshot, Sweep};
use serde::{Deserialize, Serialize};

/// Options controlling which rows a plan contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOptions {
    /// Show one [`DetailSide::JumpFrom`](crate::DetailSide::JumpFrom) row per jump, below the
    /// anchor row of its source. When unset the rows are still swept but marked hidden, and
    /// [`layout_listing`] folds them into the anchor row above.
    pub detail_rows: bool,
    /// Emit one [`DetailSide::JumpInto`](crate::DetailSide::JumpInto) row per jump, below the
    /// anchor row of its target.
    pub into_rows: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            detail_rows: true,
            into_rows: false,
        }
    }
}

impl PlanOptions {
    /// A plan with anchor rows only.
    pub fn anchors_only() -> Self {
        Self {
            detail_rows: false,
            into_rows: false,
        }
    }
}

/// One row of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRow<P> {
    /// Position of the row.
    pub position: P,
    /// Role of the row.
    pub role: RowRole,
    /// Swept but not shown; its marks are folded into the previous shown row.
    pub hidden: bool,
}

impl<P> PlannedRow<P> {
    /// A shown row.
    pub fn new(position: P, role: RowRole) -> Self {
        Self {
            position,
            role,
            hidden: false,
        }
    }
}

/// An ordered row stream for one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPlan<P> {
    rows: Vec<PlannedRow<P>>,
}

impl<P: Position> RowPlan<P> {
    /// Build the rows for `positions` and `edges`.
    ///
    /// Positions are sorted and deduplicated; endpoints of `edges` missing from `positions` are
    /// added so every edge has rows at both ends.
    pub fn build(
        positions: impl IntoIterator<Item = P>,
        edges: &[Edge<P>],
        options: PlanOptions,
    ) -> Self {
        let mut all: Vec<P> = positions.into_iter().collect();
        all.extend(edges.iter().flat_map(|edge| [edge.from, edge.to]));
        all.sort();
        all.dedup();

        // Edges grouped by source/target, in edge order (which is the stable start order among
        // jumps leaving the same position).
        let mut by_from: Vec<(P, EdgeId)> = edges
            .iter()
            .enumerate()
            .map(|(index, edge)| (edge.from, EdgeId(index)))
            .collect();
        by_from.sort_by(|a, b| a.0.cmp(&b.0));
        let mut by_to: Vec<(P, EdgeId)> = edges
            .iter()
            .enumerate()
            .map(|(index, edge)| (edge.to, EdgeId(index)))
            .collect();
        by_to.sort_by(|a, b| a.0.cmp(&b.0));

        let mut rows = Vec::with_capacity(all.len() + edges.len());
        let (mut from_idx, mut to_idx) = (0usize, 0usize);
        for position in all {
            rows.push(PlannedRow::new(position, RowRole::Anchor));

            // Without its jump-from row a forward jump starts one row late, so those rows are
            // always swept.
            while from_idx < by_from.len() && by_from[from_idx].0 == position {
                rows.push(PlannedRow {
                    position,
                    role: RowRole::jump_from(by_from[from_idx].1),
                    hidden: !options.detail_rows,
                });
                from_idx += 1;
            }

            while to_idx < by_to.len() && by_to[to_idx].0 == position {
                if options.into_rows {
                    rows.push(PlannedRow::new(
                        position,
                        RowRole::jump_into(by_to[to_idx].1),
                    ));
                }
                to_idx += 1;
            }
        }

        Self { rows }
    }

    /// Wrap an explicit row list.
    pub fn from_rows(rows: Vec<PlannedRow<P>>) -> Self {
        Self { rows }
    }

    /// The planned rows.
    pub fn rows(&self) -> &[PlannedRow<P>] {
        &self.rows
    }

    /// Number of rows, hidden rows included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the plan has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows.
    pub fn iter(&self) -> impl Iterator<Item = &PlannedRow<P>> {
        self.rows.iter()
    }
}

/// The result of a full layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneLayout<P> {
    /// The edges, indexed by [`EdgeId`].
    pub edges: Vec<Edge<P>>,
    /// One snapshot per shown planned row, in plan order.
    pub rows: Vec<RowSnapshot<P>>,
    /// Final track count (number of gutter columns needed).
    pub levels: usize,
    /// Allocator invariant violations seen during the pass.
    pub inconsistencies: usize,
}

impl<P: Position> LaneLayout<P> {
    /// Look up an edge.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge<P>> {
        self.edges.get(id.index())
    }

    /// Track used by `edge` across the pass, if it was ever started.
    pub fn track_of(&self, edge: EdgeId) -> Option<usize> {
        self.rows
            .iter()
            .flat_map(|row| row.starts.iter())
            .find(|mark| mark.edge == edge)
            .map(|mark| mark.track)
    }
}

/// Run a fresh sweep over `plan` and collect every row snapshot.
pub fn layout_listing<P: Position>(
    plan: &RowPlan<P>,
    edges: Vec<Edge<P>>,
) -> Result<LaneLayout<P>, SweepError> {
    let mut sweep = Sweep::new(edges);
    let mut rows: Vec<RowSnapshot<P>> = Vec::with_capacity(plan.len());
    for row in plan.iter() {
        let snapshot = sweep.annotate(row.position, row.role)?;
        match rows.last_mut() {
            Some(shown) if row.hidden => {
                shown.tracks = snapshot.tracks;
                shown.starts.extend(snapshot.starts);
                shown.ends.extend(snapshot.ends);
                shown.levels_so_far = snapshot.levels_so_far;
            }
            _ => rows.push(snapshot),
        }
    }
    let levels = sweep.finish()?;
    let inconsistencies = sweep.inconsistencies();

    Ok(LaneLayout {
        edges: sweep.edges().to_vec(),
        rows,
        levels,
        inconsistencies,
    })
}
