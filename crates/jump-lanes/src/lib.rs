#![warn(missing_docs)]
//! Jump Lanes - Control-Flow Arrow Layout Engine
//!
//! # Overview
//!
//! `jump-lanes` decides how jump/branch arrows beside an annotated listing (source lines or
//! machine instructions) are laid out: how many parallel tracks ("lanes") are needed so no two
//! arrows overlap, and which track each jump occupies on every displayed row.
//! It does not draw anything; a painter consumes the per-row [`RowSnapshot`]s.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Row Plan (anchor + detail rows)            │  ← Host helper
//! ├─────────────────────────────────────────────┤
//! │  Row Annotator (Sweep, RowSnapshot)         │  ← Per-row API
//! ├─────────────────────────────────────────────┤
//! │  Track Allocator (reusable slots)           │
//! ├─────────────────────────────────────────────┤
//! │  Sweep Orderings (start / end order)        │
//! ├─────────────────────────────────────────────┤
//! │  Edge Model (Jump, Edge, live filtering)    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use jump_lanes::{Jump, LineNumber, PlanOptions, RowPlan, layout_listing, live_edges};
//!
//! let jumps = vec![
//!     Jump::new(LineNumber(10), LineNumber(16), 4),
//!     Jump::new(LineNumber(12), LineNumber(14), 2).conditional(true),
//!     Jump::new(LineNumber(15), LineNumber(11), 0),
//! ];
//! let edges = live_edges(jumps);
//!
//! let plan = RowPlan::build((10..=17).map(LineNumber), &edges, PlanOptions::default());
//! let layout = layout_listing(&plan, edges).unwrap();
//!
//! assert_eq!(layout.levels, 2);
//! ```
//!
//! # Driving a sweep by hand
//!
//! ```rust
//! use jump_lanes::{Address, AddressSweep, Edge, EdgeId, RowRole};
//!
//! let mut sweep = AddressSweep::new(vec![Edge::new(Address(0x10), Address(0x20))]);
//!
//! sweep.annotate(Address(0x10), RowRole::Anchor).unwrap();
//! let row = sweep.annotate(Address(0x10), RowRole::jump_from(EdgeId(0))).unwrap();
//! assert_eq!(row.start().map(|mark| mark.track), Some(0));
//!
//! let row = sweep.annotate(Address(0x20), RowRole::Anchor).unwrap();
//! assert_eq!(row.end().map(|mark| mark.track), Some(0));
//! assert_eq!(sweep.finish().unwrap(), 1);
//! ```
//!
//! # Module Description
//!
//! - [`position`] - position bound and the `LineNumber` / `Address` keys
//! - [`edge`] - jumps, edges and live filtering
//! - [`ordering`] - start/end orderings and forward-only cursors
//! - [`tracks`] - reusable track allocator
//! - [`sweep`] - per-row annotation and sweep lifecycle
//! - [`plan`] - row plans and whole-listing layout

pub mod edge;
mod error;
pub mod ordering;
pub mod plan;
pub mod position;
pub mod sweep;
pub mod tracks;

pub use edge::{Direction, Edge, EdgeId, Jump, live_edges};
pub use error::SweepError;
pub use ordering::{OrderCursor, SweepOrders, end_order, start_order};
pub use plan::{LaneLayout, PlanOptions, PlannedRow, RowPlan, layout_listing};
pub use position::{Address, LineNumber, Position};
pub use sweep::{DetailSide, RowRole, RowSnapshot, Sweep, SweepState};
pub use tracks::{TrackAllocator, TrackMark};

/// A sweep over a listing keyed by source line numbers.
pub type LineSweep = Sweep<LineNumber>;

/// A sweep over a listing keyed by instruction addresses.
pub type AddressSweep = Sweep<Address>;
