use crate::edge::EdgeId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced while driving a sweep.
///
/// Positions are carried as their `Debug` rendering so the error type does not depend on the
/// position type of the sweep that produced it.
pub enum SweepError {
    #[error("row at {current} follows row at {previous}: rows must be in non-decreasing position order")]
    /// A row was supplied with a position lower than the previous row's.
    OutOfOrder {
        /// Position of the previous row.
        previous: String,
        /// Position of the offending row.
        current: String,
    },

    #[error("edge {edge} touches {position}, outside the visualized range")]
    /// An edge endpoint lies outside the range the sweep was created for.
    EdgeOutOfRange {
        /// The offending edge.
        edge: EdgeId,
        /// The endpoint outside the range.
        position: String,
    },

    #[error("unknown edge {0}")]
    /// A detail row named an edge that is not part of the sweep.
    UnknownEdge(EdgeId),

    #[error("sweep already finished")]
    /// The sweep was finished, explicitly or by an earlier fatal error.
    Finished,
}
