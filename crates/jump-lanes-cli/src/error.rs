use jump_lanes::SweepError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors reported by the `jump-lanes` binary.
pub enum CliError {
    #[error("I/O error: {0}")]
    /// Reading the listing failed.
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    /// The listing is not valid JSON or does not match the expected shape.
    Json(#[from] serde_json::Error),

    #[error("invalid position '{0}'")]
    /// A position string is neither decimal nor `0x`-prefixed hex.
    InvalidPosition(String),

    #[error("position {0} is too large for a line number")]
    /// A line-axis position does not fit in 32 bits.
    LineOverflow(u64),

    #[error("layout failed: {0}")]
    /// The sweep rejected the listing.
    Sweep(#[from] SweepError),
}
