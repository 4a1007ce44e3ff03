//! Document positions used as sweep keys.
//!
//! The engine only needs a totally ordered, copyable key. Two concrete keys are provided for the
//! two listing axes a host usually visualizes: source line numbers and instruction addresses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A totally ordered document position.
///
/// Blanket-implemented for every `Ord + Copy + Debug` type, so hosts can also sweep over their
/// own key types (e.g. `(file_id, line)` tuples).
pub trait Position: Ord + Copy + fmt::Debug {}

impl<T: Ord + Copy + fmt::Debug> Position for T {}

/// A source line number (the unit is host-defined; listings are usually 1-based).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LineNumber(pub u32);

impl LineNumber {
    /// Create a line number.
    pub const fn new(line: u32) -> Self {
        Self(line)
    }

    /// The raw line number.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for LineNumber {
    fn from(line: u32) -> Self {
        Self(line)
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An instruction address.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Address(pub u64);

impl Address {
    /// Create an address.
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// The raw address value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Address {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
