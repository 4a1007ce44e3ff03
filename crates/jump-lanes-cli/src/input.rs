//! JSON listing input.
//!
//! ```json
//! {
//!   "rows": [{ "position": "0x401000", "text": "cmp eax, 3" }],
//!   "jumps": [{ "from": "0x401004", "to": "0x401010", "conditional": true, "executed": 12 }]
//! }
//! ```
//!
//! Positions are JSON numbers, decimal strings or `0x`-prefixed hex strings.

use crate::error::CliError;
use jump_lanes::{Address, Jump, LineNumber, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

#[derive(Debug, Clone, Deserialize)]
pub struct ListingFile {
    #[serde(default)]
    pub rows: Vec<RowEntry>,
    #[serde(default)]
    pub jumps: Vec<JumpEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RowEntry {
    pub position: PositionValue,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JumpEntry {
    pub from: PositionValue,
    pub to: PositionValue,
    #[serde(default)]
    pub conditional: bool,
    #[serde(default = "default_executed")]
    pub executed: u64,
}

fn default_executed() -> u64 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PositionValue {
    Number(u64),
    Text(String),
}

impl PositionValue {
    pub fn to_u64(&self) -> Result<u64, CliError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(text) => {
                let trimmed = text.trim();
                let parsed = match trimmed
                    .strip_prefix("0x")
                    .or_else(|| trimmed.strip_prefix("0X"))
                {
                    Some(hex) => u64::from_str_radix(hex, 16),
                    None => trimmed.parse::<u64>(),
                };
                parsed.map_err(|_| CliError::InvalidPosition(text.clone()))
            }
        }
    }
}

/// A position type the CLI can read from raw integers.
pub trait AxisKey: Position + Display + Serialize {
    fn from_raw(raw: u64) -> Result<Self, CliError>;
}

impl AxisKey for LineNumber {
    fn from_raw(raw: u64) -> Result<Self, CliError> {
        u32::try_from(raw)
            .map(LineNumber)
            .map_err(|_| CliError::LineOverflow(raw))
    }
}

impl AxisKey for Address {
    fn from_raw(raw: u64) -> Result<Self, CliError> {
        Ok(Address(raw))
    }
}

/// A listing converted to one position axis.
#[derive(Debug, Clone)]
pub struct Listing<P> {
    pub positions: Vec<P>,
    pub texts: BTreeMap<P, String>,
    pub jumps: Vec<Jump<P>>,
}

impl<P: AxisKey> Listing<P> {
    pub fn from_file(file: &ListingFile) -> Result<Self, CliError> {
        let mut positions = Vec::with_capacity(file.rows.len());
        let mut texts = BTreeMap::new();
        for row in &file.rows {
            let position = P::from_raw(row.position.to_u64()?)?;
            positions.push(position);
            texts.insert(position, row.text.clone());
        }

        let jumps = file
            .jumps
            .iter()
            .map(|jump| {
                Ok(Jump::new(
                    P::from_raw(jump.from.to_u64()?)?,
                    P::from_raw(jump.to.to_u64()?)?,
                    jump.executed,
                )
                .conditional(jump.conditional))
            })
            .collect::<Result<Vec<_>, CliError>>()?;

        Ok(Self {
            positions,
            texts,
            jumps,
        })
    }

    pub fn text(&self, position: P) -> Option<&str> {
        self.texts.get(&position).map(String::as_str)
    }
}
