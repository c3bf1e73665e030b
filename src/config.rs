//! Configuration consumed by the base shift engine.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Result, ShiftError};

/// Default number of bases taken from the 3' end of the source read.
pub const DEFAULT_SPLIT_OFFSET: i64 = -8;

/// End of the destination read that receives the moved bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertionEnd {
    #[default]
    FivePrime,
    ThreePrime,
}

impl TryFrom<i64> for InsertionEnd {
    type Error = ShiftError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            5 => Ok(InsertionEnd::FivePrime),
            3 => Ok(InsertionEnd::ThreePrime),
            _ => Err(ShiftError::Configuration(format!(
                "insertion end must be 5 or 3, got {value}"
            ))),
        }
    }
}

impl FromStr for InsertionEnd {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "5" | "5'" | "5prime" | "five-prime" | "five_prime" => Ok(InsertionEnd::FivePrime),
            "3" | "3'" | "3prime" | "three-prime" | "three_prime" => Ok(InsertionEnd::ThreePrime),
            _ => Err(ShiftError::Configuration(format!(
                "invalid insertion end '{s}' (valid values: '5', '3')"
            ))),
        }
    }
}

impl Display for InsertionEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsertionEnd::FivePrime => write!(f, "5'"),
            InsertionEnd::ThreePrime => write!(f, "3'"),
        }
    }
}

/// How destination records find their source record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingMode {
    /// Match by read id; the source may hold extra records in between.
    #[default]
    ByIdentifier,
    /// Strict 1:1 lockstep, stop at the shorter stream.
    ByPosition,
}

impl FromStr for PairingMode {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "identifier" | "id" | "by-identifier" => Ok(PairingMode::ByIdentifier),
            "position" | "pos" | "by-position" => Ok(PairingMode::ByPosition),
            _ => Err(ShiftError::Configuration(format!(
                "invalid pairing mode '{s}' (valid values: 'identifier', 'position')"
            ))),
        }
    }
}

/// What the destination sequence becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DestinationMode {
    /// Insert the moved bases into the existing destination read.
    #[default]
    MergeIntoExisting,
    /// The destination read is the moved bases alone.
    ReplaceWithMoved,
}

impl FromStr for DestinationMode {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "merge" | "1" => Ok(DestinationMode::MergeIntoExisting),
            "replace" | "new" | "2" => Ok(DestinationMode::ReplaceWithMoved),
            _ => Err(ShiftError::Configuration(format!(
                "invalid destination mode '{s}' (valid values: 'merge', 'replace')"
            ))),
        }
    }
}

/// Validated settings for one base shift run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// `>= 0` moves the first `split_offset` bases, `< 0` the last `|split_offset|`.
    pub split_offset: i64,
    pub insertion_end: InsertionEnd,
    pub pairing_mode: PairingMode,
    pub destination_mode: DestinationMode,
    /// Also write source records with the moved bases removed.
    pub emit_reduced_source: bool,
    /// Reverse complement the moved bases (and reverse their qualities) before insertion.
    pub reverse_complement_moved: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            split_offset: DEFAULT_SPLIT_OFFSET,
            insertion_end: InsertionEnd::default(),
            pairing_mode: PairingMode::default(),
            destination_mode: DestinationMode::default(),
            emit_reduced_source: false,
            reverse_complement_moved: false,
        }
    }
}
