//! Per-attribute outcome counters.

use std::fmt;
use std::ops::AddAssign;

use serde::Serialize;

/// What happened to one encoded attribute during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeOutcome {
    /// Resolved and written to the output.
    Decoded,
    /// `primary` is not in the attribute table.
    UnknownAttribute,
    /// Referential type without a dictionary sheet.
    UnknownType,
    /// The dictionary has no entry for the code.
    UnknownCode,
    /// The attribute carried no `secondary`.
    MissingValue,
    /// The resolved value is a sentinel.
    Excluded,
}

impl AttributeOutcome {
    pub const ALL: [AttributeOutcome; 6] = [
        AttributeOutcome::Decoded,
        AttributeOutcome::UnknownAttribute,
        AttributeOutcome::UnknownType,
        AttributeOutcome::UnknownCode,
        AttributeOutcome::MissingValue,
        AttributeOutcome::Excluded,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttributeOutcome::Decoded => "decoded",
            AttributeOutcome::UnknownAttribute => "unknown_attribute",
            AttributeOutcome::UnknownType => "unknown_type",
            AttributeOutcome::UnknownCode => "unknown_code",
            AttributeOutcome::MissingValue => "missing_value",
            AttributeOutcome::Excluded => "excluded",
        }
    }
}

impl fmt::Display for AttributeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome counts for one record or a whole batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    pub records: usize,
    pub decoded: usize,
    pub unknown_attribute: usize,
    pub unknown_type: usize,
    pub unknown_code: usize,
    pub missing_value: usize,
    pub excluded: usize,
}

impl DecodeStats {
    pub fn record(&mut self, outcome: AttributeOutcome) {
        *self.slot(outcome) += 1;
    }

    pub fn count(&self, outcome: AttributeOutcome) -> usize {
        match outcome {
            AttributeOutcome::Decoded => self.decoded,
            AttributeOutcome::UnknownAttribute => self.unknown_attribute,
            AttributeOutcome::UnknownType => self.unknown_type,
            AttributeOutcome::UnknownCode => self.unknown_code,
            AttributeOutcome::MissingValue => self.missing_value,
            AttributeOutcome::Excluded => self.excluded,
        }
    }

    /// Encoded attributes seen, whatever their outcome.
    pub fn attributes(&self) -> usize {
        AttributeOutcome::ALL.iter().map(|o| self.count(*o)).sum()
    }

    pub fn dropped(&self) -> usize {
        self.attributes() - self.decoded
    }

    pub fn merge(&mut self, other: &DecodeStats) {
        self.records += other.records;
        for outcome in AttributeOutcome::ALL {
            *self.slot(outcome) += other.count(outcome);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeOutcome, usize)> + '_ {
        AttributeOutcome::ALL
            .into_iter()
            .map(|outcome| (outcome, self.count(outcome)))
    }

    fn slot(&mut self, outcome: AttributeOutcome) -> &mut usize {
        match outcome {
            AttributeOutcome::Decoded => &mut self.decoded,
            AttributeOutcome::UnknownAttribute => &mut self.unknown_attribute,
            AttributeOutcome::UnknownType => &mut self.unknown_type,
            AttributeOutcome::UnknownCode => &mut self.unknown_code,
            AttributeOutcome::MissingValue => &mut self.missing_value,
            AttributeOutcome::Excluded => &mut self.excluded,
        }
    }
}

impl AddAssign for DecodeStats {
    fn add_assign(&mut self, other: DecodeStats) {
        self.merge(&other);
    }
}

impl AddAssign<&DecodeStats> for DecodeStats {
    fn add_assign(&mut self, other: &DecodeStats) {
        self.merge(other);
    }
}
