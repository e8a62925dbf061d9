//! Platform track assignments.

use std::fmt;

use serde::Serialize;

use super::coerce;
use crate::document::Record;
use crate::error::ParseError;

/// A platform number with an optional phase letter.
///
/// # Examples
///
/// ```
/// use infoplus::domain::TrackAssignment;
///
/// let track = TrackAssignment::new(2, Some("b".to_string()));
/// assert_eq!(track.to_string(), "2b");
/// assert_eq!(TrackAssignment::new(14, None).to_string(), "14");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TrackAssignment {
    pub number: u16,
    pub phase: Option<String>,
}

impl TrackAssignment {
    pub fn new(number: u16, phase: Option<String>) -> Self {
        Self { number, phase }
    }

    /// Build from a track element holding `SpoorNummer` and an optional `SpoorFase`.
    pub fn from_record(record: &Record<'_>) -> Result<Self, ParseError> {
        Ok(TrackAssignment {
            number: record.required("SpoorNummer", "track number", coerce::unsigned)?,
            phase: record.optional_text("SpoorFase")?.map(str::to_owned),
        })
    }
}

impl fmt::Display for TrackAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)?;
        if let Some(phase) = &self.phase {
            f.write_str(phase)?;
        }
        Ok(())
    }
}
