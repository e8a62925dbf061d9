//! Station types.

use std::fmt;

use serde::{Serialize, Serializer};

use super::coerce;
use crate::document::Record;
use crate::error::ParseError;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid station code, such as `GD` or `UTLN`.
///
/// Station codes are 1 to 8 uppercase ASCII letters or digits. This type
/// guarantees that any `StationCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use infoplus::domain::StationCode;
///
/// let gouda = StationCode::parse("GD").unwrap();
/// assert_eq!(gouda.as_str(), "GD");
///
/// // Lowercase is rejected
/// assert!(StationCode::parse("gd").is_err());
///
/// // Empty and over-long codes are rejected
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("ABCDEFGHI").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() || s.len() > 8 {
            return Err(InvalidStationCode {
                reason: "must be 1 to 8 characters",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(InvalidStationCode {
                reason: "must be uppercase ASCII letters or digits",
            });
        }

        Ok(StationCode(s.to_string()))
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Numeric station identifier from the international UIC registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UicCode(u32);

impl UicCode {
    pub fn new(code: u32) -> Self {
        Self(code)
    }

    pub fn parse(s: &str) -> Option<Self> {
        coerce::unsigned(s).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UicCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station as it appears in any message family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    pub code: StationCode,
    pub short_name: Option<String>,
    pub medium_name: Option<String>,
    pub long_name: Option<String>,
    pub uic_code: Option<UicCode>,
}

impl Station {
    /// Build a station from a `Station`-shaped element.
    ///
    /// Only the code is required; names and the UIC code are optional.
    pub fn from_record(record: &Record<'_>) -> Result<Self, ParseError> {
        let code = record.required("StationCode", "station code", |s| {
            StationCode::parse(s).ok()
        })?;
        Ok(Station {
            code,
            short_name: record.optional_text("KorteNaam")?.map(str::to_owned),
            medium_name: record.optional_text("MiddelNaam")?.map(str::to_owned),
            long_name: record.optional_text("LangeNaam")?.map(str::to_owned),
            uic_code: record.optional("UICCode", "UIC code", UicCode::parse)?,
        })
    }

    /// Returns the most descriptive name available, falling back to the code.
    pub fn display_name(&self) -> &str {
        self.long_name
            .as_deref()
            .or(self.medium_name.as_deref())
            .or(self.short_name.as_deref())
            .unwrap_or(self.code.as_str())
    }
}
