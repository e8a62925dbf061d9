//! Alterations to a train's service.

use std::fmt;

use serde::Serialize;

use super::{Presentation, coerce};
use crate::document::Record;
use crate::error::ParseError;

/// Numeric category of an alteration, kept as its digit string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AlterationCode(String);

impl AlterationCode {
    pub fn parse(s: &str) -> Option<Self> {
        coerce::digits(s).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlterationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A disruption or change, e.g. a different track or a shortened route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alteration {
    pub code: AlterationCode,
    pub presentation: Option<Presentation>,
}

impl Alteration {
    pub fn from_record(record: &Record<'_>) -> Result<Self, ParseError> {
        Ok(Alteration {
            code: record.required("WijzigingType", "alteration code", AlterationCode::parse)?,
            presentation: Presentation::read(record, "PresentatieWijziging")?,
        })
    }

    /// Read every alteration element called `name` under `parent`.
    pub fn read_all(parent: &Record<'_>, name: &str) -> Result<Vec<Self>, ParseError> {
        parent.collect(name, Alteration::from_record)
    }
}
