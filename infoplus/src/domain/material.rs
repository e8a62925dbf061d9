//! Rolling stock coupled to a train.

use serde::Serialize;

use super::{Overlay, Station, coerce};
use crate::document::Record;
use crate::error::ParseError;

/// Element names of a material unit in one message family.
///
/// The trip and departure families describe the same rolling-stock facts
/// under different names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialFields {
    /// Name of the repeated material element itself.
    pub element: &'static str,
    pub id: &'static str,
    pub kind: &'static str,
    pub designation: &'static str,
    pub length: &'static str,
    pub position: &'static str,
    pub remains_behind: &'static str,
    pub destination: &'static str,
}

impl MaterialFields {
    /// Field names used in trip composition messages.
    pub const TRIP: MaterialFields = MaterialFields {
        element: "MaterieelDeel",
        id: "MaterieelDeelID",
        kind: "MaterieelDeelSoort",
        designation: "MaterieelDeelAanduiding",
        length: "MaterieelDeelLengte",
        position: "MaterieelDeelVolgordeVertrek",
        remains_behind: "AchterBlijvenMaterieelDeel",
        destination: "MaterieelDeelEindBestemming",
    };

    /// Field names used in departure board messages.
    pub const DEPARTURE: MaterialFields = MaterialFields {
        element: "MaterieelDeelDVS",
        id: "MaterieelNummer",
        kind: "MaterieelSoort",
        designation: "MaterieelAanduiding",
        length: "MaterieelLengte",
        position: "MaterieelDeelVolgordeVertrek",
        remains_behind: "AchterBlijvenMaterieelDeel",
        destination: "MaterieelDeelEindBestemming",
    };

    /// Every element name in the table, for vocabulary checks.
    pub fn names(&self) -> [&'static str; 8] {
        [
            self.element,
            self.id,
            self.kind,
            self.designation,
            self.length,
            self.position,
            self.remains_behind,
            self.destination,
        ]
    }
}

/// One unit of rolling stock, such as a 6-car SLT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialUnit {
    pub id: Option<String>,
    /// Rolling-stock type code, e.g. `SLT` or `VIRM`.
    pub kind: String,
    /// Formation size as a digit string, e.g. `6`.
    pub designation: Option<String>,
    /// Physical length in centimetres.
    pub length: Option<u32>,
    /// Position within the departing formation, starting at 1.
    pub position: Option<u32>,
    pub remains_behind: Option<bool>,
    pub destination: Overlay<Station>,
}

impl MaterialUnit {
    pub fn from_record(record: &Record<'_>, fields: &MaterialFields) -> Result<Self, ParseError> {
        Ok(MaterialUnit {
            id: record.optional_text(fields.id)?.map(str::to_owned),
            kind: record.required_text(fields.kind)?.to_owned(),
            designation: record.optional(
                fields.designation,
                "digit string",
                coerce::digits,
            )?,
            length: record.optional(fields.length, "length", coerce::unsigned)?,
            position: record.optional(fields.position, "position", coerce::unsigned)?,
            remains_behind: record.optional(fields.remains_behind, "J or N", coerce::flag)?,
            destination: Overlay::read(record, fields.destination, Station::from_record)?,
        })
    }

    /// Read every material unit under `parent`.
    pub fn read_all(parent: &Record<'_>, fields: &MaterialFields) -> Result<Vec<Self>, ParseError> {
        parent.collect(fields.element, |unit| MaterialUnit::from_record(unit, fields))
    }
}
