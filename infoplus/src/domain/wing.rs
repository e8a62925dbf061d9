//! Train wings on the departure board.

use serde::Serialize;

use super::{
    Alteration, MaterialFields, MaterialUnit, Overlay, RouteSegment, Station, TrackAssignment,
};
use crate::document::Record;
use crate::error::ParseError;

/// Part of a departing formation with its own destination and stops.
///
/// A train that splits en route has one wing per destination. Wings share
/// the physical platform but may have their own track phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainWing {
    pub departure_track: Overlay<TrackAssignment>,
    pub destination: Overlay<Station>,
    pub stops: Overlay<RouteSegment>,
    pub material: Vec<MaterialUnit>,
    pub alterations: Vec<Alteration>,
}

impl TrainWing {
    pub fn from_record(record: &Record<'_>, material: &MaterialFields) -> Result<Self, ParseError> {
        Ok(TrainWing {
            departure_track: Overlay::read(
                record,
                "TreinVleugelVertrekSpoor",
                TrackAssignment::from_record,
            )?
            .presented(record, "PresentatieTreinVleugelVertrekSpoor")?,
            destination: Overlay::read_required(
                record,
                "TreinVleugelEindBestemming",
                Station::from_record,
            )?
            .presented(record, "PresentatieTreinVleugelEindBestemming")?,
            stops: Overlay::read(record, "StopStations", RouteSegment::from_record)?,
            material: MaterialUnit::read_all(record, material)?,
            alterations: Alteration::read_all(record, "Wijziging")?,
        })
    }
}
