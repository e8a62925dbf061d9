//! The logical journey tree of a trip composition message.
//!
//! A train runs one or more logical journeys (`LogischeRit`), each split into
//! parts (`LogischeRitDeel`) that visit an ordered list of stations.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::{MaterialFields, MaterialUnit, Overlay, Station, TrackAssignment, coerce};
use crate::document::Record;
use crate::error::ParseError;

/// A logical journey: an identifier and its ordered parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyLeg {
    pub number: String,
    pub parts: Vec<LegPart>,
}

impl JourneyLeg {
    pub fn from_record(record: &Record<'_>, material: &MaterialFields) -> Result<Self, ParseError> {
        Ok(JourneyLeg {
            number: record.required_text("LogischeRitNummer")?.to_string(),
            parts: record.collect("LogischeRitDeel", |part| LegPart::from_record(part, material))?,
        })
    }

    /// Iterate over every visit of every part, in order.
    pub fn visits(&self) -> impl Iterator<Item = &StationVisit> {
        self.parts.iter().flat_map(|part| part.visits.iter())
    }
}

/// One part of a logical journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegPart {
    pub number: u32,
    pub visits: Vec<StationVisit>,
}

impl LegPart {
    pub fn from_record(record: &Record<'_>, material: &MaterialFields) -> Result<Self, ParseError> {
        Ok(LegPart {
            number: record.required("LogischeRitDeelNummer", "part number", coerce::unsigned)?,
            visits: record.collect("LogischeRitDeelStation", |visit| {
                StationVisit::from_record(visit, material)
            })?,
        })
    }

    /// Returns the visit to the station with the given code.
    pub fn visit(&self, code: &str) -> Option<&StationVisit> {
        self.visits.iter().find(|v| v.station.code.as_str() == code)
    }
}

/// A train's call (or pass) at one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationVisit {
    pub station: Station,
    pub accessible: Option<bool>,
    pub travel_assistance: Option<bool>,
    pub arrival_time: Overlay<DateTime<FixedOffset>>,
    pub departure_time: Overlay<DateTime<FixedOffset>>,
    pub arrival_track: Overlay<TrackAssignment>,
    pub departure_track: Overlay<TrackAssignment>,
    pub stops: Overlay<bool>,
    pub destination: Overlay<Station>,
    pub material: Vec<MaterialUnit>,
}

impl StationVisit {
    pub fn from_record(record: &Record<'_>, material: &MaterialFields) -> Result<Self, ParseError> {
        let station = Station::from_record(&record.required_child("Station")?)?;
        Ok(StationVisit {
            station,
            accessible: record.optional("StationToegankelijk", "J or N", coerce::flag)?,
            travel_assistance: record.optional("StationReisAssistentie", "J or N", coerce::flag)?,
            arrival_time: Overlay::read(record, "AankomstTijd", timestamp)?,
            departure_time: Overlay::read(record, "VertrekTijd", timestamp)?,
            arrival_track: Overlay::read(
                record,
                "TreinAankomstSpoor",
                TrackAssignment::from_record,
            )?,
            departure_track: Overlay::read(
                record,
                "TreinVertrekSpoor",
                TrackAssignment::from_record,
            )?,
            stops: Overlay::read(record, "Stopt", |stopt| stopt.value("J or N", coerce::flag))?,
            destination: Overlay::read(record, "TreinEindBestemming", Station::from_record)?,
            material: MaterialUnit::read_all(record, material)?,
        })
    }

    /// Returns true if the train is currently expected to stop here.
    pub fn is_stopping(&self) -> bool {
        self.stops.effective_value().copied().unwrap_or(false)
    }
}

/// Read an RFC 3339 timestamp from an observation's own text.
pub(crate) fn timestamp(record: &Record<'_>) -> Result<DateTime<FixedOffset>, ParseError> {
    record.value("RFC 3339 timestamp", coerce::timestamp)
}
