//! Message roots.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::{Envelope, Station, Train, TrainArrival, TrainDeparture};

/// The declared family of a message buffer.
///
/// The family is never sniffed from the content; callers know which feed a
/// buffer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MessageKind {
    /// Trip composition (RIT).
    Trip,
    /// Dynamic departure board (DVS).
    Departure,
    /// Dynamic arrival board (DAS).
    Arrival,
}

impl MessageKind {
    pub const ALL: [MessageKind; 3] = [
        MessageKind::Trip,
        MessageKind::Departure,
        MessageKind::Arrival,
    ];

    /// Returns the short family name used in the feeds.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Trip => "RIT",
            MessageKind::Departure => "DVS",
            MessageKind::Arrival => "DAS",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trip composition message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripMessage {
    pub envelope: Envelope,
    pub train: Train,
}

/// A departure board message for one train at one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartureMessage {
    pub envelope: Envelope,
    pub ride_id: String,
    pub date: NaiveDate,
    pub station: Station,
    pub departure: TrainDeparture,
}

/// An arrival board message for one train at one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrivalMessage {
    pub envelope: Envelope,
    pub ride_id: String,
    pub date: NaiveDate,
    pub station: Station,
    pub arrival: TrainArrival,
}

/// Any parsed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Message {
    Trip(TripMessage),
    Departure(DepartureMessage),
    Arrival(ArrivalMessage),
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Trip(_) => MessageKind::Trip,
            Message::Departure(_) => MessageKind::Departure,
            Message::Arrival(_) => MessageKind::Arrival,
        }
    }

    pub fn envelope(&self) -> &Envelope {
        match self {
            Message::Trip(m) => &m.envelope,
            Message::Departure(m) => &m.envelope,
            Message::Arrival(m) => &m.envelope,
        }
    }

    pub fn train(&self) -> &Train {
        match self {
            Message::Trip(m) => &m.train,
            Message::Departure(m) => &m.departure.train,
            Message::Arrival(m) => &m.arrival.train,
        }
    }

    pub fn as_trip(&self) -> Option<&TripMessage> {
        match self {
            Message::Trip(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_departure(&self) -> Option<&DepartureMessage> {
        match self {
            Message::Departure(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_arrival(&self) -> Option<&ArrivalMessage> {
        match self {
            Message::Arrival(m) => Some(m),
            _ => None,
        }
    }
}
