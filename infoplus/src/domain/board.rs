//! Per-station board records for departing and arriving trains.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::{
    Alteration, IsoDuration, Overlay, Presentation, RouteSegment, Station, TrackAssignment, Train,
    TrainWing,
};

/// A train departing from the board's station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainDeparture {
    pub train: Train,
    pub destination: Overlay<Station>,
    pub departure_time: Overlay<DateTime<FixedOffset>>,
    /// Delay to the second.
    pub exact_delay: Option<IsoDuration>,
    /// Delay rounded for display.
    pub damped_delay: Option<IsoDuration>,
    pub delay_presentation: Option<Presentation>,
    pub departure_track: Overlay<TrackAssignment>,
    /// Side of the platform the train leaves towards, e.g. `B`.
    pub direction: Option<String>,
    pub short_route: Overlay<RouteSegment>,
    pub wings: Vec<TrainWing>,
    pub alterations: Vec<Alteration>,
}

impl TrainDeparture {
    /// Delay of the departure, preferring the exact value.
    pub fn delay(&self) -> Option<IsoDuration> {
        self.exact_delay.or(self.damped_delay)
    }
}

/// A train arriving at the board's station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainArrival {
    pub train: Train,
    pub origin: Overlay<Station>,
    pub arrival_time: Overlay<DateTime<FixedOffset>>,
    pub exact_delay: Option<IsoDuration>,
    pub damped_delay: Option<IsoDuration>,
    pub delay_presentation: Option<Presentation>,
    pub arrival_track: Overlay<TrackAssignment>,
    /// Shortened route from the origin.
    pub short_route: Overlay<RouteSegment>,
    pub alterations: Vec<Alteration>,
}

impl TrainArrival {
    /// Delay of the arrival, preferring the exact value.
    pub fn delay(&self) -> Option<IsoDuration> {
        self.exact_delay.or(self.damped_delay)
    }
}
