//! Condensed routes and stop sequences.

use serde::Serialize;

use super::Station;
use crate::document::Record;
use crate::error::ParseError;

/// An ordered list of stations.
///
/// Used both for the shortened route shown on boards and for the full stop
/// sequence of a wing. The planned/current status wraps the whole list, so
/// it is read with `Overlay<RouteSegment>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteSegment {
    pub stations: Vec<Station>,
}

impl RouteSegment {
    /// Build from an element whose `Station` children are the route.
    pub fn from_record(record: &Record<'_>) -> Result<Self, ParseError> {
        Ok(RouteSegment {
            stations: record.collect("Station", Station::from_record)?,
        })
    }

    pub fn first(&self) -> Option<&Station> {
        self.stations.first()
    }

    pub fn last(&self) -> Option<&Station> {
        self.stations.last()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Returns the station codes in order.
    pub fn codes(&self) -> Vec<&str> {
        self.stations.iter().map(|s| s.code.as_str()).collect()
    }
}
