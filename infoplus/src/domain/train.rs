//! Train identity and service attributes.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::{JourneyLeg, coerce};
use crate::document::Record;
use crate::error::ParseError;

/// A positive train number.
///
/// # Examples
///
/// ```
/// use infoplus::domain::TrainNumber;
///
/// assert_eq!(TrainNumber::parse("2889").unwrap().get(), 2889);
/// assert!(TrainNumber::parse("0").is_none());
/// assert!(TrainNumber::parse("-5").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TrainNumber(u32);

impl TrainNumber {
    pub fn new(number: u32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    pub fn parse(s: &str) -> Option<Self> {
        coerce::unsigned(s).and_then(Self::new)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Service category, e.g. code `IC` with label `Intercity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainCategory {
    pub code: String,
    pub label: String,
}

impl TrainCategory {
    /// Read `<TreinSoort Code="IC">Intercity</TreinSoort>`.
    pub fn from_record(record: &Record<'_>) -> Result<Self, ParseError> {
        let code = record.required_attribute("Code", "category code", |s| {
            (!s.is_empty()).then(|| s.to_string())
        })?;
        Ok(TrainCategory {
            code,
            label: record.text().to_string(),
        })
    }
}

/// Optional J/N indicators describing how the service may be used.
///
/// Each indicator is `None` when the message does not carry it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ServiceIndicators {
    pub reservation: Option<bool>,
    pub supplement: Option<bool>,
    pub special_ticket: Option<bool>,
    pub do_not_board: Option<bool>,
    pub rear_part_remains: Option<bool>,
    pub shunting: Option<bool>,
    pub journey_planner: Option<bool>,
}

impl ServiceIndicators {
    pub fn from_record(record: &Record<'_>) -> Result<Self, ParseError> {
        let flag = |name: &str| record.optional(name, "J or N", coerce::flag);
        Ok(ServiceIndicators {
            reservation: flag("Reserveren")?,
            supplement: flag("Toeslag")?,
            special_ticket: flag("SpeciaalKaartje")?,
            do_not_board: flag("NietInstappen")?,
            rear_part_remains: flag("AchterBlijvenAchtersteTreinDeel")?,
            shunting: flag("RangeerBeweging")?,
            journey_planner: flag("Reisplanner")?,
        })
    }

    /// Element names of the indicators.
    pub const NAMES: [&'static str; 7] = [
        "Reserveren",
        "Toeslag",
        "SpeciaalKaartje",
        "NietInstappen",
        "AchterBlijvenAchtersteTreinDeel",
        "RangeerBeweging",
        "Reisplanner",
    ];
}

/// A train as described by any message family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Train {
    pub number: TrainNumber,
    pub date: NaiveDate,
    pub category: TrainCategory,
    pub carrier: String,
    pub indicators: ServiceIndicators,
    /// The logical journey tree; empty outside trip composition messages.
    pub legs: Vec<JourneyLeg>,
}

impl Train {
    /// Build the train identity from `record`.
    ///
    /// Board messages carry the service date outside the train element, so
    /// the caller supplies it. Legs are attached by the trip adapter.
    pub fn from_record(record: &Record<'_>, date: NaiveDate) -> Result<Self, ParseError> {
        Ok(Train {
            number: record.required("TreinNummer", "positive train number", TrainNumber::parse)?,
            date,
            category: TrainCategory::from_record(&record.required_child("TreinSoort")?)?,
            carrier: record.required_text("Vervoerder")?.to_string(),
            indicators: ServiceIndicators::from_record(record)?,
            legs: Vec::new(),
        })
    }

    pub fn with_legs(mut self, legs: Vec<JourneyLeg>) -> Self {
        self.legs = legs;
        self
    }
}
