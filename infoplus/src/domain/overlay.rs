//! Planned/current status overlays.
//!
//! Almost every attribute of a train in InfoPlus is reported as a short
//! sequence of observations: the planned value, followed by the current one
//! once it is known. [`Overlay`] holds that sequence and enforces its shape:
//! at most one entry per status, planned before current. The last entry is
//! the effective value.

use std::fmt;

use serde::Serialize;

use crate::document::Record;
use crate::error::ParseError;

/// Attribute that tags each observation with its status.
pub const INFO_STATUS: &str = "InfoStatus";

/// Status of one observation of an attribute.
///
/// Variants are declared in observation order; `Planned < Current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[non_exhaustive]
pub enum InfoStatus {
    /// The value from the timetable ("Gepland").
    Planned,
    /// The most recent observation ("Actueel").
    Current,
}

impl InfoStatus {
    /// Parse the wire representation of a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Gepland" => Some(InfoStatus::Planned),
            "Actueel" => Some(InfoStatus::Current),
            _ => None,
        }
    }

    /// Returns the wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            InfoStatus::Planned => "Gepland",
            InfoStatus::Current => "Actueel",
        }
    }
}

impl fmt::Display for InfoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One localized rendering: an ordered run of display fragments.
///
/// Fragments are opaque; several of them exist when the source segments the
/// text for styling, e.g. `["Rotterdam", "C."]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Utterance {
    pub language: Option<String>,
    pub fragments: Vec<String>,
}

/// Display text for an attribute, one utterance per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub utterances: Vec<Utterance>,
}

impl Presentation {
    /// Returns the utterance for `language`, if present.
    pub fn for_language(&self, language: &str) -> Option<&Utterance> {
        self.utterances
            .iter()
            .find(|u| u.language.as_deref() == Some(language))
    }

    /// Returns the first fragment of the first utterance.
    pub fn first_fragment(&self) -> Option<&str> {
        self.utterances
            .first()
            .and_then(|u| u.fragments.first())
            .map(String::as_str)
    }

    /// Read the presentation block called `name` under `parent`, if any.
    pub fn read(parent: &Record<'_>, name: &str) -> Result<Option<Self>, ParseError> {
        let Some(block) = parent.child(name)? else {
            return Ok(None);
        };
        let utterances = block.collect("Uitingen", |uitingen| {
            Ok(Utterance {
                language: uitingen.attribute("Taal").map(str::to_owned),
                fragments: uitingen
                    .children("Uiting")
                    .iter()
                    .map(|uiting| uiting.text().to_owned())
                    .collect(),
            })
        })?;
        Ok(Some(Presentation { utterances }))
    }
}

/// A value tagged with the status of the observation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusValue<T> {
    pub status: InfoStatus,
    pub value: T,
    pub presentation: Option<Presentation>,
}

impl<T> StatusValue<T> {
    pub fn new(status: InfoStatus, value: T) -> Self {
        Self {
            status,
            value,
            presentation: None,
        }
    }

    pub fn planned(value: T) -> Self {
        Self::new(InfoStatus::Planned, value)
    }

    pub fn current(value: T) -> Self {
        Self::new(InfoStatus::Current, value)
    }
}

/// Violations of the overlay shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    /// A status occurs more than once
    #[error("more than one {status} observation")]
    DuplicateStatus { status: InfoStatus, index: usize },

    /// A status appears after a status that must follow it
    #[error("{status} observation after {previous}")]
    OutOfOrder {
        status: InfoStatus,
        previous: InfoStatus,
        index: usize,
    },

    /// The attribute requires at least one observation
    #[error("at least one observation is required")]
    Empty,

    /// A presentation block exists for an attribute without observations
    #[error("presentation given without any observation")]
    OrphanPresentation,
}

impl OverlayError {
    /// Position of the offending entry, when a single entry is to blame.
    pub fn index(&self) -> Option<usize> {
        match self {
            OverlayError::DuplicateStatus { index, .. }
            | OverlayError::OutOfOrder { index, .. } => Some(*index),
            OverlayError::Empty | OverlayError::OrphanPresentation => None,
        }
    }
}

/// The ordered observations of one attribute.
///
/// # Examples
///
/// ```
/// use infoplus::domain::{InfoStatus, Overlay, StatusValue};
///
/// let track = Overlay::from_records(vec![
///     StatusValue::planned(3),
///     StatusValue::current(4),
/// ])
/// .unwrap();
/// assert_eq!(track.planned(), Some(&3));
/// assert_eq!(track.effective_value(), Some(&4));
/// assert_eq!(track.effective().unwrap().status, InfoStatus::Current);
///
/// // Two planned values are rejected
/// assert!(Overlay::from_records(vec![StatusValue::planned(3), StatusValue::planned(4)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Overlay<T>(Vec<StatusValue<T>>);

impl<T> Default for Overlay<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Overlay<T> {
    /// An attribute without observations.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate and wrap observations, keeping their order.
    pub fn from_records(records: Vec<StatusValue<T>>) -> Result<Self, OverlayError> {
        let mut previous: Option<InfoStatus> = None;
        for (index, record) in records.iter().enumerate() {
            if let Some(previous) = previous {
                if record.status == previous {
                    return Err(OverlayError::DuplicateStatus {
                        status: record.status,
                        index,
                    });
                }
                if record.status < previous {
                    return Err(OverlayError::OutOfOrder {
                        status: record.status,
                        previous,
                        index,
                    });
                }
            }
            previous = Some(record.status);
        }
        Ok(Self(records))
    }

    /// Like [`Overlay::from_records`], but at least one observation is required.
    pub fn required(records: Vec<StatusValue<T>>) -> Result<Self, OverlayError> {
        if records.is_empty() {
            return Err(OverlayError::Empty);
        }
        Self::from_records(records)
    }

    /// Attach presentation text to the effective observation.
    pub fn with_presentation(
        mut self,
        presentation: Option<Presentation>,
    ) -> Result<Self, OverlayError> {
        let Some(presentation) = presentation else {
            return Ok(self);
        };
        match self.0.last_mut() {
            Some(effective) => {
                effective.presentation = Some(presentation);
                Ok(self)
            }
            None => Err(OverlayError::OrphanPresentation),
        }
    }

    pub fn entries(&self) -> &[StatusValue<T>] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StatusValue<T>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the observation with the given status.
    pub fn get(&self, status: InfoStatus) -> Option<&StatusValue<T>> {
        self.0.iter().find(|entry| entry.status == status)
    }

    pub fn planned(&self) -> Option<&T> {
        self.get(InfoStatus::Planned).map(|entry| &entry.value)
    }

    pub fn current(&self) -> Option<&T> {
        self.get(InfoStatus::Current).map(|entry| &entry.value)
    }

    /// The most recent observation.
    pub fn effective(&self) -> Option<&StatusValue<T>> {
        self.0.last()
    }

    pub fn effective_value(&self) -> Option<&T> {
        self.effective().map(|entry| &entry.value)
    }

    /// Presentation of the effective observation.
    pub fn presentation(&self) -> Option<&Presentation> {
        self.effective().and_then(|entry| entry.presentation.as_ref())
    }

    /// Returns true if the planned and current values differ.
    pub fn is_changed(&self) -> bool
    where
        T: PartialEq,
    {
        match (self.planned(), self.current()) {
            (Some(planned), Some(current)) => planned != current,
            _ => false,
        }
    }

    /// Read every `name` child of `parent` as one observation.
    ///
    /// Each child must carry an `InfoStatus` attribute. An absent attribute
    /// yields an empty overlay.
    pub fn read(
        parent: &Record<'_>,
        name: &str,
        build: impl Fn(&Record<'_>) -> Result<T, ParseError>,
    ) -> Result<Self, ParseError> {
        let records = Self::read_records(parent, name, build)?;
        Self::from_records(records).map_err(|source| overlay_error(parent, name, source))
    }

    /// Like [`Overlay::read`], but at least one observation is required.
    pub fn read_required(
        parent: &Record<'_>,
        name: &str,
        build: impl Fn(&Record<'_>) -> Result<T, ParseError>,
    ) -> Result<Self, ParseError> {
        let records = Self::read_records(parent, name, build)?;
        Self::required(records).map_err(|source| overlay_error(parent, name, source))
    }

    /// Attach the presentation block called `name` under `parent`.
    pub fn presented(self, parent: &Record<'_>, name: &str) -> Result<Self, ParseError> {
        let presentation = Presentation::read(parent, name)?;
        self.with_presentation(presentation)
            .map_err(|source| ParseError::overlay(parent.path().child(name), source))
    }

    fn read_records(
        parent: &Record<'_>,
        name: &str,
        build: impl Fn(&Record<'_>) -> Result<T, ParseError>,
    ) -> Result<Vec<StatusValue<T>>, ParseError> {
        parent.collect(name, |observation| {
            let status = observation.required_attribute(
                INFO_STATUS,
                "InfoStatus (Gepland or Actueel)",
                InfoStatus::parse,
            )?;
            Ok(StatusValue::new(status, build(observation)?))
        })
    }
}

fn overlay_error(parent: &Record<'_>, name: &str, source: OverlayError) -> ParseError {
    let path = match source.index() {
        Some(index) => parent.path().indexed(name, index),
        None => parent.path().child(name),
    };
    ParseError::overlay(path, source)
}

impl<'a, T> IntoIterator for &'a Overlay<T> {
    type Item = &'a StatusValue<T>;
    type IntoIter = std::slice::Iter<'a, StatusValue<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
