//! Domain types for InfoPlus travel information.
//!
//! This module contains the typed model every message family maps onto.
//! All types enforce their invariants at construction time and own their
//! data, so a parsed message is a plain immutable tree.

mod alteration;
mod board;
pub(crate) mod coerce;
mod envelope;
mod journey;
mod material;
mod message;
mod overlay;
mod route;
mod station;
mod time;
mod track;
mod train;
mod wing;

pub use alteration::{Alteration, AlterationCode};
pub use board::{TrainArrival, TrainDeparture};
pub use envelope::{Envelope, ProductId};
pub use journey::{JourneyLeg, LegPart, StationVisit};
pub(crate) use journey::timestamp;
pub use material::{MaterialFields, MaterialUnit};
pub use message::{ArrivalMessage, DepartureMessage, Message, MessageKind, TripMessage};
pub use overlay::{InfoStatus, Overlay, OverlayError, Presentation, StatusValue, Utterance};
pub use route::RouteSegment;
pub use station::{InvalidStationCode, Station, StationCode, UicCode};
pub use time::{DurationError, IsoDuration};
pub use track::TrackAssignment;
pub use train::{ServiceIndicators, Train, TrainCategory, TrainNumber};
pub use wing::TrainWing;
