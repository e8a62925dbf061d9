//! InfoPlus travel information messages.
//!
//! Decodes the three InfoPlus message families (trip composition, dynamic
//! departure board and dynamic arrival board) into one shared, typed domain
//! model built around planned/current status overlays.
//!
//! ```
//! use infoplus::{MessageKind, parse};
//!
//! let result = parse(MessageKind::Departure, b"<not-infoplus/>");
//! assert!(result.is_err());
//! ```

pub mod adapter;
pub mod config;
pub mod document;
pub mod domain;
pub mod error;
pub mod parse;

#[cfg(test)]
mod tests;

pub use config::ParserConfig;
pub use domain::{
    ArrivalMessage, DepartureMessage, Message, MessageKind, Overlay, StatusValue, TripMessage,
};
pub use error::{ErrorKind, ParseError};
pub use parse::{
    Parser, parse, parse_arrival_reader, parse_arrival_str, parse_departure_reader,
    parse_departure_str, parse_reader, parse_trip_reader, parse_trip_str,
};
