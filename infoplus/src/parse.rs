//! Parsing entry points.
//!
//! [`Parser`] ties the pieces together: decode the buffer, locate the
//! product element for the declared family, then run that family's adapter.
//! A parser holds only its configuration, so one instance can be shared
//! freely between threads.

use std::io::Read;

use tracing::debug;

use crate::adapter::{self, SchemaBinding, arrival, departure, trip};
use crate::config::ParserConfig;
use crate::document::{self, Record};
use crate::domain::{ArrivalMessage, DepartureMessage, Message, MessageKind, Train, TripMessage};
use crate::error::ParseError;

/// Parses InfoPlus messages with a given configuration.
///
/// # Examples
///
/// ```
/// use infoplus::{ErrorKind, MessageKind, Parser, ParserConfig};
///
/// let parser = Parser::new(ParserConfig::default().with_max_depth(8));
/// let err = parser.parse(MessageKind::Trip, b"<PutReisInformatieBoodschapIn").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::DocumentDecodeFailed);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a buffer declared to hold a message of family `kind`.
    pub fn parse(&self, kind: MessageKind, buffer: &[u8]) -> Result<Message, ParseError> {
        debug!(kind = %kind, bytes = buffer.len(), "received message buffer");
        self.parse_reader(kind, buffer)
    }

    /// Parse a message of family `kind` from a reader.
    pub fn parse_reader<R: Read>(
        &self,
        kind: MessageKind,
        reader: R,
    ) -> Result<Message, ParseError> {
        match kind {
            MessageKind::Trip => self.parse_trip(reader).map(Message::Trip),
            MessageKind::Departure => self.parse_departure(reader).map(Message::Departure),
            MessageKind::Arrival => self.parse_arrival(reader).map(Message::Arrival),
        }
    }

    pub fn parse_trip<R: Read>(&self, reader: R) -> Result<TripMessage, ParseError> {
        self.run(MessageKind::Trip, reader, trip::adapt)
    }

    pub fn parse_departure<R: Read>(&self, reader: R) -> Result<DepartureMessage, ParseError> {
        self.run(MessageKind::Departure, reader, departure::adapt)
    }

    pub fn parse_arrival<R: Read>(&self, reader: R) -> Result<ArrivalMessage, ParseError> {
        self.run(MessageKind::Arrival, reader, arrival::adapt)
    }

    fn run<R: Read, T: Rooted>(
        &self,
        kind: MessageKind,
        reader: R,
        adapt: fn(&Record<'_>, &SchemaBinding) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        debug!(kind = %kind, "parsing message");
        let result = self.decode_and_adapt(kind, reader, adapt);
        match &result {
            Ok(message) => debug!(
                kind = %kind,
                train = %message.train().number,
                "parsed message"
            ),
            Err(e) => {
                let path = e.path().map(ToString::to_string).unwrap_or_default();
                debug!(kind = %kind, error = %e.kind(), path = %path, "failed to parse message");
            }
        }
        result
    }

    fn decode_and_adapt<R: Read, T>(
        &self,
        kind: MessageKind,
        reader: R,
        adapt: fn(&Record<'_>, &SchemaBinding) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let binding = adapter::binding(kind)?;
        let root = document::decode(reader, self.config.max_depth)?;
        let product = adapter::locate(&root, binding, &self.config)?;
        adapt(&product, binding)
    }
}

/// A parsed message root with a train at its centre.
trait Rooted {
    fn train(&self) -> &Train;
}

impl Rooted for TripMessage {
    fn train(&self) -> &Train {
        &self.train
    }
}

impl Rooted for DepartureMessage {
    fn train(&self) -> &Train {
        &self.departure.train
    }
}

impl Rooted for ArrivalMessage {
    fn train(&self) -> &Train {
        &self.arrival.train
    }
}

/// Parse a buffer with the default configuration.
pub fn parse(kind: MessageKind, buffer: &[u8]) -> Result<Message, ParseError> {
    Parser::default().parse(kind, buffer)
}

/// Parse from a reader with the default configuration.
pub fn parse_reader<R: Read>(kind: MessageKind, reader: R) -> Result<Message, ParseError> {
    Parser::default().parse_reader(kind, reader)
}

pub fn parse_trip_str(xml: &str) -> Result<TripMessage, ParseError> {
    Parser::default().parse_trip(xml.as_bytes())
}

pub fn parse_trip_reader<R: Read>(reader: R) -> Result<TripMessage, ParseError> {
    Parser::default().parse_trip(reader)
}

pub fn parse_departure_str(xml: &str) -> Result<DepartureMessage, ParseError> {
    Parser::default().parse_departure(xml.as_bytes())
}

pub fn parse_departure_reader<R: Read>(reader: R) -> Result<DepartureMessage, ParseError> {
    Parser::default().parse_departure(reader)
}

pub fn parse_arrival_str(xml: &str) -> Result<ArrivalMessage, ParseError> {
    Parser::default().parse_arrival(xml.as_bytes())
}

pub fn parse_arrival_reader<R: Read>(reader: R) -> Result<ArrivalMessage, ParseError> {
    Parser::default().parse_arrival(reader)
}
