//! Product administration shared by every message family.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::coerce;
use crate::document::Record;
use crate::error::ParseError;

/// Identifier of one published information product, kept as its digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn parse(s: &str) -> Option<Self> {
        coerce::digits(s).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The administrative envelope of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub product_id: ProductId,
    pub subscription_id: u32,
    /// Schema version, e.g. `6.2`.
    pub version: String,
    /// Version of the publishing application; only trip messages carry it.
    pub application_version: Option<String>,
    /// Production time of the product.
    pub timestamp: Option<DateTime<FixedOffset>>,
    /// Time the information was valid at.
    pub issued_at: Option<DateTime<FixedOffset>>,
}

impl Envelope {
    /// Read the envelope from a product element.
    ///
    /// Every failure is reported as `EnvelopeInvalid`.
    pub fn from_record(
        product: &Record<'_>,
        require_application_version: bool,
    ) -> Result<Self, ParseError> {
        Self::read(product, require_application_version).map_err(ParseError::into_envelope)
    }

    fn read(product: &Record<'_>, require_application_version: bool) -> Result<Self, ParseError> {
        let version = product.required_attribute("Versie", "schema version", non_empty)?;
        let application_version = if require_application_version {
            Some(product.required_attribute("ApplicatieVersie", "application version", non_empty)?)
        } else {
            product.optional_attribute("ApplicatieVersie", "application version", non_empty)?
        };
        let timestamp =
            product.optional_attribute("TimeStamp", "RFC 3339 timestamp", coerce::timestamp)?;

        let admin = product.required_child("RIPAdministratie")?;
        Ok(Envelope {
            product_id: admin.required("ReisInformatieProductID", "product id", ProductId::parse)?,
            subscription_id: admin.required("AbonnementId", "subscription id", coerce::unsigned)?,
            version,
            application_version,
            timestamp,
            issued_at: admin.optional(
                "ReisInformatieTijdstip",
                "RFC 3339 timestamp",
                coerce::timestamp,
            )?,
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
