//! Trip composition (RIT) adapter.

use super::SchemaBinding;
use crate::document::Record;
use crate::domain::{Envelope, JourneyLeg, MaterialFields, Train, TripMessage, coerce};
use crate::error::ParseError;

/// Map a `ReisInformatieProductRitInfo` element onto a [`TripMessage`].
///
/// The payload (`RitInfo`) describes the train itself; its `LogischeRit`
/// children form the journey tree. At least one logical journey is required.
pub fn adapt(product: &Record<'_>, binding: &SchemaBinding) -> Result<TripMessage, ParseError> {
    let envelope = Envelope::from_record(product, true)?;
    let payload = product.required_child(binding.payload)?;
    let material = binding.material.unwrap_or(MaterialFields::TRIP);

    let date = payload.required("TreinDatum", "YYYY-MM-DD date", coerce::date)?;
    let legs = payload.collect("LogischeRit", |leg| JourneyLeg::from_record(leg, &material))?;
    if legs.is_empty() {
        return Err(ParseError::missing(payload.path().indexed("LogischeRit", 0)));
    }
    let train = Train::from_record(&payload, date)?.with_legs(legs);

    Ok(TripMessage { envelope, train })
}
