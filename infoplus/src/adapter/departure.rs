//! Dynamic departure board (DVS) adapter.

use chrono::NaiveDate;

use super::{SchemaBinding, delay};
use crate::document::Record;
use crate::domain::{
    Alteration, DepartureMessage, Envelope, MaterialFields, Overlay, Presentation, RouteSegment,
    Station, TrackAssignment, Train, TrainDeparture, TrainWing, coerce, timestamp,
};
use crate::error::ParseError;

/// Map a `ReisInformatieProductDVS` element onto a [`DepartureMessage`].
pub fn adapt(
    product: &Record<'_>,
    binding: &SchemaBinding,
) -> Result<DepartureMessage, ParseError> {
    let envelope = Envelope::from_record(product, false)?;
    let board = product.required_child(binding.payload)?;
    let material = binding.material.unwrap_or(MaterialFields::DEPARTURE);

    let ride_id = board.required_text("RitId")?.to_string();
    let date = board.required("RitDatum", "YYYY-MM-DD date", coerce::date)?;
    let station = Station::from_record(&board.required_child("RitStation")?)?;
    let departure = train_departure(&board.required_child("Trein")?, date, &material)?;

    Ok(DepartureMessage {
        envelope,
        ride_id,
        date,
        station,
        departure,
    })
}

fn train_departure(
    trein: &Record<'_>,
    date: NaiveDate,
    material: &MaterialFields,
) -> Result<TrainDeparture, ParseError> {
    let wings = trein.collect("TreinVleugel", |wing| TrainWing::from_record(wing, material))?;
    let destination = Overlay::read_required(trein, "TreinEindBestemming", Station::from_record)?
        .presented(trein, "PresentatieTreinEindBestemming")?;
    let departure_track = Overlay::read(trein, "TreinVertrekSpoor", TrackAssignment::from_record)?
        .presented(trein, "PresentatieTreinVertrekSpoor")?;
    let short_route = Overlay::read(trein, "VerkorteRoute", RouteSegment::from_record)?
        .presented(trein, "PresentatieVerkorteRoute")?;

    Ok(TrainDeparture {
        train: Train::from_record(trein, date)?,
        destination,
        departure_time: Overlay::read_required(trein, "VertrekTijd", timestamp)?,
        exact_delay: delay(trein, "ExacteVertrekVertraging")?,
        damped_delay: delay(trein, "GedempteVertrekVertraging")?,
        delay_presentation: Presentation::read(trein, "PresentatieVertrekVertraging")?,
        departure_track,
        direction: trein.optional_text("VertrekRichting")?.map(str::to_owned),
        short_route,
        wings,
        alterations: Alteration::read_all(trein, "Wijziging")?,
    })
}
