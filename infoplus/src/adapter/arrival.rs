//! Dynamic arrival board (DAS) adapter.

use chrono::NaiveDate;

use super::{SchemaBinding, delay};
use crate::document::Record;
use crate::domain::{
    Alteration, ArrivalMessage, Envelope, Overlay, Presentation, RouteSegment, Station,
    TrackAssignment, Train, TrainArrival, coerce, timestamp,
};
use crate::error::ParseError;

/// Map a `ReisInformatieProductDAS` element onto an [`ArrivalMessage`].
pub fn adapt(product: &Record<'_>, binding: &SchemaBinding) -> Result<ArrivalMessage, ParseError> {
    let envelope = Envelope::from_record(product, false)?;
    let board = product.required_child(binding.payload)?;

    let ride_id = board.required_text("RitId")?.to_string();
    let date = board.required("RitDatum", "YYYY-MM-DD date", coerce::date)?;
    let station = Station::from_record(&board.required_child("RitStation")?)?;
    let arrival = train_arrival(&board.required_child("TreinAankomst")?, date)?;

    Ok(ArrivalMessage {
        envelope,
        ride_id,
        date,
        station,
        arrival,
    })
}

fn train_arrival(aankomst: &Record<'_>, date: NaiveDate) -> Result<TrainArrival, ParseError> {
    let origin = Overlay::read_required(aankomst, "TreinHerkomst", Station::from_record)?
        .presented(aankomst, "PresentatieTreinHerkomst")?;
    let arrival_track = Overlay::read(aankomst, "TreinAankomstSpoor", TrackAssignment::from_record)?
        .presented(aankomst, "PresentatieTreinAankomstSpoor")?;
    let short_route = Overlay::read(aankomst, "VerkorteRouteHerkomst", RouteSegment::from_record)?
        .presented(aankomst, "PresentatieVerkorteRouteHerkomst")?;

    Ok(TrainArrival {
        train: Train::from_record(aankomst, date)?,
        origin,
        arrival_time: Overlay::read_required(aankomst, "AankomstTijd", timestamp)?,
        exact_delay: delay(aankomst, "ExacteAankomstVertraging")?,
        damped_delay: delay(aankomst, "GedempteAankomstVertraging")?,
        delay_presentation: Presentation::read(aankomst, "PresentatieAankomstVertraging")?,
        arrival_track,
        short_route,
        alterations: Alteration::read_all(aankomst, "WijzigingHerkomst")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::decode;
    use crate::domain::{InfoStatus, MessageKind};
    use crate::error::ErrorKind;

    fn adapt_str(xml: &str) -> Result<ArrivalMessage, ParseError> {
        let element = decode(xml.as_bytes(), 16).unwrap();
        adapt(
            &Record::root(&element),
            crate::adapter::binding(MessageKind::Arrival).unwrap(),
        )
    }

    const MINIMAL: &str = r#"<ReisInformatieProductDAS Versie="6.1">
        <RIPAdministratie>
            <ReisInformatieProductID>8357002889258013</ReisInformatieProductID>
            <AbonnementId>55</AbonnementId>
        </RIPAdministratie>
        <DynamischeAankomstStaat>
            <RitId>2889</RitId>
            <RitDatum>2025-12-23</RitDatum>
            <RitStation><StationCode>GD</StationCode></RitStation>
            <TreinAankomst>
                <TreinNummer>2889</TreinNummer>
                <TreinSoort Code="IC">Intercity</TreinSoort>
                <Vervoerder>NS</Vervoerder>
                <TreinHerkomst InfoStatus="Actueel"><StationCode>RTD</StationCode></TreinHerkomst>
                <AankomstTijd InfoStatus="Gepland">2025-12-23T08:12:00+01:00</AankomstTijd>
            </TreinAankomst>
        </DynamischeAankomstStaat>
    </ReisInformatieProductDAS>"#;

    #[test]
    fn current_only_origin() {
        let das = adapt_str(MINIMAL).unwrap();
        let origin = &das.arrival.origin;
        assert_eq!(origin.len(), 1);
        assert_eq!(origin.effective().unwrap().status, InfoStatus::Current);
        assert_eq!(origin.planned(), None);
        assert!(das.arrival.arrival_track.is_empty());
        assert!(das.arrival.alterations.is_empty());
        assert_eq!(das.arrival.delay(), None);
    }

    #[test]
    fn arrival_time_required() {
        let xml = MINIMAL.replace(
            r#"<AankomstTijd InfoStatus="Gepland">2025-12-23T08:12:00+01:00</AankomstTijd>"#,
            "",
        );
        let err = adapt_str(&xml).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedOverlay);
        assert_eq!(
            err.path().unwrap().to_string(),
            "dynamischeAankomstStaat.treinAankomst.aankomstTijd"
        );
    }

    #[test]
    fn missing_ride_date() {
        let xml = MINIMAL.replace("<RitDatum>2025-12-23</RitDatum>", "");
        let err = adapt_str(&xml).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(err.path().unwrap().to_string(), "dynamischeAankomstStaat.ritDatum");
    }
}
