//! End-to-end tests over captured messages of each family.

use std::io::Write;

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use crate::adapter::binding;
use crate::domain::{InfoStatus, IsoDuration, UicCode};
use crate::{ErrorKind, Message, MessageKind, Parser, ParserConfig};

const DAS: &str = include_str!("fixtures/das-2889-gouda.xml");
const DVS: &str = include_str!("fixtures/dvs-6789-utrecht-lunetten.xml");
const RIT: &str = include_str!("fixtures/rit-2992-maastricht.xml");

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("infoplus=trace"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

fn fixture(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Trip => RIT,
        MessageKind::Departure => DVS,
        MessageKind::Arrival => DAS,
    }
}

#[test]
fn arrival_board() {
    init_tracing();
    let das = crate::parse_arrival_str(DAS).unwrap();

    assert_eq!(das.envelope.version, "6.1");
    assert_eq!(das.envelope.product_id.as_str(), "8357002889258013");
    assert_eq!(das.envelope.subscription_id, 55);
    assert!(das.envelope.issued_at.is_some());
    assert_eq!(das.ride_id, "2889");
    assert_eq!(das.date, NaiveDate::from_ymd_opt(2025, 12, 23).unwrap());
    assert_eq!(das.station.code.as_str(), "GD");
    assert_eq!(das.station.long_name.as_deref(), Some("Gouda"));
    assert_eq!(das.station.uic_code, Some(UicCode::new(8400258)));

    let arrival = &das.arrival;
    assert_eq!(arrival.train.number.get(), 2889);
    assert_eq!(arrival.train.category.code, "IC");
    assert_eq!(arrival.train.category.label, "Intercity");
    assert_eq!(arrival.train.carrier, "NS");
    assert!(arrival.train.legs.is_empty());

    let origin = &arrival.origin;
    assert_eq!(origin.len(), 2);
    assert_eq!(origin.planned().unwrap().code.as_str(), "RTD");
    let current = origin.current().unwrap();
    assert_eq!(current.code.as_str(), "RTD");
    assert_eq!(current.uic_code, Some(UicCode::new(8400530)));
    assert!(!origin.is_changed());
    let presentation = origin.presentation().unwrap();
    assert_eq!(presentation.utterances.len(), 2);
    assert_eq!(presentation.first_fragment(), Some("Rotterdam C."));
    assert_eq!(
        presentation.for_language("nl").unwrap().fragments,
        vec!["Rotterdam C.".to_string()]
    );

    assert!(arrival.arrival_time.is_changed());
    assert_eq!(
        arrival.arrival_time.effective_value().unwrap().to_rfc3339(),
        "2025-12-23T08:13:04+01:00"
    );
    assert_eq!(arrival.exact_delay, IsoDuration::from_seconds(64));
    assert_eq!(arrival.damped_delay, Some(IsoDuration::zero()));
    assert_eq!(arrival.delay(), IsoDuration::from_seconds(64));
    assert_eq!(
        arrival.delay_presentation.as_ref().unwrap().first_fragment(),
        Some("+1 min.")
    );

    assert_eq!(arrival.arrival_track.len(), 2);
    assert_eq!(arrival.arrival_track.planned().unwrap().number, 3);
    assert_eq!(arrival.arrival_track.current().unwrap().number, 3);
    assert_eq!(
        arrival.arrival_track.presentation().unwrap().first_fragment(),
        Some("3")
    );
    assert_eq!(arrival.short_route.current().unwrap().codes(), vec!["RTA"]);
    assert_eq!(
        arrival.short_route.presentation().unwrap().first_fragment(),
        Some("Alexander")
    );

    assert_eq!(arrival.alterations.len(), 1);
    assert_eq!(arrival.alterations[0].code.as_str(), "11");
    assert_eq!(
        arrival.alterations[0].presentation.as_ref().unwrap().first_fragment(),
        Some("Vertraagd")
    );
}

#[test]
fn departure_board() {
    init_tracing();
    let dvs = crate::parse_departure_str(DVS).unwrap();

    assert_eq!(dvs.envelope.version, "6.2");
    assert_eq!(dvs.envelope.product_id.as_str(), "5355006789623005");
    assert_eq!(dvs.envelope.subscription_id, 54);
    assert_eq!(dvs.envelope.application_version, None);
    assert_eq!(dvs.date, NaiveDate::from_ymd_opt(2025, 12, 21).unwrap());
    assert_eq!(dvs.station.code.as_str(), "UTLN");
    assert_eq!(dvs.station.display_name(), "Utrecht Lunetten");
    assert_eq!(dvs.station.uic_code, Some(UicCode::new(8400623)));

    let departure = &dvs.departure;
    let train = &departure.train;
    assert_eq!(train.number.get(), 6789);
    assert_eq!(train.category.code, "SPR");
    assert_eq!(train.category.label, "Sprinter");
    assert_eq!(train.indicators.reservation, Some(false));
    assert_eq!(train.indicators.supplement, Some(false));
    assert_eq!(train.indicators.special_ticket, Some(false));
    assert_eq!(train.indicators.do_not_board, Some(false));
    assert_eq!(train.indicators.rear_part_remains, Some(false));
    assert_eq!(train.indicators.shunting, Some(false));
    assert_eq!(train.indicators.journey_planner, None);

    let destination = departure.destination.current().unwrap();
    assert_eq!(destination.code.as_str(), "TL");
    assert_eq!(destination.long_name.as_deref(), Some("Tiel"));
    assert_eq!(destination.uic_code, Some(UicCode::new(8400596)));
    assert_eq!(
        departure.destination.presentation().unwrap().first_fragment(),
        Some("Tiel")
    );

    assert_eq!(departure.departure_time.len(), 2);
    assert!(!departure.departure_time.is_changed());
    assert_eq!(departure.delay(), Some(IsoDuration::zero()));
    assert_eq!(departure.departure_track.current().unwrap().number, 2);
    assert_eq!(departure.direction.as_deref(), Some("B"));

    let route = departure.short_route.current().unwrap();
    assert_eq!(route.codes(), vec!["HTN", "HTNC", "CL", "GDM"]);
    assert_eq!(
        departure
            .short_route
            .presentation()
            .unwrap()
            .for_language("nl")
            .unwrap()
            .fragments
            .len(),
        3
    );

    assert_eq!(departure.wings.len(), 1);
    let wing = &departure.wings[0];
    assert_eq!(wing.departure_track.current().unwrap().number, 2);
    assert_eq!(wing.destination.len(), 2);
    let planned = wing.destination.planned().unwrap();
    assert_eq!(planned.code.as_str(), "TL");
    assert_eq!(planned.long_name.as_deref(), Some("Tiel"));
    let current = wing.destination.current().unwrap();
    assert_eq!(current.code.as_str(), "TL");
    assert_eq!(current.long_name.as_deref(), Some("Tiel"));
    let stops = wing.stops.current().unwrap();
    assert_eq!(stops.len(), 6);
    assert_eq!(stops.last().unwrap().code.as_str(), "TL");
    assert_eq!(stops.last().unwrap().display_name(), "Tiel");

    assert_eq!(wing.material.len(), 1);
    let unit = &wing.material[0];
    assert_eq!(unit.kind, "SLT");
    assert_eq!(unit.designation.as_deref(), Some("6"));
    assert_eq!(unit.length, Some(10000));
    assert_eq!(unit.position, Some(1));
    assert_eq!(unit.id.as_deref(), Some("000000-02628-0"));
    assert_eq!(unit.remains_behind, Some(false));
    assert_eq!(unit.destination.current().unwrap().code.as_str(), "TL");
}

#[test]
fn trip_composition() {
    init_tracing();
    let trip = crate::parse_trip_str(RIT).unwrap();

    assert_eq!(trip.envelope.version, "9.2");
    assert_eq!(trip.envelope.application_version.as_deref(), Some("1.2.148"));
    assert_eq!(trip.envelope.product_id.as_str(), "53590029920001");
    assert_eq!(trip.envelope.subscription_id, 57);

    let train = &trip.train;
    assert_eq!(train.number.get(), 2992);
    assert_eq!(train.date, NaiveDate::from_ymd_opt(2025, 12, 25).unwrap());
    assert_eq!(train.category.code, "IC");
    assert_eq!(train.carrier, "NS");
    assert_eq!(train.indicators.reservation, Some(false));
    assert_eq!(train.indicators.journey_planner, Some(true));
    assert_eq!(train.indicators.do_not_board, None);

    assert_eq!(train.legs.len(), 1);
    let leg = &train.legs[0];
    assert_eq!(leg.number, "2992");
    assert_eq!(leg.parts.len(), 1);
    assert_eq!(leg.parts[0].number, 2992);
    let codes: Vec<_> = leg.visits().map(|v| v.station.code.as_str()).collect();
    assert_eq!(codes, vec!["MT", "BK", "STD", "RM", "WT", "EHV"]);

    let part = &leg.parts[0];
    let mt = part.visit("MT").unwrap();
    assert_eq!(mt.station.short_name.as_deref(), Some("Maastricht"));
    assert_eq!(mt.station.uic_code, Some(UicCode::new(8400424)));
    assert_eq!(mt.accessible, Some(false));
    assert_eq!(mt.travel_assistance, Some(true));
    assert_eq!(mt.departure_track.current().unwrap().number, 3);
    assert!(mt.is_stopping());
    assert_eq!(
        mt.destination.planned().unwrap().long_name.as_deref(),
        Some("Eindhoven Centraal")
    );
    assert_eq!(mt.material.len(), 1);
    assert_eq!(mt.material[0].id.as_deref(), Some("AD47"));
    assert_eq!(mt.material[0].kind, "VIRM");
    assert_eq!(mt.material[0].designation.as_deref(), Some("4"));
    assert_eq!(mt.material[0].length, Some(10900));

    let bk = part.visit("BK").unwrap();
    assert!(!bk.is_stopping());
    assert!(bk.arrival_track.is_empty());
    assert!(bk.departure_track.is_empty());
    assert_eq!(bk.stops.len(), 2);

    let sittard = &part.visits[2];
    assert_eq!(sittard.station.code.as_str(), "STD");
    assert_eq!(sittard.departure_track.current().unwrap().to_string(), "2b");
    assert!(sittard.arrival_time.is_changed());

    let ehv = part.visits.last().unwrap();
    assert_eq!(ehv.station.long_name.as_deref(), Some("Eindhoven Centraal"));
    assert_eq!(ehv.station.uic_code, Some(UicCode::new(8400206)));
    assert_eq!(ehv.arrival_track.current().unwrap().number, 5);
    assert!(ehv.departure_track.is_empty());
    assert!(ehv.departure_time.is_empty());
}

#[test]
fn generic_entry_point_matches_family_entry_points() {
    let message = crate::parse(MessageKind::Departure, DVS.as_bytes()).unwrap();
    assert_eq!(message.kind(), MessageKind::Departure);
    assert_eq!(message.train().number.get(), 6789);
    assert_eq!(
        message.as_departure().unwrap(),
        &crate::parse_departure_str(DVS).unwrap()
    );
    assert!(message.as_trip().is_none());
    assert!(message.as_arrival().is_none());
}

#[test]
fn parsing_is_idempotent() {
    let parser = Parser::default();
    for kind in MessageKind::ALL {
        let first = parser.parse(kind, fixture(kind).as_bytes()).unwrap();
        let second = parser.parse(kind, fixture(kind).as_bytes()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn concurrent_parses_agree() {
    let parser = &Parser::default();
    let expected: Vec<Message> = MessageKind::ALL
        .iter()
        .map(|&kind| parser.parse(kind, fixture(kind).as_bytes()).unwrap())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(move || {
                    MessageKind::ALL
                        .iter()
                        .map(|&kind| parser.parse(kind, fixture(kind).as_bytes()).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });

    let addresses: Vec<Vec<usize>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    MessageKind::ALL
                        .iter()
                        .map(|&kind| binding(kind).unwrap() as *const _ as usize)
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn bad_track_number_reports_full_path() {
    let xml = RIT.replacen(
        "<SpoorNummer>2</SpoorNummer><SpoorFase>b</SpoorFase>",
        "<SpoorNummer>twee</SpoorNummer><SpoorFase>b</SpoorFase>",
        1,
    );
    let err = crate::parse_trip_str(&xml).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FieldTypeMismatch);
    assert_eq!(
        err.path().unwrap().to_string(),
        "reisInformatieProductRitInfo.ritInfo.logischeRit[0].logischeRitDeel[0]\
         .logischeRitDeelStation[2].treinVertrekSpoor[0].spoorNummer"
    );
}

#[test]
fn duplicate_status_is_malformed() {
    let xml = DAS.replacen(
        r#"<AankomstTijd InfoStatus="Actueel">"#,
        r#"<AankomstTijd InfoStatus="Gepland">"#,
        1,
    );
    let err = crate::parse_arrival_str(&xml).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedOverlay);
    assert_eq!(
        err.path().unwrap().to_string(),
        "reisInformatieProductDAS.dynamischeAankomstStaat.treinAankomst.aankomstTijd[1]"
    );
}

#[test]
fn current_before_planned_is_malformed() {
    let xml = DVS
        .replacen(r#"<VertrekTijd InfoStatus="Gepland">"#, "<VertrekTijd X>", 1)
        .replacen(
            r#"<VertrekTijd InfoStatus="Actueel">"#,
            r#"<VertrekTijd InfoStatus="Gepland">"#,
            1,
        )
        .replacen("<VertrekTijd X>", r#"<VertrekTijd InfoStatus="Actueel">"#, 1);
    let err = crate::parse_departure_str(&xml).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedOverlay);
}

#[test]
fn wrong_family_is_schema_mismatch() {
    for (declared, actual) in [
        (MessageKind::Arrival, MessageKind::Departure),
        (MessageKind::Trip, MessageKind::Arrival),
        (MessageKind::Departure, MessageKind::Trip),
    ] {
        let err = crate::parse(declared, fixture(actual).as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaMismatch, "{declared} as {actual}");
    }

    let lenient = Parser::new(ParserConfig::default().with_strict_namespaces(false));
    let err = lenient.parse(MessageKind::Arrival, DVS.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert_eq!(err.path().unwrap().to_string(), "reisInformatieProductDVS");
}

#[test]
fn namespaces_only_checked_when_strict() {
    let xml = DVS.replace(
        "urn:ndov:cdm:trein:reisinformatie:messages:5",
        "urn:example:other",
    );
    let err = crate::parse_departure_str(&xml).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert!(err.path().unwrap().is_root());

    let lenient = Parser::new(ParserConfig::default().with_strict_namespaces(false));
    let dvs = lenient.parse_departure(xml.as_bytes()).unwrap();
    assert_eq!(dvs, crate::parse_departure_str(DVS).unwrap());
}

#[test]
fn unknown_elements_rejected_only_when_asked() {
    let strict = Parser::new(ParserConfig::default().with_reject_unknown_elements(true));
    for kind in MessageKind::ALL {
        assert!(strict.parse(kind, fixture(kind).as_bytes()).is_ok(), "{kind}");
    }

    let xml = DAS.replacen("<TreinAankomst>", "<TreinAankomst><Perron>3</Perron>", 1);
    let lenient = crate::parse_arrival_str(&xml).unwrap();
    assert_eq!(lenient, crate::parse_arrival_str(DAS).unwrap());

    let err = strict.parse_arrival(xml.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert_eq!(
        err.path().unwrap().to_string(),
        "reisInformatieProductDAS.dynamischeAankomstStaat.treinAankomst.perron"
    );
}

#[test]
fn envelope_errors() {
    let xml = DVS.replacen("<AbonnementId>54</AbonnementId>", "", 1);
    let err = crate::parse_departure_str(&xml).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EnvelopeInvalid);

    let xml = RIT.replacen(r#" ApplicatieVersie="1.2.148""#, "", 1);
    let err = crate::parse_trip_str(&xml).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EnvelopeInvalid);
}

#[test]
fn decode_failures() {
    let truncated = &RIT[..RIT.len() / 2];
    let err = crate::parse_trip_str(truncated).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DocumentDecodeFailed);
    assert!(err.path().is_none());

    let shallow = Parser::new(ParserConfig::default().with_max_depth(4));
    let err = shallow.parse_trip(RIT.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DocumentDecodeFailed);
}

#[test]
fn trailing_content_fails_to_decode() {
    for trailing in ["<PutReisInformatieBoodschapIn/>", "</unbalanced> &&& <<"] {
        let err = crate::parse_trip_str(&format!("{RIT}{trailing}")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DocumentDecodeFailed, "{trailing}");
    }
}

#[test]
fn repeated_train_number_is_not_dropped() {
    let xml = DAS.replacen(
        "<TreinNummer>2889</TreinNummer>",
        "<TreinNummer>2889</TreinNummer><TreinNummer>9999</TreinNummer>",
        1,
    );
    for parser in [
        Parser::default(),
        Parser::new(ParserConfig::default().with_reject_unknown_elements(true)),
    ] {
        let err = parser.parse_arrival(xml.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
        assert_eq!(
            err.path().unwrap().to_string(),
            "reisInformatieProductDAS.dynamischeAankomstStaat.treinAankomst.treinNummer[1]"
        );
    }
}

#[test]
fn reads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(RIT.as_bytes()).unwrap();
    file.flush().unwrap();

    let reader = std::io::BufReader::new(std::fs::File::open(file.path()).unwrap());
    let from_file = crate::parse_trip_reader(reader).unwrap();
    assert_eq!(from_file, crate::parse_trip_str(RIT).unwrap());

    let reader = std::fs::File::open(file.path()).unwrap();
    let message = crate::parse_reader(MessageKind::Trip, reader).unwrap();
    assert_eq!(message.as_trip(), Some(&from_file));
}

#[test]
fn serialises_to_json() {
    let message = crate::parse(MessageKind::Arrival, DAS.as_bytes()).unwrap();
    let json = serde_json::to_value(&message).unwrap();

    assert_eq!(json["kind"], "arrival");
    assert_eq!(json["date"], "2025-12-23");
    assert_eq!(json["station"]["code"], "GD");
    assert_eq!(json["arrival"]["exact_delay"], "PT1M4S");
    assert_eq!(json["arrival"]["damped_delay"], "PT0S");

    let origin = json["arrival"]["origin"].as_array().unwrap();
    assert_eq!(origin.len(), 2);
    assert_eq!(origin[0]["status"], "Planned");
    assert_eq!(origin[1]["status"], "Current");
    assert_eq!(origin[1]["value"]["code"], "RTD");
    assert_eq!(origin[1]["value"]["uic_code"], 8400530);
}

#[test]
fn effective_entry_is_the_latest_status() {
    let trip = crate::parse_trip_str(RIT).unwrap();
    let rm = trip.train.legs[0].parts[0].visit("RM").unwrap();
    assert_eq!(rm.departure_track.effective().unwrap().status, InfoStatus::Planned);
    assert_eq!(rm.departure_track.current(), None);

    let sittard = trip.train.legs[0].parts[0].visit("STD").unwrap();
    assert_eq!(sittard.departure_track.effective().unwrap().status, InfoStatus::Current);
}
