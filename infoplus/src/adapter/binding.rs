//! Per-family schema bindings.
//!
//! A binding holds everything that differs between the three families:
//! namespaces, product and payload element names, the material field table
//! and the vocabulary of known element names. Each binding is built lazily
//! on first use and shared read-only afterwards.

use std::collections::HashSet;
use std::sync::OnceLock;

use tracing::debug;

use crate::document::FieldPath;
use crate::domain::{MaterialFields, MessageKind, ServiceIndicators};
use crate::error::ParseError;

/// Local name of the root element in every family.
pub const ROOT_ELEMENT: &str = "PutReisInformatieBoodschapIn";

/// Prefix shared by the product element names of all families.
pub const PRODUCT_PREFIX: &str = "ReisInformatieProduct";

/// Elements every family may contain.
const COMMON_ELEMENTS: &[&str] = &[
    ROOT_ELEMENT,
    "RIPAdministratie",
    "ReisInformatieProductID",
    "AbonnementId",
    "ReisInformatieTijdstip",
    // Station
    "Station",
    "StationCode",
    "Type",
    "KorteNaam",
    "MiddelNaam",
    "LangeNaam",
    "UICCode",
    // Presentation
    "Uitingen",
    "Uiting",
    // Track
    "SpoorNummer",
    "SpoorFase",
    // Train identity
    "TreinNummer",
    "TreinSoort",
    "TreinFormule",
    "TreinStatus",
    "Vervoerder",
    // Alterations
    "Wijziging",
    "WijzigingType",
    "WijzigingOorzaakKort",
    "WijzigingOorzaakLang",
    "PresentatieWijziging",
];

const TRIP_ELEMENTS: &[&str] = &[
    "TreinDatum",
    "LogischeRit",
    "LogischeRitNummer",
    "LogischeRitDeel",
    "LogischeRitDeelNummer",
    "LogischeRitDeelStation",
    "StationToegankelijk",
    "StationReisAssistentie",
    "AankomstTijd",
    "VertrekTijd",
    "TreinAankomstSpoor",
    "TreinVertrekSpoor",
    "Stopt",
    "TreinEindBestemming",
];

const BOARD_ELEMENTS: &[&str] = &["RitId", "RitDatum", "RitStation"];

const DEPARTURE_ELEMENTS: &[&str] = &[
    "Trein",
    "TreinEindBestemming",
    "PresentatieTreinEindBestemming",
    "VertrekTijd",
    "ExacteVertrekVertraging",
    "GedempteVertrekVertraging",
    "PresentatieVertrekVertraging",
    "TreinVertrekSpoor",
    "PresentatieTreinVertrekSpoor",
    "VertrekRichting",
    "VerkorteRoute",
    "PresentatieVerkorteRoute",
    "TreinVleugel",
    "TreinVleugelVertrekSpoor",
    "PresentatieTreinVleugelVertrekSpoor",
    "TreinVleugelEindBestemming",
    "PresentatieTreinVleugelEindBestemming",
    "StopStations",
];

const ARRIVAL_ELEMENTS: &[&str] = &[
    "TreinAankomst",
    "TreinHerkomst",
    "PresentatieTreinHerkomst",
    "AankomstTijd",
    "ExacteAankomstVertraging",
    "GedempteAankomstVertraging",
    "PresentatieAankomstVertraging",
    "TreinAankomstSpoor",
    "PresentatieTreinAankomstSpoor",
    "VerkorteRouteHerkomst",
    "PresentatieVerkorteRouteHerkomst",
    "WijzigingHerkomst",
];

const TRIP_VOCABULARY: &[&[&str]] = &[COMMON_ELEMENTS, &ServiceIndicators::NAMES, TRIP_ELEMENTS];

const DEPARTURE_VOCABULARY: &[&[&str]] = &[
    COMMON_ELEMENTS,
    &ServiceIndicators::NAMES,
    BOARD_ELEMENTS,
    DEPARTURE_ELEMENTS,
];

const ARRIVAL_VOCABULARY: &[&[&str]] = &[
    COMMON_ELEMENTS,
    &ServiceIndicators::NAMES,
    BOARD_ELEMENTS,
    ARRIVAL_ELEMENTS,
];

/// Everything needed to read one message family.
#[derive(Debug, Clone)]
pub struct SchemaBinding {
    pub kind: MessageKind,
    /// Namespace of the root element.
    pub message_namespace: &'static str,
    /// Namespace of the product element and its contents.
    pub data_namespace: &'static str,
    /// Name of the product element under the root.
    pub product: &'static str,
    /// Name of the payload element under the product.
    pub payload: &'static str,
    /// Material unit field names, for families that describe rolling stock.
    pub material: Option<MaterialFields>,
    vocabulary: HashSet<&'static str>,
}

impl SchemaBinding {
    /// Returns true if `name` is an element of this family.
    pub fn knows(&self, name: &str) -> bool {
        self.vocabulary.contains(name)
    }

    /// Number of known element names.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

/// The fixed tables a binding is assembled from.
struct Tables {
    message_namespace: &'static str,
    data_namespace: &'static str,
    product: &'static str,
    payload: &'static str,
    material: Option<MaterialFields>,
    elements: &'static [&'static [&'static str]],
}

fn tables(kind: MessageKind) -> Tables {
    match kind {
        MessageKind::Trip => Tables {
            message_namespace: "urn:ns:cdm:reisinformatie:message:ritinfo:5",
            data_namespace: "urn:ns:cdm:reisinformatie:data:rit:5",
            product: "ReisInformatieProductRitInfo",
            payload: "RitInfo",
            material: Some(MaterialFields::TRIP),
            elements: TRIP_VOCABULARY,
        },
        MessageKind::Departure => Tables {
            message_namespace: "urn:ndov:cdm:trein:reisinformatie:messages:5",
            data_namespace: "urn:ndov:cdm:trein:reisinformatie:data:4",
            product: "ReisInformatieProductDVS",
            payload: "DynamischeVertrekStaat",
            material: Some(MaterialFields::DEPARTURE),
            elements: DEPARTURE_VOCABULARY,
        },
        MessageKind::Arrival => Tables {
            message_namespace: "urn:ndov:cdm:trein:reisinformatie:messages:dynamischeaankomststaat:1",
            data_namespace: "urn:ndov:cdm:trein:reisinformatie:data:4",
            product: "ReisInformatieProductDAS",
            payload: "DynamischeAankomstStaat",
            material: None,
            elements: ARRIVAL_VOCABULARY,
        },
    }
}

/// Assemble and check a binding.
///
/// Fails with `SchemaMismatch` if the tables contradict each other.
fn assemble(kind: MessageKind, tables: Tables) -> Result<SchemaBinding, ParseError> {
    let mut vocabulary: HashSet<&'static str> =
        tables.elements.iter().flat_map(|names| names.iter().copied()).collect();
    vocabulary.insert(tables.product);
    vocabulary.insert(tables.payload);
    if let Some(material) = &tables.material {
        vocabulary.extend(material.names());
    }

    if !tables.product.starts_with(PRODUCT_PREFIX) {
        return Err(ParseError::schema(
            FieldPath::default(),
            format!("{PRODUCT_PREFIX}* product element for {kind}"),
            tables.product,
        ));
    }
    if tables.payload.is_empty() || tables.payload == tables.product {
        return Err(ParseError::schema(
            FieldPath::default().child(tables.product),
            format!("payload element for {kind}"),
            tables.payload,
        ));
    }
    if tables.message_namespace.is_empty() || tables.data_namespace.is_empty() {
        return Err(ParseError::schema(
            FieldPath::default(),
            format!("namespaces for {kind}"),
            "empty namespace",
        ));
    }

    Ok(SchemaBinding {
        kind,
        message_namespace: tables.message_namespace,
        data_namespace: tables.data_namespace,
        product: tables.product,
        payload: tables.payload,
        material: tables.material,
        vocabulary,
    })
}

static TRIP: OnceLock<SchemaBinding> = OnceLock::new();
static DEPARTURE: OnceLock<SchemaBinding> = OnceLock::new();
static ARRIVAL: OnceLock<SchemaBinding> = OnceLock::new();

fn cell(kind: MessageKind) -> &'static OnceLock<SchemaBinding> {
    match kind {
        MessageKind::Trip => &TRIP,
        MessageKind::Departure => &DEPARTURE,
        MessageKind::Arrival => &ARRIVAL,
    }
}

/// Returns the binding for `kind`, building it on first use.
///
/// Concurrent first calls may each assemble a candidate, but only one is
/// stored and every caller receives that one. A failed build stores nothing,
/// so the next call tries again.
pub fn binding(kind: MessageKind) -> Result<&'static SchemaBinding, ParseError> {
    let cell = cell(kind);
    if let Some(binding) = cell.get() {
        return Ok(binding);
    }
    let built = assemble(kind, tables(kind))?;
    let vocabulary = built.vocabulary_len();
    let binding = cell.get_or_init(|| built);
    debug!(kind = %kind, vocabulary, "schema binding initialised");
    Ok(binding)
}
