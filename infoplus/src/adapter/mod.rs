//! Schema adapters.
//!
//! Each message family has its own adapter that maps the family's document
//! shape onto the shared domain model. Before an adapter runs, [`locate`]
//! checks that the document belongs to the declared family and finds the
//! product element.
//!
//! Paths in errors start below the root element, so the product element is
//! the first segment, e.g. `reisInformatieProductDAS.ripAdministratie`.

pub mod arrival;
pub mod binding;
pub mod departure;
pub mod trip;

use tracing::trace;

pub use binding::{ROOT_ELEMENT, SchemaBinding, binding};

use crate::config::ParserConfig;
use crate::document::{Element, FieldPath, Record};
use crate::domain::IsoDuration;
use crate::error::ParseError;

/// Check the document against `binding` and return its product element.
pub fn locate<'a>(
    root: &'a Element,
    binding: &SchemaBinding,
    config: &ParserConfig,
) -> Result<Record<'a>, ParseError> {
    let document = Record::root(root);
    if root.name != ROOT_ELEMENT {
        return Err(ParseError::schema(
            FieldPath::default(),
            ROOT_ELEMENT,
            root.name.as_str(),
        ));
    }
    if config.strict_namespaces {
        check_namespace(root, &FieldPath::default(), binding.message_namespace)?;
    }

    for child in document.all_children() {
        let name = child.name();
        if name != binding.product && name.starts_with(binding::PRODUCT_PREFIX) {
            return Err(ParseError::schema(child.path().clone(), binding.product, name));
        }
    }
    let product = document.child(binding.product)?.ok_or_else(|| {
        ParseError::schema(
            FieldPath::default(),
            format!("{} element", binding.product),
            "no product element",
        )
    })?;
    if config.strict_namespaces {
        check_namespace(product.element(), product.path(), binding.data_namespace)?;
    }

    check_vocabulary(&document, binding, config.reject_unknown_elements)?;
    Ok(product)
}

fn check_namespace(
    element: &Element,
    path: &FieldPath,
    expected: &'static str,
) -> Result<(), ParseError> {
    let found = element.namespace.as_deref().unwrap_or("");
    if found == expected {
        Ok(())
    } else {
        Err(ParseError::schema(
            path.clone(),
            format!("namespace {expected}"),
            format!("namespace {found:?}"),
        ))
    }
}

/// Walk every element below `record` and check it against the vocabulary.
///
/// In strict mode the first unknown element fails with its path. Otherwise
/// unknown elements are skipped together with their contents.
fn check_vocabulary(
    record: &Record<'_>,
    binding: &SchemaBinding,
    reject_unknown: bool,
) -> Result<(), ParseError> {
    for child in record.all_children() {
        let name = child.name();
        if binding.knows(name) {
            check_vocabulary(&child, binding, reject_unknown)?;
        } else if reject_unknown {
            return Err(ParseError::schema(
                child.path().clone(),
                format!("an element of the {} schema", binding.kind),
                name,
            ));
        } else {
            trace!(kind = %binding.kind, path = %child.path(), "skipping unmodelled element");
        }
    }
    Ok(())
}

/// Read an optional ISO-8601 delay element.
fn delay(record: &Record<'_>, name: &str) -> Result<Option<IsoDuration>, ParseError> {
    record.optional(name, "ISO-8601 duration", |s| IsoDuration::parse(s).ok())
}
