//! Path-tracking views over decoded elements.

use super::{Element, FieldPath};
use crate::error::ParseError;

/// A decoded element together with its location in the document.
///
/// Entity constructors read their fields through a `Record`, so every
/// coercion failure is reported against the exact field that caused it.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    element: &'a Element,
    path: FieldPath,
}

impl<'a> Record<'a> {
    /// Creates a record for a top-level element. Paths are relative to it.
    pub fn root(element: &'a Element) -> Self {
        Self {
            element,
            path: FieldPath::default(),
        }
    }

    /// Returns the underlying element.
    pub fn element(&self) -> &'a Element {
        self.element
    }

    /// Returns the local name of the element.
    pub fn name(&self) -> &'a str {
        &self.element.name
    }

    /// Returns the location of this record.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns the element's own text.
    pub fn text(&self) -> &'a str {
        self.element.text.trim()
    }

    /// Returns the single child element called `name`, if present.
    ///
    /// A second sibling of the same name is a `SchemaMismatch` at its
    /// indexed path, so a repeated single-valued field is never dropped.
    pub fn child(&self, name: &str) -> Result<Option<Record<'a>>, ParseError> {
        let mut matches = self.element.children.iter().filter(|c| c.name == name);
        let Some(element) = matches.next() else {
            return Ok(None);
        };
        if matches.next().is_some() {
            return Err(ParseError::schema(
                self.path.indexed(name, 1),
                format!("a single {name} element"),
                "a repeated element",
            ));
        }
        Ok(Some(Record {
            element,
            path: self.path.child(name),
        }))
    }

    /// Returns the single child element called `name`, or `MissingField`.
    pub fn required_child(&self, name: &str) -> Result<Record<'a>, ParseError> {
        self.child(name)?
            .ok_or_else(|| ParseError::missing(self.path.child(name)))
    }

    /// Returns every child element called `name`, in document order.
    pub fn children(&self, name: &str) -> Vec<Record<'a>> {
        self.element
            .children
            .iter()
            .filter(|c| c.name == name)
            .enumerate()
            .map(|(index, element)| Record {
                element,
                path: self.path.indexed(name, index),
            })
            .collect()
    }

    /// Returns every child element in document order.
    ///
    /// A child whose name repeats among its siblings is indexed; a unique
    /// child is not.
    pub fn all_children(&self) -> Vec<Record<'a>> {
        let siblings = &self.element.children;
        siblings
            .iter()
            .enumerate()
            .map(|(position, element)| {
                let same = |c: &&Element| c.name == element.name;
                let path = if siblings.iter().filter(same).count() > 1 {
                    let index = siblings[..position].iter().filter(same).count();
                    self.path.indexed(&element.name, index)
                } else {
                    self.path.child(&element.name)
                };
                Record { element, path }
            })
            .collect()
    }

    /// Builds one value per child element called `name`.
    pub fn collect<T>(
        &self,
        name: &str,
        build: impl Fn(&Record<'a>) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        self.children(name).iter().map(build).collect()
    }

    /// Coerces the element's own text.
    pub fn value<T>(
        &self,
        expected: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, ParseError> {
        let text = self.text();
        parse(text).ok_or_else(|| ParseError::mismatch(self.path.clone(), expected, text))
    }

    /// Coerces the text of a required child element.
    pub fn required<T>(
        &self,
        name: &str,
        expected: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, ParseError> {
        self.required_child(name)?.value(expected, parse)
    }

    /// Coerces the text of an optional child element.
    ///
    /// An absent or empty element yields `None`.
    pub fn optional<T>(
        &self,
        name: &str,
        expected: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<Option<T>, ParseError> {
        match self.child(name)? {
            Some(child) if !child.text().is_empty() => child.value(expected, parse).map(Some),
            _ => Ok(None),
        }
    }

    /// Returns the non-empty text of a required child element.
    pub fn required_text(&self, name: &str) -> Result<&'a str, ParseError> {
        let child = self.required_child(name)?;
        match child.text() {
            "" => Err(ParseError::missing(child.path)),
            text => Ok(text),
        }
    }

    /// Returns the non-empty text of an optional child element.
    pub fn optional_text(&self, name: &str) -> Result<Option<&'a str>, ParseError> {
        Ok(self
            .child(name)?
            .map(|child| child.text())
            .filter(|text| !text.is_empty()))
    }

    /// Returns the raw value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.element.attribute(name)
    }

    /// Coerces the value of a required attribute.
    pub fn required_attribute<T>(
        &self,
        name: &str,
        expected: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, ParseError> {
        let path = self.path.attribute(name);
        let raw = self
            .attribute(name)
            .ok_or_else(|| ParseError::missing(path.clone()))?;
        parse(raw).ok_or_else(|| ParseError::mismatch(path, expected, raw))
    }

    /// Coerces the value of an optional attribute.
    pub fn optional_attribute<T>(
        &self,
        name: &str,
        expected: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<Option<T>, ParseError> {
        match self.attribute(name) {
            Some(raw) => parse(raw)
                .map(Some)
                .ok_or_else(|| ParseError::mismatch(self.path.attribute(name), expected, raw)),
            None => Ok(None),
        }
    }
}
