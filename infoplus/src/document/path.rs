//! Field paths for error annotation.

use std::fmt;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Field(String),
    Indexed(String, usize),
    Attribute(String),
}

/// Location of a field within a decoded document.
///
/// Element names are rendered in lower camel case and repeated elements carry
/// their position among same-named siblings, so a path reads like
/// `ritInfo.logischeRit[0].logischeRitDeel[0].logischeRitDeelStation[2].treinVertrekSpoor[1]`.
/// Attributes are appended as `@Name`.
///
/// # Examples
///
/// ```
/// use infoplus::document::FieldPath;
///
/// let path = FieldPath::default()
///     .child("RitInfo")
///     .indexed("LogischeRit", 0)
///     .attribute("InfoStatus");
/// assert_eq!(path.to_string(), "ritInfo.logischeRit[0]@InfoStatus");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// Returns a new path extended with a single-valued element.
    pub fn child(&self, name: &str) -> Self {
        self.with(Segment::Field(lower_camel(name)))
    }

    /// Returns a new path extended with the `index`-th element called `name`.
    pub fn indexed(&self, name: &str, index: usize) -> Self {
        self.with(Segment::Indexed(lower_camel(name), index))
    }

    /// Returns a new path extended with an attribute.
    pub fn attribute(&self, name: &str) -> Self {
        self.with(Segment::Attribute(name.to_string()))
    }

    /// Returns true for the path of the document's product element itself.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(segment);
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<document>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Field(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                Segment::Indexed(name, index) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write!(f, "{name}[{index}]")?;
                }
                Segment::Attribute(name) => write!(f, "@{name}")?,
            }
        }
        Ok(())
    }
}

/// Converts an element name to lower camel case.
///
/// A leading run of capitals is treated as an acronym, so `RIPAdministratie`
/// becomes `ripAdministratie` and `UICCode` becomes `uicCode`.
fn lower_camel(name: &str) -> String {
    let upper_run = name.chars().take_while(char::is_ascii_uppercase).count();
    let lowered = match upper_run {
        0 => 0,
        n if n == name.chars().count() => n,
        1 => 1,
        n => n - 1,
    };
    name.chars()
        .enumerate()
        .map(|(i, c)| if i < lowered { c.to_ascii_lowercase() } else { c })
        .collect()
}
