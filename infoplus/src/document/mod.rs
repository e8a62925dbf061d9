//! Generic document decoding.
//!
//! The raw buffer is decoded into a plain element tree without any knowledge
//! of the InfoPlus schemas. Schema adapters then read that tree through
//! [`Record`] views, which track the path of every field they touch.

mod decode;
mod path;
mod record;

pub use decode::{Element, decode};
pub use path::FieldPath;
pub use record::Record;
