//! Properties-format snapshot decoding.
//!
//! Full `java.util.Properties` syntax through the `java-properties` crate:
//! `=`, `:` or whitespace separators, `#`/`!` comments, `\` line
//! continuations and `\t`, `\uXXXX`, `\ ` style escapes. Later duplicates win.
//!
//! Input bytes are decoded as ISO-8859-1, the format's default encoding, so
//! non-ASCII characters should be written as `\uXXXX` escapes.

pub use java_properties::PropertiesError;

use crate::source::Snapshot;

/// Decode properties text into a snapshot.
pub fn parse_properties(text: &str) -> Result<Snapshot, PropertiesError> {
    java_properties::read(text.as_bytes())
}
