//! `@SQ` reference sequence records.

use crate::errors::Result;
use crate::header::custom_tags::CustomTags;
use crate::tokens::{parse_fields, push_tag};

/// Record prefix of a reference sequence line.
pub const PREFIX: &str = "@SQ";

/// Tags with a dedicated field, in output order.
pub mod tag {
    pub const NAME: &str = "SN";
    pub const LENGTH: &str = "LN";
    pub const ASSEMBLY_ID: &str = "AS";
    pub const CHECKSUM: &str = "M5";
    pub const SPECIES: &str = "SP";
    pub const URI: &str = "UR";
}

/// One reference sequence of a header's sequence dictionary.
///
/// `length` is kept as text so that whatever a file declared round-trips unchanged; use
/// [`SequenceInfo::is_valid`] to check it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceInfo {
    pub name: String,
    pub length: String,
    pub assembly_id: String,
    pub checksum: String,
    pub species: String,
    pub uri: String,
    pub custom_tags: CustomTags,
}

impl SequenceInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, length: impl Into<String>) -> Self {
        Self { name: name.into(), length: length.into(), ..Self::default() }
    }

    /// Parses an `@SQ` line.
    ///
    /// Unknown tags go to [`SequenceInfo::custom_tags`]. A line too short to hold a token
    /// yields an empty record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::HeaderError::MalformedToken`] if a token cannot be split into
    /// tag and value.
    pub fn from_sam(line: &str) -> Result<Self> {
        let mut seq = Self::default();
        for (tag, value) in parse_fields(line)? {
            match tag {
                tag::NAME => seq.name = value.to_string(),
                tag::LENGTH => seq.length = value.to_string(),
                tag::ASSEMBLY_ID => seq.assembly_id = value.to_string(),
                tag::CHECKSUM => seq.checksum = value.to_string(),
                tag::SPECIES => seq.species = value.to_string(),
                tag::URI => seq.uri = value.to_string(),
                _ => seq.custom_tags.insert(tag, value),
            }
        }
        Ok(seq)
    }

    /// Renders the record as an `@SQ` line (no trailing newline).
    #[must_use]
    pub fn to_sam(&self) -> String {
        let mut out = String::from(PREFIX);
        push_tag(&mut out, tag::NAME, &self.name);
        push_tag(&mut out, tag::LENGTH, &self.length);
        push_tag(&mut out, tag::ASSEMBLY_ID, &self.assembly_id);
        push_tag(&mut out, tag::CHECKSUM, &self.checksum);
        push_tag(&mut out, tag::SPECIES, &self.species);
        push_tag(&mut out, tag::URI, &self.uri);
        self.custom_tags.write_sam(&mut out);
        out
    }

    /// The declared length, if it is an integer in `[0, i32::MAX]`.
    #[must_use]
    pub fn length_value(&self) -> Option<i32> {
        self.length.parse::<i64>().ok().and_then(|l| i32::try_from(l).ok()).filter(|l| *l >= 0)
    }

    /// Returns true if the name is non-empty and the length is an integer in `[0, i32::MAX]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.length_value().is_some()
    }
}
