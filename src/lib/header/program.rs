//! `@PG` program records.
//!
//! Programs form a provenance chain through their `PP` (previous program) tag; see
//! [`crate::header::BamHeader::add_chained_program`] for appending to that chain.

use crate::errors::Result;
use crate::header::custom_tags::CustomTags;
use crate::tokens::{parse_fields, push_tag};

/// Record prefix of a program line.
pub const PREFIX: &str = "@PG";

/// Tags with a dedicated field, in output order.
pub mod tag {
    pub const ID: &str = "ID";
    pub const NAME: &str = "PN";
    pub const VERSION: &str = "VN";
    pub const DESCRIPTION: &str = "DS";
    pub const PREVIOUS_PROGRAM_ID: &str = "PP";
    pub const COMMAND_LINE: &str = "CL";
}

/// A program that produced or processed the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramInfo {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub previous_program_id: String,
    pub command_line: String,
    pub custom_tags: CustomTags,
}

impl ProgramInfo {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    /// Parses a `@PG` line.
    ///
    /// Unknown tags go to [`ProgramInfo::custom_tags`]. A line too short to hold a token
    /// yields an empty record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::HeaderError::MalformedToken`] if a token cannot be split into
    /// tag and value.
    pub fn from_sam(line: &str) -> Result<Self> {
        let mut program = Self::default();
        for (tag, value) in parse_fields(line)? {
            match tag {
                tag::ID => program.id = value.to_string(),
                tag::NAME => program.name = value.to_string(),
                tag::VERSION => program.version = value.to_string(),
                tag::DESCRIPTION => program.description = value.to_string(),
                tag::PREVIOUS_PROGRAM_ID => program.previous_program_id = value.to_string(),
                tag::COMMAND_LINE => program.command_line = value.to_string(),
                _ => program.custom_tags.insert(tag, value),
            }
        }
        Ok(program)
    }

    /// Renders the record as a `@PG` line (no trailing newline).
    #[must_use]
    pub fn to_sam(&self) -> String {
        let mut out = String::from(PREFIX);
        push_tag(&mut out, tag::ID, &self.id);
        push_tag(&mut out, tag::NAME, &self.name);
        push_tag(&mut out, tag::VERSION, &self.version);
        push_tag(&mut out, tag::DESCRIPTION, &self.description);
        push_tag(&mut out, tag::PREVIOUS_PROGRAM_ID, &self.previous_program_id);
        push_tag(&mut out, tag::COMMAND_LINE, &self.command_line);
        self.custom_tags.write_sam(&mut out);
        out
    }
}
