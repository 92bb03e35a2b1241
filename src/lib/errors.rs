//! Custom error types for header operations.

use std::fmt;

use thiserror::Error;

use crate::version::Version;

/// Result type alias for header operations
pub type Result<T> = std::result::Result<T, HeaderError>;

/// The kind of header record a strict lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// An `@RG` entry, keyed by ID
    ReadGroup,
    /// A `@PG` entry, keyed by ID
    Program,
    /// An `@SQ` entry, keyed by name
    Sequence,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::ReadGroup => "read group",
            RecordKind::Program => "program",
            RecordKind::Sequence => "sequence",
        };
        f.write_str(name)
    }
}

/// Error type for header operations
#[derive(Error, Debug)]
pub enum HeaderError {
    /// Two headers failed one or more merge compatibility checks
    #[error("could not merge BAM headers:\n{}", .diagnostics.join("\n"))]
    MergeIncompatible {
        /// One entry per failed check, each naming both offending values
        diagnostics: Vec<String>,
    },

    /// Strict lookup of a record that is not present
    #[error("{kind} '{key}' not found in header")]
    NotFound {
        /// The record type that was looked up
        kind: RecordKind,
        /// The ID or name that was requested
        key: String,
    },

    /// A `TAG:VALUE` token too short to hold a tag, separator, and value
    #[error("Malformed token '{token}' in header line '{line}'")]
    MalformedToken {
        /// The full header line
        line: String,
        /// The offending token
        token: String,
    },

    /// A PacBio BAM version older than the minimum supported version
    #[error(
        "invalid PacBio BAM version number ({found}) is older than the minimum supported version ({minimum})"
    )]
    VersionTooOld {
        /// The rejected version
        found: Version,
        /// The oldest accepted version
        minimum: Version,
    },

    /// No chemistry is known for the given kit/basecaller combination
    #[error(
        "unsupported sequencing chemistry combination: binding kit '{binding_kit}', \
         sequencing kit '{sequencing_kit}', basecaller version '{basecaller_version}'"
    )]
    InvalidSequencingChemistry {
        /// Binding kit part number
        binding_kit: String,
        /// Sequencing kit part number
        sequencing_kit: String,
        /// Basecaller version string
        basecaller_version: String,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "BAM", "SAM")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },
}
