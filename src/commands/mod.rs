//! CLI command implementations for pbheader.
//!
//! - [`view`] - Print the normalized header of an alignment file
//! - [`merge`] - Merge the headers of several alignment files

pub mod command;
pub mod common;
pub mod merge;
pub mod view;
