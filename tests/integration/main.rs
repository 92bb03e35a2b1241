//! Integration tests for pbheader.
//!
//! These tests exercise headers end to end: files on disk, the noodles backend, header
//! merging across files, and the `pbheader` binary.

mod helpers;
mod test_backend;
mod test_cli;
mod test_header_model;
mod test_merge;
