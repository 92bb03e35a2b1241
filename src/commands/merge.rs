//! Merge the headers of several alignment files.
//!
//! Headers are merged left to right into a copy of the first. Every pair is checked for
//! compatibility first (sort order, PacBio BAM version, and for coordinate-sorted inputs the
//! reference dictionary); all failed checks are reported together.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use pbheader_lib::backend::NoodlesBackend;
use pbheader_lib::header::BamHeader;
use pbheader_lib::logging::{OperationTimer, log_header_summary};
use pbheader_lib::validation::{validate_files_exist, validate_min_count};

use crate::commands::command::Command;
use crate::commands::common::{HeaderOutputOptions, add_program_record, read_header};

/// Merge the headers of several BAM or SAM files.
#[derive(Debug, Parser)]
#[command(
    name = "merge",
    about = "Merge the headers of several BAM/SAM files",
    long_about = r#"
Merge the headers of several BAM, SAM, or plain-text header files.

Read groups and programs are unioned by ID (the first file to declare an ID wins), comments
are concatenated, and the sequence dictionary of the first file is kept. Inputs must share
the same sort order and carry a supported PacBio BAM version (@HD pb); coordinate-sorted
inputs must also share an identical sequence dictionary.

Example usage:
  pbheader merge -i a.subreads.bam -i b.subreads.bam
  pbheader merge -i a.bam -i b.bam -i c.bam --add-pg -o merged.bam
"#
)]
pub struct Merge {
    /// Input BAM, SAM, or header text files (repeat for each input)
    #[arg(short = 'i', long = "input", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Append a @PG record for this tool to the merged header
    #[arg(long = "add-pg", default_value = "false")]
    pub add_pg: bool,

    /// Output options
    #[command(flatten)]
    pub output: HeaderOutputOptions,
}

impl Command for Merge {
    fn execute(&self, command_line: &str) -> Result<()> {
        validate_min_count(&self.inputs, 1, "input")?;
        validate_files_exist(&self.inputs, "Input")?;

        let timer = OperationTimer::new("Merging headers");
        let backend = NoodlesBackend::new();

        let headers = self
            .inputs
            .iter()
            .map(|path| {
                info!("Input: {}", path.display());
                read_header(path, &backend)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut merged =
            BamHeader::merge_all(&headers).context("Input headers cannot be merged")?;

        if self.add_pg {
            let id = add_program_record(&mut merged, crate::version::VERSION.as_str(), command_line);
            info!("Added @PG record '{id}'");
        }

        log_header_summary("Merged header", &merged);
        self.output.write(&merged, &backend)?;
        timer.log_completion(headers.len() as u64);
        Ok(())
    }
}
