//! Print the normalized header of an alignment file.
//!
//! The header is parsed into the typed model and written back out, so the output shows
//! exactly what the model retained: canonical tag order, defaults filled in for `@HD`, and
//! malformed lines dropped.

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use pbheader_lib::backend::NoodlesBackend;
use pbheader_lib::logging::log_header_summary;
use pbheader_lib::validation::validate_file_exists;

use crate::commands::command::Command;
use crate::commands::common::{HeaderOutputOptions, read_header};

/// Print the normalized header of a BAM or SAM file.
#[derive(Debug, Parser)]
#[command(
    name = "view",
    about = "Print the normalized header of a BAM/SAM file",
    long_about = r#"
Print the normalized header of a BAM, SAM, or plain-text header file.

The header is parsed into typed @HD, @SQ, @RG, @PG and @CO records and written back out.
PacBio read group descriptions (DS) are decoded and re-encoded in canonical order.

Example usage:
  pbheader view -i movie.subreads.bam
  pbheader view -i movie.subreads.bam -o header.sam
"#
)]
pub struct View {
    /// Input BAM, SAM, or header text file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output options
    #[command(flatten)]
    pub output: HeaderOutputOptions,
}

impl Command for View {
    fn execute(&self, _command_line: &str) -> Result<()> {
        validate_file_exists(&self.input, "Input")?;
        info!("Input: {}", self.input.display());

        let backend = NoodlesBackend::new();
        let header = read_header(&self.input, &backend)?;
        log_header_summary("Header", &header);

        self.output.write(&header, &backend)
    }
}
