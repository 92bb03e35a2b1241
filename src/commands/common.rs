//! Common CLI options and helpers shared across commands.
//!
//! Option structs here are composed into command structs using `#[command(flatten)]`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use log::info;

use pbheader_lib::backend::AlignmentFileBackend;
use pbheader_lib::header::{BamHeader, ProgramInfo};

/// Program ID and name used for @PG records added by this tool.
pub const PROGRAM_NAME: &str = "pbheader";

/// Output options for commands that produce a header.
#[derive(Debug, Clone, Default, Args)]
pub struct HeaderOutputOptions {
    /// Output file (`.bam` writes a header-only BAM, anything else SAM text); stdout if omitted
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

impl HeaderOutputOptions {
    /// Writes `header` to the output file, or as SAM text to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write(&self, header: &BamHeader, backend: &dyn AlignmentFileBackend) -> Result<()> {
        match &self.output {
            Some(path) => {
                backend.write_header(path, header)?;
                info!("Wrote header to {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(header.to_sam().as_bytes())
                    .context("Failed to write header to stdout")?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

/// Reads and parses the header of the alignment file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_header(path: &Path, backend: &dyn AlignmentFileBackend) -> Result<BamHeader> {
    let text = backend.read_header_text(path)?;
    Ok(BamHeader::from_sam_with_backend(&text, backend))
}

/// Appends a @PG record for this tool to the end of the header's program chain.
///
/// # Arguments
///
/// * `header` - The header to add the record to
/// * `version` - Program version string
/// * `command_line` - Full command line invocation
///
/// # Returns
///
/// The ID assigned to the new record.
pub fn add_program_record(header: &mut BamHeader, version: &str, command_line: &str) -> String {
    let program = ProgramInfo {
        name: PROGRAM_NAME.to_string(),
        version: version.to_string(),
        command_line: command_line.to_string(),
        ..ProgramInfo::new(PROGRAM_NAME)
    };
    header.add_chained_program(program)
}
