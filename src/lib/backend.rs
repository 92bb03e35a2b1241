//! Alignment-file access for headers.
//!
//! The header model itself never touches files. An [`AlignmentFileBackend`] supplies the raw
//! header text of an alignment file, writes a header back out, and reports the SAM format
//! version it writes, which [`BamHeader`] uses as its `VN` default.
//!
//! [`NoodlesBackend`] is the default implementation:
//!
//! - `.bam` files are read through the noodles BGZF reader; the header text is taken verbatim
//!   from the BAM header block so PacBio and custom tags are not normalized away.
//! - Any other file is read as text and its leading `@` lines form the header.
//!
//! Writing mirrors reading: `.bam` paths get a header-only BAM, anything else gets SAM text.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use noodles::bgzf::io::{Reader as BgzfReader, Writer as BgzfWriter};

use crate::errors::HeaderError;
use crate::header::BamHeader;

/// SAM format version written by [`NoodlesBackend`].
pub const DEFAULT_LIBRARY_VERSION: &str = "1.6";

/// Magic bytes opening a decompressed BAM stream.
const BAM_MAGIC: &[u8; 4] = b"BAM\x01";

/// Reads and writes alignment-file headers.
pub trait AlignmentFileBackend {
    /// The SAM format version this backend writes; used as the default `@HD VN`.
    fn library_version(&self) -> &str;

    /// Returns the SAM header text of the file at `path`.
    fn read_header_text(&self, path: &Path) -> Result<String>;

    /// Writes `header` to `path`.
    fn write_header(&self, path: &Path, header: &BamHeader) -> Result<()>;
}

/// Backend built on noodles.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoodlesBackend;

impl NoodlesBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Returns true if `path` has a `.bam` extension (case-insensitive).
#[must_use]
pub fn is_bam_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("bam"))
}

impl AlignmentFileBackend for NoodlesBackend {
    fn library_version(&self) -> &str {
        DEFAULT_LIBRARY_VERSION
    }

    fn read_header_text(&self, path: &Path) -> Result<String> {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;

        if is_bam_path(path) {
            let mut reader = BgzfReader::new(BufReader::new(file));
            read_bam_header_text(&mut reader, path)
                .with_context(|| format!("Failed to read BAM header from: {}", path.display()))
        } else {
            read_text_header(BufReader::new(file))
                .with_context(|| format!("Failed to read header from: {}", path.display()))
        }
    }

    fn write_header(&self, path: &Path, header: &BamHeader) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;

        if is_bam_path(path) {
            let mut writer = BgzfWriter::new(file);
            write_bam_header(&mut writer, header)
                .with_context(|| format!("Failed to write BAM header to: {}", path.display()))?;
            writer
                .finish()
                .with_context(|| format!("Failed to finish BAM file: {}", path.display()))?;
        } else {
            let mut writer = BufWriter::new(file);
            writer
                .write_all(header.to_sam().as_bytes())
                .with_context(|| format!("Failed to write header to: {}", path.display()))?;
            writer.flush()?;
        }
        Ok(())
    }
}

/// Reads the header text from a decompressed BAM stream positioned at its start.
fn read_bam_header_text<R: Read>(reader: &mut R, path: &Path) -> Result<String> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != BAM_MAGIC {
        return Err(HeaderError::InvalidFileFormat {
            file_type: "BAM".to_string(),
            path: path.display().to_string(),
            reason: "missing BAM magic number".to_string(),
        }
        .into());
    }

    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let l_text = usize::try_from(i32::from_le_bytes(len_buf)).map_err(|_| {
        HeaderError::InvalidFileFormat {
            file_type: "BAM".to_string(),
            path: path.display().to_string(),
            reason: "negative header text length".to_string(),
        }
    })?;

    let mut text = vec![0u8; l_text];
    reader.read_exact(&mut text)?;
    // Writers may pad the text with NULs
    while text.last() == Some(&0) {
        text.pop();
    }

    String::from_utf8(text).context("BAM header text is not valid UTF-8")
}

/// Collects the leading `@` lines of a text stream.
fn read_text_header<R: BufRead>(reader: R) -> io::Result<String> {
    let mut text = String::new();
    for line in reader.lines() {
        let line = line?;
        if !line.starts_with('@') {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}

/// Writes a header-only BAM: magic, header text, and the reference dictionary.
fn write_bam_header<W: Write>(writer: &mut W, header: &BamHeader) -> Result<()> {
    writer.write_all(BAM_MAGIC)?;

    let text = header.to_sam();
    let l_text = i32::try_from(text.len()).context("Header text is too long for BAM")?;
    writer.write_all(&l_text.to_le_bytes())?;
    writer.write_all(text.as_bytes())?;

    let sequences = header.sequences();
    let n_ref = i32::try_from(sequences.len()).context("Too many reference sequences for BAM")?;
    writer.write_all(&n_ref.to_le_bytes())?;

    for seq in sequences {
        let Some(l_ref) = seq.length_value() else {
            bail!("Sequence '{}' has an invalid length '{}'", seq.name, seq.length);
        };
        // l_name counts the NUL terminator
        let l_name = u32::try_from(seq.name.len() + 1)
            .with_context(|| format!("Sequence name too long: {}", seq.name))?;
        writer.write_all(&l_name.to_le_bytes())?;
        writer.write_all(seq.name.as_bytes())?;
        writer.write_all(&[0u8])?;
        writer.write_all(&l_ref.to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}
