//! Typed SAM header model with PacBio conventions.
//!
//! [`BamHeader`] owns every section of a SAM header:
//!
//! - the `@HD` line values: format version (`VN`), sort order (`SO`), and PacBio BAM version
//!   (`pb`)
//! - the `@SQ` sequence dictionary, in order, with a name to index lookup
//! - `@RG` read groups and `@PG` programs, keyed by ID
//! - `@CO` comments, in order
//!
//! Parsing is tolerant: short, malformed, or unknown lines are skipped with a warning and
//! unknown tags are kept as custom tags. Strict lookups and the version setter return typed
//! errors instead.
//!
//! # Example
//!
//! ```
//! use pbheader_lib::header::BamHeader;
//!
//! # fn main() -> pbheader_lib::errors::Result<()> {
//! let text = "@HD\tVN:1.5\tSO:coordinate\tpb:3.0.1\n@SQ\tSN:chr1\tLN:1000\n";
//! let header = BamHeader::from_sam(text);
//! assert_eq!(header.sort_order(), "coordinate");
//! assert_eq!(header.sequence_id("chr1")?, 0);
//! assert_eq!(BamHeader::from_sam(&header.to_sam()), header);
//! # Ok(())
//! # }
//! ```

pub mod chemistry;
pub mod custom_tags;
pub mod merge;
pub mod program;
pub mod read_group;
pub mod sequence;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use log::{debug, warn};

use crate::backend::{AlignmentFileBackend, DEFAULT_LIBRARY_VERSION};
use crate::errors::{HeaderError, RecordKind, Result};
use crate::tokens::{body_tokens, push_tag, split_token};
use crate::version::Version;

pub use custom_tags::CustomTags;
pub use program::ProgramInfo;
pub use read_group::ReadGroupInfo;
pub use sequence::SequenceInfo;

/// Record prefix of the header line.
pub const HD_PREFIX: &str = "@HD";

/// Record prefix of a comment line.
pub const CO_PREFIX: &str = "@CO";

/// Sort order written when none is set.
pub const UNKNOWN_SORT_ORDER: &str = "unknown";

/// Lines shorter than this cannot carry a tag and are skipped.
const MIN_LINE_LEN: usize = 5;

/// `@HD` tags.
pub mod tag {
    pub const VERSION: &str = "VN";
    pub const SORT_ORDER: &str = "SO";
    pub const PACBIO_BAM_VERSION: &str = "pb";
}

/// A SAM header.
///
/// Cloning produces a fully independent copy; see [`BamHeader::deep_copy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BamHeader {
    version: String,
    pacbio_bam_version: String,
    sort_order: String,
    sequences: Vec<SequenceInfo>,
    // Kept in sync with `sequences`; the last sequence added under a name wins.
    sequence_id_lookup: HashMap<String, usize>,
    read_groups: BTreeMap<String, ReadGroupInfo>,
    programs: BTreeMap<String, ProgramInfo>,
    comments: Vec<String>,
}

impl Default for BamHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl BamHeader {
    /// Creates an empty header whose format version is the default backend's version.
    #[must_use]
    pub fn new() -> Self {
        Self::with_version(DEFAULT_LIBRARY_VERSION)
    }

    /// Creates an empty header whose format version is `backend`'s library version.
    #[must_use]
    pub fn new_with_backend(backend: &dyn AlignmentFileBackend) -> Self {
        Self::with_version(backend.library_version())
    }

    fn with_version(version: &str) -> Self {
        Self {
            version: version.to_string(),
            pacbio_bam_version: String::new(),
            sort_order: String::new(),
            sequences: Vec::new(),
            sequence_id_lookup: HashMap::new(),
            read_groups: BTreeMap::new(),
            programs: BTreeMap::new(),
            comments: Vec::new(),
        }
    }

    /// Parses SAM header text.
    ///
    /// A missing `VN` defaults to the default backend's version.
    #[must_use]
    pub fn from_sam(text: &str) -> Self {
        Self::parse(text, DEFAULT_LIBRARY_VERSION)
    }

    /// Parses SAM header text, defaulting a missing `VN` to `backend`'s library version.
    #[must_use]
    pub fn from_sam_with_backend(text: &str, backend: &dyn AlignmentFileBackend) -> Self {
        Self::parse(text, backend.library_version())
    }

    fn parse(text: &str, default_version: &str) -> Self {
        let mut header = Self::with_version("");

        for line in text.lines() {
            if line.len() < MIN_LINE_LEN {
                continue;
            }
            let Some(prefix) = line.get(..3) else {
                continue;
            };

            match prefix {
                HD_PREFIX => header.parse_hd_line(line),
                sequence::PREFIX | read_group::PREFIX | program::PREFIX if !has_fields(line) => {
                    warn!("Skipping {prefix} line with no fields");
                }
                sequence::PREFIX => match SequenceInfo::from_sam(line) {
                    Ok(seq) => {
                        header.add_sequence(seq);
                    }
                    Err(e) => warn!("Skipping @SQ line: {e}"),
                },
                read_group::PREFIX => match ReadGroupInfo::from_sam(line) {
                    Ok(rg) => {
                        header.add_read_group(rg);
                    }
                    Err(e) => warn!("Skipping @RG line: {e}"),
                },
                program::PREFIX => match ProgramInfo::from_sam(line) {
                    Ok(pg) => {
                        header.add_program(pg);
                    }
                    Err(e) => warn!("Skipping @PG line: {e}"),
                },
                CO_PREFIX => {
                    header.add_comment(line.get(4..).unwrap_or_default());
                }
                _ => debug!("Skipping unrecognized header line: {line}"),
            }
        }

        if header.version.is_empty() {
            header.version = default_version.to_string();
        }
        header
    }

    /// Applies the `VN`, `SO`, and `pb` tokens of an `@HD` line; other tokens are dropped.
    fn parse_hd_line(&mut self, line: &str) {
        let Some(tokens) = body_tokens(line) else {
            return;
        };
        for token in tokens.into_iter().filter(|t| !t.is_empty()) {
            match split_token(line, token) {
                Ok((tag::VERSION, value)) => self.version = value.to_string(),
                Ok((tag::SORT_ORDER, value)) => self.sort_order = value.to_string(),
                Ok((tag::PACBIO_BAM_VERSION, value)) => {
                    self.set_pacbio_bam_version_unchecked(value);
                }
                Ok((other, _)) => debug!("Dropping unsupported @HD tag '{other}'"),
                Err(e) => warn!("Skipping @HD token: {e}"),
            }
        }
    }

    /// Renders the header as SAM text, one newline-terminated line per record.
    ///
    /// Sections are written in a fixed order: `@HD`, `@SQ`, `@RG`, `@PG`, `@CO`. An unset sort
    /// order is written as `unknown` and an unset PacBio version as [`Version::CURRENT`]; these
    /// defaults are not stored back into the header.
    #[must_use]
    pub fn to_sam(&self) -> String {
        let mut out = String::from(HD_PREFIX);
        let version =
            if self.version.is_empty() { DEFAULT_LIBRARY_VERSION } else { self.version.as_str() };
        let sort_order =
            if self.sort_order.is_empty() { UNKNOWN_SORT_ORDER } else { self.sort_order.as_str() };
        let pacbio_bam_version = if self.pacbio_bam_version.is_empty() {
            Version::CURRENT.to_string()
        } else {
            self.pacbio_bam_version.clone()
        };
        push_tag(&mut out, tag::VERSION, version);
        push_tag(&mut out, tag::SORT_ORDER, sort_order);
        push_tag(&mut out, tag::PACBIO_BAM_VERSION, &pacbio_bam_version);
        out.push('\n');

        for seq in &self.sequences {
            out.push_str(&seq.to_sam());
            out.push('\n');
        }
        for rg in self.read_groups.values() {
            out.push_str(&rg.to_sam());
            out.push('\n');
        }
        for pg in self.programs.values() {
            out.push_str(&pg.to_sam());
            out.push('\n');
        }
        for comment in &self.comments {
            out.push_str(CO_PREFIX);
            out.push('\t');
            out.push_str(comment);
            out.push('\n');
        }
        out
    }

    /// Returns an independent copy sharing no collections with `self`.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    // ---- @HD ----

    /// The SAM format version (`VN`).
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = version.into();
        self
    }

    /// The sort order (`SO`); empty if unset.
    #[must_use]
    pub fn sort_order(&self) -> &str {
        &self.sort_order
    }

    pub fn set_sort_order(&mut self, sort_order: impl Into<String>) -> &mut Self {
        self.sort_order = sort_order.into();
        self
    }

    /// The PacBio BAM version (`pb`) as written in the header; empty if unset.
    #[must_use]
    pub fn pacbio_bam_version(&self) -> &str {
        &self.pacbio_bam_version
    }

    /// Sets the PacBio BAM version.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::VersionTooOld`] if `version` is below [`Version::MINIMUM`] or not
    /// a valid version; the header is left unchanged.
    pub fn set_pacbio_bam_version(&mut self, version: &str) -> Result<&mut Self> {
        let parsed = Version::parse(version);
        if !parsed.is_supported() {
            return Err(HeaderError::VersionTooOld { found: parsed, minimum: Version::MINIMUM });
        }
        self.pacbio_bam_version = version.to_string();
        Ok(self)
    }

    /// Sets the PacBio BAM version without the minimum-version check, as parsing does.
    pub(crate) fn set_pacbio_bam_version_unchecked(&mut self, version: &str) -> &mut Self {
        self.pacbio_bam_version = version.to_string();
        self
    }

    // ---- @SQ ----

    /// The sequence dictionary, in order.
    #[must_use]
    pub fn sequences(&self) -> &[SequenceInfo] {
        &self.sequences
    }

    /// Appends a sequence and maps its name to the new index.
    ///
    /// A name that is already present is re-pointed to the new index; the earlier entry stays
    /// in the list.
    pub fn add_sequence(&mut self, sequence: SequenceInfo) -> &mut Self {
        let index = self.sequences.len();
        self.sequence_id_lookup.insert(sequence.name.clone(), index);
        self.sequences.push(sequence);
        self
    }

    /// Replaces the sequence dictionary.
    pub fn set_sequences(&mut self, sequences: impl IntoIterator<Item = SequenceInfo>) -> &mut Self {
        self.clear_sequences();
        for seq in sequences {
            self.add_sequence(seq);
        }
        self
    }

    pub fn clear_sequences(&mut self) -> &mut Self {
        self.sequence_id_lookup.clear();
        self.sequences.clear();
        self
    }

    #[must_use]
    pub fn has_sequence(&self, name: &str) -> bool {
        self.sequence_id_lookup.contains_key(name)
    }

    /// The index of the named sequence.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::NotFound`] if no sequence has that name.
    pub fn sequence_id(&self, name: &str) -> Result<usize> {
        self.sequence_id_lookup.get(name).copied().ok_or_else(|| HeaderError::NotFound {
            kind: RecordKind::Sequence,
            key: name.to_string(),
        })
    }

    /// The named sequence, or an empty [`SequenceInfo`] if there is none.
    #[must_use]
    pub fn sequence(&self, name: &str) -> SequenceInfo {
        self.sequence_id_lookup
            .get(name)
            .and_then(|&id| self.sequences.get(id))
            .cloned()
            .unwrap_or_default()
    }

    /// The sequence at index `id`.
    #[must_use]
    pub fn sequence_at(&self, id: usize) -> Option<&SequenceInfo> {
        self.sequences.get(id)
    }

    #[must_use]
    pub fn sequence_name(&self, id: usize) -> Option<&str> {
        self.sequence_at(id).map(|seq| seq.name.as_str())
    }

    #[must_use]
    pub fn sequence_length(&self, id: usize) -> Option<&str> {
        self.sequence_at(id).map(|seq| seq.length.as_str())
    }

    #[must_use]
    pub fn sequence_names(&self) -> Vec<&str> {
        self.sequences.iter().map(|seq| seq.name.as_str()).collect()
    }

    // ---- @RG ----

    pub fn read_groups(&self) -> impl Iterator<Item = &ReadGroupInfo> {
        self.read_groups.values()
    }

    #[must_use]
    pub fn read_group_ids(&self) -> Vec<&str> {
        self.read_groups.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn has_read_group(&self, id: &str) -> bool {
        self.read_groups.contains_key(id)
    }

    /// The read group with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::NotFound`] if there is no such read group.
    pub fn read_group(&self, id: &str) -> Result<&ReadGroupInfo> {
        self.read_groups.get(id).ok_or_else(|| HeaderError::NotFound {
            kind: RecordKind::ReadGroup,
            key: id.to_string(),
        })
    }

    /// Inserts a read group, replacing any with the same ID.
    pub fn add_read_group(&mut self, read_group: ReadGroupInfo) -> &mut Self {
        self.read_groups.insert(read_group.id.clone(), read_group);
        self
    }

    /// Replaces all read groups.
    pub fn set_read_groups(
        &mut self,
        read_groups: impl IntoIterator<Item = ReadGroupInfo>,
    ) -> &mut Self {
        self.read_groups.clear();
        for rg in read_groups {
            self.add_read_group(rg);
        }
        self
    }

    pub fn clear_read_groups(&mut self) -> &mut Self {
        self.read_groups.clear();
        self
    }

    // ---- @PG ----

    pub fn programs(&self) -> impl Iterator<Item = &ProgramInfo> {
        self.programs.values()
    }

    #[must_use]
    pub fn program_ids(&self) -> Vec<&str> {
        self.programs.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn has_program(&self, id: &str) -> bool {
        self.programs.contains_key(id)
    }

    /// The program with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::NotFound`] if there is no such program.
    pub fn program(&self, id: &str) -> Result<&ProgramInfo> {
        self.programs.get(id).ok_or_else(|| HeaderError::NotFound {
            kind: RecordKind::Program,
            key: id.to_string(),
        })
    }

    /// Inserts a program, replacing any with the same ID.
    pub fn add_program(&mut self, program: ProgramInfo) -> &mut Self {
        self.programs.insert(program.id.clone(), program);
        self
    }

    /// Replaces all programs.
    pub fn set_programs(&mut self, programs: impl IntoIterator<Item = ProgramInfo>) -> &mut Self {
        self.programs.clear();
        for pg in programs {
            self.add_program(pg);
        }
        self
    }

    pub fn clear_programs(&mut self) -> &mut Self {
        self.programs.clear();
        self
    }

    /// The ID of the last program in the `PP` chain.
    ///
    /// This is a program that no other program names as its previous program.
    ///
    /// # Returns
    ///
    /// The ID of the last program in the chain, or `None` if there are no programs.
    #[must_use]
    pub fn last_program_id(&self) -> Option<&str> {
        let referenced: HashSet<&str> = self
            .programs
            .values()
            .map(|pg| pg.previous_program_id.as_str())
            .filter(|pp| !pp.is_empty())
            .collect();

        self.programs
            .keys()
            .find(|id| !referenced.contains(id.as_str()))
            // A cycle leaves no leaf; fall back to any program
            .or_else(|| self.programs.keys().next())
            .map(String::as_str)
    }

    /// Makes a program ID that is not yet used by this header.
    ///
    /// # Arguments
    ///
    /// * `base_id` - The preferred program ID (e.g. "pbheader")
    ///
    /// # Returns
    ///
    /// `base_id` if unused, otherwise the first free `base_id.1`, `base_id.2`, ...
    #[must_use]
    pub fn unique_program_id(&self, base_id: &str) -> String {
        if !self.has_program(base_id) {
            return base_id.to_string();
        }
        (1..)
            .map(|i| format!("{base_id}.{i}"))
            .find(|candidate| !self.has_program(candidate))
            .unwrap_or_else(|| base_id.to_string())
    }

    /// Appends `program` to the end of the `PP` chain.
    ///
    /// The program's ID is made unique with [`BamHeader::unique_program_id`] and its previous
    /// program is set to the current [`BamHeader::last_program_id`].
    ///
    /// # Arguments
    ///
    /// * `program` - The program record to add; its `ID` and `PP` are overwritten
    ///
    /// # Returns
    ///
    /// The ID assigned to the added program.
    pub fn add_chained_program(&mut self, mut program: ProgramInfo) -> String {
        let previous = self.last_program_id().map(str::to_string);
        program.id = self.unique_program_id(&program.id);
        program.previous_program_id = previous.unwrap_or_default();
        let id = program.id.clone();
        self.add_program(program);
        id
    }

    // ---- @CO ----

    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comments.push(comment.into());
        self
    }

    pub fn set_comments(&mut self, comments: impl IntoIterator<Item = String>) -> &mut Self {
        self.comments = comments.into_iter().collect();
        self
    }

    pub fn clear_comments(&mut self) -> &mut Self {
        self.comments.clear();
        self
    }

    // ---- merging ----

    /// Merges `other` into this header (the `+=` operation).
    ///
    /// The headers must pass [`merge::ensure_can_merge`]. Read groups and programs whose IDs
    /// are not yet present are added; existing IDs keep their current record. All comments are
    /// appended. Sequences are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::MergeIncompatible`] describing every failed check. Neither header
    /// is modified on failure.
    pub fn merge(&mut self, other: &BamHeader) -> Result<&mut Self> {
        merge::ensure_can_merge(self, other)?;

        for rg in other.read_groups.values() {
            if self.has_read_group(&rg.id) {
                debug!("Keeping existing read group '{}' during merge", rg.id);
            } else {
                self.add_read_group(rg.clone());
            }
        }

        for pg in other.programs.values() {
            if self.has_program(&pg.id) {
                debug!("Keeping existing program '{}' during merge", pg.id);
            } else {
                self.add_program(pg.clone());
            }
        }

        self.comments.extend(other.comments.iter().cloned());
        Ok(self)
    }

    /// Returns a new header holding `self` merged with `other` (the `+` operation).
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::MergeIncompatible`] if the headers cannot be merged.
    pub fn merged(&self, other: &BamHeader) -> Result<Self> {
        let mut result = self.deep_copy();
        result.merge(other)?;
        Ok(result)
    }

    /// Merges a list of headers left to right into a copy of the first.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::InvalidParameter`] for an empty list and
    /// [`HeaderError::MergeIncompatible`] if any header cannot be merged.
    pub fn merge_all<'a>(headers: impl IntoIterator<Item = &'a BamHeader>) -> Result<Self> {
        let mut headers = headers.into_iter();
        let mut result = headers
            .next()
            .ok_or_else(|| HeaderError::InvalidParameter {
                parameter: "headers".to_string(),
                reason: "at least one header is required to merge".to_string(),
            })?
            .deep_copy();
        for header in headers {
            result.merge(header)?;
        }
        Ok(result)
    }
}

impl fmt::Display for BamHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sam())
    }
}

/// Returns true if `line` carries at least one non-empty token after its prefix.
fn has_fields(line: &str) -> bool {
    body_tokens(line).is_some_and(|tokens| tokens.iter().any(|token| !token.is_empty()))
}
