//! Compatibility checks run before two headers are merged.
//!
//! Three independent checks must all pass:
//!
//! 1. The sort orders (`@HD SO`) are identical strings.
//! 2. Each header's PacBio BAM version (`@HD pb`) is at least [`Version::MINIMUM`].
//! 3. If the receiving header is coordinate-sorted, both sequence dictionaries hold the same
//!    sequences in the same order, since coordinate-sorted records refer to references by
//!    position in that dictionary.
//!
//! Every failed check contributes one diagnostic line, so a caller sees all problems at once.

use crate::errors::{HeaderError, Result};
use crate::header::BamHeader;
use crate::header::sequence::SequenceInfo;
use crate::version::Version;

/// Sort order under which sequence dictionaries must match exactly.
pub const COORDINATE_SORT_ORDER: &str = "coordinate";

/// Returns true if both headers declare exactly the same sort order.
#[must_use]
pub fn sort_orders_match(lhs: &BamHeader, rhs: &BamHeader) -> bool {
    lhs.sort_order() == rhs.sort_order()
}

/// Returns true if both headers' PacBio BAM versions are supported.
///
/// The two versions need not be equal.
#[must_use]
pub fn pacbio_versions_supported(lhs: &BamHeader, rhs: &BamHeader) -> bool {
    Version::parse(lhs.pacbio_bam_version()).is_supported()
        && Version::parse(rhs.pacbio_bam_version()).is_supported()
}

/// Returns true unless `lhs` is coordinate-sorted and the sequence lists differ.
#[must_use]
pub fn sequences_match(lhs: &BamHeader, rhs: &BamHeader) -> bool {
    lhs.sort_order() != COORDINATE_SORT_ORDER || lhs.sequences() == rhs.sequences()
}

/// Describes where two sequence lists first disagree.
fn describe_sequence_mismatch(lhs: &[SequenceInfo], rhs: &[SequenceInfo]) -> String {
    let first_difference = lhs.iter().zip(rhs).position(|(l, r)| l != r);
    match first_difference {
        Some(i) => format!(
            "  mismatched sequence lists (@SQ entries) : first difference at index {i}: ({}, {})",
            lhs[i].to_sam(),
            rhs[i].to_sam()
        ),
        None => format!(
            "  mismatched sequence lists (@SQ entries) : sequence counts differ: ({}, {})",
            lhs.len(),
            rhs.len()
        ),
    }
}

/// Returns one diagnostic line per failed check; empty if the headers can be merged.
#[must_use]
pub fn compatibility_diagnostics(lhs: &BamHeader, rhs: &BamHeader) -> Vec<String> {
    let mut diagnostics = Vec::new();

    if !sort_orders_match(lhs, rhs) {
        diagnostics.push(format!(
            "  mismatched sort orders (@HD:SO) : ({}, {})",
            lhs.sort_order(),
            rhs.sort_order()
        ));
    }

    if !pacbio_versions_supported(lhs, rhs) {
        diagnostics.push(format!(
            "  incompatible PacBio BAM versions (@HD:pb) : ({}, {}), minimum supported is {}",
            lhs.pacbio_bam_version(),
            rhs.pacbio_bam_version(),
            Version::MINIMUM
        ));
    }

    if !sequences_match(lhs, rhs) {
        diagnostics.push(describe_sequence_mismatch(lhs.sequences(), rhs.sequences()));
    }

    diagnostics
}

/// Checks that `rhs` can be merged into `lhs`.
///
/// # Errors
///
/// Returns [`HeaderError::MergeIncompatible`] listing every failed check.
pub fn ensure_can_merge(lhs: &BamHeader, rhs: &BamHeader) -> Result<()> {
    let diagnostics = compatibility_diagnostics(lhs, rhs);
    if diagnostics.is_empty() { Ok(()) } else { Err(HeaderError::MergeIncompatible { diagnostics }) }
}
