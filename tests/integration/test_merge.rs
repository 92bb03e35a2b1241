//! Header merging across files.

use pbheader_lib::HeaderError;
use pbheader_lib::backend::{AlignmentFileBackend, NoodlesBackend};
use pbheader_lib::header::BamHeader;
use tempfile::TempDir;

use crate::helpers::{SUBREADS_HEADER, write_text};

fn load(backend: &NoodlesBackend, dir: &TempDir, name: &str, text: &str) -> BamHeader {
    let path = write_text(dir.path(), name, text);
    let text = backend.read_header_text(&path).unwrap();
    BamHeader::from_sam_with_backend(&text, backend)
}

#[test]
fn test_reordered_sequences_cannot_merge_when_coordinate_sorted() {
    let dir = TempDir::new().unwrap();
    let backend = NoodlesBackend::new();
    let a = load(&backend, &dir, "a.sam", SUBREADS_HEADER);
    let b = load(
        &backend,
        &dir,
        "b.sam",
        "@HD\tVN:1.5\tSO:coordinate\tpb:3.0.1\n@SQ\tSN:chr2\tLN:2000\n@SQ\tSN:chr1\tLN:1000\n",
    );

    let err = a.merged(&b).unwrap_err();
    let HeaderError::MergeIncompatible { diagnostics } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(diagnostics.len(), 1);
    assert!(err.to_string().contains("mismatched sequence lists (@SQ entries)"));
}

#[test]
fn test_unset_sort_order_skips_sequence_check() {
    let dir = TempDir::new().unwrap();
    let backend = NoodlesBackend::new();
    let a = load(&backend, &dir, "a.sam", "@HD\tpb:3.0.1\n@SQ\tSN:chr1\tLN:1000\n");
    let b = load(&backend, &dir, "b.sam", "@HD\tpb:3.0.3\n@SQ\tSN:chrX\tLN:5\n");

    let merged = a.merged(&b).unwrap();
    assert_eq!(merged.sequence_names(), vec!["chr1"]);
}

#[test]
fn test_existing_read_group_is_kept() {
    let dir = TempDir::new().unwrap();
    let backend = NoodlesBackend::new();
    let receiver =
        load(&backend, &dir, "a.sam", "@HD\tSO:unsorted\tpb:3.0.1\n@RG\tID:rg1\tSM:receiver\n");
    let incoming =
        load(&backend, &dir, "b.sam", "@HD\tSO:unsorted\tpb:3.0.1\n@RG\tID:rg1\tSM:incoming\n");

    let merged = receiver.merged(&incoming).unwrap();
    assert_eq!(merged.read_group_ids(), vec!["rg1"]);
    assert_eq!(merged.read_group("rg1").unwrap(), receiver.read_group("rg1").unwrap());
    assert_eq!(merged.read_group("rg1").unwrap().sample, "receiver");
}

#[test]
fn test_merge_reports_every_failure() {
    let a = BamHeader::from_sam("@HD\tSO:coordinate\tpb:3.0.1\n@SQ\tSN:chr1\tLN:10\n");
    let b = BamHeader::from_sam("@HD\tSO:queryname\tpb:2.0.0\n");

    let message = a.merged(&b).unwrap_err().to_string();
    assert!(message.starts_with("could not merge BAM headers:"));
    assert!(message.contains("(coordinate, queryname)"));
    assert!(message.contains("(3.0.1, 2.0.0)"));
    assert!(message.contains("sequence counts differ: (1, 0)"));
}

#[test]
fn test_merge_all_unions_movies() {
    let movie = |id: &str| {
        BamHeader::from_sam(&format!(
            "@HD\tVN:1.5\tSO:unknown\tpb:3.0.1\n@RG\tID:{id}\tPL:PACBIO\tDS:READTYPE=SUBREAD\n\
             @PG\tID:bam2bam\tPN:bam2bam\n@CO\t{id}\n"
        ))
    };
    let headers = [movie("aaaa0001"), movie("bbbb0002"), movie("cccc0003")];

    let merged = BamHeader::merge_all(&headers).unwrap();
    assert_eq!(merged.read_group_ids(), vec!["aaaa0001", "bbbb0002", "cccc0003"]);
    assert_eq!(merged.program_ids(), vec!["bam2bam"]);
    assert_eq!(merged.comments(), &["aaaa0001", "bbbb0002", "cccc0003"]);
}

#[test]
fn test_compatibility_is_symmetric() {
    let texts = [
        "@HD\tSO:coordinate\tpb:3.0.1\n@SQ\tSN:chr1\tLN:10\n",
        "@HD\tSO:coordinate\tpb:3.0.7\n@SQ\tSN:chr1\tLN:10\n",
        "@HD\tSO:coordinate\tpb:3.0.1\n",
        "@HD\tSO:queryname\tpb:3.0.1\n",
        "@HD\tSO:queryname\tpb:3.0.0\n",
        "@HD\tSO:queryname\n",
    ];
    let headers: Vec<_> = texts.iter().map(|t| BamHeader::from_sam(t)).collect();

    for a in &headers {
        for b in &headers {
            assert_eq!(a.merged(b).is_ok(), b.merged(a).is_ok(), "{a}\nvs\n{b}");
        }
    }
}
