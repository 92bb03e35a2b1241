//! Tests of the `pbheader` binary.

use pbheader_lib::header::BamHeader;
use tempfile::TempDir;

use crate::helpers::{
    SUBREADS_HEADER, arg, read_noodles_header, run_pbheader, write_noodles_bam, write_text,
};

#[test]
fn test_view_prints_normalized_header() {
    let dir = TempDir::new().unwrap();
    let input = write_text(dir.path(), "in.sam", "@HD\tGO:query\tVN:1.6\n@CO\thello\n");

    let output = run_pbheader(&["view", "-i", arg(&input)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "@HD\tVN:1.6\tSO:unknown\tpb:3.0.7\n@CO\thello\n");
}

#[test]
fn test_view_of_bam_to_bam() {
    let dir = TempDir::new().unwrap();
    let input = write_noodles_bam(dir.path(), "in.bam", SUBREADS_HEADER);
    let out = dir.path().join("out.bam");

    let output = run_pbheader(&["view", "-i", arg(&input), "-o", arg(&out)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let header = read_noodles_header(&out);
    assert_eq!(header.reference_sequences().len(), 2);
    assert_eq!(header.programs().as_ref().len(), 2);
}

#[test]
fn test_view_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.bam");

    let output = run_pbheader(&["view", "-i", arg(&missing)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("File does not exist"));
}

#[test]
fn test_merge_with_program_record() {
    let dir = TempDir::new().unwrap();
    let a = write_text(
        dir.path(),
        "a.sam",
        "@HD\tVN:1.5\tSO:unknown\tpb:3.0.1\n@RG\tID:aaaa0001\n@PG\tID:bam2bam\tPN:bam2bam\n",
    );
    let b = write_text(
        dir.path(),
        "b.sam",
        "@HD\tVN:1.5\tSO:unknown\tpb:3.0.3\n@RG\tID:bbbb0002\n@PG\tID:bam2bam\tPN:bam2bam\n",
    );
    let out = dir.path().join("merged.sam");

    let output =
        run_pbheader(&["merge", "-i", arg(&a), "-i", arg(&b), "--add-pg", "-o", arg(&out)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let merged = BamHeader::from_sam(&std::fs::read_to_string(&out).unwrap());
    assert_eq!(merged.read_group_ids(), vec!["aaaa0001", "bbbb0002"]);
    assert_eq!(merged.program_ids(), vec!["bam2bam", "pbheader"]);

    let pg = merged.program("pbheader").unwrap();
    assert_eq!(pg.previous_program_id, "bam2bam");
    assert!(pg.command_line.contains("merge"));
    assert_eq!(merged.pacbio_bam_version(), "3.0.1");
}

#[test]
fn test_merge_incompatible_inputs_fails_with_diagnostics() {
    let dir = TempDir::new().unwrap();
    let a = write_text(dir.path(), "a.sam", "@HD\tSO:coordinate\tpb:3.0.1\n@SQ\tSN:chr1\tLN:5\n");
    let b = write_text(dir.path(), "b.sam", "@HD\tSO:queryname\tpb:3.0.0\n");

    let output = run_pbheader(&["merge", "-i", arg(&a), "-i", arg(&b)]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("mismatched sort orders"), "{stderr}");
    assert!(stderr.contains("incompatible PacBio BAM versions"), "{stderr}");
    assert!(stderr.contains("mismatched sequence lists"), "{stderr}");
    assert!(output.stdout.is_empty());
}
