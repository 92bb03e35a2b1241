//! Reading and writing headers through the noodles backend.

use pbheader_lib::HeaderError;
use pbheader_lib::backend::{AlignmentFileBackend, NoodlesBackend};
use pbheader_lib::header::BamHeader;
use tempfile::TempDir;

use crate::helpers::{SUBREADS_HEADER, read_noodles_header, write_noodles_bam, write_text};

#[test]
fn test_reads_header_of_noodles_written_bam() {
    let dir = TempDir::new().unwrap();
    let path = write_noodles_bam(dir.path(), "movie.subreads.bam", SUBREADS_HEADER);
    let backend = NoodlesBackend::new();

    let text = backend.read_header_text(&path).unwrap();
    let header = BamHeader::from_sam_with_backend(&text, &backend);

    assert_eq!(header.sort_order(), "coordinate");
    assert_eq!(header.pacbio_bam_version(), "3.0.1");
    assert_eq!(header.sequence_names(), vec!["chr1", "chr2"]);
    assert_eq!(header.read_group("a1b2c3d4").unwrap().read_type, "SUBREAD");
    assert_eq!(header.program("bam2bam").unwrap().previous_program_id, "baz2bam");
    assert_eq!(header.comments(), &["first movie"]);
}

#[test]
fn test_written_bam_is_readable_by_noodles() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("header.bam");
    let backend = NoodlesBackend::new();
    let header = BamHeader::from_sam(SUBREADS_HEADER);

    backend.write_header(&path, &header).unwrap();

    let noodles_header = read_noodles_header(&path);
    assert_eq!(noodles_header.reference_sequences().len(), 2);
    assert_eq!(noodles_header.read_groups().len(), 1);
    assert_eq!(noodles_header.comments().len(), 1);

    let text = backend.read_header_text(&path).unwrap();
    assert_eq!(BamHeader::from_sam(&text), header);
}

#[test]
fn test_sam_file_with_records_reads_only_header() {
    let dir = TempDir::new().unwrap();
    let contents = format!("{SUBREADS_HEADER}read1\t4\t*\t0\t0\t*\t*\t0\t0\tACGT\t!!!!\n");
    let path = write_text(dir.path(), "reads.sam", &contents);

    let text = NoodlesBackend::new().read_header_text(&path).unwrap();
    assert_eq!(text, SUBREADS_HEADER);
}

#[test]
fn test_missing_version_defaults_to_backend_version() {
    let dir = TempDir::new().unwrap();
    let path = write_text(dir.path(), "header.txt", "@HD\tSO:unsorted\tpb:3.0.1\n");
    let backend = NoodlesBackend::new();

    let text = backend.read_header_text(&path).unwrap();
    let header = BamHeader::from_sam_with_backend(&text, &backend);
    assert_eq!(header.version(), backend.library_version());
}

#[test]
fn test_uncompressed_file_with_bam_extension_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_text(dir.path(), "not_really.bam", "@HD\tVN:1.6\n");

    assert!(NoodlesBackend::new().read_header_text(&path).is_err());
}

#[test]
fn test_bgzf_without_bam_magic_is_invalid_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("text.bam");
    let mut writer = noodles::bgzf::io::Writer::new(std::fs::File::create(&path).unwrap());
    std::io::Write::write_all(&mut writer, b"@HD\tVN:1.6\n").unwrap();
    writer.finish().unwrap();

    let err = NoodlesBackend::new().read_header_text(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<HeaderError>(),
        Some(HeaderError::InvalidFileFormat { .. })
    ));
}
