//! End-to-end tests of the typed header model.

use pbheader_lib::header::read_group::{BaseFeature, FrameCodec, PlatformModel};
use pbheader_lib::header::{BamHeader, ProgramInfo, ReadGroupInfo, SequenceInfo};
use pbheader_lib::{HeaderError, Version};

use crate::helpers::SUBREADS_HEADER;

#[test]
fn test_subreads_header_round_trips_exactly() {
    let header = BamHeader::from_sam(SUBREADS_HEADER);
    assert_eq!(header.to_sam(), SUBREADS_HEADER);
}

#[test]
fn test_subreads_read_group_metadata() {
    let header = BamHeader::from_sam(SUBREADS_HEADER);
    let rg = header.read_group("a1b2c3d4").unwrap();

    assert_eq!(rg.read_type, "SUBREAD");
    assert_eq!(rg.movie_name, "m54006_160504_020705");
    assert_eq!(rg.platform_model, PlatformModel::Sequel);
    assert_eq!(rg.frame_rate_hz, "80.000000");
    assert_eq!(rg.ipd_codec, FrameCodec::V1);
    assert_eq!(rg.base_feature_tag(BaseFeature::DeletionQv), Some("dq"));
    assert!(!rg.has_base_feature(BaseFeature::PulseWidth));
    assert_eq!(rg.sequencing_chemistry().unwrap(), "S/P1-C1.1");
}

#[test]
fn test_built_header_round_trips() {
    let mut header = BamHeader::new();
    header.set_sort_order("queryname");
    header.set_pacbio_bam_version(&Version::CURRENT.to_string()).unwrap();

    let mut seq = SequenceInfo::new("ecoliK12", "4642522");
    seq.checksum = "52e6ba9d4e8d9b8c".to_string();
    seq.custom_tags.insert("zz", "last");
    seq.custom_tags.insert("aa", "first");
    header.add_sequence(seq);

    let mut rg = ReadGroupInfo::from_movie("m140905_042212_sidney", "CCS");
    rg.sample = "ecoli".to_string();
    rg.set_pulse_width_codec(FrameCodec::Raw, None);
    rg.custom_tags.insert("XY", "custom");
    header.add_read_group(rg);

    header.add_chained_program(ProgramInfo::new("ccs"));
    header.add_comment("built in a test");

    let reparsed = BamHeader::from_sam(&header.to_sam());
    assert_eq!(reparsed, header);

    let custom: Vec<_> = reparsed.sequences()[0].custom_tags.iter().collect();
    assert_eq!(custom, vec![("zz", "last"), ("aa", "first")]);
}

#[test]
fn test_malformed_lines_are_skipped_not_fatal() {
    let text = "@HD\tVN:1.6\tSO:unsorted\tpb:3.0.1\n\
                @SQ\tSN:chr1\tLN\n\
                @RG\tID:ok\n\
                @RG\tX\n\
                @CO\tstill here\n";
    let header = BamHeader::from_sam(text);
    assert!(header.sequences().is_empty());
    assert_eq!(header.read_group_ids(), vec!["ok"]);
    assert_eq!(header.comments(), &["still here"]);
}

#[test]
fn test_negative_sequence_length_is_invalid() {
    let seq = SequenceInfo::from_sam("@SQ\tSN:chr2\tLN:-5").unwrap();
    assert!(!seq.is_valid());
}

#[test]
fn test_version_ordering() {
    assert!(Version::parse("1.2.3") < Version::parse("1.3.0"));
    assert!(Version::parse("1.3.0") < Version::parse("2.0.0"));
    assert!(Version::parse("garbage") < Version::parse("0.0.1"));
}

#[test]
fn test_strict_lookups_report_missing_keys() {
    let header = BamHeader::from_sam(SUBREADS_HEADER);
    let err = header.read_group("missing").unwrap_err();
    assert!(matches!(err, HeaderError::NotFound { .. }));
    assert_eq!(err.to_string(), "read group 'missing' not found in header");
    assert!(header.sequence_id("chrX").is_err());
    assert_eq!(header.sequence("chrX"), SequenceInfo::default());
}
