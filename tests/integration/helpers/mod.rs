//! Helper utilities for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use noodles::bam;
use noodles::sam;
use noodles::sam::alignment::io::Write as _;

/// A coordinate-sorted PacBio subreads header.
pub const SUBREADS_HEADER: &str = "@HD\tVN:1.5\tSO:coordinate\tpb:3.0.1\n\
@SQ\tSN:chr1\tLN:1000\n\
@SQ\tSN:chr2\tLN:2000\n\
@RG\tID:a1b2c3d4\tPL:PACBIO\tDS:READTYPE=SUBREAD;DeletionQV=dq;Ipd:CodecV1=ip;\
BINDINGKIT=100-619-300;SEQUENCINGKIT=100-867-300;BASECALLERVERSION=3.1.0.171835;\
FRAMERATEHZ=80.000000\tPU:m54006_160504_020705\tPM:SEQUEL\n\
@PG\tID:bam2bam\tPN:bam2bam\tVN:3.1.0\tPP:baz2bam\n\
@PG\tID:baz2bam\tPN:baz2bam\tVN:3.1.0\n\
@CO\tfirst movie\n";

/// Writes `text` to `dir/name` and returns the path.
pub fn write_text(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).expect("Failed to write header text");
    path
}

/// Writes a record-free BAM with `text` as its header using noodles.
pub fn write_noodles_bam(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    let header: sam::Header = text.parse().expect("Failed to parse header with noodles");

    let mut writer =
        bam::io::Writer::new(fs::File::create(&path).expect("Failed to create BAM file"));
    writer.write_header(&header).expect("Failed to write header");
    writer.finish(&header).expect("Failed to finish BAM");
    path
}

/// Reads a BAM header with noodles.
pub fn read_noodles_header(path: &Path) -> sam::Header {
    let mut reader = bam::io::reader::Builder.build_from_path(path).expect("Failed to open BAM");
    reader.read_header().expect("Failed to read header")
}

/// Runs the `pbheader` binary with `args`.
pub fn run_pbheader(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pbheader"))
        .args(args)
        .output()
        .expect("Failed to run pbheader")
}

/// Converts a path to `&str` for command arguments.
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("Non-UTF-8 temp path")
}
