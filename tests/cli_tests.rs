//! End-to-end tests that run the `fastq-base-shift` binary.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::process::Command;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

const R1: &str = "@read1/1\nACGTACGTAAAACCCC\n+\nIIIIIIIIABCDEFGH\n\
                  @read2/1\nTTTTTTTTGGGGAAAA\n+\nIIIIIIIIHGFEDCBA\n";
const R2: &str = "@read1/2\nNNNN\n+\n####\n@read2/2\nNNNN\n+\n####\n";

fn base_shift() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fastq-base-shift"))
}

fn write_gz(path: &Path, text: &str) {
    let mut enc = GzEncoder::new(fs::File::create(path).unwrap(), Compression::default());
    enc.write_all(text.as_bytes()).unwrap();
    enc.finish().unwrap();
}

fn read_gz(path: &Path) -> String {
    let mut s = String::new();
    MultiGzDecoder::new(fs::File::open(path).unwrap()).read_to_string(&mut s).unwrap();
    s
}

#[test]
fn test_shift_command_default_moves_last_eight_bases() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("r1.fastq");
    let destination = dir.path().join("r2.fastq");
    let output = dir.path().join("r2.out.fastq");
    let source_output = dir.path().join("r1.out.fastq");
    fs::write(&source, R1).unwrap();
    fs::write(&destination, R2).unwrap();

    let status = base_shift()
        .args(["shift", "-s"])
        .arg(&source)
        .arg("-d")
        .arg(&destination)
        .arg("-o")
        .arg(&output)
        .arg("-r")
        .arg(&source_output)
        .status()
        .expect("Failed to run fastq-base-shift");
    assert!(status.success());

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "@read1/2\nAAAACCCCNNNN\n+\nABCDEFGH####\n@read2/2\nGGGGAAAANNNN\n+\nHGFEDCBA####\n"
    );
    assert_eq!(
        fs::read_to_string(&source_output).unwrap(),
        "@read1/1\nACGTACGT\n+\nIIIIIIII\n@read2/1\nTTTTTTTT\n+\nIIIIIIII\n"
    );
}

#[test]
fn test_shift_command_gzip_three_prime() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("r1.fastq.gz");
    let destination = dir.path().join("r2.fastq.gz");
    let output = dir.path().join("r2.out.fastq.gz");
    write_gz(&source, R1);
    write_gz(&destination, R2);

    let status = base_shift()
        .args(["shift", "--offset", "4", "--end", "3", "--source"])
        .arg(&source)
        .arg("--destination")
        .arg(&destination)
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(read_gz(&output), "@read1/2\nNNNNACGT\n+\n####IIII\n@read2/2\nNNNNTTTT\n+\n####IIII\n");
}

#[test]
fn test_shift_command_missing_read_fails() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("r1.fastq");
    let destination = dir.path().join("r2.fastq");
    let output = dir.path().join("out.fastq");
    fs::write(&source, "@read1/1\nACGTACGTAC\n+\nIIIIIIIIII\n").unwrap();
    fs::write(&destination, R2).unwrap();

    let out = base_shift()
        .args(["shift", "-n", "-2", "-s"])
        .arg(&source)
        .arg("-d")
        .arg(&destination)
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("@read2"), "stderr was: {stderr}");
    assert_eq!(fs::read_to_string(&output).unwrap(), "@read1/2\nACNNNN\n+\nII####\n");
}

#[test]
fn test_shift_command_replace_without_destination() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("r1.fastq");
    let output = dir.path().join("umi.fastq");
    fs::write(&source, R1).unwrap();

    let status = base_shift()
        .args(["shift", "--mode", "replace", "--offset", "-6", "-s"])
        .arg(&source)
        .arg("-o")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "@read1/1\nAACCCC\n+\nCDEFGH\n@read2/1\nGGAAAA\n+\nFEDCBA\n"
    );
}

#[test]
fn test_shift_command_merge_without_destination_is_rejected() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("r1.fastq");
    fs::write(&source, R1).unwrap();

    let output = dir.path().join("out.fastq");
    let out = base_shift()
        .args(["shift", "-s"])
        .arg(&source)
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid configuration"));
    assert!(!output.exists(), "output file should not be created for a rejected run");
}

#[test]
fn test_shift_command_source_output_only() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("r1.fastq");
    let destination = dir.path().join("r2.fastq");
    let source_output = dir.path().join("r1.trimmed.fastq");
    fs::write(&source, R1).unwrap();
    fs::write(&destination, R2).unwrap();

    let status = base_shift()
        .args(["shift", "-s"])
        .arg(&source)
        .arg("-d")
        .arg(&destination)
        .arg("-r")
        .arg(&source_output)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        fs::read_to_string(&source_output).unwrap(),
        "@read1/1\nACGTACGT\n+\nIIIIIIII\n@read2/1\nTTTTTTTT\n+\nIIIIIIII\n"
    );
}

#[test]
fn test_shift_command_without_any_output_is_rejected() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("r1.fastq");
    let destination = dir.path().join("r2.fastq");
    fs::write(&source, R1).unwrap();
    fs::write(&destination, R2).unwrap();

    let out = base_shift()
        .args(["shift", "-s"])
        .arg(&source)
        .arg("-d")
        .arg(&destination)
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("no output sink"));
}

#[test]
fn test_rotate_command() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("r1.fastq");
    let output = dir.path().join("r1.rotated.fastq");
    fs::write(&input, "@read1\nACGTACGTAAAACCCC\n+\nIIIIIIIIABCDEFGH\n").unwrap();

    let status = base_shift()
        .args(["rotate", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "@read1\nAAAACCCCACGTACGT\n+\nABCDEFGHIIIIIIII\n"
    );
}
