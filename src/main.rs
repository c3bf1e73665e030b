use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

use fastq_base_shift::config::DEFAULT_SPLIT_OFFSET;
use fastq_base_shift::files::{create_writer, open_fastq, FastqLines, FastqWriter};
use fastq_base_shift::{
    rotate, BaseShiftPipeline, Configuration, DestinationMode, FastqRecordReader, InsertionEnd,
    PairingMode,
};

#[derive(Parser)]
#[command(name = "fastq-base-shift")]
#[command(version, about = "Move bases between the reads of paired FASTQ files")]
struct Cli {
    #[arg(short = 'v', long, global = true, default_value = "false", help = "Verbose output showing progress")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Move bases from the source reads onto an end of the destination reads
    Shift(ShiftArgs),
    /// Move bases from one end of each read to the other end of the same read
    Rotate(RotateArgs),
}

#[derive(Args)]
struct ShiftArgs {
    #[arg(short = 's', long, help = "FASTQ file to extract bases from")]
    source: PathBuf,

    #[arg(short = 'd', long, help = "FASTQ file to add bases to; omit to build a new file from the extracted bases")]
    destination: Option<PathBuf>,

    #[arg(short = 'o', long, help = "Output destination FASTQ file (.gz to compress, - for stdout); omit to write only --source-output")]
    output: Option<PathBuf>,

    #[arg(short = 'r', long, help = "Output source FASTQ file with the extracted bases removed")]
    source_output: Option<PathBuf>,

    #[arg(short = 'n', long, default_value_t = DEFAULT_SPLIT_OFFSET, allow_negative_numbers = true,
          help = "Bases to extract: positive takes the first N bases (5'), negative the last N (3')")]
    offset: i64,

    #[arg(short = 'e', long, default_value = "5", help = "Destination end to insert at: 5 or 3")]
    end: InsertionEnd,

    #[arg(short = 'p', long, default_value = "identifier", help = "Pair reads by 'identifier' or by 'position'")]
    pairing: PairingMode,

    #[arg(short = 'm', long, default_value = "merge",
          help = "'merge' into the destination reads, or 'replace' them with the extracted bases")]
    mode: DestinationMode,

    #[arg(short = 'c', long, default_value = "false", help = "Reverse complement the extracted bases")]
    reverse_complement: bool,
}

#[derive(Args)]
struct RotateArgs {
    #[arg(short = 'i', long, help = "Input FASTQ file")]
    input: PathBuf,

    #[arg(short = 'o', long, help = "Output FASTQ file (.gz to compress, - for stdout)")]
    output: PathBuf,

    #[arg(short = 'n', long, default_value_t = DEFAULT_SPLIT_OFFSET, allow_negative_numbers = true,
          help = "Bases to move: positive takes the first N bases (5'), negative the last N (3')")]
    offset: i64,

    #[arg(short = 'e', long, default_value = "5", help = "End to move the bases to: 5 or 3")]
    end: InsertionEnd,
}

fn open_input(path: &Path, label: &str) -> Result<FastqRecordReader<FastqLines>> {
    open_fastq(path, label).with_context(|| format!("Could not open {label} file {}", path.display()))
}

fn open_output(path: &Path) -> Result<FastqWriter> {
    create_writer(path).with_context(|| format!("Could not create output file {}", path.display()))
}

fn finish_output(writer: FastqWriter, path: &Path) -> Result<()> {
    writer.finish().with_context(|| format!("Error closing output file {}", path.display()))
}

fn run_shift(args: ShiftArgs) -> Result<()> {
    let config = Configuration {
        split_offset: args.offset,
        insertion_end: args.end,
        pairing_mode: args.pairing,
        destination_mode: args.mode,
        emit_reduced_source: args.source_output.is_some(),
        reverse_complement_moved: args.reverse_complement,
    };

    let mut pipeline = BaseShiftPipeline::new(config);
    pipeline.validate(
        args.destination.is_some(),
        args.output.is_some(),
        args.source_output.is_some(),
    )?;

    let source = open_input(&args.source, "source")?;
    let destination = args
        .destination
        .as_deref()
        .map(|p| open_input(p, "destination"))
        .transpose()?;

    let mut output = args.output.as_deref().map(open_output).transpose()?;
    let mut source_output = args.source_output.as_deref().map(open_output).transpose()?;

    let stats = pipeline
        .run(
            source,
            destination,
            output.as_mut().map(|w| w as &mut dyn Write),
            source_output.as_mut().map(|w| w as &mut dyn Write),
        )
        .context("Base shift failed")?;

    if let (Some(w), Some(p)) = (output, args.output.as_deref()) {
        finish_output(w, p)?;
    }
    if let (Some(w), Some(p)) = (source_output, args.source_output.as_deref()) {
        finish_output(w, p)?;
    }

    info!("Processing complete!");
    info!("Destination records: {}", stats.destination_records);
    info!("Skipped source records: {}", stats.skipped_source_records);
    info!("Output files:");
    if let Some(p) = &args.output {
        info!("  destination: {}", p.display());
    }
    if let Some(p) = &args.source_output {
        info!("  source: {}", p.display());
    }
    Ok(())
}

fn run_rotate(args: RotateArgs) -> Result<()> {
    let config = Configuration {
        split_offset: args.offset,
        insertion_end: args.end,
        ..Configuration::default()
    };
    let input = open_input(&args.input, "input")?;
    let mut output = open_output(&args.output)?;
    let written = rotate(input, &mut output, &config).context("Rotation failed")?;
    finish_output(output, &args.output)?;

    info!("Processing complete!");
    info!("Rotated records: {}", written);
    info!("Output file: {}", args.output.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Shift(args) => run_shift(args),
        Command::Rotate(args) => run_rotate(args),
    }
}
