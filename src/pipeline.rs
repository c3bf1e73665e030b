//! Driving a base shift run end to end.
//!
//! The pipeline pulls destination records (or source records when no
//! destination input exists), resolves the paired source record, moves the
//! split-off bases and qualities, and writes records strictly in input order.

use std::io::{self, Write};

use log::{debug, info};

use crate::config::{Configuration, DestinationMode, PairingMode};
use crate::error::{Result, ShiftError};
use crate::reader::FastqRecordReader;
use crate::record::FastqRecord;
use crate::sequence::{recombine, reverse, reverse_complement, split};
use crate::sync::StreamSynchronizer;

const PROGRESS_INTERVAL: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Streaming,
    Done,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftStats {
    /// Source/destination pairs processed
    pub pairs: u64,
    /// Records written to the destination sink
    pub destination_records: u64,
    /// Reduced source records written to the source sink
    pub source_records: u64,
    /// Source records passed over while matching by read id
    pub skipped_source_records: u64,
    /// Total bases moved out of source records
    pub bases_moved: u64,
}

/// Result of shifting bases for one source/destination pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftedPair {
    pub destination: FastqRecord,
    pub reduced_source: FastqRecord,
}

/// Splits `source` and builds the new destination record.
///
/// With no `destination`, identifier and separator lines are taken from
/// `source`. Bases and qualities are split at the same offset, so both
/// output records keep `sequence.len() == quality.len()` when the inputs do.
pub fn shift_pair(
    config: &Configuration,
    source: &FastqRecord,
    destination: Option<&FastqRecord>,
) -> ShiftedPair {
    let (kept_seq, moved_seq) = split(source.sequence(), config.split_offset);
    let (kept_qual, moved_qual) = split(source.quality(), config.split_offset);

    let (moved_seq, moved_qual) = if config.reverse_complement_moved {
        (reverse_complement(moved_seq), reverse(moved_qual))
    } else {
        (moved_seq.to_string(), moved_qual.to_string())
    };

    let template = destination.unwrap_or(source);
    let destination = match (config.destination_mode, destination) {
        (DestinationMode::MergeIntoExisting, Some(d)) => template.with_bases(
            recombine(d.sequence(), &moved_seq, config.insertion_end),
            recombine(d.quality(), &moved_qual, config.insertion_end),
        ),
        // merging into nothing leaves only the moved part
        (DestinationMode::MergeIntoExisting, None) | (DestinationMode::ReplaceWithMoved, _) => {
            template.with_bases(moved_seq, moved_qual)
        }
    };

    ShiftedPair {
        destination,
        reduced_source: source.with_bases(kept_seq.to_string(), kept_qual.to_string()),
    }
}

/// One configured base shift run. A pipeline runs once: `Init → Streaming → Done`.
pub struct BaseShiftPipeline {
    config: Configuration,
    state: PipelineState,
    stats: ShiftStats,
}

impl BaseShiftPipeline {
    pub fn new(config: Configuration) -> Self {
        BaseShiftPipeline {
            config,
            state: PipelineState::Init,
            stats: ShiftStats::default(),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Checks that the inputs and sinks a caller is about to supply fit the
    /// configuration. [`run`](Self::run) performs the same check, so callers
    /// only need this to reject a run before opening any output.
    pub fn validate(
        &self,
        has_destination: bool,
        has_destination_sink: bool,
        has_source_sink: bool,
    ) -> Result<()> {
        if self.state != PipelineState::Init {
            return Err(ShiftError::Configuration("pipeline has already been run".to_string()));
        }
        if !has_destination && self.config.destination_mode == DestinationMode::MergeIntoExisting {
            return Err(ShiftError::Configuration(
                "merging into existing reads needs a destination input".to_string(),
            ));
        }
        if !has_destination_sink && !has_source_sink {
            return Err(ShiftError::Configuration("no output sink given".to_string()));
        }
        match (self.config.emit_reduced_source, has_source_sink) {
            (true, false) => Err(ShiftError::Configuration(
                "reduced source output requested but no source sink given".to_string(),
            )),
            (false, true) => Err(ShiftError::Configuration(
                "source sink given but reduced source output is disabled".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Runs the shift, writing new destination records to `destination_sink`
    /// when one is given and, when `emit_reduced_source` is set, trimmed
    /// source records to `source_sink`.
    ///
    /// Both sinks are flushed before returning, on success and on error.
    pub fn run<I>(
        &mut self,
        source: FastqRecordReader<I>,
        destination: Option<FastqRecordReader<I>>,
        mut destination_sink: Option<&mut dyn Write>,
        mut source_sink: Option<&mut dyn Write>,
    ) -> Result<ShiftStats>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        self.validate(destination.is_some(), destination_sink.is_some(), source_sink.is_some())?;
        self.state = PipelineState::Streaming;
        debug!(
            "Shifting {} bases (offset {}) to {} end, {:?}, {:?}",
            self.config.split_offset.unsigned_abs(),
            self.config.split_offset,
            self.config.insertion_end,
            self.config.pairing_mode,
            self.config.destination_mode
        );

        let result = match (destination, self.config.pairing_mode) {
            (None, _) => self.run_single(source, &mut destination_sink, &mut source_sink),
            (Some(d), PairingMode::ByIdentifier) => {
                self.run_by_identifier(source, d, &mut destination_sink, &mut source_sink)
            }
            (Some(d), PairingMode::ByPosition) => {
                self.run_by_position(source, d, &mut destination_sink, &mut source_sink)
            }
        };

        let flushed = flush_sinks(destination_sink, source_sink);
        self.state = PipelineState::Done;
        result?;
        flushed?;

        info!(
            "Processed {} pairs: wrote {} destination records ({} bases moved), {} reduced source records, skipped {} source records",
            self.stats.pairs,
            self.stats.destination_records,
            self.stats.bases_moved,
            self.stats.source_records,
            self.stats.skipped_source_records
        );
        Ok(self.stats.clone())
    }

    fn run_by_identifier<I>(
        &mut self,
        source: FastqRecordReader<I>,
        destination: FastqRecordReader<I>,
        destination_sink: &mut Option<&mut dyn Write>,
        source_sink: &mut Option<&mut dyn Write>,
    ) -> Result<()>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let mut sync = StreamSynchronizer::new(source);
        for d in destination {
            let d = d?;
            let s = sync.advance_to_match(d.read_id());
            self.stats.skipped_source_records = sync.skipped();
            let s = s?;
            self.emit(&s, Some(&d), destination_sink, source_sink)?;
        }
        Ok(())
    }

    fn run_by_position<I>(
        &mut self,
        mut source: FastqRecordReader<I>,
        mut destination: FastqRecordReader<I>,
        destination_sink: &mut Option<&mut dyn Write>,
        source_sink: &mut Option<&mut dyn Write>,
    ) -> Result<()>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        // 任一输入结束即停止，source 的错误先于 destination 的结束上报
        loop {
            let s = match source.next() {
                None => break,
                Some(s) => s?,
            };
            let d = match destination.next() {
                None => break,
                Some(d) => d?,
            };
            self.emit(&s, Some(&d), destination_sink, source_sink)?;
        }
        Ok(())
    }

    fn run_single<I>(
        &mut self,
        source: FastqRecordReader<I>,
        destination_sink: &mut Option<&mut dyn Write>,
        source_sink: &mut Option<&mut dyn Write>,
    ) -> Result<()>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        for s in source {
            let s = s?;
            self.emit(&s, None, destination_sink, source_sink)?;
        }
        Ok(())
    }

    fn emit(
        &mut self,
        source: &FastqRecord,
        destination: Option<&FastqRecord>,
        destination_sink: &mut Option<&mut dyn Write>,
        source_sink: &mut Option<&mut dyn Write>,
    ) -> Result<()> {
        let shifted = shift_pair(&self.config, source, destination);
        self.stats.pairs += 1;
        self.stats.bases_moved += (source.sequence().len() - shifted.reduced_source.sequence().len()) as u64;

        if let Some(sink) = destination_sink.as_mut() {
            shifted.destination.write_to(sink)?;
            self.stats.destination_records += 1;
        }
        if let Some(sink) = source_sink.as_mut() {
            shifted.reduced_source.write_to(sink)?;
            self.stats.source_records += 1;
        }

        if self.stats.pairs % PROGRESS_INTERVAL == 0 {
            info!("Processed {} records...", self.stats.pairs);
        }
        Ok(())
    }
}

fn flush_sinks(
    destination_sink: Option<&mut dyn Write>,
    source_sink: Option<&mut dyn Write>,
) -> Result<()> {
    let first = destination_sink.map_or(Ok(()), |sink| sink.flush());
    let second = source_sink.map_or(Ok(()), |sink| sink.flush());
    first?;
    second?;
    Ok(())
}

/// Moves the split-off part of every read to the chosen end of the same read.
///
/// Read lengths are unchanged; `destination_mode`, `pairing_mode` and
/// `emit_reduced_source` do not apply. Returns the number of records written.
pub fn rotate<I>(reader: FastqRecordReader<I>, sink: &mut dyn Write, config: &Configuration) -> Result<u64>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut written = 0u64;
    let result = rotate_records(reader, sink, config, &mut written);
    let flushed = sink.flush();
    result?;
    flushed?;
    info!("Rotated {} records", written);
    Ok(written)
}

fn rotate_records<I>(
    reader: FastqRecordReader<I>,
    sink: &mut dyn Write,
    config: &Configuration,
    written: &mut u64,
) -> Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    for record in reader {
        let record = record?;
        let (kept_seq, moved_seq) = split(record.sequence(), config.split_offset);
        let (kept_qual, moved_qual) = split(record.quality(), config.split_offset);
        let rotated = record.with_bases(
            recombine(kept_seq, moved_seq, config.insertion_end),
            recombine(kept_qual, moved_qual, config.insertion_end),
        );
        rotated.write_to(sink)?;
        *written += 1;
        if *written % PROGRESS_INTERVAL == 0 {
            info!("Processed {} records...", written);
        }
    }
    Ok(())
}
