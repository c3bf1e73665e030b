//! Realigning a superset record stream to a subset stream by read id.

use std::io;

use log::debug;

use crate::error::{Result, ShiftError};
use crate::reader::FastqRecordReader;
use crate::record::FastqRecord;

/// Walks a superset stream forward to the record matching each requested id.
///
/// Requested ids must appear in the superset in the same relative order; the
/// synchronizer never rewinds, so an out-of-order id consumes the rest of the
/// stream and fails with [`ShiftError::StreamExhausted`].
pub struct StreamSynchronizer<I> {
    superset: FastqRecordReader<I>,
    skipped: u64,
}

impl<I> StreamSynchronizer<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(superset: FastqRecordReader<I>) -> Self {
        StreamSynchronizer { superset, skipped: 0 }
    }

    /// Superset records passed over without a match so far.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Returns the next superset record whose normalized id equals `target_id`.
    pub fn advance_to_match(&mut self, target_id: &str) -> Result<FastqRecord> {
        for record in self.superset.by_ref() {
            let record = record?;
            if record.read_id() == target_id {
                return Ok(record);
            }
            self.skipped += 1;
        }
        debug!(
            "{} stream ended after {} records without '{}'",
            self.superset.label(),
            self.superset.records_read(),
            target_id
        );
        Err(ShiftError::StreamExhausted {
            stream: self.superset.label().to_string(),
            read_id: target_id.to_string(),
        })
    }
}
