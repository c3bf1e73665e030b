//! 在成对 FASTQ 文件之间移动碱基
//!
//! Moves a run of bases (and their qualities) from the 5' or 3' end of one
//! read onto an end of its mate, keeping every other line of the destination
//! file unchanged.
//!
//! ```
//! use fastq_base_shift::{BaseShiftPipeline, Configuration, FastqRecordReader};
//!
//! let source = FastqRecordReader::from_bufread(&b"@r1/1\nACGTACGT\n+\nIIIIIIII\n"[..], "source");
//! let destination = FastqRecordReader::from_bufread(&b"@r1/2\nTTTT\n+\nJJJJ\n"[..], "destination");
//! let config = Configuration { split_offset: -4, ..Configuration::default() };
//!
//! let mut out: Vec<u8> = Vec::new();
//! BaseShiftPipeline::new(config).run(source, Some(destination), Some(&mut out), None).unwrap();
//! assert_eq!(out, b"@r1/2\nACGTTTTT\n+\nIIIIJJJJ\n");
//! ```

pub mod config;
pub mod error;
pub mod files;
pub mod pipeline;
pub mod read_id;
pub mod reader;
pub mod record;
pub mod sequence;
pub mod sync;

pub use config::{Configuration, DestinationMode, InsertionEnd, PairingMode};
pub use error::{Result, ShiftError};
pub use pipeline::{rotate, shift_pair, BaseShiftPipeline, PipelineState, ShiftStats};
pub use reader::FastqRecordReader;
pub use record::FastqRecord;
pub use sync::StreamSynchronizer;
