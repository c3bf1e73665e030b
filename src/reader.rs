//! Lazy 4-line FASTQ record reader over a line source.

use std::io::{self, BufRead};

use crate::error::{Result, ShiftError};
use crate::record::FastqRecord;

/// Yields one [`FastqRecord`] per 4 lines pulled from `lines`.
///
/// The reader is fused: once the source is exhausted or an error has been
/// returned, every later call to `next` returns `None`.
pub struct FastqRecordReader<I> {
    lines: I,
    label: String,
    records_read: u64,
    done: bool,
}

impl<R: BufRead> FastqRecordReader<io::Lines<R>> {
    /// Reads records from a buffered reader, one line per `read_line`.
    pub fn from_bufread(reader: R, label: impl Into<String>) -> Self {
        Self::new(reader.lines(), label)
    }
}

impl<I> FastqRecordReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    /// `label` names the stream in error messages ("source", "destination", ...).
    pub fn new(lines: I, label: impl Into<String>) -> Self {
        FastqRecordReader {
            lines,
            label: label.into(),
            records_read: 0,
            done: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of complete records produced so far.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    fn read_record(&mut self) -> Result<Option<FastqRecord>> {
        let mut group: [String; 4] = Default::default();
        for (i, slot) in group.iter_mut().enumerate() {
            match self.lines.next() {
                Some(line) => *slot = line?,
                None if i == 0 => return Ok(None),
                None => {
                    return Err(ShiftError::MalformedRecord {
                        stream: self.label.clone(),
                        record: self.records_read + 1,
                        lines: i,
                    })
                }
            }
        }
        let [identifier, sequence, separator, quality] = group;
        self.records_read += 1;
        Ok(Some(FastqRecord::new(
            trim_line_end(identifier),
            sequence.trim_end().to_string(),
            trim_line_end(separator),
            quality.trim_end().to_string(),
        )))
    }
}

fn trim_line_end(mut line: String) -> String {
    while line.ends_with(['\r', '\n']) {
        line.pop();
    }
    line
}

impl<I> Iterator for FastqRecordReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(text: &'static str) -> FastqRecordReader<io::Lines<&'static [u8]>> {
        FastqRecordReader::from_bufread(text.as_bytes(), "test")
    }

    #[test]
    fn reads_records_in_order() {
        let mut rdr = reader("@a\nAC\n+\nII\n@b extra\nGT\n+b\nJJ\n");
        let a = rdr.next().unwrap().unwrap();
        assert_eq!(a.identifier(), "@a");
        let b = rdr.next().unwrap().unwrap();
        assert_eq!(b.identifier(), "@b extra");
        assert_eq!(b.separator(), "+b");
        assert_eq!(b.quality(), "JJ");
        assert!(rdr.next().is_none());
        assert_eq!(rdr.records_read(), 2);
    }

    #[test]
    fn strips_carriage_returns() {
        let mut rdr = reader("@a\r\nAC\r\n+\r\nII\r\n");
        let a = rdr.next().unwrap().unwrap();
        assert_eq!(a.identifier(), "@a");
        assert_eq!(a.sequence(), "AC");
        assert_eq!(a.separator(), "+");
        assert_eq!(a.quality(), "II");
    }

    #[test]
    fn empty_input_has_no_records() {
        assert!(reader("").next().is_none());
    }

    #[test]
    fn truncated_record_is_malformed() {
        let mut rdr = reader("@a\nAC\n+\nII\n@b\nGT\n");
        assert!(rdr.next().unwrap().is_ok());
        match rdr.next() {
            Some(Err(ShiftError::MalformedRecord { stream, record, lines })) => {
                assert_eq!(stream, "test");
                assert_eq!(record, 2);
                assert_eq!(lines, 2);
            }
            other => panic!("expected malformed record, got {other:?}"),
        }
        assert!(rdr.next().is_none());
    }

    #[test]
    fn io_error_is_propagated() {
        let lines = vec![
            Ok("@a".to_string()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8")),
        ];
        let mut rdr = FastqRecordReader::new(lines.into_iter(), "test");
        assert!(matches!(rdr.next(), Some(Err(ShiftError::Io(_)))));
        assert!(rdr.next().is_none());
    }
}
