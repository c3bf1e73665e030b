use std::io::{self, Write};

use crate::read_id;

/// One 4-line FASTQ record. Fields never hold the trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    identifier: String,
    sequence: String,
    separator: String,
    quality: String,
}

impl FastqRecord {
    pub fn new(identifier: String, sequence: String, separator: String, quality: String) -> Self {
        FastqRecord {
            identifier,
            sequence,
            separator,
            quality,
        }
    }

    /// The raw header line, including the leading `@`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn quality(&self) -> &str {
        &self.quality
    }

    /// Canonical read id used for pairing, see [`read_id::normalize`].
    pub fn read_id(&self) -> &str {
        read_id::normalize(&self.identifier)
    }

    /// Same identifier and separator lines with new bases and qualities.
    pub fn with_bases(&self, sequence: String, quality: String) -> Self {
        FastqRecord::new(self.identifier.clone(), sequence, self.separator.clone(), quality)
    }

    // 直接写入到 writer 的方法
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        for line in [&self.identifier, &self.sequence, &self.separator, &self.quality] {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}
