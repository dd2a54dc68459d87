use crate::error::{HandsignError, Result};
use crate::source::PoseSource;
use crate::source::frame::PoseFrame;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Reads `PoseFrame`s from newline-delimited JSON.
pub struct JsonLinesSource<R> {
    reader: R,
    line: u64,
    buf: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> u64 {
        self.line
    }
}

impl JsonLinesSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl JsonLinesSource<BufReader<io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: BufRead + Send> PoseSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Result<Option<PoseFrame>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }
            return serde_json::from_str(text)
                .map(Some)
                .map_err(|e| HandsignError::PoseFormat {
                    line: self.line,
                    message: e.to_string(),
                });
        }
    }

    fn is_finite(&self) -> bool {
        true
    }
}
