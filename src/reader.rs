//! Line-oriented record reader for Ising instance files.
//!
//! Each line is classified by its first character and split on whitespace;
//! field-count and integer checks are left to the builder.

use std::io::{self, BufRead};

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// `c`/`C` line, content ignored.
    Comment,
    /// `p`/`P` line with all whitespace-separated fields, marker included.
    Header(Vec<String>),
    /// Anything else.
    Data(Vec<String>),
}

impl Record {
    /// Classify a single raw line.
    pub fn classify(line: &str) -> Self {
        let fields = || line.split_whitespace().map(str::to_owned).collect();
        match line.chars().next() {
            Some('c') | Some('C') => Record::Comment,
            Some('p') | Some('P') => Record::Header(fields()),
            _ => Record::Data(fields()),
        }
    }
}

/// Iterator over `(line_number, Record)` pairs from any buffered source.
///
/// Line numbers are 1-based. An I/O error is yielded once and ends the
/// stream.
pub struct RecordReader<R> {
    source: R,
    line_no: usize,
    buf: String,
    failed: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(source: R) -> Self {
        Self { source, line_no: 0, buf: String::new(), failed: false }
    }

    /// Number of lines read so far.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = io::Result<(usize, Record)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.buf.clear();
        match self.source.read_line(&mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_no += 1;
                let line = self.buf.trim_end_matches(['\n', '\r']);
                Some(Ok((self.line_no, Record::classify(line))))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
