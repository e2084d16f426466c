//! Build an [`IsingTree`] from instance records.
//!
//! Malformed records never abort a build: they are logged, counted as
//! skipped and leave the model untouched. A read failure stops reading but
//! keeps whatever was already consumed.

use crate::errors::RecordError;
use crate::model::{Edge, IsingTree};
use crate::reader::{Record, RecordReader};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Bookkeeping returned alongside the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveSummary {
    pub skipped_records: usize,
    pub lines_read: usize,
    /// I/O failure message, `None` when the source was read to the end.
    pub error: Option<String>,
}

impl SolveSummary {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Default)]
pub struct ModelBuilder {
    tree: IsingTree,
    skipped: usize,
    lines_read: usize,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from in-memory lines.
    pub fn build<I, S>(lines: I) -> (IsingTree, SolveSummary)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::new();
        for line in lines {
            builder.lines_read += 1;
            builder.consume(builder.lines_read, Record::classify(line.as_ref()));
        }
        builder.finish(None)
    }

    /// Build from any buffered source.
    pub fn build_from_reader<R: BufRead>(source: R) -> (IsingTree, SolveSummary) {
        let mut builder = Self::new();
        let mut reader = RecordReader::new(source);
        let mut error = None;
        for item in reader.by_ref() {
            match item {
                Ok((line_no, record)) => builder.consume(line_no, record),
                Err(e) => {
                    warn!("IO error: {}", e);
                    warn!("load failed; the model holds only the records read before the error");
                    error = Some(e.to_string());
                    break;
                }
            }
        }
        builder.lines_read = reader.lines_read();
        builder.finish(error)
    }

    /// Build from an instance file. Failure to open is reported in the summary.
    pub fn build_from_path<P: AsRef<Path>>(path: P) -> (IsingTree, SolveSummary) {
        let path = path.as_ref();
        match File::open(path) {
            Ok(f) => Self::build_from_reader(BufReader::new(f)),
            Err(e) => {
                warn!("cannot open {}: {}", path.display(), e);
                Self::new().finish(Some(e.to_string()))
            }
        }
    }

    fn consume(&mut self, line_no: usize, record: Record) {
        let outcome = match record {
            Record::Comment => {
                self.skipped += 1;
                debug!("skipping, comment on line: {}", line_no);
                return;
            }
            Record::Header(fields) => {
                debug!("processing problem header on line: {}", line_no);
                self.parse_header(&fields)
            }
            Record::Data(fields) => self.parse_data(&fields),
        };
        if let Err(e) = outcome {
            self.skipped += 1;
            warn!("skipping line {}: {}", line_no, e);
        }
    }

    fn parse_header(&mut self, fields: &[String]) -> Result<(), RecordError> {
        let [_, name, spins, weights] = fields else {
            return Err(RecordError::HeaderFieldCount(fields.len()));
        };
        let spins = parse_count(spins)?;
        let weights = parse_count(weights)?;
        debug!("header: name={} spins={} weights={}", name, spins, weights);
        self.tree.reset(name.clone(), spins, weights);
        Ok(())
    }

    fn parse_data(&mut self, fields: &[String]) -> Result<(), RecordError> {
        let [a, b, w] = fields else {
            return Err(RecordError::DataFieldCount(fields.len()));
        };
        let a = parse_int(a)?;
        let b = parse_int(b)?;
        let weight = parse_weight(w)?;
        if a == b {
            let spins = self.tree.n();
            let node = node_id(a)
                .filter(|&id| id < spins)
                .ok_or(RecordError::NodeOutOfRange { node: a, spins })?;
            self.tree.set_field_weight(node, weight);
        } else {
            // Endpoints are checked against the final spin count in `finalize`.
            let (Some(a_id), Some(b_id)) = (node_id(a), node_id(b)) else {
                return Err(RecordError::NodeOutOfRange { node: a.min(b), spins: self.tree.n() });
            };
            self.tree.push_edge(Edge { a: a_id, b: b_id, weight });
        }
        Ok(())
    }

    fn finish(mut self, error: Option<String>) -> (IsingTree, SolveSummary) {
        self.tree.finalize();
        let summary = SolveSummary {
            skipped_records: self.skipped,
            lines_read: self.lines_read,
            error,
        };
        (self.tree, summary)
    }
}

fn parse_int(field: &str) -> Result<i64, RecordError> {
    field.parse().map_err(|_| RecordError::NotAnInteger(field.to_owned()))
}

fn parse_weight(field: &str) -> Result<i64, RecordError> {
    let raw = parse_int(field)?;
    i32::try_from(raw)
        .map(i64::from)
        .map_err(|_| RecordError::WeightOutOfRange(raw))
}

fn node_id(raw: i64) -> Option<usize> {
    usize::try_from(raw).ok()
}

fn parse_count(field: &str) -> Result<usize, RecordError> {
    field.parse().map_err(|_| RecordError::NotAnInteger(field.to_owned()))
}
