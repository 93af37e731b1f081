use std::io::Write;

use epi_core::{EpiError, ErrorInfo};

use crate::opts::UncertaintyMode;

/// Receiver for `(tag, result, error)` records.
pub trait RecordSink {
    /// Accepts one record.
    fn accept(&mut self, tag: &str, result: f64, error: f64) -> Result<(), EpiError>;
}

impl RecordSink for Vec<(String, f64, f64)> {
    fn accept(&mut self, tag: &str, result: f64, error: f64) -> Result<(), EpiError> {
        self.push((tag.to_string(), result, error));
        Ok(())
    }
}

fn write_error(err: impl ToString) -> EpiError {
    EpiError::Serde(ErrorInfo::new("sink-write", err.to_string()))
}

/// Whitespace separated `tag result error` lines.
#[derive(Debug)]
pub struct TextSink<W: Write> {
    out: W,
    precision: usize,
}

impl<W: Write> TextSink<W> {
    /// Writes values with `precision` decimals.
    pub fn new(out: W, precision: usize) -> Self {
        Self { out, precision }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for TextSink<W> {
    fn accept(&mut self, tag: &str, result: f64, error: f64) -> Result<(), EpiError> {
        let precision = self.precision;
        writeln!(self.out, "{tag} {result:.precision$} {error:.precision$}").map_err(write_error)
    }
}

/// CSV output with a header naming the columns for the propagation rule.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    /// Creates the sink and writes the header row.
    pub fn new(out: W, mode: UncertaintyMode) -> Result<Self, EpiError> {
        let mut writer = csv::Writer::from_writer(out);
        let header = match mode {
            UncertaintyMode::StandardError => ["tag", "result", "error"],
            UncertaintyMode::Interval => ["tag", "low", "high"],
        };
        writer.write_record(header).map_err(write_error)?;
        Ok(Self { writer })
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(self) -> Result<W, EpiError> {
        self.writer.into_inner().map_err(write_error)
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn accept(&mut self, tag: &str, result: f64, error: f64) -> Result<(), EpiError> {
        let (result, error) = (result.to_string(), error.to_string());
        self.writer
            .write_record([tag, result.as_str(), error.as_str()])
            .map_err(write_error)
    }
}
