use epi_core::{is_standard, EpiError, ErrorInfo};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::opts::UncertaintyMode;
use crate::sink::RecordSink;

/// Parallel results, errors and tags for one stage of a computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultBlock {
    /// Epistasis estimates, or low endpoints in interval mode.
    pub results: Vec<f64>,
    /// Standard errors, or high endpoints in interval mode.
    pub errors: Vec<f64>,
    /// Calculation tags.
    pub tags: Vec<String>,
}

impl ResultBlock {
    /// Number of calculations in the block.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true when the block holds no calculation.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// One calculation as handed to a display sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record<'a> {
    /// Calculation tag.
    pub tag: &'a str,
    /// Estimate or low endpoint.
    pub result: f64,
    /// Standard error or high endpoint.
    pub error: f64,
}

/// Complete output of an epistasis computation.
///
/// `results`, `errors` and `tags` always have equal length: circuit results
/// first, then interaction coordinates by increasing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpistasisReport {
    /// Number of species in the analysed landscape.
    pub species: usize,
    /// Propagation rule used for the second column.
    pub mode: UncertaintyMode,
    /// Epistasis estimates, or low endpoints in interval mode.
    pub results: Vec<f64>,
    /// Standard errors, or high endpoints in interval mode.
    pub errors: Vec<f64>,
    /// Calculation tags.
    pub tags: Vec<String>,
}

impl EpistasisReport {
    /// Creates an empty report.
    pub fn new(species: usize, mode: UncertaintyMode) -> Self {
        Self {
            species,
            mode,
            results: Vec::new(),
            errors: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Appends a block after every calculation already present.
    pub fn append(&mut self, block: ResultBlock) -> Result<(), EpiError> {
        if block.results.len() != block.tags.len() || block.errors.len() != block.tags.len() {
            return Err(EpiError::Shape(
                ErrorInfo::new("block-columns", "result block columns differ in length")
                    .with_context("results", block.results.len().to_string())
                    .with_context("errors", block.errors.len().to_string())
                    .with_context("tags", block.tags.len().to_string()),
            ));
        }
        self.results.extend(block.results);
        self.errors.extend(block.errors);
        self.tags.extend(block.tags);
        Ok(())
    }

    /// Number of calculations.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true when the report holds no calculation.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterates over calculations in computation order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        self.tags
            .iter()
            .zip(self.results.iter().zip(self.errors.iter()))
            .map(|(tag, (&result, &error))| Record {
                tag: tag.as_str(),
                result,
                error,
            })
    }

    /// Calculations whose tag names a standard interaction coordinate.
    pub fn standard_records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        self.records().filter(|record| is_standard(record.tag))
    }

    /// Copy of the report keeping only standard calculations.
    pub fn standard_subset(&self) -> EpistasisReport {
        let mut subset = EpistasisReport::new(self.species, self.mode);
        for record in self.standard_records() {
            subset.results.push(record.result);
            subset.errors.push(record.error);
            subset.tags.push(record.tag.to_string());
        }
        subset
    }

    /// Looks up a calculation by tag.
    pub fn get(&self, tag: &str) -> Option<Record<'_>> {
        self.records().find(|record| record.tag == tag)
    }

    /// Feeds every record to `sink` in computation order.
    pub fn emit(&self, sink: &mut dyn RecordSink) -> Result<(), EpiError> {
        for record in self.records() {
            sink.accept(record.tag, record.result, record.error)?;
        }
        Ok(())
    }

    /// Hex SHA-256 of the canonical JSON encoding.
    pub fn digest(&self) -> Result<String, EpiError> {
        let bytes = serde_json::to_vec(self)
            .map_err(|err| EpiError::Serde(ErrorInfo::new("report-hash", err.to_string())))?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}
