use std::error::Error;
use std::fs;
use std::path::Path;

use epi_core::{species_from_len, to_canonical_order, EpiError, ErrorInfo};
use serde::Deserialize;

/// A measured landscape as read from disk.
///
/// `errors` holds standard errors, or upper fitness bounds when the
/// computation runs in interval mode. A missing column reads as zeros.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Landscape {
    pub fitness: Vec<f64>,
    #[serde(default)]
    pub errors: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    fitness: f64,
    error: f64,
}

impl Landscape {
    /// Reads a `.csv` file with a `fitness,error` header, or JSON otherwise.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let landscape = if is_csv {
            read_csv(path)?
        } else {
            serde_json::from_str(&fs::read_to_string(path)?)?
        };
        Ok(landscape.filled()?)
    }

    /// Species count, inferred from the length and checked against `declared`.
    pub fn species(&self, declared: Option<usize>) -> Result<usize, EpiError> {
        let inferred = species_from_len(self.fitness.len())?;
        match declared {
            Some(species) if species != inferred => Err(EpiError::Shape(
                ErrorInfo::new("input-species", "declared species disagree with the input length")
                    .with_context("declared", species.to_string())
                    .with_context("len", self.fitness.len().to_string()),
            )),
            _ => Ok(inferred),
        }
    }

    /// Moves rows from the five-species experimental order into index order.
    pub fn into_canonical_order(self) -> Result<Self, EpiError> {
        Ok(Self {
            fitness: to_canonical_order(&self.fitness)?,
            errors: to_canonical_order(&self.errors)?,
        })
    }

    fn filled(mut self) -> Result<Self, EpiError> {
        if self.errors.is_empty() {
            self.errors = vec![0.0; self.fitness.len()];
        }
        if self.errors.len() != self.fitness.len() {
            return Err(EpiError::length_mismatch(
                "input-columns",
                "error column",
                self.fitness.len(),
                self.errors.len(),
            ));
        }
        Ok(self)
    }
}

fn read_csv(path: &Path) -> Result<Landscape, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut landscape = Landscape {
        fitness: Vec::new(),
        errors: Vec::new(),
    };
    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        landscape.fitness.push(row.fitness);
        landscape.errors.push(row.error);
    }
    Ok(landscape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn json_without_errors_reads_zeros() {
        let file = write_temp(".json", r#"{"fitness": [1, 2, 3, 4, 5, 6, 7, 8]}"#);
        let landscape = Landscape::load(file.path()).unwrap();
        assert_eq!(landscape.errors, vec![0.0; 8]);
        assert_eq!(landscape.species(None).unwrap(), 3);
    }

    #[test]
    fn csv_columns_are_read_in_order() {
        let file = write_temp(".csv", "fitness,error\n1.5,0.1\n2.5,0.2\n");
        let landscape = Landscape::load(file.path()).unwrap();
        assert_eq!(landscape.fitness, vec![1.5, 2.5]);
        assert_eq!(landscape.errors, vec![0.1, 0.2]);
        assert_eq!(landscape.species(Some(1)).unwrap(), 1);
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let file = write_temp(".json", r#"{"fitness": [1, 2], "errors": [0.1]}"#);
        assert!(Landscape::load(file.path()).is_err());
    }

    #[test]
    fn species_must_match_length() {
        let landscape = Landscape {
            fitness: vec![0.0; 8],
            errors: vec![0.0; 8],
        };
        assert!(matches!(landscape.species(Some(4)), Err(EpiError::Shape(_))));
        let odd = Landscape {
            fitness: vec![0.0; 6],
            errors: vec![0.0; 6],
        };
        assert!(odd.species(None).is_err());
    }

    #[test]
    fn experimental_order_needs_five_species() {
        let landscape = Landscape {
            fitness: (0..32).map(f64::from).collect(),
            errors: vec![0.0; 32],
        };
        let canonical = landscape.clone().into_canonical_order().unwrap();
        assert_eq!(canonical.fitness.len(), 32);
        assert_ne!(canonical.fitness, landscape.fitness);

        let short = Landscape {
            fitness: vec![0.0; 8],
            errors: vec![0.0; 8],
        };
        assert!(short.into_canonical_order().is_err());
    }
}
