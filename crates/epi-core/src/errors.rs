//! Error taxonomy shared by every epistasis crate.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and offending values behind an [`EpiError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case identifier such as `fitness-length`.
    pub code: String,
    /// One-line description of the failure.
    pub message: String,
    /// Offending values keyed by name, e.g. `species` or `tag`.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// What the caller can change to succeed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload without context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records one offending value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " ({key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            f.write_str(")")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; {hint}"),
            None => Ok(()),
        }
    }
}

/// Failure of an epistasis operation.
///
/// Operations are pure, so the same input always fails the same way and no
/// partial result is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum EpiError {
    /// Lengths or letter counts that disagree with the requested geometry.
    #[error("shape: {0}")]
    Shape(ErrorInfo),
    /// Species, order, base, mask or label outside what is supported.
    #[error("domain: {0}")]
    Domain(ErrorInfo),
    /// Integer coefficients that cannot be halved exactly.
    #[error("arithmetic: {0}")]
    Arithmetic(ErrorInfo),
    /// Encoding, decoding and file access.
    #[error("serde: {0}")]
    Serde(ErrorInfo),
}

impl EpiError {
    /// Payload of any family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            Self::Shape(info) | Self::Domain(info) | Self::Arithmetic(info) | Self::Serde(info) => {
                info
            }
        }
    }

    /// Family name as serialized in the `family` field.
    pub fn family(&self) -> &'static str {
        match self {
            Self::Shape(_) => "Shape",
            Self::Domain(_) => "Domain",
            Self::Arithmetic(_) => "Arithmetic",
            Self::Serde(_) => "Serde",
        }
    }

    /// Shape error for a vector of the wrong length.
    pub fn length_mismatch(code: &str, what: &str, expected: usize, actual: usize) -> Self {
        Self::Shape(
            ErrorInfo::new(code, format!("{what} has length {actual}, expected {expected}"))
                .with_context("expected", expected.to_string())
                .with_context("actual", actual.to_string()),
        )
    }
}
