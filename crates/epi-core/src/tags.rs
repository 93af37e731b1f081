//! Tag codec shared by projections, circuits and interaction coordinates.
//!
//! A tag reads `label "_" context`. The context has one character per
//! species: a digit for a species held fixed in the background, or a letter
//! for a free species. Free species are lettered `A, B, C, …` in axis order;
//! coordinate tags lowercase the letters that the applied transform row does
//! not select.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{EpiError, ErrorInfo};

/// Label used for interaction coordinate tags.
pub const COORDINATE_LABEL: char = 'u';

/// Circuit labels whose all-zero background results coincide with standard
/// interaction coordinates.
const STANDARD_LABELS: [char; 4] = ['a', 'c', 'e', COORDINATE_LABEL];

/// Background assignment of a projection: fixed axis mapped to its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Context(BTreeMap<usize, usize>);

impl Context {
    /// Creates an empty context in which every axis is free.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builds a context from `(axis, value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        Self(pairs.into_iter().collect())
    }

    /// Fixes `axis` to `value`, replacing any previous assignment.
    pub fn fix(&mut self, axis: usize, value: usize) {
        self.0.insert(axis, value);
    }

    /// Returns the fixed value of `axis`, if any.
    pub fn value(&self, axis: usize) -> Option<usize> {
        self.0.get(&axis).copied()
    }

    /// Returns true when `axis` is held fixed.
    pub fn is_fixed(&self, axis: usize) -> bool {
        self.0.contains_key(&axis)
    }

    /// Number of fixed axes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no axis is fixed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(axis, value)` pairs in increasing axis order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(&axis, &value)| (axis, value))
    }

    /// Returns the free axes of a rank-`rank` tensor in increasing order.
    pub fn free_axes(&self, rank: usize) -> Vec<usize> {
        (0..rank).filter(|axis| !self.is_fixed(*axis)).collect()
    }
}

/// Formats a context as a tag fragment of width `rank`.
pub fn format_context(context: &Context, rank: usize) -> Result<String, EpiError> {
    if let Some((axis, _)) = context.iter().find(|(axis, _)| *axis >= rank) {
        return Err(EpiError::Domain(
            ErrorInfo::new("context-axis", "fixed axis lies outside the tensor rank")
                .with_context("axis", axis.to_string())
                .with_context("rank", rank.to_string()),
        ));
    }
    let free = rank.saturating_sub(context.len());
    if free > 26 {
        return Err(EpiError::Domain(
            ErrorInfo::new("too-many-free-axes", "free axes exceed the letter alphabet")
                .with_context("free", free.to_string()),
        ));
    }

    let mut out = String::with_capacity(rank);
    let mut letter = b'A';
    for axis in 0..rank {
        match context.value(axis) {
            Some(value) => {
                let digit = u32::try_from(value)
                    .ok()
                    .and_then(|v| char::from_digit(v, 10))
                    .ok_or_else(|| {
                        EpiError::Domain(
                            ErrorInfo::new("context-value", "fixed value is not a single digit")
                                .with_context("axis", axis.to_string())
                                .with_context("value", value.to_string()),
                        )
                    })?;
                out.push(digit);
            }
            None => {
                out.push(char::from(letter));
                letter += 1;
            }
        }
    }

    Ok(out)
}

/// Tag for circuit `letter` applied to the projection `context_tag`.
pub fn circuit_tag(letter: char, context_tag: &str) -> String {
    format!("{letter}_{context_tag}")
}

/// Returns true when `mask` has fewer than two set bits.
pub fn is_singleton_mask(mask: usize) -> bool {
    mask & mask.wrapping_sub(1) == 0
}

/// Re-cases the free letters of `context_tag` according to `mask`.
///
/// The first free letter follows the most significant of the `order` mask
/// bits. Singleton masks are accepted here; [`coordinate_tag`] rejects them.
pub fn modulate_context(mask: usize, order: usize, context_tag: &str) -> Result<String, EpiError> {
    let letters = context_tag.chars().filter(|c| c.is_ascii_alphabetic()).count();
    if letters != order {
        return Err(EpiError::Shape(
            ErrorInfo::new("tag-order-mismatch", "free letters do not match the order")
                .with_context("tag", context_tag)
                .with_context("order", order.to_string())
                .with_context("letters", letters.to_string()),
        ));
    }

    let mut bit = order;
    Ok(context_tag
        .chars()
        .map(|c| {
            if !c.is_ascii_alphabetic() {
                return c;
            }
            bit -= 1;
            if (mask >> bit) & 1 == 1 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect())
}

/// Tag for the interaction coordinate `mask` of the given order.
pub fn coordinate_tag(mask: usize, order: usize, context_tag: &str) -> Result<String, EpiError> {
    if is_singleton_mask(mask) || order >= usize::BITS as usize || mask >> order != 0 {
        return Err(EpiError::Domain(
            ErrorInfo::new("non-epistatic-mask", "mask does not select an interaction")
                .with_context("mask", mask.to_string())
                .with_context("order", order.to_string())
                .with_hint("masks need at least two set bits below the order"),
        ));
    }
    let context = modulate_context(mask, order, context_tag)?;
    Ok(format!("{COORDINATE_LABEL}_{context}"))
}

/// Returns true iff `tag` names a standard interaction coordinate.
///
/// Malformed tags are never standard.
pub fn is_standard(tag: &str) -> bool {
    tag.parse::<Tag>().map(|t| t.is_standard()).unwrap_or(false)
}

/// Parsed form of a result tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag {
    /// Circuit letter `a..t` or the coordinate label `u`.
    pub label: char,
    /// Context string, one character per species.
    pub context: String,
}

impl Tag {
    /// Number of species covered by the tag.
    pub fn width(&self) -> usize {
        self.context.len()
    }

    /// Number of free species in the tag.
    pub fn free_count(&self) -> usize {
        self.context.chars().filter(|c| c.is_ascii_alphabetic()).count()
    }

    /// Returns true for circuit tags.
    pub fn is_circuit(&self) -> bool {
        self.label != COORDINATE_LABEL
    }

    /// See [`is_standard`].
    pub fn is_standard(&self) -> bool {
        STANDARD_LABELS.contains(&self.label)
            && self
                .context
                .chars()
                .all(|c| c == '0' || c.is_ascii_uppercase())
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.label, self.context)
    }
}

impl FromStr for Tag {
    type Err = EpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| {
            EpiError::Domain(ErrorInfo::new("malformed-tag", reason).with_context("tag", s))
        };
        let (label, context) = s.split_once('_').ok_or_else(|| malformed("missing separator"))?;
        let mut chars = label.chars();
        let label = match (chars.next(), chars.next()) {
            (Some(c), None) if ('a'..='t').contains(&c) || c == COORDINATE_LABEL => c,
            _ => return Err(malformed("label must be a single letter in a..t or u")),
        };
        if context.is_empty() {
            return Err(malformed("empty context"));
        }
        if !context.chars().all(|c| c.is_ascii_digit() || c.is_ascii_alphabetic()) {
            return Err(malformed("context holds characters other than digits and letters"));
        }
        Ok(Tag {
            label,
            context: context.to_string(),
        })
    }
}
