#![deny(missing_docs)]
#![doc = "Decomposition of binary fitness landscapes into circuit and interaction coordinate \
epistasis, with standard-error or interval propagation."]

/// Detection of repeated circuit calculations.
pub mod duplicates;
/// Top-level computation stages.
pub mod engine;
/// Options and propagation modes.
pub mod opts;
/// Matrix application with uncertainty propagation.
pub mod propagate;
/// Result containers.
pub mod report;
/// JSON helpers for reports.
#[path = "serde.rs"]
pub mod serde_io;
/// Display sinks for `(tag, result, error)` records.
pub mod sink;

pub use duplicates::{derive_duplicates, duplicate_groups, duplicate_set, CIRCUIT_ORDER};
pub use engine::{compute, compute_circuits, compute_coordinates, compute_epistasis};
pub use opts::{ComputeOpts, UncertaintyMode};
pub use propagate::{apply_kernel, Kernel};
pub use report::{EpistasisReport, Record, ResultBlock};
pub use sink::{CsvSink, RecordSink, TextSink};
