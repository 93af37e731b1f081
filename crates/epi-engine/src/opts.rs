use serde::{Deserialize, Serialize};

/// How the second input array and the second output array are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UncertaintyMode {
    /// Inputs are estimates and standard errors; errors add in quadrature.
    #[default]
    StandardError,
    /// Inputs are low and high fitness endpoints; outputs are low and high
    /// epistasis endpoints.
    Interval,
}

/// Options controlling an epistasis computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeOpts {
    /// Uncertainty propagation rule.
    pub mode: UncertaintyMode,
    /// Drop circuit results that repeat an earlier circuit calculation.
    pub deduplicate: bool,
    /// Apply matrices to the projections of one order on the rayon pool.
    pub parallel: bool,
}

impl Default for ComputeOpts {
    fn default() -> Self {
        Self {
            mode: UncertaintyMode::StandardError,
            deduplicate: true,
            parallel: false,
        }
    }
}

impl ComputeOpts {
    /// Default options with interval arithmetic.
    pub fn interval() -> Self {
        Self {
            mode: UncertaintyMode::Interval,
            ..Self::default()
        }
    }
}
