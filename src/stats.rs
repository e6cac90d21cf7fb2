//! Histogram-style summary attributes carried by containers.

use serde::{Deserialize, Serialize};

/// Summary statistics attached to a histogram-like assembly.
///
/// `Assembly::clone2d` copies these verbatim onto the resulting group so
/// downstream code can keep reading them off the 2D copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HistogramSummary {
    /// Total number of entries binned.
    pub entries: u64,
    /// Per-bin frequencies.
    pub frequencies: Vec<f64>,
    /// Per-bin errors.
    pub errors: Vec<f64>,
    /// Bin edges (one more than the bin count).
    pub edges: Vec<f64>,
    /// Bin centers.
    pub centers: Vec<f64>,
    /// Sample mean.
    pub mean: f64,
    /// Sample mode.
    pub mode: f64,
    /// Sample standard deviation.
    pub std: f64,
}
