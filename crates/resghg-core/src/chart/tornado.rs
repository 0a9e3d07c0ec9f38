//! Tornado chart model for sensitivity rankings.

use crate::sensitivity::SensitivityEntry;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ChartError;

/// One horizontal bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TornadoBar {
    pub parameter: String,
    /// Bar length, |rank correlation| in [0, 1].
    pub magnitude: f64,
    /// True when the parameter drives emissions upward.
    pub positive: bool,
}

/// Drawable tornado description, widest bar first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TornadoModel {
    pub bars: Vec<TornadoBar>,
    /// Common x scale, `[0, widest magnitude]`.
    pub x_max: f64,
}

pub fn build(entries: &[SensitivityEntry]) -> Result<TornadoModel, ChartError> {
    if entries.is_empty() {
        warn!("tornado chart requested with no sensitivity entries");
        return Err(ChartError::EmptySamples);
    }

    let mut bars: Vec<TornadoBar> = entries
        .iter()
        .map(|e| TornadoBar {
            parameter: e.parameter.clone(),
            magnitude: e.rank_correlation.abs(),
            positive: e.rank_correlation >= 0.0,
        })
        .collect();
    bars.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));

    let x_max = bars.first().map(|b| b.magnitude).unwrap_or(0.0);
    Ok(TornadoModel { bars, x_max })
}
