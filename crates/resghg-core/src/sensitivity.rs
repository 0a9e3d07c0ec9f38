//! Global sensitivity analysis by correlation screening.
//!
//! Re-draws the same parameter distributions as the uncertainty engine,
//! evaluates the Tier 1 model, and correlates each input against the
//! CO2-equivalent output. Spearman rank correlation drives the ranking;
//! Pearson is reported alongside for reference.

use crate::climate::AggregatedZone;
use crate::emissions::gres;
use crate::emissions::trophic::TrophicStatus;
use crate::stats::{pearson, spearman};
use crate::uncertainty::ParameterDraws;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One ranked parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityEntry {
    pub parameter: String,
    pub correlation: f64,
    pub rank_correlation: f64,
}

/// Run the sensitivity screen. Entries come back sorted by descending
/// |rank_correlation|.
pub fn run<R: Rng + ?Sized>(
    zone: AggregatedZone,
    surface_area_km2: f64,
    reservoir_age: f64,
    trophic: TrophicStatus,
    iterations: usize,
    rng: &mut R,
) -> Vec<SensitivityEntry> {
    let area_ha = surface_area_km2 * 100.0;
    let draws = ParameterDraws::sample(zone, trophic, iterations, rng);

    let output: Vec<f64> = (0..draws.len())
        .map(|i| gres::evaluate(&draws.params(i, area_ha, reservoir_age)).co2_equivalent)
        .collect();

    let inputs: [(&str, &[f64]); 6] = [
        ("CO2 Emission Factor", &draws.co2_ef),
        ("CH4 Emission Factor (≤20yr)", &draws.ch4_ef_le20),
        ("CH4 Emission Factor (>20yr)", &draws.ch4_ef_gt20),
        ("Trophic Alpha", &draws.alpha),
        ("Downstream Flux Ratio", &draws.flux_ratio),
        ("GWP CH4", &draws.gwp_ch4),
    ];

    let mut entries: Vec<SensitivityEntry> = inputs
        .iter()
        .map(|(name, values)| SensitivityEntry {
            parameter: (*name).to_string(),
            correlation: pearson(values, &output),
            rank_correlation: spearman(values, &output),
        })
        .collect();

    entries.sort_by(|a, b| {
        b.rank_correlation
            .abs()
            .total_cmp(&a.rank_correlation.abs())
    });
    entries
}
