//! Monte Carlo uncertainty analysis over the IPCC Tier 1 parameter table.
//!
//! Emission factors follow Beta-PERT distributions whose relative spread
//! comes from the IPCC reference intervals; the trophic alpha and the CH4
//! GWP are uniform over their tabulated 95% intervals. Surface area is
//! held fixed. Each iteration evaluates the cumulative Tier 1 model; the
//! per-gas sample sets are summarised and a capped slice of CO2-equivalent
//! samples is retained for charting.

use crate::climate::AggregatedZone;
use crate::emissions::factors;
use crate::emissions::gres::{self, GresParams};
use crate::emissions::trophic::TrophicStatus;
use crate::stats::SampleStats;
use rand::Rng;
use rand_distr::{Beta, Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "threading")]
use rayon::prelude::*;

/// Relative bounds of the IPCC reference intervals, expressed against the
/// table mode so they scale to any climate zone's factors.
/// CO2 reference: PERT(1.44, 1.46, 1.48).
const CO2_EF_REL: (f64, f64) = (1.44 / 1.46, 1.48 / 1.46);
/// CH4 ≤20 yr reference: PERT(121.5, 128, 133.4).
const CH4_LE20_REL: (f64, f64) = (121.5 / 128.0, 133.4 / 128.0);
/// CH4 >20 yr reference: PERT(74, 80.3, 86).
const CH4_GT20_REL: (f64, f64) = (74.0 / 80.3, 86.0 / 80.3);
/// Downstream flux ratio: PERT(0.05, 0.09, 0.22).
const FLUX_RATIO: (f64, f64, f64) = (0.05, 0.09, 0.22);
/// CH4 GWP: uniform(16.2, 38.2).
const GWP_CH4_RANGE: (f64, f64) = (16.2, 38.2);

/// Maximum number of raw CO2-equivalent samples kept for charting.
const RAW_SAMPLE_CAP: usize = 1000;

/// One draw of the full Beta-PERT sample.
pub fn beta_pert<R: Rng + ?Sized>(min: f64, mode: f64, max: f64, rng: &mut R) -> f64 {
    if max <= min {
        return mode;
    }
    let mean = (min + 4.0 * mode + max) / 6.0;
    let mode_norm = (mode - min) / (max - min);
    let mean_norm = (mean - min) / (max - min);

    let (a, b) = if (mode_norm - mean_norm).abs() < 1e-12 {
        // Symmetric case: mode at the centre degenerates the moment fit.
        (4.0, 4.0)
    } else {
        let a = (mean_norm * (2.0 * mode_norm - mean_norm)) / (mode_norm - mean_norm);
        let b = a * (1.0 - mean_norm) / mean_norm;
        (a.max(0.1), b.max(0.1))
    };

    match Beta::new(a, b) {
        Ok(dist) => min + dist.sample(rng) * (max - min),
        // Parameters are clamped positive and finite; unreachable in
        // practice, but degrade to the mode rather than panic.
        Err(_) => mode,
    }
}

/// Independent parameter draws shared by the uncertainty and sensitivity
/// engines. One entry per Monte Carlo iteration.
#[derive(Debug, Clone)]
pub struct ParameterDraws {
    pub co2_ef: Vec<f64>,
    pub ch4_ef_le20: Vec<f64>,
    pub ch4_ef_gt20: Vec<f64>,
    pub alpha: Vec<f64>,
    pub flux_ratio: Vec<f64>,
    pub gwp_ch4: Vec<f64>,
}

impl ParameterDraws {
    pub fn sample<R: Rng + ?Sized>(
        zone: AggregatedZone,
        trophic: TrophicStatus,
        iterations: usize,
        rng: &mut R,
    ) -> Self {
        let f = gres::zone_factors(zone);
        let (alpha_lo, alpha_hi) = trophic.alpha_interval();

        let mut draws = Self {
            co2_ef: Vec::with_capacity(iterations),
            ch4_ef_le20: Vec::with_capacity(iterations),
            ch4_ef_gt20: Vec::with_capacity(iterations),
            alpha: Vec::with_capacity(iterations),
            flux_ratio: Vec::with_capacity(iterations),
            gwp_ch4: Vec::with_capacity(iterations),
        };

        for _ in 0..iterations {
            draws.co2_ef.push(beta_pert(
                f.ef_co2_le20 * CO2_EF_REL.0,
                f.ef_co2_le20,
                f.ef_co2_le20 * CO2_EF_REL.1,
                rng,
            ));
            draws.ch4_ef_le20.push(beta_pert(
                f.ef_ch4_le20 * CH4_LE20_REL.0,
                f.ef_ch4_le20,
                f.ef_ch4_le20 * CH4_LE20_REL.1,
                rng,
            ));
            draws.ch4_ef_gt20.push(beta_pert(
                f.ef_ch4_gt20 * CH4_GT20_REL.0,
                f.ef_ch4_gt20,
                f.ef_ch4_gt20 * CH4_GT20_REL.1,
                rng,
            ));
            draws.alpha.push(rng.gen_range(alpha_lo..alpha_hi));
            draws
                .flux_ratio
                .push(beta_pert(FLUX_RATIO.0, FLUX_RATIO.1, FLUX_RATIO.2, rng));
            draws
                .gwp_ch4
                .push(rng.gen_range(GWP_CH4_RANGE.0..GWP_CH4_RANGE.1));
        }
        draws
    }

    pub fn len(&self) -> usize {
        self.co2_ef.len()
    }

    pub fn is_empty(&self) -> bool {
        self.co2_ef.is_empty()
    }

    /// Parameter vector for iteration `i`.
    pub fn params(&self, i: usize, area_ha: f64, age_yr: f64) -> GresParams {
        GresParams {
            area_ha,
            age_yr,
            ef_co2: self.co2_ef[i],
            ef_ch4_le20: self.ch4_ef_le20[i],
            ef_ch4_gt20: self.ch4_ef_gt20[i],
            alpha: self.alpha[i],
            flux_ratio: self.flux_ratio[i],
            gwp_ch4: self.gwp_ch4[i],
        }
    }
}

/// Statistics plus (optionally) the retained raw sample set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionStats {
    #[serde(flatten)]
    pub stats: SampleStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<Vec<f64>>,
}

/// Complete uncertainty output, serialised under the wire keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertaintySummary {
    #[serde(rename = "CH4")]
    pub ch4: SampleStats,
    #[serde(rename = "CO2")]
    pub co2: SampleStats,
    #[serde(rename = "N2O")]
    pub n2o: SampleStats,
    #[serde(rename = "CO2_equivalent")]
    pub co2_equivalent: DistributionStats,
}

/// Run the Monte Carlo uncertainty analysis.
///
/// `n2o_point` is the annual N2O point estimate in t/yr; it is outside the
/// IPCC PERT table and is sampled Normal with its ±60% band read as a 95%
/// interval. CO2-equivalent tracks the Tier 1 model (CO2 + CH4); N2O is
/// reported alongside but not folded in.
///
/// `iterations` must be ≥ 1 (validated upstream).
pub fn run<R: Rng + ?Sized>(
    zone: AggregatedZone,
    surface_area_km2: f64,
    reservoir_age: f64,
    trophic: TrophicStatus,
    n2o_point: f64,
    iterations: usize,
    rng: &mut R,
) -> UncertaintySummary {
    let area_ha = surface_area_km2 * 100.0;
    debug!(zone = zone.name_en(), iterations, "sampling emission model");
    let draws = ParameterDraws::sample(zone, trophic, iterations, rng);

    #[cfg(feature = "threading")]
    let results: Vec<gres::GresEmissions> = (0..iterations)
        .into_par_iter()
        .map(|i| gres::evaluate(&draws.params(i, area_ha, reservoir_age)))
        .collect();
    #[cfg(not(feature = "threading"))]
    let results: Vec<gres::GresEmissions> = (0..iterations)
        .map(|i| gres::evaluate(&draws.params(i, area_ha, reservoir_age)))
        .collect();

    let ch4: Vec<f64> = results.iter().map(|r| r.ch4_total).collect();
    let co2: Vec<f64> = results.iter().map(|r| r.co2).collect();
    let co2eq: Vec<f64> = results.iter().map(|r| r.co2_equivalent).collect();

    // N2O: normal around the point estimate, truncated at zero. Its ±band
    // is read as a 95% interval.
    let n2o_std = n2o_point * factors::uncertainty_fraction(factors::Gas::N2o) / 1.96;
    let n2o: Vec<f64> = match Normal::new(n2o_point, n2o_std.max(f64::MIN_POSITIVE)) {
        Ok(dist) => (0..iterations)
            .map(|_| dist.sample(rng).max(0.0))
            .collect(),
        Err(_) => vec![n2o_point; iterations],
    };

    // from_samples only fails on empty input; iterations ≥ 1 is validated
    // upstream, so fall back to zeroed stats rather than panic.
    let summarise = |v: &[f64]| SampleStats::from_samples(v).unwrap_or(ZERO_STATS);

    UncertaintySummary {
        ch4: summarise(&ch4),
        co2: summarise(&co2),
        n2o: summarise(&n2o),
        co2_equivalent: DistributionStats {
            stats: summarise(&co2eq),
            raw_data: Some(subsample(&co2eq, RAW_SAMPLE_CAP)),
        },
    }
}

const ZERO_STATS: SampleStats = SampleStats {
    mean: 0.0,
    std: 0.0,
    ci_lower: 0.0,
    ci_upper: 0.0,
    percentile_5: 0.0,
    percentile_25: 0.0,
    percentile_50: 0.0,
    percentile_75: 0.0,
    percentile_95: 0.0,
};

/// Order-preserving stride subsample down to at most `cap` entries.
fn subsample(samples: &[f64], cap: usize) -> Vec<f64> {
    if samples.len() <= cap {
        return samples.to_vec();
    }
    let stride = samples.len() as f64 / cap as f64;
    (0..cap)
        .map(|i| samples[(i as f64 * stride) as usize])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn beta_pert_stays_in_support() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..2000 {
            let x = beta_pert(10.0, 12.0, 20.0, &mut rng);
            assert!((10.0..=20.0).contains(&x), "sample {x} escaped [10, 20]");
        }
    }

    #[test]
    fn beta_pert_degenerate_interval_returns_mode() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(beta_pert(5.0, 5.0, 5.0, &mut rng), 5.0);
    }

    #[test]
    fn beta_pert_mean_near_pert_mean() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let sum: f64 = (0..n).map(|_| beta_pert(1.44, 1.46, 1.48, &mut rng)).sum();
        let mean = sum / n as f64;
        let pert_mean = (1.44 + 4.0 * 1.46 + 1.48) / 6.0;
        assert!((mean - pert_mean).abs() < 0.005, "mean {mean} vs {pert_mean}");
    }

    #[test]
    fn run_is_deterministic_under_a_seed() {
        let a = run(
            AggregatedZone::WarmTemperateHumid,
            10.0,
            50.0,
            TrophicStatus::Mesotrophic,
            0.4,
            500,
            &mut StdRng::seed_from_u64(42),
        );
        let b = run(
            AggregatedZone::WarmTemperateHumid,
            10.0,
            50.0,
            TrophicStatus::Mesotrophic,
            0.4,
            500,
            &mut StdRng::seed_from_u64(42),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn summary_invariants_hold() {
        let mut rng = StdRng::seed_from_u64(3);
        let s = run(
            AggregatedZone::TropicalHumid,
            25.0,
            30.0,
            TrophicStatus::Eutrophic,
            1.2,
            2000,
            &mut rng,
        );
        for stats in [&s.ch4, &s.co2, &s.n2o, &s.co2_equivalent.stats] {
            assert!(stats.ci_lower <= stats.percentile_50);
            assert!(stats.percentile_50 <= stats.ci_upper);
            assert!(stats.mean > 0.0);
        }
        // CO2-equivalent dominates its components.
        assert!(s.co2_equivalent.stats.mean > s.co2.mean);
        assert!(s.co2_equivalent.stats.mean > s.ch4.mean);
    }

    #[test]
    fn raw_data_is_capped_at_one_thousand() {
        let mut rng = StdRng::seed_from_u64(9);
        let s = run(
            AggregatedZone::Boreal,
            5.0,
            40.0,
            TrophicStatus::Oligotrophic,
            0.1,
            2500,
            &mut rng,
        );
        let raw = s.co2_equivalent.raw_data.as_ref().unwrap();
        assert_eq!(raw.len(), 1000);
    }

    #[test]
    fn subsample_preserves_order_and_short_inputs() {
        let v: Vec<f64> = (0..10).map(|i| i as f64).collect();
        assert_eq!(subsample(&v, 100), v);
        let long: Vec<f64> = (0..5000).map(|i| i as f64).collect();
        let sub = subsample(&long, 1000);
        assert_eq!(sub.len(), 1000);
        assert!(sub.windows(2).all(|w| w[0] < w[1]));
    }
}
