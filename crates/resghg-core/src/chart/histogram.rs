//! Density histogram model for Monte Carlo sample sets.
//!
//! Bins a sample array into a density histogram (unit integral), overlays
//! a fitted normal curve sampled independently of the binning, and places
//! mean and confidence-interval reference markers. Both vertical maxima
//! are considered for the y-range so neither bars nor curve clip.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ChartError;

/// Points used to trace the Gaussian overlay across the data range.
const CURVE_RESOLUTION: usize = 240;

/// Bin-count clamp.
const MIN_BINS: usize = 30;
const MAX_BINS: usize = 80;

/// One histogram bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Bin centre on the x axis.
    pub center: f64,
    /// Probability density (counts normalised by N × bin width).
    pub density: f64,
}

/// A point of the fitted normal curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// Drawable histogram description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramModel {
    pub bins: Vec<Bin>,
    pub bin_width: f64,
    /// Fitted normal overlay; empty when std is zero.
    pub curve: Vec<CurvePoint>,
    /// Vertical reference line at the sample mean.
    pub mean_line: f64,
    /// Confidence-interval band `[ci_lower, ci_upper]`, drawn as two
    /// vertical lines plus a shaded rectangle over the full height.
    pub ci_lower: f64,
    pub ci_upper: f64,
    /// Linear x range, `[data_min, data_max]`.
    pub x_range: (f64, f64),
    /// Linear y range, `[0, max(bar peak, curve peak)]`.
    pub y_range: (f64, f64),
}

/// Number of bins for `n` samples: `round(sqrt(n) · 1.5)` clamped to
/// [30, 80].
pub fn bin_count(n: usize) -> usize {
    ((n as f64).sqrt() * 1.5).round().clamp(MIN_BINS as f64, MAX_BINS as f64) as usize
}

/// Build the histogram model.
///
/// Errors on an empty sample set (spec'd reportable condition). A
/// degenerate set where every sample is equal produces a single full-mass
/// bin and no overlay curve.
pub fn build(
    samples: &[f64],
    mean: f64,
    std: f64,
    ci_lower: f64,
    ci_upper: f64,
) -> Result<HistogramModel, ChartError> {
    if samples.is_empty() {
        warn!("histogram requested for empty sample set");
        return Err(ChartError::EmptySamples);
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let n = samples.len();

    if max <= min {
        // All samples identical: one bin carrying the whole mass.
        return Ok(HistogramModel {
            bins: vec![Bin { center: min, density: 1.0 }],
            bin_width: 0.0,
            curve: Vec::new(),
            mean_line: mean,
            ci_lower,
            ci_upper,
            x_range: (min, max),
            y_range: (0.0, 1.0),
        });
    }

    let count = bin_count(n);
    let width = (max - min) / count as f64;

    let mut counts = vec![0usize; count];
    for &x in samples {
        // Last bin is inclusive of the maximum.
        let idx = (((x - min) / width) as usize).min(count - 1);
        counts[idx] += 1;
    }

    let bins: Vec<Bin> = counts
        .iter()
        .enumerate()
        .map(|(i, &c)| Bin {
            center: min + (i as f64 + 0.5) * width,
            density: c as f64 / (n as f64 * width),
        })
        .collect();

    // Normal overlay sampled uniformly across the data range, independent
    // of the binning.
    let curve: Vec<CurvePoint> = if std > 0.0 {
        let norm = 1.0 / (std * (2.0 * std::f64::consts::PI).sqrt());
        (0..CURVE_RESOLUTION)
            .map(|i| {
                let x = min + (max - min) * i as f64 / (CURVE_RESOLUTION - 1) as f64;
                let z = (x - mean) / std;
                CurvePoint { x, y: norm * (-0.5 * z * z).exp() }
            })
            .collect()
    } else {
        Vec::new()
    };

    let bar_peak = bins.iter().map(|b| b.density).fold(0.0, f64::max);
    let curve_peak = if std > 0.0 {
        1.0 / (std * (2.0 * std::f64::consts::PI).sqrt())
    } else {
        0.0
    };

    Ok(HistogramModel {
        bins,
        bin_width: width,
        curve,
        mean_line: mean,
        ci_lower,
        ci_upper,
        x_range: (min, max),
        y_range: (0.0, bar_peak.max(curve_peak)),
    })
}

/// Convenience: derive mean/std/CI from the samples themselves.
pub fn build_from_samples(samples: &[f64]) -> Result<HistogramModel, ChartError> {
    let stats =
        crate::stats::SampleStats::from_samples(samples).ok_or(ChartError::EmptySamples)?;
    build(samples, stats.mean, stats.std, stats.ci_lower, stats.ci_upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn normal_samples(n: usize, mean: f64, std: f64, seed: u64) -> Vec<f64> {
        let dist = Normal::new(mean, std).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| dist.sample(&mut rng)).collect()
    }

    #[test]
    fn empty_input_is_an_error_not_a_panic() {
        assert!(matches!(build(&[], 0.0, 1.0, 0.0, 0.0), Err(ChartError::EmptySamples)));
    }

    #[test]
    fn bin_count_clamps() {
        assert_eq!(bin_count(10), 30);
        assert_eq!(bin_count(400), 30);
        assert_eq!(bin_count(1000), 47);
        assert_eq!(bin_count(10_000), 80);
        assert_eq!(bin_count(1_000_000), 80);
    }

    #[test]
    fn density_integrates_to_one() {
        for n in [500usize, 1000, 5000] {
            let samples = normal_samples(n, 5000.0, 800.0, 21);
            let model = build_from_samples(&samples).unwrap();
            let integral: f64 =
                model.bins.iter().map(|b| b.density * model.bin_width).sum();
            assert!(
                (integral - 1.0).abs() < 0.01,
                "n={n}: density integral {integral} not within 1%"
            );
        }
    }

    #[test]
    fn extremes_are_binned_inclusively() {
        let samples = normal_samples(2000, 0.0, 1.0, 5);
        let model = build_from_samples(&samples).unwrap();
        let total: usize = {
            let n = samples.len() as f64;
            model
                .bins
                .iter()
                .map(|b| (b.density * n * model.bin_width).round() as usize)
                .sum()
        };
        assert_eq!(total, samples.len(), "every sample lands in some bin");
    }

    #[test]
    fn y_range_covers_curve_and_bars() {
        let samples = normal_samples(1000, 100.0, 10.0, 31);
        let model = build_from_samples(&samples).unwrap();
        let bar_peak = model.bins.iter().map(|b| b.density).fold(0.0, f64::max);
        let curve_peak = model.curve.iter().map(|p| p.y).fold(0.0, f64::max);
        assert!(model.y_range.1 >= bar_peak);
        assert!(model.y_range.1 >= curve_peak);
        assert_eq!(model.curve.len(), 240);
    }

    #[test]
    fn constant_samples_degrade_to_single_bin() {
        let samples = vec![42.0; 100];
        let model = build_from_samples(&samples).unwrap();
        assert_eq!(model.bins.len(), 1);
        assert!(model.curve.is_empty());
    }

    /// End-to-end scenario: 1000 normal draws, mean 5000, std 800.
    #[test]
    fn normal_thousand_draw_scenario() {
        let samples = normal_samples(1000, 5000.0, 800.0, 99);
        let model = build_from_samples(&samples).unwrap();

        assert_eq!(model.bins.len(), 47);
        // Mean line near 5000 (sampling error ~ std/sqrt(n) ≈ 25).
        assert!(
            (model.mean_line - 5000.0).abs() < 100.0,
            "mean line at {}",
            model.mean_line
        );
        // CI band near the 2.5/97.5 theoretical quantiles (±1.96σ).
        assert!((model.ci_lower - (5000.0 - 1.96 * 800.0)).abs() < 200.0);
        assert!((model.ci_upper - (5000.0 + 1.96 * 800.0)).abs() < 200.0);
        assert!(model.ci_lower < model.mean_line && model.mean_line < model.ci_upper);
    }
}
