//! Sample statistics for Monte Carlo output.
//!
//! Percentiles use linear interpolation between order statistics; the
//! confidence interval is the central 95% band (p2.5, p97.5). Correlation
//! helpers back the sensitivity ranking: Pearson on raw values, Spearman
//! on average ranks (robust to the monotone nonlinearity of the model).

use serde::{Deserialize, Serialize};

/// Summary statistics for one simulated output quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    pub mean: f64,
    pub std: f64,
    /// 95% interval bounds (p2.5 / p97.5).
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub percentile_5: f64,
    pub percentile_25: f64,
    pub percentile_50: f64,
    pub percentile_75: f64,
    pub percentile_95: f64,
}

impl SampleStats {
    /// Compute summary statistics. Returns None for an empty sample.
    pub fn from_samples(samples: &[f64]) -> Option<SampleStats> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        // Population std, matching the convention of the reference tables.
        let var = samples.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;
        let std = var.sqrt();

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let p = |q: f64| percentile_sorted(&sorted, q);

        Some(SampleStats {
            mean,
            std,
            ci_lower: p(2.5),
            ci_upper: p(97.5),
            percentile_5: p(5.0),
            percentile_25: p(25.0),
            percentile_50: p(50.0),
            percentile_75: p(75.0),
            percentile_95: p(95.0),
        })
    }
}

/// Percentile of an already-sorted slice, linear interpolation, q in 0–100.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Pearson product-moment correlation. 0 when either side is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len() as f64;
    if x.len() < 2 {
        return 0.0;
    }
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mx;
        let dy = yi - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let denom = (sxx * syy).sqrt();
    if denom < 1e-12 {
        0.0
    } else {
        sxy / denom
    }
}

/// Spearman rank correlation: Pearson on average ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    pearson(&ranks(x), &ranks(y))
}

/// Average ranks (1-based), ties share the mean of their positions.
fn ranks(values: &[f64]) -> Vec<f64> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut out = vec![0.0; values.len()];
    let mut i = 0;
    while i < idx.len() {
        // Extent of the tie group starting at i.
        let mut j = i + 1;
        while j < idx.len() && values[idx[j]] == values[idx[i]] {
            j += 1;
        }
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for &k in &idx[i..j] {
            out[k] = avg_rank;
        }
        i = j;
    }
    out
}
