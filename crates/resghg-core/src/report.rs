//! Plain-text report rendering.
//!
//! Turns an `AnalysisResponse` into the fixed-width report printed by the
//! command-line front end. Numbers are rendered with thousands separators
//! and two decimals; sensitivity rows carry a bar proportional to the
//! strongest correlation.

use crate::analysis::AnalysisResponse;
use crate::sensitivity::SensitivityEntry;
use crate::stats::SampleStats;
use std::fmt::Write;

const RULE: &str = "=======================================================";
const BAR_WIDTH: usize = 24;

/// Format a number with thousands separators, two decimals.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let negative = value < 0.0;
    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i, f),
        None => (rounded.as_str(), "00"),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

fn percentile_rows(out: &mut String, label: &str, s: &SampleStats) {
    let _ = writeln!(
        out,
        "  {label:<16} {:>14} {:>14} {:>14} {:>14} {:>14}",
        format_number(s.percentile_5),
        format_number(s.percentile_25),
        format_number(s.percentile_50),
        format_number(s.percentile_75),
        format_number(s.percentile_95),
    );
}

fn sensitivity_section(out: &mut String, entries: &[SensitivityEntry]) {
    out.push_str("\nSensitivity ranking (|Spearman|):\n");
    let max = entries
        .iter()
        .map(|e| e.rank_correlation.abs())
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);
    for entry in entries {
        let frac = entry.rank_correlation.abs() / max;
        let filled = (frac * BAR_WIDTH as f64).round() as usize;
        let bar: String = "█".repeat(filled.min(BAR_WIDTH));
        let _ = writeln!(
            out,
            "  {:<28} {:>7.3}  {bar}",
            entry.parameter, entry.rank_correlation
        );
    }
}

/// Render the full report.
pub fn render(response: &AnalysisResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Reservoir GHG Emission Assessment");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Location:        {:.4}, {:.4}",
        response.latitude, response.longitude
    );
    let _ = writeln!(out, "Climate region:  {}", response.climate_region.name_en());
    if let Some(trophic) = response.trophic_status {
        let _ = writeln!(out, "Trophic status:  {}", trophic.name());
    }
    let _ = writeln!(
        out,
        "Surface area:    {} km²",
        format_number(response.surface_area)
    );

    let e = &response.emissions;
    out.push_str("\nEmission factors (kg/km²/yr):\n");
    let _ = writeln!(out, "  CH4  {:>18}", format_number(e.ch4_emission_factor));
    let _ = writeln!(out, "  CO2  {:>18}", format_number(e.co2_emission_factor));
    let _ = writeln!(out, "  N2O  {:>18}", format_number(e.n2o_emission_factor));

    out.push_str("\nAnnual emissions (t/yr):\n");
    let _ = writeln!(out, "  CH4  {:>18}", format_number(e.total_ch4_emissions));
    let _ = writeln!(out, "  CO2  {:>18}", format_number(e.total_co2_emissions));
    let _ = writeln!(out, "  N2O  {:>18}", format_number(e.total_n2o_emissions));
    let _ = writeln!(
        out,
        "  CO2-eq {:>16} t CO2-eq/yr",
        format_number(e.co2_equivalent)
    );

    if let Some(tier1) = &e.ipcc_tier1_results {
        out.push_str("\nIPCC Tier 1 cumulative (lifetime totals):\n");
        let _ = writeln!(out, "  CO2 (t)             {:>18}", format_number(tier1.co2));
        let _ = writeln!(
            out,
            "  CH4 surface (t)     {:>18}",
            format_number(tier1.ch4_surface)
        );
        let _ = writeln!(
            out,
            "  CH4 downstream (t)  {:>18}",
            format_number(tier1.ch4_downstream)
        );
        let _ = writeln!(
            out,
            "  CO2-eq (t)          {:>18}",
            format_number(tier1.co2_equivalent)
        );
    }

    if let Some(u) = &response.uncertainty {
        out.push_str("\nUncertainty percentiles (t):\n");
        let _ = writeln!(
            out,
            "  {:<16} {:>14} {:>14} {:>14} {:>14} {:>14}",
            "", "p5", "p25", "p50", "p75", "p95"
        );
        percentile_rows(&mut out, "CH4", &u.ch4);
        percentile_rows(&mut out, "CO2", &u.co2);
        percentile_rows(&mut out, "N2O", &u.n2o);
        percentile_rows(&mut out, "CO2-eq", &u.co2_equivalent.stats);
        let _ = writeln!(
            out,
            "  95% CI (CO2-eq): [{}, {}]",
            format_number(u.co2_equivalent.stats.ci_lower),
            format_number(u.co2_equivalent.stats.ci_upper),
        );
    }

    if let Some(entries) = &response.sensitivity {
        sensitivity_section(&mut out, entries);
    }

    let _ = writeln!(out, "{RULE}");
    out
}
