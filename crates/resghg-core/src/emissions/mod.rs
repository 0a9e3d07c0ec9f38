//! Reservoir emission estimation.
//!
//! Two model layers share the climate-zone resolution:
//!   - a point-estimate layer (annual areal factors × surface area with
//!     trophic and age modifiers), reported per gas in t/yr;
//!   - the cumulative IPCC Tier 1 layer in `gres`, which the Monte Carlo
//!     engine perturbs.
//!
//! Canonical unit for totals is tonnes per year (t CO2-eq/yr for the
//! equivalent); emission factors stay in their tabulated areal units.

pub mod factors;
pub mod gres;
pub mod trophic;

use crate::climate::AggregatedZone;
use serde::{Deserialize, Serialize};

use factors::{age_multiplier, band_for_zone, baseline, EmissionFactors, GWP_CH4, GWP_N2O};
use trophic::TrophicStatus;

/// Annual point estimate for one reservoir.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointEstimate {
    /// Effective factors after modifiers, kg/km²/yr.
    pub ch4_emission_factor: f64,
    pub co2_emission_factor: f64,
    pub n2o_emission_factor: f64,
    /// Annual totals, t/yr.
    pub total_ch4_emissions: f64,
    pub total_co2_emissions: f64,
    pub total_n2o_emissions: f64,
    /// Annual total, t CO2-eq/yr.
    pub co2_equivalent: f64,
    /// Cumulative IPCC Tier 1 results, tCO2-eq over the reservoir lifetime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipcc_tier1_results: Option<gres::GresEmissions>,
}

/// Compute the annual point estimate for a reservoir.
///
/// `custom_factors` overrides the zone baseline wholesale (no modifiers
/// applied on top: custom factors are taken as measured).
pub fn point_estimate(
    zone: AggregatedZone,
    surface_area_km2: f64,
    reservoir_age: Option<f64>,
    trophic: Option<TrophicStatus>,
    custom_factors: Option<EmissionFactors>,
) -> PointEstimate {
    let ef = match custom_factors {
        Some(custom) => custom,
        None => {
            let base = baseline(band_for_zone(zone));
            let trophic_mult = trophic.map(TrophicStatus::ef_multiplier).unwrap_or(1.0);
            let age_mult = age_multiplier(reservoir_age);
            EmissionFactors {
                ch4: base.ch4 * trophic_mult * age_mult,
                co2: base.co2 * trophic_mult * age_mult,
                // N2O responds to productivity but not to reservoir age.
                n2o: base.n2o * trophic_mult,
            }
        }
    };

    // kg/yr → t/yr.
    let total_ch4 = surface_area_km2 * ef.ch4 / 1000.0;
    let total_co2 = surface_area_km2 * ef.co2 / 1000.0;
    let total_n2o = surface_area_km2 * ef.n2o / 1000.0;
    let co2_eq = total_co2 + total_ch4 * GWP_CH4 + total_n2o * GWP_N2O;

    let tier1 = reservoir_age.map(|age| {
        let area_ha = surface_area_km2 * 100.0;
        let trophic = trophic.unwrap_or(TrophicStatus::Mesotrophic);
        gres::evaluate(&gres::GresParams::point(zone, area_ha, age, trophic))
    });

    PointEstimate {
        ch4_emission_factor: ef.ch4,
        co2_emission_factor: ef.co2,
        n2o_emission_factor: ef.n2o,
        total_ch4_emissions: total_ch4,
        total_co2_emissions: total_co2,
        total_n2o_emissions: total_n2o,
        co2_equivalent: co2_eq,
        ipcc_tier1_results: tier1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn totals_scale_linearly_with_area() {
        let small = point_estimate(AggregatedZone::CoolTemperate, 10.0, Some(30.0), None, None);
        let large = point_estimate(AggregatedZone::CoolTemperate, 20.0, Some(30.0), None, None);
        assert_relative_eq!(large.total_ch4_emissions, 2.0 * small.total_ch4_emissions);
        assert_relative_eq!(large.co2_equivalent, 2.0 * small.co2_equivalent);
    }

    #[test]
    fn co2_equivalent_applies_gwp() {
        let e = point_estimate(AggregatedZone::Boreal, 5.0, None, None, None);
        let expected = e.total_co2_emissions
            + e.total_ch4_emissions * GWP_CH4
            + e.total_n2o_emissions * GWP_N2O;
        assert_relative_eq!(e.co2_equivalent, expected, max_relative = 1e-12);
    }

    #[test]
    fn eutrophic_raises_all_factors() {
        let meso = point_estimate(
            AggregatedZone::WarmTemperateHumid,
            10.0,
            Some(30.0),
            Some(TrophicStatus::Mesotrophic),
            None,
        );
        let eutro = point_estimate(
            AggregatedZone::WarmTemperateHumid,
            10.0,
            Some(30.0),
            Some(TrophicStatus::Eutrophic),
            None,
        );
        assert_relative_eq!(eutro.ch4_emission_factor, meso.ch4_emission_factor * 1.3);
        assert_relative_eq!(eutro.n2o_emission_factor, meso.n2o_emission_factor * 1.3);
    }

    #[test]
    fn age_modifier_skips_n2o() {
        let old = point_estimate(AggregatedZone::Boreal, 10.0, Some(50.0), None, None);
        let new = point_estimate(AggregatedZone::Boreal, 10.0, Some(2.0), None, None);
        assert!(new.ch4_emission_factor > old.ch4_emission_factor);
        assert_relative_eq!(new.n2o_emission_factor, old.n2o_emission_factor);
    }

    #[test]
    fn custom_factors_bypass_modifiers() {
        let custom = EmissionFactors { ch4: 1000.0, co2: 2000.0, n2o: 5.0 };
        let e = point_estimate(
            AggregatedZone::TropicalHumid,
            10.0,
            Some(1.0),
            Some(TrophicStatus::Hypereutrophic),
            Some(custom),
        );
        assert_relative_eq!(e.ch4_emission_factor, 1000.0);
        assert_relative_eq!(e.total_ch4_emissions, 10.0);
    }

    #[test]
    fn tier1_results_require_an_age() {
        let with_age = point_estimate(AggregatedZone::Boreal, 10.0, Some(30.0), None, None);
        let without = point_estimate(AggregatedZone::Boreal, 10.0, None, None, None);
        assert!(with_age.ipcc_tier1_results.is_some());
        assert!(without.ipcc_tier1_results.is_none());
    }
}
