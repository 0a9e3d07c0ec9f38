//! IPCC Tier 1 cumulative reservoir emissions (G-res style).
//!
//! Per-zone emission factors from the IPCC aggregated-zone table:
//! CO2 in tCO2-C/(ha·yr) for the first 20 years after impoundment, CH4 in
//! kgCH4/(ha·yr) split at age 20. CH4 carries a trophic adjustment alpha
//! and a downstream (degassing + river) flux ratio; CO2 is counted only
//! for the first 20 years and converted from carbon mass by M_CO2/M_C.

use crate::climate::AggregatedZone;
use crate::emissions::trophic::TrophicStatus;
use serde::{Deserialize, Serialize};

/// Molar masses for the carbon → CO2 conversion.
pub const M_CO2: f64 = 44.01;
pub const M_C: f64 = 12.011;

/// Mode of the CH4 GWP distribution in the IPCC parameter table.
pub const GWP_CH4_MODE: f64 = 27.2;

/// Mode of the downstream CH4 flux ratio.
pub const FLUX_RATIO_MODE: f64 = 0.09;

/// Zone emission factors for the cumulative Tier 1 model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GresFactors {
    /// CO2, first 20 years, tCO2-C/(ha·yr).
    pub ef_co2_le20: f64,
    /// CH4, age ≤ 20, kgCH4/(ha·yr).
    pub ef_ch4_le20: f64,
    /// CH4, age > 20, kgCH4/(ha·yr).
    pub ef_ch4_gt20: f64,
}

/// The fixed 6-entry IPCC aggregated-zone factor table.
pub fn zone_factors(zone: AggregatedZone) -> GresFactors {
    match zone {
        AggregatedZone::Boreal => GresFactors {
            ef_co2_le20: 0.94,
            ef_ch4_le20: 27.7,
            ef_ch4_gt20: 13.6,
        },
        AggregatedZone::CoolTemperate => GresFactors {
            ef_co2_le20: 1.02,
            ef_ch4_le20: 84.7,
            ef_ch4_gt20: 54.0,
        },
        AggregatedZone::WarmTemperateDry => GresFactors {
            ef_co2_le20: 1.70,
            ef_ch4_le20: 195.6,
            ef_ch4_gt20: 150.9,
        },
        AggregatedZone::WarmTemperateHumid => GresFactors {
            ef_co2_le20: 1.46,
            ef_ch4_le20: 127.5,
            ef_ch4_gt20: 80.3,
        },
        AggregatedZone::TropicalDryMontane => GresFactors {
            ef_co2_le20: 2.95,
            ef_ch4_le20: 392.3,
            ef_ch4_gt20: 283.7,
        },
        AggregatedZone::TropicalHumid => GresFactors {
            ef_co2_le20: 2.77,
            ef_ch4_le20: 251.6,
            ef_ch4_gt20: 141.1,
        },
    }
}

/// One parameter vector for the cumulative model. The Monte Carlo engine
/// perturbs these; the deterministic path uses the table modes.
#[derive(Debug, Clone, Copy)]
pub struct GresParams {
    /// Reservoir surface area in hectares.
    pub area_ha: f64,
    /// Reservoir age in years.
    pub age_yr: f64,
    /// CO2 emission factor, tCO2-C/(ha·yr).
    pub ef_co2: f64,
    /// CH4 emission factors, kgCH4/(ha·yr).
    pub ef_ch4_le20: f64,
    pub ef_ch4_gt20: f64,
    /// Trophic adjustment coefficient.
    pub alpha: f64,
    /// Downstream CH4 flux as a fraction of the surface flux.
    pub flux_ratio: f64,
    /// CH4 global warming potential.
    pub gwp_ch4: f64,
}

impl GresParams {
    /// Point-estimate parameters from the zone table modes.
    pub fn point(zone: AggregatedZone, area_ha: f64, age_yr: f64, trophic: TrophicStatus) -> Self {
        let f = zone_factors(zone);
        Self {
            area_ha,
            age_yr,
            ef_co2: f.ef_co2_le20,
            ef_ch4_le20: f.ef_ch4_le20,
            ef_ch4_gt20: f.ef_ch4_gt20,
            alpha: trophic.alpha_mode(),
            flux_ratio: FLUX_RATIO_MODE,
            gwp_ch4: GWP_CH4_MODE,
        }
    }
}

/// Cumulative Tier 1 emissions over the reservoir's lifetime, tCO2-eq.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GresEmissions {
    /// Cumulative CO2, tCO2.
    pub co2: f64,
    /// Surface CH4 as CO2-equivalent, tCO2-eq.
    pub ch4_surface: f64,
    /// Downstream CH4 as CO2-equivalent, tCO2-eq.
    pub ch4_downstream: f64,
    /// Total CH4 as CO2-equivalent, tCO2-eq.
    pub ch4_total: f64,
    /// Grand total, tCO2-eq.
    pub co2_equivalent: f64,
}

/// Evaluate the cumulative Tier 1 model for one parameter vector.
pub fn evaluate(p: &GresParams) -> GresEmissions {
    let years_le20 = p.age_yr.min(20.0);
    let years_gt20 = (p.age_yr - 20.0).max(0.0);

    // CO2: counted for the first 20 years only, carbon mass → CO2 mass.
    let co2 = p.area_ha * p.ef_co2 * years_le20 * (M_CO2 / M_C);

    // Surface CH4 flux, tCH4/yr, age-split.
    let flux_le20 = p.alpha * p.ef_ch4_le20 * p.area_ha / 1000.0;
    let flux_gt20 = p.alpha * p.ef_ch4_gt20 * p.area_ha / 1000.0;

    let surface_tch4 = flux_le20 * years_le20 + flux_gt20 * years_gt20;
    let downstream_tch4 = surface_tch4 * p.flux_ratio;

    let ch4_surface = surface_tch4 * p.gwp_ch4;
    let ch4_downstream = downstream_tch4 * p.gwp_ch4;
    let ch4_total = ch4_surface + ch4_downstream;

    GresEmissions {
        co2,
        ch4_surface,
        ch4_downstream,
        ch4_total,
        co2_equivalent: co2 + ch4_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn co2_stops_accruing_after_twenty_years() {
        let mut p = GresParams::point(
            AggregatedZone::WarmTemperateHumid,
            100.0,
            20.0,
            TrophicStatus::Mesotrophic,
        );
        let at_20 = evaluate(&p);
        p.age_yr = 100.0;
        let at_100 = evaluate(&p);
        assert_relative_eq!(at_20.co2, at_100.co2);
        assert!(at_100.ch4_total > at_20.ch4_total);
    }

    #[test]
    fn young_reservoir_has_no_gt20_term() {
        let p = GresParams::point(
            AggregatedZone::Boreal,
            50.0,
            10.0,
            TrophicStatus::Oligotrophic,
        );
        let e = evaluate(&p);
        let expected_surface = p.alpha * p.ef_ch4_le20 * p.area_ha / 1000.0 * 10.0 * p.gwp_ch4;
        assert_relative_eq!(e.ch4_surface, expected_surface, max_relative = 1e-12);
    }

    #[test]
    fn downstream_is_flux_ratio_of_surface() {
        let p = GresParams::point(
            AggregatedZone::TropicalHumid,
            200.0,
            60.0,
            TrophicStatus::Eutrophic,
        );
        let e = evaluate(&p);
        assert_relative_eq!(e.ch4_downstream, e.ch4_surface * p.flux_ratio, max_relative = 1e-12);
        assert_relative_eq!(e.co2_equivalent, e.co2 + e.ch4_total, max_relative = 1e-12);
    }

    #[test]
    fn tropical_zones_outgas_boreal_zones() {
        let tropical = evaluate(&GresParams::point(
            AggregatedZone::TropicalHumid,
            100.0,
            50.0,
            TrophicStatus::Mesotrophic,
        ));
        let boreal = evaluate(&GresParams::point(
            AggregatedZone::Boreal,
            100.0,
            50.0,
            TrophicStatus::Mesotrophic,
        ));
        assert!(tropical.co2_equivalent > boreal.co2_equivalent);
    }
}
