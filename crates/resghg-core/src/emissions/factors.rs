//! Baseline areal emission factors and modifier tables.
//!
//! Factors are representative per-band values in kg/km²/yr drawn from IPCC
//! guidance and the reservoir flux literature. Modifiers scale them for
//! trophic state (productivity) and reservoir age (CH4/CO2 decline as the
//! flooded carbon pool is exhausted; N2O is not age-adjusted).

use crate::climate::latitude::ClimateBand;
use crate::climate::AggregatedZone;
use serde::{Deserialize, Serialize};

/// 100-year global warming potentials, IPCC AR5.
pub const GWP_CH4: f64 = 28.0;
pub const GWP_N2O: f64 = 265.0;

/// Areal emission factors in kg/km²/yr.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactors {
    pub ch4: f64,
    pub co2: f64,
    pub n2o: f64,
}

/// Baseline factors per latitudinal climate band.
pub fn baseline(band: ClimateBand) -> EmissionFactors {
    match band {
        ClimateBand::Tropical => EmissionFactors { ch4: 150_000.0, co2: 500_000.0, n2o: 80.0 },
        ClimateBand::Subtropical => EmissionFactors { ch4: 100_000.0, co2: 350_000.0, n2o: 60.0 },
        ClimateBand::Temperate => EmissionFactors { ch4: 70_000.0, co2: 250_000.0, n2o: 40.0 },
        ClimateBand::Boreal => EmissionFactors { ch4: 40_000.0, co2: 150_000.0, n2o: 25.0 },
    }
}

/// Collapse an aggregated zone onto the band whose baseline factors apply.
pub fn band_for_zone(zone: AggregatedZone) -> ClimateBand {
    match zone {
        AggregatedZone::TropicalHumid | AggregatedZone::TropicalDryMontane => {
            ClimateBand::Tropical
        }
        AggregatedZone::WarmTemperateHumid | AggregatedZone::WarmTemperateDry => {
            ClimateBand::Subtropical
        }
        AggregatedZone::CoolTemperate => ClimateBand::Temperate,
        AggregatedZone::Boreal => ClimateBand::Boreal,
    }
}

/// Age multiplier for CH4 and CO2: young reservoirs outgas the freshly
/// flooded organic pool.
pub fn age_multiplier(reservoir_age: Option<f64>) -> f64 {
    match reservoir_age {
        None => 1.0,
        Some(age) if age < 5.0 => 1.5,
        Some(age) if age < 10.0 => 1.2,
        Some(age) if age < 20.0 => 1.0,
        Some(_) => 0.8,
    }
}

/// Relative half-widths of the per-gas uncertainty bands, interpreted as a
/// 95% interval around the point estimate.
pub fn uncertainty_fraction(gas: Gas) -> f64 {
    match gas {
        Gas::Ch4 => 0.50,
        Gas::Co2 => 0.40,
        Gas::N2o => 0.60,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gas {
    Ch4,
    Co2,
    N2o,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_decrease_toward_the_poles() {
        let bands = [
            ClimateBand::Tropical,
            ClimateBand::Subtropical,
            ClimateBand::Temperate,
            ClimateBand::Boreal,
        ];
        for pair in bands.windows(2) {
            let warm = baseline(pair[0]);
            let cold = baseline(pair[1]);
            assert!(warm.ch4 > cold.ch4);
            assert!(warm.co2 > cold.co2);
            assert!(warm.n2o > cold.n2o);
        }
    }

    #[test]
    fn age_multiplier_steps() {
        assert_eq!(age_multiplier(None), 1.0);
        assert_eq!(age_multiplier(Some(2.0)), 1.5);
        assert_eq!(age_multiplier(Some(7.0)), 1.2);
        assert_eq!(age_multiplier(Some(15.0)), 1.0);
        assert_eq!(age_multiplier(Some(50.0)), 0.8);
    }

    #[test]
    fn every_zone_has_a_band() {
        for zone in AggregatedZone::ALL {
            let _ = baseline(band_for_zone(zone));
        }
    }
}
