//! Latitude-band climate heuristics.
//!
//! Used when no Köppen observation is available (raster miss, offline
//! operation) and to disambiguate a coarse "arid" override. Bands are
//! symmetric about the equator.

use super::AggregatedZone;
use serde::{Deserialize, Serialize};

/// Coarse latitudinal climate band.
///
/// Tropical 0–23.5°, Subtropical 23.5–35°, Temperate 35–60°, Boreal >60°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClimateBand {
    Tropical,
    Subtropical,
    Temperate,
    Boreal,
}

impl ClimateBand {
    pub fn from_latitude(lat: f64) -> ClimateBand {
        let abs = lat.abs();
        if abs <= 23.5 {
            ClimateBand::Tropical
        } else if abs <= 35.0 {
            ClimateBand::Subtropical
        } else if abs <= 60.0 {
            ClimateBand::Temperate
        } else {
            ClimateBand::Boreal
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ClimateBand::Tropical => "Tropical",
            ClimateBand::Subtropical => "Subtropical",
            ClimateBand::Temperate => "Temperate",
            ClimateBand::Boreal => "Boreal",
        }
    }

    /// Representative aggregated zone for the band. The subtropics default
    /// moist; the dry variant only arises from an observation or an
    /// explicit arid override.
    pub fn aggregated(self) -> AggregatedZone {
        match self {
            ClimateBand::Tropical => AggregatedZone::TropicalHumid,
            ClimateBand::Subtropical => AggregatedZone::WarmTemperateHumid,
            ClimateBand::Temperate => AggregatedZone::CoolTemperate,
            ClimateBand::Boreal => AggregatedZone::Boreal,
        }
    }
}

impl std::fmt::Display for ClimateBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Arid-override disambiguation: which dry zone an arid reservoir most
/// plausibly sits in at the given latitude.
pub fn arid_zone_for_latitude(lat: f64) -> AggregatedZone {
    let abs = lat.abs();
    if abs < 23.5 {
        AggregatedZone::TropicalDryMontane
    } else if abs < 40.0 {
        AggregatedZone::WarmTemperateDry
    } else {
        AggregatedZone::CoolTemperate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_thresholds() {
        assert_eq!(ClimateBand::from_latitude(0.0), ClimateBand::Tropical);
        assert_eq!(ClimateBand::from_latitude(23.5), ClimateBand::Tropical);
        assert_eq!(ClimateBand::from_latitude(-30.0), ClimateBand::Subtropical);
        assert_eq!(ClimateBand::from_latitude(35.0), ClimateBand::Subtropical);
        assert_eq!(ClimateBand::from_latitude(45.0), ClimateBand::Temperate);
        assert_eq!(ClimateBand::from_latitude(-61.0), ClimateBand::Boreal);
        assert_eq!(ClimateBand::from_latitude(90.0), ClimateBand::Boreal);
    }

    #[test]
    fn bands_symmetric_about_equator() {
        for lat in [5.0, 30.0, 50.0, 70.0] {
            assert_eq!(ClimateBand::from_latitude(lat), ClimateBand::from_latitude(-lat));
        }
    }

    #[test]
    fn arid_heuristic_bands() {
        assert_eq!(arid_zone_for_latitude(10.0), AggregatedZone::TropicalDryMontane);
        assert_eq!(arid_zone_for_latitude(30.0), AggregatedZone::WarmTemperateDry);
        assert_eq!(arid_zone_for_latitude(60.0), AggregatedZone::CoolTemperate);
        assert_eq!(arid_zone_for_latitude(-60.0), AggregatedZone::CoolTemperate);
    }
}
