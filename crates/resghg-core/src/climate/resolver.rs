//! Climate-zone override resolution.
//!
//! Reconciles the auto-detected zone for a site with an optional user
//! override. The override may be a full Köppen class (unambiguous table
//! lookup) or one of five coarse bands, in which case the observation's
//! standard-zone label and latitude act as tie-breakers. Every branch
//! falls back, so resolution always yields one of the six zones.

use super::koppen::KoppenClass;
use super::latitude::{arid_zone_for_latitude, ClimateBand};
use super::{AggregatedZone, StandardZone};
use crate::coords::LatLon;
use serde::{Deserialize, Serialize};

/// Zone returned when nothing else resolves.
pub const DEFAULT_ZONE: AggregatedZone = AggregatedZone::WarmTemperateHumid;

/// One auto-detected classification for a coordinate. Immutable per query;
/// a new coordinate produces a fresh observation that supersedes this one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateObservation {
    /// The Köppen class sampled from the raster, if the source had data.
    pub koppen: Option<KoppenClass>,
    /// IPCC standard zone, when derived from a Köppen class.
    pub standard: Option<StandardZone>,
    /// Aggregated zone. Always present: falls back to the latitude bands.
    pub aggregated: AggregatedZone,
    pub latitude: f64,
}

impl ClimateObservation {
    /// Observation backed by a Köppen raster sample.
    pub fn from_koppen(koppen: KoppenClass, position: LatLon) -> Self {
        let standard = koppen.standard_zone();
        Self {
            koppen: Some(koppen),
            standard: Some(standard),
            aggregated: standard.aggregated(),
            latitude: position.lat,
        }
    }

    /// Heuristic observation when no raster data is available.
    pub fn from_latitude(lat: f64) -> Self {
        Self {
            koppen: None,
            standard: None,
            aggregated: ClimateBand::from_latitude(lat).aggregated(),
            latitude: lat,
        }
    }
}

/// The five coarse climate bands offered in the override dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoarseZone {
    Tropical,
    WarmTemperate,
    CoolTemperateSubarctic,
    Polar,
    Arid,
}

/// The user's zone selection. `Auto` defers to the observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneSelection {
    #[default]
    Auto,
    Koppen(KoppenClass),
    Coarse(CoarseZone),
}

impl ZoneSelection {
    /// Parse a dropdown value: "auto", a coarse band name, or a Köppen code.
    pub fn parse(s: &str) -> Option<ZoneSelection> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("auto") {
            return Some(ZoneSelection::Auto);
        }
        let coarse = match s.to_ascii_lowercase().as_str() {
            "tropical" => Some(CoarseZone::Tropical),
            "warm-temperate" => Some(CoarseZone::WarmTemperate),
            "cool-temperate" | "subarctic" | "cool-temperate-subarctic" => {
                Some(CoarseZone::CoolTemperateSubarctic)
            }
            "polar" => Some(CoarseZone::Polar),
            "arid" => Some(CoarseZone::Arid),
            _ => None,
        };
        if let Some(c) = coarse {
            return Some(ZoneSelection::Coarse(c));
        }
        KoppenClass::from_code(s).map(ZoneSelection::Koppen)
    }
}

/// Resolve the final aggregated zone from the user's selection and the
/// latest observation. Total: never panics, always returns one of the six
/// zones even with no observation at all.
pub fn resolve(
    selection: ZoneSelection,
    observation: Option<&ClimateObservation>,
) -> AggregatedZone {
    match selection {
        ZoneSelection::Auto => observation.map(|o| o.aggregated).unwrap_or(DEFAULT_ZONE),
        ZoneSelection::Koppen(koppen) => koppen.aggregated(),
        ZoneSelection::Coarse(coarse) => resolve_coarse(coarse, observation),
    }
}

fn resolve_coarse(
    coarse: CoarseZone,
    observation: Option<&ClimateObservation>,
) -> AggregatedZone {
    let standard = observation.and_then(|o| o.standard);
    let auto = observation.map(|o| o.aggregated);

    match coarse {
        CoarseZone::Polar => AggregatedZone::Boreal,
        CoarseZone::CoolTemperateSubarctic => AggregatedZone::CoolTemperate,

        CoarseZone::WarmTemperate => {
            // Dry/moist split from the observation's standard label when it
            // already is warm temperate, otherwise keep an auto-detected
            // warm-temperate variant, otherwise default moist.
            match standard {
                Some(StandardZone::WarmTemperateDry) => AggregatedZone::WarmTemperateDry,
                Some(StandardZone::WarmTemperateMoist) => AggregatedZone::WarmTemperateHumid,
                _ => match auto {
                    Some(z @ AggregatedZone::WarmTemperateDry)
                    | Some(z @ AggregatedZone::WarmTemperateHumid) => z,
                    _ => AggregatedZone::WarmTemperateHumid,
                },
            }
        }

        CoarseZone::Tropical => match standard {
            Some(StandardZone::TropicalDry) | Some(StandardZone::TropicalMontane) => {
                AggregatedZone::TropicalDryMontane
            }
            Some(StandardZone::TropicalMoist) | Some(StandardZone::TropicalWet) => {
                AggregatedZone::TropicalHumid
            }
            _ => match auto {
                Some(z @ AggregatedZone::TropicalHumid)
                | Some(z @ AggregatedZone::TropicalDryMontane) => z,
                _ => AggregatedZone::TropicalHumid,
            },
        },

        CoarseZone::Arid => {
            // Raw-label mapping first, then the latitude heuristic, then the
            // auto zone, then the fixed dry default.
            if let Some(std) = standard {
                if std.is_dry() || matches!(std, StandardZone::WarmTemperateDry) {
                    return match std.aggregated() {
                        AggregatedZone::Boreal => AggregatedZone::Boreal,
                        AggregatedZone::CoolTemperate => AggregatedZone::CoolTemperate,
                        AggregatedZone::TropicalDryMontane => AggregatedZone::TropicalDryMontane,
                        _ => AggregatedZone::WarmTemperateDry,
                    };
                }
            }
            if let Some(obs) = observation {
                return arid_zone_for_latitude(obs.latitude);
            }
            auto.unwrap_or(AggregatedZone::WarmTemperateDry)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs_at(lat: f64) -> ClimateObservation {
        ClimateObservation::from_latitude(lat)
    }

    #[test]
    fn auto_returns_observation_unchanged() {
        for zone in AggregatedZone::ALL {
            let obs = ClimateObservation {
                koppen: None,
                standard: None,
                aggregated: zone,
                latitude: 0.0,
            };
            assert_eq!(resolve(ZoneSelection::Auto, Some(&obs)), zone);
        }
    }

    #[test]
    fn auto_without_observation_uses_default() {
        assert_eq!(resolve(ZoneSelection::Auto, None), DEFAULT_ZONE);
    }

    #[test]
    fn explicit_koppen_code_wins_over_observation() {
        let obs = obs_at(70.0); // boreal site
        let sel = ZoneSelection::Koppen(KoppenClass::Af);
        assert_eq!(resolve(sel, Some(&obs)), AggregatedZone::TropicalHumid);
    }

    #[test]
    fn polar_and_subarctic_are_unconditional() {
        let obs = obs_at(5.0);
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::Polar), Some(&obs)),
            AggregatedZone::Boreal
        );
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::CoolTemperateSubarctic), Some(&obs)),
            AggregatedZone::CoolTemperate
        );
    }

    #[test]
    fn warm_temperate_splits_on_standard_label() {
        let mut obs = obs_at(40.0);
        obs.standard = Some(StandardZone::WarmTemperateDry);
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::WarmTemperate), Some(&obs)),
            AggregatedZone::WarmTemperateDry
        );

        obs.standard = Some(StandardZone::WarmTemperateMoist);
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::WarmTemperate), Some(&obs)),
            AggregatedZone::WarmTemperateHumid
        );
    }

    #[test]
    fn warm_temperate_keeps_auto_variant_without_label() {
        let obs = ClimateObservation {
            koppen: None,
            standard: None,
            aggregated: AggregatedZone::WarmTemperateDry,
            latitude: 30.0,
        };
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::WarmTemperate), Some(&obs)),
            AggregatedZone::WarmTemperateDry
        );
        // Unrelated auto zone falls through to the moist default.
        let obs = obs_at(70.0);
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::WarmTemperate), Some(&obs)),
            AggregatedZone::WarmTemperateHumid
        );
    }

    #[test]
    fn tropical_prefers_label_then_auto_then_humid() {
        let mut obs = obs_at(10.0);
        obs.standard = Some(StandardZone::TropicalDry);
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::Tropical), Some(&obs)),
            AggregatedZone::TropicalDryMontane
        );
        // Latitude-only observation at 10° is TropicalHumid already.
        let obs = obs_at(10.0);
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::Tropical), Some(&obs)),
            AggregatedZone::TropicalHumid
        );
        // Non-tropical auto zone: default humid.
        let obs = obs_at(50.0);
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::Tropical), Some(&obs)),
            AggregatedZone::TropicalHumid
        );
    }

    #[test]
    fn arid_uses_latitude_bands_without_label() {
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::Arid), Some(&obs_at(10.0))),
            AggregatedZone::TropicalDryMontane
        );
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::Arid), Some(&obs_at(30.0))),
            AggregatedZone::WarmTemperateDry
        );
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::Arid), Some(&obs_at(60.0))),
            AggregatedZone::CoolTemperate
        );
    }

    #[test]
    fn arid_prefers_dry_standard_label() {
        let mut obs = obs_at(5.0);
        obs.standard = Some(StandardZone::BorealDry);
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::Arid), Some(&obs)),
            AggregatedZone::Boreal
        );
        obs.standard = Some(StandardZone::CoolTemperateDry);
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::Arid), Some(&obs)),
            AggregatedZone::CoolTemperate
        );
    }

    #[test]
    fn arid_without_observation_defaults_dry() {
        assert_eq!(
            resolve(ZoneSelection::Coarse(CoarseZone::Arid), None),
            AggregatedZone::WarmTemperateDry
        );
    }

    #[test]
    fn resolution_is_total_over_all_inputs() {
        let selections: Vec<ZoneSelection> = std::iter::once(ZoneSelection::Auto)
            .chain(KoppenClass::ALL.iter().map(|&k| ZoneSelection::Koppen(k)))
            .chain(
                [
                    CoarseZone::Tropical,
                    CoarseZone::WarmTemperate,
                    CoarseZone::CoolTemperateSubarctic,
                    CoarseZone::Polar,
                    CoarseZone::Arid,
                ]
                .iter()
                .map(|&c| ZoneSelection::Coarse(c)),
            )
            .collect();

        for sel in selections {
            for lat in [-80.0, -45.0, -10.0, 0.0, 10.0, 30.0, 55.0, 75.0] {
                let obs = obs_at(lat);
                let zone = resolve(sel, Some(&obs));
                assert!(AggregatedZone::ALL.contains(&zone));
                let zone = resolve(sel, None);
                assert!(AggregatedZone::ALL.contains(&zone));
            }
        }
    }

    #[test]
    fn parse_dropdown_values() {
        assert_eq!(ZoneSelection::parse("auto"), Some(ZoneSelection::Auto));
        assert_eq!(ZoneSelection::parse(""), Some(ZoneSelection::Auto));
        assert_eq!(
            ZoneSelection::parse("arid"),
            Some(ZoneSelection::Coarse(CoarseZone::Arid))
        );
        assert_eq!(
            ZoneSelection::parse("Cfb"),
            Some(ZoneSelection::Koppen(KoppenClass::Cfb))
        );
        assert_eq!(ZoneSelection::parse("bogus"), None);
    }
}
