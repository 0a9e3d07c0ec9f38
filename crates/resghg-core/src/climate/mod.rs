//! Climate-zone classification layer.
//!
//! The emissions model selects its factors by one of six aggregated IPCC
//! climate zones. A zone is resolved from, in priority order: an explicit
//! user override (full Köppen class or coarse band), a Beck–Köppen–Geiger
//! observation for the site, and a latitude-band heuristic. Every path has
//! a guaranteed fallback, so resolution is total.

pub mod koppen;
pub mod latitude;
pub mod resolver;

use serde::{Deserialize, Serialize};

/// The six aggregated IPCC climate zones used for emission-factor lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregatedZone {
    #[serde(rename = "Tropical moist/wet")]
    TropicalHumid,
    #[serde(rename = "Tropical dry/montane")]
    TropicalDryMontane,
    #[serde(rename = "Warm temperate moist")]
    WarmTemperateHumid,
    #[serde(rename = "Warm temperate dry")]
    WarmTemperateDry,
    #[serde(rename = "Cool temperate")]
    CoolTemperate,
    #[serde(rename = "Boreal")]
    Boreal,
}

impl AggregatedZone {
    pub const ALL: [AggregatedZone; 6] = [
        AggregatedZone::TropicalHumid,
        AggregatedZone::TropicalDryMontane,
        AggregatedZone::WarmTemperateHumid,
        AggregatedZone::WarmTemperateDry,
        AggregatedZone::CoolTemperate,
        AggregatedZone::Boreal,
    ];

    pub fn name_en(self) -> &'static str {
        match self {
            AggregatedZone::TropicalHumid => "Tropical moist/wet",
            AggregatedZone::TropicalDryMontane => "Tropical dry/montane",
            AggregatedZone::WarmTemperateHumid => "Warm temperate moist",
            AggregatedZone::WarmTemperateDry => "Warm temperate dry",
            AggregatedZone::CoolTemperate => "Cool temperate",
            AggregatedZone::Boreal => "Boreal",
        }
    }

    /// Chinese display name, matching the reporting convention of the
    /// IPCC zone table this model is calibrated against.
    pub fn name_cn(self) -> &'static str {
        match self {
            AggregatedZone::TropicalHumid => "热带湿润/潮湿",
            AggregatedZone::TropicalDryMontane => "热带干旱/山地",
            AggregatedZone::WarmTemperateHumid => "暖温带湿润",
            AggregatedZone::WarmTemperateDry => "暖温带干旱",
            AggregatedZone::CoolTemperate => "冷温带",
            AggregatedZone::Boreal => "北方",
        }
    }
}

impl std::fmt::Display for AggregatedZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name_en())
    }
}

/// IPCC standard zones: the intermediate label between a Köppen class and
/// the aggregated zone. The dry/moist split is what the override resolver
/// keys on when the user picks a coarse band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StandardZone {
    #[serde(rename = "Tropical moist")]
    TropicalMoist,
    #[serde(rename = "Tropical wet")]
    TropicalWet,
    #[serde(rename = "Tropical dry")]
    TropicalDry,
    #[serde(rename = "Tropical montane")]
    TropicalMontane,
    #[serde(rename = "Warm temperate moist")]
    WarmTemperateMoist,
    #[serde(rename = "Warm temperate dry")]
    WarmTemperateDry,
    #[serde(rename = "Cool temperate moist")]
    CoolTemperateMoist,
    #[serde(rename = "Cool temperate dry")]
    CoolTemperateDry,
    #[serde(rename = "Boreal moist")]
    BorealMoist,
    #[serde(rename = "Boreal dry")]
    BorealDry,
    #[serde(rename = "Polar moist")]
    PolarMoist,
    #[serde(rename = "Polar dry")]
    PolarDry,
}

impl StandardZone {
    pub fn label(self) -> &'static str {
        match self {
            StandardZone::TropicalMoist => "Tropical moist",
            StandardZone::TropicalWet => "Tropical wet",
            StandardZone::TropicalDry => "Tropical dry",
            StandardZone::TropicalMontane => "Tropical montane",
            StandardZone::WarmTemperateMoist => "Warm temperate moist",
            StandardZone::WarmTemperateDry => "Warm temperate dry",
            StandardZone::CoolTemperateMoist => "Cool temperate moist",
            StandardZone::CoolTemperateDry => "Cool temperate dry",
            StandardZone::BorealMoist => "Boreal moist",
            StandardZone::BorealDry => "Boreal dry",
            StandardZone::PolarMoist => "Polar moist",
            StandardZone::PolarDry => "Polar dry",
        }
    }

    /// Collapse to the aggregated zone. Polar reservoirs use the boreal
    /// factors; there is no separate polar row in the IPCC table.
    pub fn aggregated(self) -> AggregatedZone {
        match self {
            StandardZone::TropicalMoist | StandardZone::TropicalWet => {
                AggregatedZone::TropicalHumid
            }
            StandardZone::TropicalDry | StandardZone::TropicalMontane => {
                AggregatedZone::TropicalDryMontane
            }
            StandardZone::WarmTemperateMoist => AggregatedZone::WarmTemperateHumid,
            StandardZone::WarmTemperateDry => AggregatedZone::WarmTemperateDry,
            StandardZone::CoolTemperateMoist | StandardZone::CoolTemperateDry => {
                AggregatedZone::CoolTemperate
            }
            StandardZone::BorealMoist
            | StandardZone::BorealDry
            | StandardZone::PolarMoist
            | StandardZone::PolarDry => AggregatedZone::Boreal,
        }
    }

    pub fn is_dry(self) -> bool {
        matches!(
            self,
            StandardZone::TropicalDry
                | StandardZone::TropicalMontane
                | StandardZone::WarmTemperateDry
                | StandardZone::CoolTemperateDry
                | StandardZone::BorealDry
                | StandardZone::PolarDry
        )
    }
}

impl std::fmt::Display for StandardZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Representative reservoir geometry per zone, used only to pre-fill the
/// input form when the resolved zone changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneDefaults {
    /// Surface area in km².
    pub surface_area: f64,
    /// Mean depth in m.
    pub mean_depth: f64,
}

/// Fixed 6-entry default table, keyed by aggregated zone.
pub fn zone_defaults(zone: AggregatedZone) -> ZoneDefaults {
    match zone {
        AggregatedZone::TropicalHumid => ZoneDefaults { surface_area: 50.0, mean_depth: 12.0 },
        AggregatedZone::TropicalDryMontane => ZoneDefaults { surface_area: 35.0, mean_depth: 18.0 },
        AggregatedZone::WarmTemperateHumid => ZoneDefaults { surface_area: 25.0, mean_depth: 15.0 },
        AggregatedZone::WarmTemperateDry => ZoneDefaults { surface_area: 20.0, mean_depth: 20.0 },
        AggregatedZone::CoolTemperate => ZoneDefaults { surface_area: 15.0, mean_depth: 25.0 },
        AggregatedZone::Boreal => ZoneDefaults { surface_area: 30.0, mean_depth: 30.0 },
    }
}
