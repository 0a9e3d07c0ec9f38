//! Beck–Köppen–Geiger climate classes and their IPCC zone mapping.
//!
//! The 30 classes follow the legend of the Beck et al. (2018) present-day
//! classification raster; `from_beck_cell` accepts its 1–30 cell values so a
//! raster-backed observation source can feed the resolver directly.

use super::{AggregatedZone, StandardZone};
use serde::{Deserialize, Serialize};

/// The 30 Köppen–Geiger classes of the Beck legend, in raster-cell order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KoppenClass {
    Af, Am, Aw,
    BWh, BWk, BSh, BSk,
    Csa, Csb, Csc,
    Cwa, Cwb, Cwc,
    Cfa, Cfb, Cfc,
    Dsa, Dsb, Dsc, Dsd,
    Dwa, Dwb, Dwc, Dwd,
    Dfa, Dfb, Dfc, Dfd,
    ET, EF,
}

impl KoppenClass {
    pub const ALL: [KoppenClass; 30] = [
        KoppenClass::Af, KoppenClass::Am, KoppenClass::Aw,
        KoppenClass::BWh, KoppenClass::BWk, KoppenClass::BSh, KoppenClass::BSk,
        KoppenClass::Csa, KoppenClass::Csb, KoppenClass::Csc,
        KoppenClass::Cwa, KoppenClass::Cwb, KoppenClass::Cwc,
        KoppenClass::Cfa, KoppenClass::Cfb, KoppenClass::Cfc,
        KoppenClass::Dsa, KoppenClass::Dsb, KoppenClass::Dsc, KoppenClass::Dsd,
        KoppenClass::Dwa, KoppenClass::Dwb, KoppenClass::Dwc, KoppenClass::Dwd,
        KoppenClass::Dfa, KoppenClass::Dfb, KoppenClass::Dfc, KoppenClass::Dfd,
        KoppenClass::ET, KoppenClass::EF,
    ];

    /// The letter code as printed on Köppen maps.
    pub fn code(self) -> &'static str {
        match self {
            KoppenClass::Af => "Af", KoppenClass::Am => "Am", KoppenClass::Aw => "Aw",
            KoppenClass::BWh => "BWh", KoppenClass::BWk => "BWk",
            KoppenClass::BSh => "BSh", KoppenClass::BSk => "BSk",
            KoppenClass::Csa => "Csa", KoppenClass::Csb => "Csb", KoppenClass::Csc => "Csc",
            KoppenClass::Cwa => "Cwa", KoppenClass::Cwb => "Cwb", KoppenClass::Cwc => "Cwc",
            KoppenClass::Cfa => "Cfa", KoppenClass::Cfb => "Cfb", KoppenClass::Cfc => "Cfc",
            KoppenClass::Dsa => "Dsa", KoppenClass::Dsb => "Dsb",
            KoppenClass::Dsc => "Dsc", KoppenClass::Dsd => "Dsd",
            KoppenClass::Dwa => "Dwa", KoppenClass::Dwb => "Dwb",
            KoppenClass::Dwc => "Dwc", KoppenClass::Dwd => "Dwd",
            KoppenClass::Dfa => "Dfa", KoppenClass::Dfb => "Dfb",
            KoppenClass::Dfc => "Dfc", KoppenClass::Dfd => "Dfd",
            KoppenClass::ET => "ET", KoppenClass::EF => "EF",
        }
    }

    /// Decode a Beck raster cell value (1–30). 0 is ocean/no-data.
    pub fn from_beck_cell(value: u8) -> Option<KoppenClass> {
        match value {
            v @ 1..=30 => Some(Self::ALL[v as usize - 1]),
            _ => None,
        }
    }

    /// Parse a letter code, case-insensitively.
    pub fn from_code(code: &str) -> Option<KoppenClass> {
        let code = code.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.code().eq_ignore_ascii_case(code))
    }

    /// Köppen class → IPCC standard zone.
    ///
    /// The subtropical C classes split unusually here: the hot-summer
    /// variants (Csa, Cwa, Cfa, Dsa, Dwa, Dfa) count as warm temperate
    /// while the cooler b/c/d variants fall into cool temperate. The arid
    /// B group is treated wholesale as warm temperate dry.
    pub fn standard_zone(self) -> StandardZone {
        use KoppenClass::*;
        match self {
            Af | Am => StandardZone::TropicalMoist,
            Aw => StandardZone::TropicalDry,
            BWh | BWk | BSh | BSk | Csa => StandardZone::WarmTemperateDry,
            Cwa | Cfa | Dsa | Dwa | Dfa => StandardZone::WarmTemperateMoist,
            Csb | Csc | Cwb | Cwc | Cfb | Cfc => StandardZone::CoolTemperateMoist,
            Dsb | Dsc | Dsd | Dwb | Dfb => StandardZone::CoolTemperateMoist,
            Dwc | Dwd | Dfc | Dfd => StandardZone::BorealMoist,
            ET | EF => StandardZone::PolarMoist,
        }
    }

    /// Köppen class → aggregated IPCC zone, the fixed 30-entry table the
    /// override resolver consults for explicit Köppen selections.
    pub fn aggregated(self) -> AggregatedZone {
        self.standard_zone().aggregated()
    }
}

impl std::fmt::Display for KoppenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beck_cell_roundtrip() {
        for (i, k) in KoppenClass::ALL.iter().enumerate() {
            assert_eq!(KoppenClass::from_beck_cell(i as u8 + 1), Some(*k));
        }
        assert_eq!(KoppenClass::from_beck_cell(0), None);
        assert_eq!(KoppenClass::from_beck_cell(31), None);
    }

    #[test]
    fn code_parse_is_case_insensitive() {
        assert_eq!(KoppenClass::from_code("af"), Some(KoppenClass::Af));
        assert_eq!(KoppenClass::from_code(" BWh "), Some(KoppenClass::BWh));
        assert_eq!(KoppenClass::from_code("Xx"), None);
    }

    #[test]
    fn tropical_rainforest_maps_to_tropical_humid() {
        assert_eq!(KoppenClass::Af.aggregated(), AggregatedZone::TropicalHumid);
        assert_eq!(KoppenClass::Am.aggregated(), AggregatedZone::TropicalHumid);
    }

    #[test]
    fn known_city_classes_map_to_expected_zones() {
        // Spot checks against the reference zone assignments used for
        // calibration: Tokyo (Cfa), Beijing (BSk via the arid belt),
        // Singapore (Af), Moscow (Dfb → cool temperate), Yakutsk (Dfd).
        assert_eq!(KoppenClass::Cfa.aggregated(), AggregatedZone::WarmTemperateHumid);
        assert_eq!(KoppenClass::BSk.aggregated(), AggregatedZone::WarmTemperateDry);
        assert_eq!(KoppenClass::Af.aggregated(), AggregatedZone::TropicalHumid);
        assert_eq!(KoppenClass::Dfb.aggregated(), AggregatedZone::CoolTemperate);
        assert_eq!(KoppenClass::Dfd.aggregated(), AggregatedZone::Boreal);
        assert_eq!(KoppenClass::ET.aggregated(), AggregatedZone::Boreal);
    }

    #[test]
    fn all_thirty_classes_resolve() {
        for k in KoppenClass::ALL {
            // Must never leave the six-zone set.
            assert!(AggregatedZone::ALL.contains(&k.aggregated()), "{k} unresolved");
        }
    }
}
