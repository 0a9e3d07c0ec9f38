//! Trophic-status assessment from water-quality measurements.
//!
//! Each available parameter is scored 1–4 against standard limnological
//! thresholds and the scores are averaged; missing parameters simply do
//! not vote. No parameters at all means no assessment.

use serde::{Deserialize, Serialize};

/// Water-quality inputs. TP and TN in mg/L, chlorophyll-a in µg/L,
/// Secchi depth in m.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterQuality {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_phosphorus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_nitrogen: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chlorophyll_a: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secchi_depth: Option<f64>,
}

impl WaterQuality {
    pub fn is_empty(&self) -> bool {
        self.total_phosphorus.is_none()
            && self.total_nitrogen.is_none()
            && self.chlorophyll_a.is_none()
            && self.secchi_depth.is_none()
    }
}

/// Nutrient classification of the water body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrophicStatus {
    Oligotrophic,
    Mesotrophic,
    Eutrophic,
    Hypereutrophic,
}

impl TrophicStatus {
    pub const ALL: [TrophicStatus; 4] = [
        TrophicStatus::Oligotrophic,
        TrophicStatus::Mesotrophic,
        TrophicStatus::Eutrophic,
        TrophicStatus::Hypereutrophic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TrophicStatus::Oligotrophic => "Oligotrophic",
            TrophicStatus::Mesotrophic => "Mesotrophic",
            TrophicStatus::Eutrophic => "Eutrophic",
            TrophicStatus::Hypereutrophic => "Hypereutrophic",
        }
    }

    /// Multiplier applied to the baseline point emission factors.
    /// Higher productivity drives higher emissions.
    pub fn ef_multiplier(self) -> f64 {
        match self {
            TrophicStatus::Oligotrophic => 0.7,
            TrophicStatus::Mesotrophic => 1.0,
            TrophicStatus::Eutrophic => 1.3,
            TrophicStatus::Hypereutrophic => 1.6,
        }
    }

    /// Mode of the IPCC CH4 trophic adjustment coefficient alpha.
    pub fn alpha_mode(self) -> f64 {
        match self {
            TrophicStatus::Oligotrophic => 0.7,
            TrophicStatus::Mesotrophic => 3.0,
            TrophicStatus::Eutrophic => 10.0,
            TrophicStatus::Hypereutrophic => 25.0,
        }
    }

    /// 95% interval of alpha, sampled uniformly in the Monte Carlo engine.
    pub fn alpha_interval(self) -> (f64, f64) {
        match self {
            TrophicStatus::Oligotrophic => (0.2, 1.2),
            TrophicStatus::Mesotrophic => (0.7, 5.3),
            TrophicStatus::Eutrophic => (5.3, 14.5),
            TrophicStatus::Hypereutrophic => (14.5, 39.4),
        }
    }
}

impl std::fmt::Display for TrophicStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Assess trophic status from whatever parameters are present.
///
/// Thresholds (µg/L for TP/TN/Chl-a, m for Secchi):
///   Oligotrophic  TP < 10,  TN < 350,  Chl-a < 2.5, Secchi > 4
///   Mesotrophic   TP < 30,  TN < 650,  Chl-a < 8,   Secchi > 2
///   Eutrophic     TP < 100, TN < 1200, Chl-a < 25,  Secchi > 1
///   Hypereutrophic beyond
pub fn assess(wq: &WaterQuality) -> Option<TrophicStatus> {
    let mut scores: Vec<u8> = Vec::with_capacity(4);

    if let Some(tp) = wq.total_phosphorus {
        let ug = tp * 1000.0; // mg/L → µg/L
        scores.push(grade(ug, 10.0, 30.0, 100.0));
    }
    if let Some(tn) = wq.total_nitrogen {
        let ug = tn * 1000.0;
        scores.push(grade(ug, 350.0, 650.0, 1200.0));
    }
    if let Some(chl) = wq.chlorophyll_a {
        scores.push(grade(chl, 2.5, 8.0, 25.0));
    }
    if let Some(secchi) = wq.secchi_depth {
        // Secchi depth grades inversely: clearer water, lower trophic state.
        scores.push(if secchi > 4.0 {
            1
        } else if secchi > 2.0 {
            2
        } else if secchi > 1.0 {
            3
        } else {
            4
        });
    }

    if scores.is_empty() {
        return None;
    }

    let avg = scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64;
    Some(if avg < 1.5 {
        TrophicStatus::Oligotrophic
    } else if avg < 2.5 {
        TrophicStatus::Mesotrophic
    } else if avg < 3.5 {
        TrophicStatus::Eutrophic
    } else {
        TrophicStatus::Hypereutrophic
    })
}

fn grade(value: f64, t1: f64, t2: f64, t3: f64) -> u8 {
    if value < t1 {
        1
    } else if value < t2 {
        2
    } else if value < t3 {
        3
    } else {
        4
    }
}
