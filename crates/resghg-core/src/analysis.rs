//! Analysis orchestrator and wire types.
//!
//! `AnalysisRequest`/`AnalysisResponse` mirror the JSON contract of the
//! reservoir analysis API; field names are part of the contract. The
//! orchestrator wires the pipeline: climate resolution → trophic
//! assessment → point emissions → Monte Carlo uncertainty → sensitivity.

use crate::climate::resolver::ClimateObservation;
use crate::climate::AggregatedZone;
use crate::emissions::factors::EmissionFactors;
use crate::emissions::trophic::{self, TrophicStatus, WaterQuality};
use crate::emissions::{point_estimate, PointEstimate};
use crate::sensitivity::{self, SensitivityEntry};
use crate::uncertainty::{self, UncertaintySummary};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Reservoir age assumed when the caller gives none (lifetime-scale
/// accounting horizon).
const DEFAULT_AGE_YR: f64 = 100.0;

fn default_true() -> bool {
    true
}

fn default_iterations() -> u32 {
    1000
}

/// Analysis request, one reservoir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Surface area in km².
    pub surface_area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservoir_age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_quality: Option<WaterQuality>,
    /// Explicit trophic status; wins over the water-quality assessment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trophic_status: Option<TrophicStatus>,
    /// Resolved zone override from the client-side resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climate_region_override: Option<AggregatedZone>,
    /// Custom emission factors, kg/km²/yr. All three must be present to
    /// take effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_ch4_ef: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_co2_ef: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_n2o_ef: Option<f64>,
    #[serde(default = "default_true")]
    pub run_uncertainty: bool,
    #[serde(default = "default_true")]
    pub run_sensitivity: bool,
    #[serde(default = "default_iterations")]
    pub uncertainty_iterations: u32,
}

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),
    #[error("surface_area must be positive, got {0}")]
    SurfaceArea(f64),
    #[error("reservoir_age must be non-negative, got {0}")]
    ReservoirAge(f64),
    #[error("mean_depth must be positive, got {0}")]
    MeanDepth(f64),
    #[error("uncertainty_iterations {0} outside [100, 10000]")]
    Iterations(u32),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid request: {}", format_field_errors(.0))]
    Invalid(Vec<FieldError>),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl AnalysisRequest {
    /// Check every field and report all offending ones at once, so a form
    /// can highlight them together.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if !(-90.0..=90.0).contains(&self.latitude) || !self.latitude.is_finite() {
            errors.push(FieldError::Latitude(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) || !self.longitude.is_finite() {
            errors.push(FieldError::Longitude(self.longitude));
        }
        if !(self.surface_area > 0.0) || !self.surface_area.is_finite() {
            errors.push(FieldError::SurfaceArea(self.surface_area));
        }
        if let Some(age) = self.reservoir_age {
            if !(age >= 0.0) || !age.is_finite() {
                errors.push(FieldError::ReservoirAge(age));
            }
        }
        if let Some(depth) = self.mean_depth {
            if !(depth > 0.0) || !depth.is_finite() {
                errors.push(FieldError::MeanDepth(depth));
            }
        }
        if !(100..=10_000).contains(&self.uncertainty_iterations) {
            errors.push(FieldError::Iterations(self.uncertainty_iterations));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn custom_factors(&self) -> Option<EmissionFactors> {
        match (self.custom_ch4_ef, self.custom_co2_ef, self.custom_n2o_ef) {
            (Some(ch4), Some(co2), Some(n2o)) => Some(EmissionFactors { ch4, co2, n2o }),
            _ => None,
        }
    }
}

/// Complete analysis response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub surface_area: f64,
    pub climate_region: AggregatedZone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trophic_status: Option<TrophicStatus>,
    pub emissions: PointEstimate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<UncertaintySummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<Vec<SensitivityEntry>>,
}

/// Run the full analysis pipeline for one request.
pub fn run_analysis<R: Rng + ?Sized>(
    request: &AnalysisRequest,
    rng: &mut R,
) -> Result<AnalysisResponse, AnalysisError> {
    request.validate().map_err(AnalysisError::Invalid)?;

    let zone = request.climate_region_override.unwrap_or_else(|| {
        ClimateObservation::from_latitude(request.latitude).aggregated
    });

    let trophic = request
        .trophic_status
        .or_else(|| request.water_quality.as_ref().and_then(trophic::assess));

    debug!(
        zone = zone.name_en(),
        trophic = trophic.map(|t| t.name()),
        "resolved analysis context"
    );

    let emissions = point_estimate(
        zone,
        request.surface_area,
        request.reservoir_age,
        trophic,
        request.custom_factors(),
    );

    let age = request.reservoir_age.unwrap_or(DEFAULT_AGE_YR);
    let mc_trophic = trophic.unwrap_or(TrophicStatus::Mesotrophic);
    let iterations = request.uncertainty_iterations as usize;

    let uncertainty = request.run_uncertainty.then(|| {
        uncertainty::run(
            zone,
            request.surface_area,
            age,
            mc_trophic,
            emissions.total_n2o_emissions,
            iterations,
            rng,
        )
    });

    let sensitivity = request.run_sensitivity.then(|| {
        sensitivity::run(zone, request.surface_area, age, mc_trophic, iterations, rng)
    });

    Ok(AnalysisResponse {
        latitude: request.latitude,
        longitude: request.longitude,
        surface_area: request.surface_area,
        climate_region: zone,
        trophic_status: trophic,
        emissions,
        uncertainty,
        sensitivity,
    })
}
