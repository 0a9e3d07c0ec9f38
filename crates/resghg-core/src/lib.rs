//! Core library for the reservoir greenhouse-gas emissions toolkit.
//!
//! Implements the IPCC Tier 1 emission-factor model for reservoirs,
//! Beck–Köppen–Geiger climate-zone resolution with user overrides,
//! Monte Carlo uncertainty and correlation-based sensitivity analysis,
//! and declarative chart models (histogram, tornado) for the results.
//!
//! Pipeline:
//!   coordinates → climate resolution → trophic assessment →
//!   point emissions → Monte Carlo uncertainty → sensitivity ranking →
//!   chart models / report.

pub mod analysis;
pub mod chart;
pub mod climate;
pub mod coords;
pub mod drafts;
pub mod emissions;
pub mod report;
pub mod sensitivity;
pub mod session;
pub mod stats;
pub mod uncertainty;

pub use analysis::{run_analysis, AnalysisRequest, AnalysisResponse};
pub use climate::AggregatedZone;
pub use coords::LatLon;
