//! Declarative chart models.
//!
//! Pure transforms from analysis output to drawable descriptions (bins,
//! curves, reference lines). Rendering to SVG/canvas/terminal is left to
//! the embedding environment.

pub mod histogram;
pub mod tornado;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// An empty sample set is a reportable condition, not a silent no-op.
    #[error("no samples to chart")]
    EmptySamples,
}
