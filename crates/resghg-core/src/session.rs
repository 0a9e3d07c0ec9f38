//! Interactive session state.
//!
//! Tracks the coordinates the user last entered, the climate lookup that
//! answered them, and the zone-selection mode. Lookups are asynchronous
//! from the session's point of view: each coordinate change mints a new
//! token, and an answer delivered under an old token is discarded.

use crate::analysis::AnalysisResponse;
use crate::climate::resolver::{resolve, ClimateObservation, ZoneSelection};
use crate::climate::{zone_defaults, AggregatedZone, ZoneDefaults};
use crate::coords::{self, LatLon};
use tracing::debug;

/// State for one interactive editing session.
#[derive(Debug, Clone)]
pub struct Session {
    coordinates: Option<LatLon>,
    observation: Option<ClimateObservation>,
    selection: ZoneSelection,
    lookup_token: u64,
    last_result: Option<AnalysisResponse>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            coordinates: None,
            observation: None,
            selection: ZoneSelection::Auto,
            lookup_token: 0,
            last_result: None,
        }
    }

    pub fn coordinates(&self) -> Option<LatLon> {
        self.coordinates
    }

    pub fn observation(&self) -> Option<&ClimateObservation> {
        self.observation.as_ref()
    }

    pub fn selection(&self) -> ZoneSelection {
        self.selection
    }

    /// Set new coordinates (normalized) and invalidate any in-flight
    /// lookup. Returns the token the next lookup answer must carry.
    ///
    /// An explicit zone override from a previous location no longer
    /// describes the new one, so the selection falls back to automatic.
    pub fn set_coordinates(&mut self, lat: f64, lon: f64) -> u64 {
        self.coordinates = Some(coords::normalize(lat, lon));
        self.observation = None;
        self.selection = ZoneSelection::Auto;
        self.lookup_token += 1;
        self.lookup_token
    }

    /// Deliver a climate lookup answer. Answers for superseded tokens are
    /// dropped so a slow lookup cannot overwrite a newer location.
    pub fn deliver_lookup(&mut self, token: u64, observation: ClimateObservation) -> bool {
        if token != self.lookup_token {
            debug!(token, current = self.lookup_token, "discarding stale climate lookup");
            return false;
        }
        self.observation = Some(observation);
        true
    }

    pub fn set_selection(&mut self, selection: ZoneSelection) {
        self.selection = selection;
    }

    /// The aggregated zone under the current selection and observation.
    pub fn resolved_zone(&self) -> AggregatedZone {
        resolve(self.selection, self.observation.as_ref())
    }

    /// Form-fill defaults (surface area, mean depth) for the resolved zone.
    pub fn defaults(&self) -> ZoneDefaults {
        zone_defaults(self.resolved_zone())
    }

    /// The override to submit with an analysis request: `None` under
    /// automatic selection, otherwise the resolved zone.
    pub fn region_override(&self) -> Option<AggregatedZone> {
        match self.selection {
            ZoneSelection::Auto => None,
            _ => Some(self.resolved_zone()),
        }
    }

    /// Record a completed analysis. Kept across coordinate edits until the
    /// next run replaces it, so the results stay on screen while the user
    /// tweaks inputs.
    pub fn set_result(&mut self, result: AnalysisResponse) {
        self.last_result = Some(result);
    }

    pub fn last_result(&self) -> Option<&AnalysisResponse> {
        self.last_result.as_ref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}
