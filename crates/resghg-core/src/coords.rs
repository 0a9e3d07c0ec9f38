/// Geographic coordinate types and normalization.
/// All coordinate math uses f64 for precision.
use serde::{Deserialize, Serialize};

/// A point on the sphere in geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    /// Latitude in degrees, -90 to +90.
    pub lat: f64,
    /// Longitude in degrees, -180 to +180.
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Convert to radians.
    pub fn to_radians(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lon.to_radians())
    }
}

/// Normalize raw coordinates (e.g. from a dragged map marker) into valid
/// geographic ranges.
///
/// Longitude is wrapped modularly into [-180, 180]: crossing the antimeridian
/// continues on the other side. Latitude is reflected at the poles: walking
/// past a pole comes back down the far meridian, so 95 → 85 and -100 → -80.
/// In-range values pass through unchanged.
///
/// Total for finite inputs; callers must screen out NaN/infinite values first.
pub fn normalize(lat: f64, lon: f64) -> LatLon {
    let mut lat = lat;
    if lat > 90.0 {
        lat = 90.0 - (lat - 90.0);
    } else if lat < -90.0 {
        lat = -90.0 + (-90.0 - lat);
    }

    let mut lon = lon;
    while lon > 180.0 {
        lon -= 360.0;
    }
    while lon < -180.0 {
        lon += 360.0;
    }

    LatLon::new(lat, lon)
}
