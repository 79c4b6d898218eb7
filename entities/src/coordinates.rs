use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees, longitude first as the mapping
/// service returns it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Coordinates {
            longitude,
            latitude,
        }
    }
}
