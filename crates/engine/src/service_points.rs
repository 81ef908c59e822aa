//! The module contains the representation of a service point, the metered
//! delivery location.

use serde::{Deserialize, Serialize};

/// Geographic position of a service point, in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

/// A physical location where consumption is metered.
///
/// The installed meter is referenced by id and resolved through the
/// registry on demand, so the two entities never own each other.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServicePoint {
    pub id: String,
    pub municipality: String,
    pub address: String,
    pub position: Position,
    pub meter_id: Option<String>,
}

impl ServicePoint {
    pub fn new(id: String, municipality: &str, address: &str, position: Position) -> Self {
        Self {
            id,
            municipality: municipality.to_string(),
            address: address.to_string(),
            position,
            meter_id: None,
        }
    }

    /// `true` once a meter has been installed here.
    pub fn has_meter(&self) -> bool {
        self.meter_id.is_some()
    }
}
