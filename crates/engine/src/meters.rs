//! The module contains the representation of a metering device.

use serde::{Deserialize, Serialize};

/// A metering device.
///
/// `unit` is the unit of measure its cumulative counter reports (e.g. `m3`,
/// `kWh`). The service point it is installed at, if any, is referenced by
/// id (see `ServicePoint`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Meter {
    pub id: String,
    pub serial_number: String,
    pub brand: String,
    pub model: String,
    pub unit: String,
    pub service_point_id: Option<String>,
}

impl Meter {
    pub fn new(id: String, serial_number: &str, brand: &str, model: &str, unit: &str) -> Self {
        Self {
            id,
            serial_number: serial_number.to_string(),
            brand: brand.to_string(),
            model: model.to_string(),
            unit: unit.to_string(),
            service_point_id: None,
        }
    }
}
