//! The module contains the representation of a supply contract.

use serde::{Deserialize, Serialize};

/// An agreement binding a user to a service point for billing purposes.
///
/// Both ends are id references; the registry guarantees at signing time
/// that the service point carries an installed meter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub user_id: String,
    pub service_point_id: String,
}

impl Contract {
    pub fn new(id: String, user_id: &str, service_point_id: &str) -> Self {
        Self {
            id,
            user_id: user_id.to_string(),
            service_point_id: service_point_id.to_string(),
        }
    }
}
