use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::Location;
use super::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CargoCategory {
    Known,
    Unknown,
}

/// Flat audit record of a cargo movement. Only administrators edit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo {
    pub id: RecordId,
    pub awb_number: String,
    pub uld_numbers: String,
    pub category: CargoCategory,
    pub description: String,
    pub seal_number: Option<String>,
    pub driver_name: String,
    pub company: String,
    pub vehicle_registration: String,
    pub location_id: RecordId,
    pub time_in: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCargo {
    pub awb_number: String,
    pub uld_numbers: String,
    pub category: CargoCategory,
    pub description: String,
    pub seal_number: Option<String>,
    pub driver_name: String,
    pub company: String,
    pub vehicle_registration: String,
    pub location_id: RecordId,
}

impl NewCargo {
    pub fn into_cargo(self, id: RecordId, created_at: DateTime<Utc>) -> Cargo {
        Cargo {
            id,
            awb_number: self.awb_number,
            uld_numbers: self.uld_numbers,
            category: self.category,
            description: self.description,
            seal_number: self.seal_number,
            driver_name: self.driver_name,
            company: self.company,
            vehicle_registration: self.vehicle_registration,
            location_id: self.location_id,
            time_in: created_at,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CargoEntry {
    #[serde(flatten)]
    pub cargo: Cargo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}
