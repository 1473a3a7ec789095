use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordId;

/// A physical site. Users, visitors and cargo point at one by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: RecordId,
    pub name: String,
    pub code: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocation {
    pub name: String,
    pub code: String,
    pub address: String,
}

impl NewLocation {
    pub fn into_location(self, id: RecordId, created_at: DateTime<Utc>) -> Location {
        Location {
            id,
            name: self.name,
            code: self.code,
            address: self.address,
            created_at,
        }
    }
}
