use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::Location;
use super::RecordId;
use crate::pii::Masked;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    DataEntry,
    DashboardVisitor,
    DashboardCargo,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::DataEntry => "data_entry",
            Role::DashboardVisitor => "dashboard_visitor",
            Role::DashboardCargo => "dashboard_cargo",
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: Masked<String>,
    pub role: Role,
    pub full_name: String,
    /// Home location. A user that has one only ever sees that site's data.
    pub location_id: Option<RecordId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub full_name: String,
    pub location_id: Option<RecordId>,
}

impl NewUser {
    pub fn into_user(self, id: RecordId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            password_hash: Masked(self.password_hash),
            role: self.role,
            full_name: self.full_name,
            location_id: self.location_id,
            created_at,
        }
    }
}

/// A user with its home location resolved.
#[derive(Debug, Clone, Serialize)]
pub struct UserEntry {
    #[serde(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}
