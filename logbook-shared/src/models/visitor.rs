use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::Location;
use super::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitorStatus {
    SignedIn,
    SignedOut,
}

/// A visitor entry in the logbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
    pub id: RecordId,
    pub name: String,
    pub id_number: String,
    pub area_of_visit: String,
    pub company_from: Option<String>,
    pub purpose: String,
    pub badge_number: String,
    pub status: VisitorStatus,
    pub sign_in_time: DateTime<Utc>,
    pub sign_out_time: Option<DateTime<Utc>>,
    pub location_id: RecordId,
    pub created_at: DateTime<Utc>,
}

impl Visitor {
    pub fn is_active(&self) -> bool {
        self.status == VisitorStatus::SignedIn
    }

    /// Re-activate with a fresh badge. Clears any previous sign-out time.
    pub fn sign_in(&mut self, badge_number: String, at: DateTime<Utc>) {
        self.badge_number = badge_number;
        self.sign_in_time = at;
        self.sign_out_time = None;
        self.status = VisitorStatus::SignedIn;
    }

    pub fn sign_out(&mut self, at: DateTime<Utc>) {
        self.sign_out_time = Some(at);
        self.status = VisitorStatus::SignedOut;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisitor {
    pub name: String,
    pub id_number: String,
    pub area_of_visit: String,
    pub company_from: Option<String>,
    pub purpose: String,
    pub badge_number: String,
    pub location_id: RecordId,
}

impl NewVisitor {
    /// Visitors start out signed in at the moment they are recorded.
    pub fn into_visitor(self, id: RecordId, created_at: DateTime<Utc>) -> Visitor {
        Visitor {
            id,
            name: self.name,
            id_number: self.id_number,
            area_of_visit: self.area_of_visit,
            company_from: self.company_from,
            purpose: self.purpose,
            badge_number: self.badge_number,
            status: VisitorStatus::SignedIn,
            sign_in_time: created_at,
            sign_out_time: None,
            location_id: self.location_id,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VisitorEntry {
    #[serde(flatten)]
    pub visitor: Visitor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}
