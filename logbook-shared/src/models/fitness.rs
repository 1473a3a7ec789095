use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::RecordId;

/// Gym session slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessSession {
    Morning,
    Afternoon,
    Evening,
}

/// A registered gym member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessMember {
    pub id: RecordId,
    pub name: String,
    /// External id number, unique across members.
    pub id_number: String,
    pub phone_number: String,
    pub company: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub id_number: String,
    pub phone_number: String,
    pub company: String,
}

impl NewMember {
    pub fn into_member(self, id: RecordId, created_at: DateTime<Utc>) -> FitnessMember {
        FitnessMember {
            id,
            name: self.name,
            id_number: self.id_number,
            phone_number: self.phone_number,
            company: self.company,
            created_at,
        }
    }
}

/// One gym visit. At most one exists per (member, session, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessAttendance {
    pub id: RecordId,
    pub member_id: RecordId,
    pub session: FitnessSession,
    pub date: NaiveDate,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl FitnessAttendance {
    pub fn is_checked_out(&self) -> bool {
        self.check_out.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAttendance {
    pub member_id: RecordId,
    pub session: FitnessSession,
}

impl NewAttendance {
    /// The attendance date is the calendar day of the check-in.
    pub fn into_attendance(self, id: RecordId, created_at: DateTime<Utc>) -> FitnessAttendance {
        FitnessAttendance {
            id,
            member_id: self.member_id,
            session: self.session,
            date: created_at.date_naive(),
            check_in: created_at,
            check_out: None,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceEntry {
    #[serde(flatten)]
    pub attendance: FitnessAttendance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<FitnessMember>,
}
