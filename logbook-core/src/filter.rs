use chrono::NaiveDate;
use logbook_shared::{Cargo, CargoCategory, FitnessAttendance, FitnessSession, RecordId, Visitor, VisitorStatus};

/// Conjunctive visitor list criteria. `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisitorFilter {
    pub location_id: Option<RecordId>,
    pub status: Option<VisitorStatus>,
}

impl VisitorFilter {
    pub fn matches(&self, visitor: &Visitor) -> bool {
        self.location_id.map_or(true, |id| visitor.location_id == id)
            && self.status.map_or(true, |status| visitor.status == status)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CargoFilter {
    pub location_id: Option<RecordId>,
    pub category: Option<CargoCategory>,
}

impl CargoFilter {
    pub fn matches(&self, cargo: &Cargo) -> bool {
        self.location_id.map_or(true, |id| cargo.location_id == id)
            && self.category.map_or(true, |category| cargo.category == category)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    pub session: Option<FitnessSession>,
    pub date: Option<NaiveDate>,
}

impl AttendanceFilter {
    pub fn matches(&self, attendance: &FitnessAttendance) -> bool {
        self.session.map_or(true, |session| attendance.session == session)
            && self.date.map_or(true, |date| attendance.date == date)
    }
}
