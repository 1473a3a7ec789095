//! Location scoping for list queries and new records.
//!
//! An identity with a home location is pinned to it: its lists are always
//! intersected with that location and whatever location the caller asked
//! for is ignored. Unbound identities get exactly what they asked for.

use logbook_shared::RecordId;

use crate::filter::{AttendanceFilter, CargoFilter, VisitorFilter};
use crate::{CoreError, CoreResult, Identity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationScope {
    Unrestricted,
    Pinned(RecordId),
}

impl LocationScope {
    pub fn of(identity: &Identity) -> Self {
        match identity.home_location {
            Some(id) => LocationScope::Pinned(id),
            None => LocationScope::Unrestricted,
        }
    }

    /// Effective location constraint for a list query.
    pub fn constrain(&self, requested: Option<RecordId>) -> Option<RecordId> {
        match self {
            LocationScope::Pinned(home) => Some(*home),
            LocationScope::Unrestricted => requested,
        }
    }

    /// Owning location for a record being created by this identity.
    pub fn assign(&self, requested: Option<RecordId>) -> CoreResult<RecordId> {
        match (self, requested) {
            (LocationScope::Pinned(home), _) => Ok(*home),
            (LocationScope::Unrestricted, Some(id)) => Ok(id),
            (LocationScope::Unrestricted, None) => {
                Err(CoreError::InvalidInput("location_id is required".to_string()))
            }
        }
    }
}

pub fn visitor_filter(identity: &Identity, requested: VisitorFilter) -> VisitorFilter {
    VisitorFilter {
        location_id: LocationScope::of(identity).constrain(requested.location_id),
        ..requested
    }
}

pub fn cargo_filter(identity: &Identity, requested: CargoFilter) -> CargoFilter {
    CargoFilter {
        location_id: LocationScope::of(identity).constrain(requested.location_id),
        ..requested
    }
}

/// Attendance carries no location, so only the caller's own criteria apply.
pub fn attendance_filter(_identity: &Identity, requested: AttendanceFilter) -> AttendanceFilter {
    requested
}
