//! Role x action permission table.
//!
//! The decision depends only on the caller's role and what they want to do,
//! never on the targeted record. Location visibility is a separate concern
//! handled by [`crate::scope`].

use logbook_shared::Role;
use tracing::warn;

use crate::{CoreError, CoreResult, Identity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Visitor,
    Cargo,
    FitnessMember,
    FitnessAttendance,
    User,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Create,
    /// Visitor sign-in/sign-out, fitness check-in/check-out.
    MutateStatus,
    Update,
    Delete,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Visitor,
        Resource::Cargo,
        Resource::FitnessMember,
        Resource::FitnessAttendance,
        Resource::User,
        Resource::Location,
    ];
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::View,
        Action::Create,
        Action::MutateStatus,
        Action::Update,
        Action::Delete,
    ];
}

/// The permission table itself.
pub fn is_allowed(role: Role, resource: Resource, action: Action) -> bool {
    use Action::*;
    use Resource::*;

    if role == Role::Admin {
        return true;
    }

    match (resource, action) {
        (Visitor | Cargo | FitnessMember | FitnessAttendance, View) => true,
        (Visitor | Cargo | FitnessMember, Create) => role == Role::DataEntry,
        (Visitor, MutateStatus) => role == Role::DashboardVisitor,
        // Gym kiosks check members in and out under any authenticated session.
        (FitnessAttendance, MutateStatus) => true,
        (FitnessMember, Update) => role == Role::DataEntry,
        _ => false,
    }
}

/// Gate an operation before any store access happens.
pub fn authorize(identity: &Identity, resource: Resource, action: Action) -> CoreResult<()> {
    if is_allowed(identity.role, resource, action) {
        return Ok(());
    }

    warn!(
        user = %identity.username,
        role = identity.role.as_str(),
        ?resource,
        ?action,
        "permission denied"
    );
    Err(CoreError::Forbidden("Insufficient permissions".to_string()))
}
