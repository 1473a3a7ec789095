use chrono::Utc;
use logbook_core::filter::{AttendanceFilter, CargoFilter, VisitorFilter};
use logbook_core::repository::{
    CargoRepository, FitnessRepository, LocationRepository, UserRepository, VisitorRepository,
};
use logbook_core::CoreResult;
use logbook_shared::{
    AttendanceEntry, Cargo, CargoEntry, FitnessAttendance, FitnessMember, Location, NewAttendance,
    NewCargo, NewLocation, NewMember, NewUser, NewVisitor, RecordId, User, UserEntry, Visitor,
    VisitorEntry,
};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::rules;
use crate::table::Table;

/// In-memory logbook storage.
///
/// Every table sits behind its own reader/writer lock: reads on a table run
/// side by side, writes are exclusive for that table only. No method holds
/// two locks at once. Reference hydration takes the second lock after the
/// first has been released.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Table<User>>,
    locations: RwLock<Table<Location>>,
    visitors: RwLock<Table<Visitor>>,
    cargo: RwLock<Table<Cargo>>,
    members: RwLock<Table<FitnessMember>>,
    attendance: RwLock<Table<FitnessAttendance>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn location_of(&self, id: RecordId) -> Option<Location> {
        self.locations.read().get(id).ok().cloned()
    }

    fn require_location(&self, id: RecordId) -> CoreResult<()> {
        self.locations.read().get(id).map(|_| ())
    }

    fn log_conflict<T>(result: CoreResult<T>, what: &str) -> CoreResult<T> {
        if let Err(e) = &result {
            warn!("{} rejected: {}", what, e);
        }
        result
    }
}

impl UserRepository for MemoryStore {
    fn create_user(&self, user: NewUser) -> CoreResult<User> {
        let mut users = self.users.write();
        Self::log_conflict(rules::unique_username(&users, &user.username), "user create")?;

        let created = users.insert_with(Utc::now(), |id, at| user.into_user(id, at));
        info!(id = created.id, username = %created.username, role = created.role.as_str(), "user created");
        Ok(created)
    }

    fn get_user(&self, id: RecordId) -> CoreResult<User> {
        self.users.read().get(id).cloned()
    }

    fn find_user_by_username(&self, username: &str) -> Option<User> {
        self.users.read().find(|u| u.username == username).cloned()
    }

    fn list_users(&self) -> Vec<UserEntry> {
        let users = self.users.read().select(|_| true);
        users.into_iter().map(|user| self.hydrate_user(user)).collect()
    }

    fn update_user(&self, user: User) -> CoreResult<User> {
        let updated = self.users.write().replace(user)?;
        info!(id = updated.id, "user updated");
        Ok(updated)
    }

    fn update_user_unique(&self, user: User) -> CoreResult<User> {
        let mut users = self.users.write();
        Self::log_conflict(
            rules::username_free_for(&users, user.id, &user.username),
            "user update",
        )?;

        let updated = users.replace(user)?;
        info!(id = updated.id, username = %updated.username, "user updated");
        Ok(updated)
    }

    fn delete_user(&self, id: RecordId) -> CoreResult<()> {
        self.users.write().remove(id)?;
        info!(id, "user deleted");
        Ok(())
    }

    fn hydrate_user(&self, user: User) -> UserEntry {
        let location = user.location_id.and_then(|id| self.location_of(id));
        UserEntry { user, location }
    }
}

impl LocationRepository for MemoryStore {
    fn create_location(&self, location: NewLocation) -> CoreResult<Location> {
        let mut locations = self.locations.write();
        Self::log_conflict(
            rules::unique_location(&locations, &location.name, &location.code),
            "location create",
        )?;

        let created = locations.insert_with(Utc::now(), |id, at| location.into_location(id, at));
        info!(id = created.id, code = %created.code, "location created");
        Ok(created)
    }

    fn get_location(&self, id: RecordId) -> CoreResult<Location> {
        self.locations.read().get(id).cloned()
    }

    fn find_location_by_code(&self, code: &str) -> Option<Location> {
        self.locations.read().find(|l| l.code == code).cloned()
    }

    fn list_locations(&self) -> Vec<Location> {
        self.locations.read().select(|_| true)
    }

    fn update_location(&self, location: Location) -> CoreResult<Location> {
        let updated = self.locations.write().replace(location)?;
        info!(id = updated.id, "location updated");
        Ok(updated)
    }

    fn delete_location(&self, id: RecordId) -> CoreResult<()> {
        self.locations.write().remove(id)?;
        info!(id, "location deleted");
        Ok(())
    }
}

impl VisitorRepository for MemoryStore {
    fn create_visitor(&self, visitor: NewVisitor) -> CoreResult<Visitor> {
        self.require_location(visitor.location_id)?;

        let created = self
            .visitors
            .write()
            .insert_with(Utc::now(), |id, at| visitor.into_visitor(id, at));
        info!(id = created.id, location_id = created.location_id, badge = %created.badge_number, "visitor signed in");
        Ok(created)
    }

    fn get_visitor(&self, id: RecordId) -> CoreResult<Visitor> {
        self.visitors.read().get(id).cloned()
    }

    fn list_visitors(&self, filter: &VisitorFilter) -> Vec<VisitorEntry> {
        let visitors = self.visitors.read().select(|v| filter.matches(v));
        debug!(?filter, count = visitors.len(), "listing visitors");

        visitors
            .into_iter()
            .map(|visitor| VisitorEntry {
                location: self.location_of(visitor.location_id),
                visitor,
            })
            .collect()
    }

    fn update_visitor(&self, visitor: Visitor) -> CoreResult<Visitor> {
        let updated = self.visitors.write().replace(visitor)?;
        info!(id = updated.id, "visitor updated");
        Ok(updated)
    }

    fn delete_visitor(&self, id: RecordId) -> CoreResult<()> {
        self.visitors.write().remove(id)?;
        info!(id, "visitor deleted");
        Ok(())
    }

    fn sign_in_visitor(&self, id: RecordId, badge_number: String) -> CoreResult<Visitor> {
        let mut visitors = self.visitors.write();
        let visitor = visitors.get_mut(id)?;
        visitor.sign_in(badge_number, Utc::now());

        info!(id, badge = %visitor.badge_number, "visitor signed in");
        Ok(visitor.clone())
    }

    fn sign_out_visitor(&self, id: RecordId) -> CoreResult<Visitor> {
        let mut visitors = self.visitors.write();
        let visitor = visitors.get_mut(id)?;
        Self::log_conflict(rules::can_sign_out(visitor), "visitor sign-out")?;
        visitor.sign_out(Utc::now());

        info!(id, "visitor signed out");
        Ok(visitor.clone())
    }
}

impl CargoRepository for MemoryStore {
    fn create_cargo(&self, cargo: NewCargo) -> CoreResult<Cargo> {
        self.require_location(cargo.location_id)?;

        let created = self
            .cargo
            .write()
            .insert_with(Utc::now(), |id, at| cargo.into_cargo(id, at));
        info!(id = created.id, awb = %created.awb_number, location_id = created.location_id, "cargo logged");
        Ok(created)
    }

    fn get_cargo(&self, id: RecordId) -> CoreResult<Cargo> {
        self.cargo.read().get(id).cloned()
    }

    fn list_cargo(&self, filter: &CargoFilter) -> Vec<CargoEntry> {
        let cargo = self.cargo.read().select(|c| filter.matches(c));
        debug!(?filter, count = cargo.len(), "listing cargo");

        cargo
            .into_iter()
            .map(|cargo| CargoEntry {
                location: self.location_of(cargo.location_id),
                cargo,
            })
            .collect()
    }

    fn update_cargo(&self, cargo: Cargo) -> CoreResult<Cargo> {
        let updated = self.cargo.write().replace(cargo)?;
        info!(id = updated.id, "cargo updated");
        Ok(updated)
    }

    fn delete_cargo(&self, id: RecordId) -> CoreResult<()> {
        self.cargo.write().remove(id)?;
        info!(id, "cargo deleted");
        Ok(())
    }
}

impl FitnessRepository for MemoryStore {
    fn create_member(&self, member: NewMember) -> CoreResult<FitnessMember> {
        let mut members = self.members.write();
        Self::log_conflict(
            rules::unique_member_id_number(&members, &member.id_number),
            "member create",
        )?;

        let created = members.insert_with(Utc::now(), |id, at| member.into_member(id, at));
        info!(id = created.id, "fitness member registered");
        Ok(created)
    }

    fn get_member(&self, id: RecordId) -> CoreResult<FitnessMember> {
        self.members.read().get(id).cloned()
    }

    fn find_member_by_id_number(&self, id_number: &str) -> Option<FitnessMember> {
        self.members.read().find(|m| m.id_number == id_number).cloned()
    }

    fn list_members(&self) -> Vec<FitnessMember> {
        self.members.read().select(|_| true)
    }

    fn update_member(&self, member: FitnessMember) -> CoreResult<FitnessMember> {
        let updated = self.members.write().replace(member)?;
        info!(id = updated.id, "fitness member updated");
        Ok(updated)
    }

    /// Attendance rows that reference the member are left in place.
    fn delete_member(&self, id: RecordId) -> CoreResult<()> {
        self.members.write().remove(id)?;
        info!(id, "fitness member deleted");
        Ok(())
    }

    fn check_in(&self, attendance: NewAttendance) -> CoreResult<AttendanceEntry> {
        let member = self.get_member(attendance.member_id)?;

        let created = {
            let mut table = self.attendance.write();
            let now = Utc::now();
            Self::log_conflict(
                rules::single_attendance(&table, attendance.member_id, attendance.session, now.date_naive()),
                "check-in",
            )?;
            table.insert_with(now, |id, at| attendance.into_attendance(id, at))
        };

        info!(id = created.id, member_id = created.member_id, session = ?created.session, "member checked in");
        Ok(AttendanceEntry {
            attendance: created,
            member: Some(member),
        })
    }

    fn check_out(&self, id: RecordId) -> CoreResult<FitnessAttendance> {
        let mut table = self.attendance.write();
        let attendance = table.get_mut(id)?;
        Self::log_conflict(rules::can_check_out(attendance), "check-out")?;
        attendance.check_out = Some(Utc::now());

        info!(id, member_id = attendance.member_id, "member checked out");
        Ok(attendance.clone())
    }

    fn get_attendance(&self, id: RecordId) -> CoreResult<FitnessAttendance> {
        self.attendance.read().get(id).cloned()
    }

    fn list_attendance(&self, filter: &AttendanceFilter) -> Vec<AttendanceEntry> {
        let rows = self.attendance.read().select(|a| filter.matches(a));
        debug!(?filter, count = rows.len(), "listing attendance");

        rows.into_iter()
            .map(|attendance| AttendanceEntry {
                member: self.get_member(attendance.member_id).ok(),
                attendance,
            })
            .collect()
    }

    fn update_attendance(&self, attendance: FitnessAttendance) -> CoreResult<FitnessAttendance> {
        let updated = self.attendance.write().replace(attendance)?;
        info!(id = updated.id, "attendance updated");
        Ok(updated)
    }

    fn delete_attendance(&self, id: RecordId) -> CoreResult<()> {
        self.attendance.write().remove(id)?;
        info!(id, "attendance deleted");
        Ok(())
    }
}
