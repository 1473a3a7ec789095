use logbook_shared::{
    AttendanceEntry, Cargo, CargoEntry, FitnessAttendance, FitnessMember, Location, NewAttendance,
    NewCargo, NewLocation, NewMember, NewUser, NewVisitor, RecordId, User, UserEntry, Visitor,
    VisitorEntry,
};

use crate::filter::{AttendanceFilter, CargoFilter, VisitorFilter};
use crate::CoreResult;

/// Repository trait for user accounts
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the username is taken.
    fn create_user(&self, user: NewUser) -> CoreResult<User>;

    fn get_user(&self, id: RecordId) -> CoreResult<User>;

    fn find_user_by_username(&self, username: &str) -> Option<User>;

    fn list_users(&self) -> Vec<UserEntry>;

    /// Wholesale replacement. Username uniqueness is the caller's job.
    fn update_user(&self, user: User) -> CoreResult<User>;

    /// Wholesale replacement that fails with `Conflict` when another user
    /// already holds the username. Check and write share one lock.
    fn update_user_unique(&self, user: User) -> CoreResult<User>;

    fn delete_user(&self, id: RecordId) -> CoreResult<()>;

    /// Resolve the user's home location, if it still exists.
    fn hydrate_user(&self, user: User) -> UserEntry;
}

/// Repository trait for sites
pub trait LocationRepository: Send + Sync {
    fn create_location(&self, location: NewLocation) -> CoreResult<Location>;

    fn get_location(&self, id: RecordId) -> CoreResult<Location>;

    fn find_location_by_code(&self, code: &str) -> Option<Location>;

    fn list_locations(&self) -> Vec<Location>;

    fn update_location(&self, location: Location) -> CoreResult<Location>;

    fn delete_location(&self, id: RecordId) -> CoreResult<()>;
}

/// Repository trait for the visitor log
pub trait VisitorRepository: Send + Sync {
    fn create_visitor(&self, visitor: NewVisitor) -> CoreResult<Visitor>;

    fn get_visitor(&self, id: RecordId) -> CoreResult<Visitor>;

    fn list_visitors(&self, filter: &VisitorFilter) -> Vec<VisitorEntry>;

    fn update_visitor(&self, visitor: Visitor) -> CoreResult<Visitor>;

    fn delete_visitor(&self, id: RecordId) -> CoreResult<()>;

    /// Issue a badge and (re-)activate the visitor.
    fn sign_in_visitor(&self, id: RecordId, badge_number: String) -> CoreResult<Visitor>;

    /// Fails with `Conflict` when the visitor is already signed out.
    fn sign_out_visitor(&self, id: RecordId) -> CoreResult<Visitor>;
}

/// Repository trait for the cargo log
pub trait CargoRepository: Send + Sync {
    fn create_cargo(&self, cargo: NewCargo) -> CoreResult<Cargo>;

    fn get_cargo(&self, id: RecordId) -> CoreResult<Cargo>;

    fn list_cargo(&self, filter: &CargoFilter) -> Vec<CargoEntry>;

    fn update_cargo(&self, cargo: Cargo) -> CoreResult<Cargo>;

    fn delete_cargo(&self, id: RecordId) -> CoreResult<()>;
}

/// Repository trait for gym members and attendance
pub trait FitnessRepository: Send + Sync {
    /// Fails with `Conflict` when the id number is already registered.
    fn create_member(&self, member: NewMember) -> CoreResult<FitnessMember>;

    fn get_member(&self, id: RecordId) -> CoreResult<FitnessMember>;

    fn find_member_by_id_number(&self, id_number: &str) -> Option<FitnessMember>;

    fn list_members(&self) -> Vec<FitnessMember>;

    fn update_member(&self, member: FitnessMember) -> CoreResult<FitnessMember>;

    fn delete_member(&self, id: RecordId) -> CoreResult<()>;

    /// Fails with `Conflict` on a second check-in for the same member,
    /// session and day.
    fn check_in(&self, attendance: NewAttendance) -> CoreResult<AttendanceEntry>;

    /// Fails with `Conflict` when already checked out.
    fn check_out(&self, id: RecordId) -> CoreResult<FitnessAttendance>;

    fn get_attendance(&self, id: RecordId) -> CoreResult<FitnessAttendance>;

    fn list_attendance(&self, filter: &AttendanceFilter) -> Vec<AttendanceEntry>;

    fn update_attendance(&self, attendance: FitnessAttendance) -> CoreResult<FitnessAttendance>;

    fn delete_attendance(&self, id: RecordId) -> CoreResult<()>;
}

/// Everything the request layer needs from storage.
pub trait LogbookStore:
    UserRepository + LocationRepository + VisitorRepository + CargoRepository + FitnessRepository
{
}

impl<T> LogbookStore for T where
    T: UserRepository + LocationRepository + VisitorRepository + CargoRepository + FitnessRepository
{
}
