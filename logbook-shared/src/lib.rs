pub mod models;
pub mod pii;

pub use models::{
    cargo::{Cargo, CargoCategory, CargoEntry, NewCargo},
    fitness::{AttendanceEntry, FitnessAttendance, FitnessMember, FitnessSession, NewAttendance, NewMember},
    location::{Location, NewLocation},
    user::{NewUser, Role, User, UserEntry},
    visitor::{NewVisitor, Visitor, VisitorEntry, VisitorStatus},
    RecordId,
};
pub use pii::Masked;
