//! Creation-time uniqueness checks and transition guards.
//!
//! Each check takes the table it inspects by reference, so callers have to
//! be holding that table's write lock already. The check and the write it
//! guards therefore happen under one lock acquisition.

use chrono::NaiveDate;
use logbook_core::{CoreError, CoreResult};
use logbook_shared::{
    FitnessAttendance, FitnessMember, FitnessSession, Location, RecordId, User, Visitor,
};

use crate::table::Table;

pub fn unique_username(users: &Table<User>, username: &str) -> CoreResult<()> {
    match users.find(|u| u.username == username) {
        Some(_) => Err(CoreError::conflict("Username already exists")),
        None => Ok(()),
    }
}

/// A user may keep its own name; any other holder is a conflict.
pub fn username_free_for(users: &Table<User>, id: RecordId, username: &str) -> CoreResult<()> {
    match users.find(|u| u.username == username && u.id != id) {
        Some(_) => Err(CoreError::conflict("Username already exists")),
        None => Ok(()),
    }
}

pub fn unique_member_id_number(members: &Table<FitnessMember>, id_number: &str) -> CoreResult<()> {
    match members.find(|m| m.id_number == id_number) {
        Some(_) => Err(CoreError::conflict("Member with this ID number already exists")),
        None => Ok(()),
    }
}

pub fn unique_location(locations: &Table<Location>, name: &str, code: &str) -> CoreResult<()> {
    if locations.find(|l| l.name == name).is_some() {
        return Err(CoreError::conflict("Location name already exists"));
    }
    if locations.find(|l| l.code == code).is_some() {
        return Err(CoreError::conflict("Location code already exists"));
    }
    Ok(())
}

/// At most one attendance per member, session and calendar day.
pub fn single_attendance(
    attendance: &Table<FitnessAttendance>,
    member_id: RecordId,
    session: FitnessSession,
    date: NaiveDate,
) -> CoreResult<()> {
    let taken = attendance
        .find(|a| a.member_id == member_id && a.session == session && a.date == date)
        .is_some();
    if taken {
        return Err(CoreError::conflict("Already checked in for this session today"));
    }
    Ok(())
}

pub fn can_sign_out(visitor: &Visitor) -> CoreResult<()> {
    if !visitor.is_active() {
        return Err(CoreError::conflict("Visitor already signed out"));
    }
    Ok(())
}

pub fn can_check_out(attendance: &FitnessAttendance) -> CoreResult<()> {
    if attendance.is_checked_out() {
        return Err(CoreError::conflict("Already checked out"));
    }
    Ok(())
}
