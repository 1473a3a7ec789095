//! Demo data for a fresh in-memory store.

use logbook_core::repository::{
    CargoRepository, LocationRepository, LogbookStore, UserRepository, VisitorRepository,
};
use logbook_shared::{CargoCategory, NewCargo, NewLocation, NewUser, NewVisitor, Role};
use tracing::{info, warn};

use crate::auth::hash_password;

/// Two sites, the default accounts and a handful of log entries.
///
/// Meant for an empty store: the default usernames and site codes would
/// otherwise collide.
pub fn seed_demo_data(store: &dyn LogbookStore) -> anyhow::Result<()> {
    let nairobi = store.create_location(NewLocation {
        name: "Nairobi HQ".to_string(),
        code: "NBO-HQ".to_string(),
        address: "Nairobi, Kenya".to_string(),
    })?;
    let mombasa = store.create_location(NewLocation {
        name: "Mombasa Port".to_string(),
        code: "MBA-PORT".to_string(),
        address: "Mombasa, Kenya".to_string(),
    })?;

    store.create_user(NewUser {
        username: "admin".to_string(),
        password_hash: hash_password("admin123")?,
        role: Role::Admin,
        full_name: "System Administrator".to_string(),
        location_id: None,
    })?;
    store.create_user(NewUser {
        username: "data_entry".to_string(),
        password_hash: hash_password("data123")?,
        role: Role::DataEntry,
        full_name: "Data Entry Operator".to_string(),
        location_id: Some(nairobi.id),
    })?;

    store.create_visitor(NewVisitor {
        name: "John Doe".to_string(),
        id_number: "12345678".to_string(),
        area_of_visit: "Terminal A".to_string(),
        company_from: Some("ABC Logistics".to_string()),
        purpose: "Cargo inspection".to_string(),
        badge_number: "B001".to_string(),
        location_id: nairobi.id,
    })?;
    let departed = store.create_visitor(NewVisitor {
        name: "Jane Smith".to_string(),
        id_number: "87654321".to_string(),
        area_of_visit: "Terminal B".to_string(),
        company_from: Some("XYZ Airlines".to_string()),
        purpose: "Meeting with staff".to_string(),
        badge_number: "B002".to_string(),
        location_id: mombasa.id,
    })?;
    store.sign_out_visitor(departed.id)?;

    store.create_cargo(NewCargo {
        awb_number: "AWB123456".to_string(),
        uld_numbers: "AKE12345AA".to_string(),
        category: CargoCategory::Known,
        description: "Electronic equipment".to_string(),
        seal_number: Some("SEAL001".to_string()),
        driver_name: "Mike Johnson".to_string(),
        company: "Fast Logistics Inc".to_string(),
        vehicle_registration: "ABC-1234".to_string(),
        location_id: nairobi.id,
    })?;

    info!("demo data loaded (admin/admin123, data_entry/data123)");
    warn!("default passwords are in use; change them after first login");
    Ok(())
}
