pub mod cargo;
pub mod fitness;
pub mod location;
pub mod user;
pub mod visitor;

/// Numeric identity assigned by the store on creation.
pub type RecordId = u64;
