use logbook_shared::{RecordId, Role, User};
use serde::{Deserialize, Serialize};

/// A verified caller: who they are, what role they hold and, for
/// location-bound users, the one site they are pinned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: RecordId,
    pub username: String,
    pub role: Role,
    pub home_location: Option<RecordId>,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            home_location: user.location_id,
        }
    }
}
