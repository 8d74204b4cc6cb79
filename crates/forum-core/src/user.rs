//! User accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// A registered user.
///
/// Usernames are not required to be unique; the id is the only identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Engine-assigned id.
    pub id: UserId,

    /// Display name, as supplied at registration.
    pub username: String,

    /// Accumulated karma. Starts at zero.
    pub karma: i64,

    /// When the user registered.
    pub joined_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with zero karma, joining now.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            karma: 0,
            joined_at: Utc::now(),
        }
    }
}
