use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Member entity - owned by the member subsystem; petitions only hold a
/// reference and look members up for existence and login checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Option<i64>,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub const ROLE_ADMIN: &'static str = "admin";
    pub const ROLE_USER: &'static str = "user";

    pub fn new(email: String, password_hash: String, role: String) -> Self {
        Self {
            id: None,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Self::ROLE_ADMIN
    }
}
