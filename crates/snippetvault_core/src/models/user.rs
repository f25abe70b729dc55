//! User profile records and account statistics.

use serde::{Deserialize, Serialize};

/// Authorization role; `Admin` is the sole admin-operation signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// Profile record stored alongside the identity provider account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub last_login_at: String,
    #[serde(default)]
    pub suspended_at: Option<String>,
    #[serde(default)]
    pub snippet_count: u64,
}

fn default_active() -> bool {
    true
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Aggregate account counts shown on the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: usize,
    pub active_users: usize,
    pub suspended_users: usize,
    pub admin_users: usize,
    pub regular_users: usize,
}

impl UserStats {
    /// Tally statistics from a full profile listing.
    pub fn tally(profiles: &[UserProfile]) -> Self {
        let total_users = profiles.len();
        let active_users = profiles.iter().filter(|p| p.is_active).count();
        let admin_users = profiles.iter().filter(|p| p.is_admin()).count();
        Self {
            total_users,
            active_users,
            suspended_users: total_users - active_users,
            admin_users,
            regular_users: total_users - admin_users,
        }
    }
}
