//! Identity capability, auth errors, and user-facing message tables.

use crate::store::StoreError;
use async_trait::async_trait;
use snippetvault_core::models::user::UserProfile;
use thiserror::Error;

/// Established identity: opaque uid plus the stored profile record.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub uid: String,
    pub profile: UserProfile,
}

/// Errors raised by authentication flows.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Synchronous input validation; no provider call was attempted.
    #[error("{0}")]
    InvalidInput(String),

    /// Provider rejection carrying the provider's error code.
    #[error("Authentication failed ({code})")]
    Provider { code: String },

    /// The account is suspended; the session was torn down.
    #[error("Account suspended. Please contact administrator.")]
    Suspended,
}

/// Identity provider capability: sign up/in/out and password reset.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<AuthUser, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    async fn reset_password(&self, email: &str) -> Result<(), AuthError>;
}

/// Directory of user profile records, consulted for admin operations.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_profiles(&self) -> Result<Vec<UserProfile>, StoreError>;

    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Flip the account's active flag; suspension stamps `suspended_at`.
    async fn set_active(
        &self,
        uid: &str,
        active: bool,
        suspended_at: Option<String>,
    ) -> Result<(), StoreError>;
}

/// User-facing message for a sign-in failure.
///
/// Unmapped provider codes fall back to a generic message.
pub fn sign_in_message(err: &AuthError) -> String {
    match err {
        AuthError::InvalidInput(message) => message.clone(),
        AuthError::Suspended => err.to_string(),
        AuthError::Provider { code } => match code.as_str() {
            "auth/invalid-credential" | "auth/invalid-login-credentials" => {
                "Invalid email or password. Please check your credentials and try again."
            }
            "auth/user-not-found" => "No account found with this email address.",
            "auth/wrong-password" => "Incorrect password. Please try again.",
            "auth/invalid-email" => "Please enter a valid email address.",
            "auth/user-disabled" => "This account has been disabled. Please contact support.",
            "auth/too-many-requests" => {
                "Too many failed attempts. Please try again later or reset your password."
            }
            "auth/network-request-failed" => {
                "Network error. Please check your internet connection and try again."
            }
            "auth/internal-error" => "An internal error occurred. Please try again.",
            _ => "Sign in failed. Please try again.",
        }
        .to_string(),
    }
}

/// User-facing message for a sign-up failure.
pub fn sign_up_message(err: &AuthError) -> String {
    match err {
        AuthError::InvalidInput(message) => message.clone(),
        AuthError::Suspended => err.to_string(),
        AuthError::Provider { code } => match code.as_str() {
            "auth/email-already-in-use" => {
                "This email is already registered. Please use a different email or try signing in."
            }
            "auth/invalid-email" => "Please enter a valid email address.",
            "auth/weak-password" => {
                "Password is too weak. Please use at least 6 characters with a mix of letters and numbers."
            }
            "auth/operation-not-allowed" => {
                "Email/password accounts are not enabled. Please contact support."
            }
            "auth/network-request-failed" => {
                "Network error. Please check your internet connection and try again."
            }
            "auth/internal-error" => "An internal error occurred. Please try again.",
            _ => "Failed to create account. Please try again.",
        }
        .to_string(),
    }
}

/// User-facing message for a password-reset failure.
pub fn reset_password_message(err: &AuthError) -> String {
    match err {
        AuthError::InvalidInput(message) => message.clone(),
        AuthError::Suspended => err.to_string(),
        AuthError::Provider { code } => match code.as_str() {
            "auth/user-not-found" => "No account found with this email",
            "auth/invalid-email" => "Invalid email address",
            _ => "Failed to send reset email",
        }
        .to_string(),
    }
}
