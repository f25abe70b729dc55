//! Session ownership of the current identity, gating all remote access.

use crate::auth::{AuthError, AuthUser, IdentityProvider, UserDirectory};
use crate::store::StoreError;
use snippetvault_core::models::snippet::now_stamp;
use snippetvault_core::models::user::{UserProfile, UserStats};
use thiserror::Error;
use tracing::info;

/// Errors raised by admin operations.
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Unauthorized: Admin access required")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Owns the current user identity; every gateway call is gated on it.
#[derive(Debug)]
pub struct Session<P> {
    provider: P,
    current: Option<AuthUser>,
}

impl<P: IdentityProvider> Session<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            current: None,
        }
    }

    /// Opaque id of the signed-in user, if any.
    pub fn current_uid(&self) -> Option<&str> {
        self.current.as_ref().map(|user| user.uid.as_str())
    }

    pub fn current_profile(&self) -> Option<&UserProfile> {
        self.current.as_ref().map(|user| &user.profile)
    }

    pub fn is_admin(&self) -> bool {
        self.current
            .as_ref()
            .map(|user| user.profile.is_admin())
            .unwrap_or(false)
    }

    /// Create an account and establish the session.
    ///
    /// # Errors
    /// Input validation happens before any provider call; provider errors
    /// carry the provider's code for the message tables.
    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<AuthUser, AuthError> {
        let email = require_field(email, "Email is required")?;
        if password.is_empty() {
            return Err(AuthError::InvalidInput("Password is required".into()));
        }
        let display_name = require_field(display_name, "Display name is required")?;

        let user = self.provider.sign_up(email, password, display_name).await?;
        self.establish(user).await
    }

    /// Sign in and establish the session.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let email = require_field(email, "Email is required")?;
        if password.is_empty() {
            return Err(AuthError::InvalidInput("Password is required".into()));
        }

        let user = self.provider.sign_in(email, password).await?;
        self.establish(user).await
    }

    /// Tear the session down.
    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        self.current = None;
        self.provider.sign_out().await
    }

    /// Request a password-reset email.
    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        let email = require_field(email, "Email is required")?;
        self.provider.reset_password(email).await
    }

    /// A suspended profile observed at establishment forces sign-out.
    async fn establish(&mut self, user: AuthUser) -> Result<AuthUser, AuthError> {
        if !user.profile.is_active {
            let _ = self.provider.sign_out().await;
            self.current = None;
            return Err(AuthError::Suspended);
        }
        info!(uid = %user.uid, "session established");
        self.current = Some(user.clone());
        Ok(user)
    }

    fn require_admin(&self) -> Result<(), AdminError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AdminError::Unauthorized)
        }
    }

    /// List every profile record. Admin only.
    ///
    /// # Errors
    /// [`AdminError::Unauthorized`] before any directory call for
    /// non-admin sessions.
    pub async fn list_users<D: UserDirectory>(
        &self,
        directory: &D,
    ) -> Result<Vec<UserProfile>, AdminError> {
        self.require_admin()?;
        Ok(directory.list_profiles().await?)
    }

    /// Suspend an account, stamping the suspension time. Admin only.
    pub async fn suspend_user<D: UserDirectory>(
        &self,
        directory: &D,
        uid: &str,
    ) -> Result<(), AdminError> {
        self.require_admin()?;
        directory.set_active(uid, false, Some(now_stamp())).await?;
        info!(uid, "account suspended");
        Ok(())
    }

    /// Reactivate an account, clearing the suspension stamp. Admin only.
    pub async fn activate_user<D: UserDirectory>(
        &self,
        directory: &D,
        uid: &str,
    ) -> Result<(), AdminError> {
        self.require_admin()?;
        directory.set_active(uid, true, None).await?;
        info!(uid, "account reactivated");
        Ok(())
    }

    /// Aggregate account statistics, computed from the full listing. Admin only.
    pub async fn user_stats<D: UserDirectory>(
        &self,
        directory: &D,
    ) -> Result<UserStats, AdminError> {
        self.require_admin()?;
        let profiles = directory.list_profiles().await?;
        Ok(UserStats::tally(&profiles))
    }
}

fn require_field<'a>(value: &'a str, message: &str) -> Result<&'a str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::InvalidInput(message.to_string()));
    }
    Ok(trimmed)
}
