//! Service traits for the remote platform API
//!
//! The HTTP transport (and its auth-token handling) lives behind these
//! seams; consumers degrade remote failures to safe defaults per component.

use crate::error::AppError;
use crate::models::{AccountTransaction, HubSettings, HubSettingsPatch, UserAccount};
use async_trait::async_trait;

/// Remote hub-settings operations
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Fetch the settings snapshot for one hub
    async fn get_hub_settings(&self, hub_id: i32) -> Result<HubSettings, AppError>;

    /// Persist a partial settings update server-side, returning the new
    /// snapshot
    async fn update_hub_settings(
        &self,
        hub_id: i32,
        patch: &HubSettingsPatch,
    ) -> Result<HubSettings, AppError>;
}

/// Remote user-account operations
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Fetch a user's current account balance
    async fn get_user_account(&self, user_id: i32) -> Result<UserAccount, AppError>;

    /// List a user's account transactions, newest first
    async fn get_user_transactions(
        &self,
        user_id: i32,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AccountTransaction>, AppError>;
}
