//! HTTP client for the VoltBank platform API
//!
//! Thin reqwest-based implementation of the service traits from
//! voltbank-core. Attaches the configured bearer token to every request and
//! enforces a client-wide timeout. Non-success responses surface as
//! `AppError::Api`; consumers decide how to degrade (the settings cache and
//! settlement engine both substitute safe defaults).
//!
//! Token issuance, refresh, and 401-driven logout are handled outside this
//! crate.

use reqwest::{Client, ClientBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, instrument};
use voltbank_core::config::ApiConfig;
use voltbank_core::models::{AccountTransaction, HubSettings, HubSettingsPatch, UserAccount};
use voltbank_core::traits::{AccountService, SettingsService};
use voltbank_core::{AppError, AppResult};

use async_trait::async_trait;

/// Client for the VoltBank platform API
///
/// Implements both [`SettingsService`] and [`AccountService`]; one instance
/// is typically shared behind an `Arc` by the cache and the settlement
/// engine.
pub struct ApiClient {
    http: Client,
    base_url: String,
    auth_token: Option<String>,
    timeout_secs: u64,
}

impl ApiClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Replace the bearer token, e.g. after a login refresh
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_send_error(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            error!("Request timed out: {}", err);
            AppError::Timeout(self.timeout_secs)
        } else {
            error!("Transport error: {}", err);
            AppError::Transport(err.to_string())
        }
    }

    fn check_status(response: Response) -> AppResult<Response> {
        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                debug!("Unauthorized response; token handling is up to the host");
            }
            return Err(AppError::Api {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        debug!("GET {}", path);
        let mut request = self.http.get(self.endpoint(path));
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let response = Self::check_status(response)?;

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Serialization(e.to_string()))
    }

    async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        debug!("PUT {}", path);
        let mut request = self.http.put(self.endpoint(path)).json(body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let response = Self::check_status(response)?;

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl SettingsService for ApiClient {
    #[instrument(skip(self))]
    async fn get_hub_settings(&self, hub_id: i32) -> AppResult<HubSettings> {
        self.get_json(&format!("/settings/hub/{}", hub_id)).await
    }

    #[instrument(skip(self, patch))]
    async fn update_hub_settings(
        &self,
        hub_id: i32,
        patch: &HubSettingsPatch,
    ) -> AppResult<HubSettings> {
        self.put_json(&format!("/settings/hub/{}", hub_id), patch)
            .await
    }
}

#[async_trait]
impl AccountService for ApiClient {
    #[instrument(skip(self))]
    async fn get_user_account(&self, user_id: i32) -> AppResult<UserAccount> {
        self.get_json(&format!("/accounts/user/{}", user_id)).await
    }

    #[instrument(skip(self))]
    async fn get_user_transactions(
        &self,
        user_id: i32,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<AccountTransaction>> {
        self.get_json(&format!(
            "/accounts/user/{}/transactions?limit={}&offset={}",
            user_id, limit, offset
        ))
        .await
    }
}
