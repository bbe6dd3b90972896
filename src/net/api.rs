//! HTTP API client for the access-control server.
//!
//! DESIGN
//! ======
//! Controllers talk to the server through the [`AdminApi`] and [`DoorApi`]
//! traits so tests can substitute in-memory fakes. [`HttpClient`] is the
//! reqwest-backed implementation of both. Response classification lives in
//! the pure [`decode_response`] so status/body handling is testable without
//! a socket.
//!
//! ERROR HANDLING
//! ==============
//! Every call distinguishes a server rejection (non-2xx with a JSON error
//! body) from an unreachable server (transport failure). 401 is its own
//! variant because callers redirect to login on it. Nothing is retried.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    AddTagRequest, DeleteUserRequest, DoorOpenRequest, DoorOpenResponse, ErrorBody, MessageResponse,
    PasswordUpdateRequest, PasswordUpdateResponse, SaveUserRequest, SaveUserResponse, SnapshotResponse,
    UserListResponse,
};
use crate::config::ClientConfig;
use crate::state::page::UserQuery;

pub const USERS_PATH: &str = "/admin/usuarios";
pub const SAVE_USER_PATH: &str = "/guardar-usuario";
pub const DELETE_USER_PATH: &str = "/eliminar-usuario";
pub const UPDATE_PASSWORD_PATH: &str = "/upd-pwd";
pub const ADD_TAG_PATH: &str = "/admin/add";
pub const DOOR_OPEN_PATH: &str = "/api/open";
pub const SNAPSHOT_PATH: &str = "/api/snapshot";
pub const TALK_TOGGLE_PATH: &str = "/api/talk_toggle";
pub const EVENTS_PATH: &str = "/events";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The session is missing or expired (HTTP 401).
    #[error("not authenticated")]
    Unauthorized,

    /// The server answered with a non-success status.
    #[error("server rejected request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never completed (connect failure, timeout, reset).
    #[error("server unreachable: {0}")]
    Unreachable(String),

    /// A success response body could not be decoded.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A door action was requested without an API token configured.
    #[error("missing API token; pass --token or set VPORT_API_TOKEN")]
    MissingApiToken,
}

impl ApiError {
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }

    /// Text suitable for showing to the user: the server's own message for
    /// rejections, a generic connectivity message for transport failures.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Unreachable(_) => CONNECTION_ERROR_TEXT.to_owned(),
            Self::Unauthorized => "Sesión expirada".to_owned(),
            other => other.to_string(),
        }
    }
}

pub const CONNECTION_ERROR_TEXT: &str = "Error de conexión";

// =============================================================================
// TRAITS
// =============================================================================

/// Admin endpoints: user directory, password and tag registration.
#[async_trait::async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_users(&self, query: &UserQuery) -> Result<UserListResponse, ApiError>;

    async fn save_user(&self, request: &SaveUserRequest) -> Result<SaveUserResponse, ApiError>;

    async fn delete_user(&self, id: &str) -> Result<MessageResponse, ApiError>;

    async fn update_password(&self, request: &PasswordUpdateRequest) -> Result<PasswordUpdateResponse, ApiError>;

    async fn add_tag(&self, request: &AddTagRequest) -> Result<MessageResponse, ApiError>;
}

/// Dashboard door and camera actions.
#[async_trait::async_trait]
pub trait DoorApi: Send + Sync {
    async fn open_door(&self, request: &DoorOpenRequest) -> Result<DoorOpenResponse, ApiError>;

    async fn snapshot(&self) -> Result<SnapshotResponse, ApiError>;

    async fn toggle_talk(&self) -> Result<serde_json::Value, ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ClientConfig,
}

impl HttpClient {
    /// Build a client with the session cookie and timeouts from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session value is not a valid header or the
    /// HTTP client fails to build.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(session) = &config.session {
            let cookie = HeaderValue::from_str(&format!("session={session}"))
                .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
            headers.insert(COOKIE, cookie);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;

        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.config.url(path);
        tracing::debug!(%url, "POST");
        let request = self.http.post(&url).json(body);
        send(request).await
    }

    fn door_token(&self) -> Result<&str, ApiError> {
        self.config.api_token.as_deref().ok_or(ApiError::MissingApiToken)
    }
}

async fn send<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await.map_err(|e| {
        tracing::warn!(error = %e, "request failed before reaching the server");
        ApiError::Unreachable(e.to_string())
    })?;

    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Unreachable(e.to_string()))?;

    decode_response(status, &text)
}

/// Classify a response by status and decode its body.
///
/// - 401 → [`ApiError::Unauthorized`]
/// - other non-2xx → [`ApiError::Rejected`] carrying the body's `error` or
///   `message`, else the status reason phrase (`HTTP <status>` for
///   unregistered codes)
/// - 2xx → `T` parsed from the body; an empty body decodes as JSON `null`
///
/// # Errors
///
/// See above; a 2xx body that does not match `T` yields [`ApiError::Parse`].
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }

    if !(200..300).contains(&status) {
        let message = rejection_message(status, body);
        tracing::warn!(status, %message, "server rejected request");
        return Err(ApiError::Rejected { status, message });
    }

    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

fn rejection_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|err| err.error.or(err.message))
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| status_reason(status))
}

/// Canonical reason phrase for `status` ("Not Found"), or `HTTP <status>`
/// for codes without one.
fn status_reason(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| format!("HTTP {status}"), str::to_owned)
}

#[async_trait::async_trait]
impl AdminApi for HttpClient {
    async fn list_users(&self, query: &UserQuery) -> Result<UserListResponse, ApiError> {
        let url = self.config.url(USERS_PATH);
        tracing::debug!(%url, page = query.page, per_page = query.page_size.get(), "GET users");
        let request = self.http.get(&url).query(&query.to_pairs());
        send(request).await
    }

    async fn save_user(&self, request: &SaveUserRequest) -> Result<SaveUserResponse, ApiError> {
        tracing::info!(id = %request.id, create = request.is_create(), "saving user");
        let response: Option<SaveUserResponse> = self.post_json(SAVE_USER_PATH, request).await?;
        Ok(response.unwrap_or_default())
    }

    async fn delete_user(&self, id: &str) -> Result<MessageResponse, ApiError> {
        tracing::info!(%id, "deleting user");
        let response: Option<MessageResponse> = self.post_json(DELETE_USER_PATH, &DeleteUserRequest { id }).await?;
        Ok(response.unwrap_or_default())
    }

    async fn update_password(&self, request: &PasswordUpdateRequest) -> Result<PasswordUpdateResponse, ApiError> {
        self.post_json(UPDATE_PASSWORD_PATH, request).await
    }

    async fn add_tag(&self, request: &AddTagRequest) -> Result<MessageResponse, ApiError> {
        tracing::info!(id = %request.id, level = %request.level, "registering tag");
        let response: Option<MessageResponse> = self.post_json(ADD_TAG_PATH, request).await?;
        Ok(response.unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl DoorApi for HttpClient {
    async fn open_door(&self, request: &DoorOpenRequest) -> Result<DoorOpenResponse, ApiError> {
        let token = self.door_token()?;
        let url = self.config.url(DOOR_OPEN_PATH);
        tracing::info!(reason = %request.reason, "opening door");
        let builder = self.http.post(&url).query(&[("token", token)]).json(request);
        let response: Option<DoorOpenResponse> = send(builder).await?;
        Ok(response.unwrap_or_default())
    }

    async fn snapshot(&self) -> Result<SnapshotResponse, ApiError> {
        let response: Option<SnapshotResponse> = self.post_json(SNAPSHOT_PATH, &serde_json::json!({})).await?;
        Ok(response.unwrap_or_default())
    }

    async fn toggle_talk(&self) -> Result<serde_json::Value, ApiError> {
        self.post_json(TALK_TOGGLE_PATH, &serde_json::json!({})).await
    }
}
