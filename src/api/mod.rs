//! Remote invocation layer.
//!
//! One `reqwest::Client` with a cookie store talks to the generation
//! backend. The session cookie rides in the jar at transport level and is
//! never visible to calling code. Every failure is classified exactly once,
//! here, into the closed [`ApiError`] taxonomy; callers match on kinds
//! instead of re-parsing strings.
//!
//! At most one attempt per call; there are no automatic retries.

use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::workflow::types::{BusinessProfile, Channel, ChannelTone, TopicSuggestionTag};

pub const LOGIN: &str = "/login";
pub const SIGNUP: &str = "/signup";
pub const PROFILE_ME: &str = "/salons/me";
pub const PROFILE_UPDATE: &str = "/salons";
pub const GENERATE: &str = "/generate";

/// Authenticated user record returned by `/login` and `/signup`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionUser {
    pub user_id: String,
    pub email: String,
}

pub struct ApiClient {
    base_url: String,
    client: Client,
    default_timeout: Duration,
    generate_timeout: Duration,
}

impl ApiClient {
    /// Build a client against an explicit base URL. The base URL is injected
    /// here, never read from the environment inside this layer.
    pub fn new(
        base_url: &str,
        default_timeout: Duration,
        generate_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            default_timeout,
            generate_timeout,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            Duration::from_secs(config.generate_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn generate_timeout(&self) -> Duration {
        self.generate_timeout
    }

    // ── Core invocation ─────────────────────────────────────────────────

    /// Issue one request and decode the JSON payload. No schema validation
    /// beyond decodability; payload-shape interpretation belongs to the
    /// caller. The timeout aborts the in-flight call.
    pub async fn invoke(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
        timeout: Duration,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{endpoint}", self.base_url);
        let mut request = self.client.request(method, &url).timeout(timeout);
        if let Some(body) = payload {
            request = request.json(body);
        }

        let timeout_ms = timeout.as_millis() as u64;
        debug!(endpoint, timeout_ms, "api request");

        let response = request
            .send()
            .await
            .map_err(|e| classify_transport(endpoint, &e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport(endpoint, &e, timeout))?;

        debug!(
            endpoint,
            status = status.as_u16(),
            body_len = body.len(),
            "api response"
        );

        if !status.is_success() {
            debug!(endpoint, status = status.as_u16(), raw_body = %body, "api error body");
            return Err(classify_status(status, &body));
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        })
    }

    // ── Session ─────────────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ApiError> {
        self.session_call(LOGIN, email, password).await
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<SessionUser, ApiError> {
        self.session_call(SIGNUP, email, password).await
    }

    async fn session_call(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, ApiError> {
        let payload = json!({ "email": email, "password": password });
        let value = self
            .invoke(Method::POST, endpoint, Some(&payload), self.default_timeout)
            .await?;

        // A 2xx body can still carry an error field on auth endpoints.
        if let Some(message) = body_error_message(&value) {
            return Err(ApiError::AuthRequired {
                message: Some(message),
            });
        }

        serde_json::from_value(value).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        })
    }

    // ── Profile ─────────────────────────────────────────────────────────

    /// Fetch the stored salon profile. Not-found means "no profile yet" and
    /// is not an error.
    pub async fn fetch_profile(&self) -> Result<Option<BusinessProfile>, ApiError> {
        match self
            .invoke(Method::GET, PROFILE_ME, None, self.default_timeout)
            .await
        {
            Ok(Value::Null) => Ok(None),
            Ok(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ApiError::Decode {
                    endpoint: PROFILE_ME.to_string(),
                    detail: e.to_string(),
                }),
            Err(ApiError::Server { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Persist the salon profile. The confirmation record is not interpreted
    /// beyond decodability.
    pub async fn update_profile(&self, profile: &BusinessProfile) -> Result<(), ApiError> {
        let payload = serde_json::to_value(profile).map_err(|e| ApiError::Decode {
            endpoint: PROFILE_UPDATE.to_string(),
            detail: e.to_string(),
        })?;
        self.invoke(
            Method::POST,
            PROFILE_UPDATE,
            Some(&payload),
            self.default_timeout,
        )
        .await?;
        Ok(())
    }

    // ── Generation ──────────────────────────────────────────────────────

    /// Topic mode of `/generate`. Uses the longer generation timeout; the
    /// backend work is heavier than a plain fetch.
    pub async fn generate_topics(
        &self,
        context: &str,
        tag: Option<TopicSuggestionTag>,
    ) -> Result<Value, ApiError> {
        let payload = json!({
            "context": context,
            "topic_suggestion": tag.map(|t| t.to_string()).unwrap_or_default(),
        });
        self.invoke(Method::POST, GENERATE, Some(&payload), self.generate_timeout)
            .await
    }

    /// Post mode of `/generate`: one call covering all selected channels.
    pub async fn generate_posts(
        &self,
        topic_body: &str,
        channels: &[Channel],
        tone: ChannelTone,
    ) -> Result<Value, ApiError> {
        let payload = json!({
            "gen_context": topic_body,
            "channels": channels,
            "tone": tone.to_string(),
        });
        self.invoke(Method::POST, GENERATE, Some(&payload), self.generate_timeout)
            .await
    }
}

// ─── Classification ─────────────────────────────────────────────────────────

fn classify_status(status: StatusCode, body: &str) -> ApiError {
    // Prefer the server's human message over any default, whatever the kind.
    let message = body
        .parse::<Value>()
        .ok()
        .as_ref()
        .and_then(body_error_message);

    if status == StatusCode::UNAUTHORIZED {
        return ApiError::AuthRequired { message };
    }
    ApiError::Server {
        status: status.as_u16(),
        message,
    }
}

fn classify_transport(endpoint: &str, err: &reqwest::Error, timeout: Duration) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout {
            endpoint: endpoint.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        };
    }
    ApiError::Network {
        hint: "could not reach the generation service: check the configured base URL".into(),
        detail: err.to_string(),
    }
}

/// Human message carried in an error payload: `message` preferred, `error`
/// as fallback.
fn body_error_message(value: &Value) -> Option<String> {
    if value.get("error").is_none() && value.get("message").is_none() {
        return None;
    }
    value
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| value.get("error").and_then(Value::as_str))
        .map(str::to_string)
}
