use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `salonpost`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum SalonPostError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Remote invocation ───────────────────────────────────────────────
    #[error("api: {0}")]
    Api(#[from] ApiError),

    // ── Workflow ────────────────────────────────────────────────────────
    #[error("workflow: {0}")]
    Workflow(#[from] WorkflowError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Remote invocation errors ───────────────────────────────────────────────

/// Closed classification of a failed remote call.
///
/// Produced exactly once, at the remote boundary; every downstream consumer
/// matches on these kinds instead of re-parsing strings. The `Display` text
/// is the user-facing message: it prefers the server-provided human message
/// and falls back to a kind-specific default. Raw status lines and bodies go
/// to the debug log, never into the message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401. The session cookie is missing or expired.
    #[error("{}", message.as_deref().unwrap_or("authentication required: please log in again"))]
    AuthRequired { message: Option<String> },

    /// HTTP 5xx, or any other non-2xx status.
    #[error("{}", server_error_text(*status, message.as_deref()))]
    Server { status: u16, message: Option<String> },

    /// Transport failure that is not a timeout (connection refused, DNS, ...).
    #[error("{hint}")]
    Network { hint: String, detail: String },

    /// The per-call deadline elapsed and the in-flight request was aborted.
    #[error("request to {endpoint} timed out after {}s", timeout_ms / 1000)]
    Timeout { endpoint: String, timeout_ms: u64 },

    /// The response body was not decodable JSON.
    #[error("response from {endpoint} could not be decoded")]
    Decode { endpoint: String, detail: String },

    /// Well-formed response, but an error field or an empty result set.
    #[error("generation failed: {0}")]
    Generation(String),
}

fn server_error_text(status: u16, message: Option<&str>) -> String {
    if let Some(msg) = message {
        return msg.to_string();
    }
    if status >= 500 {
        format!("server error ({status}): the service hit a problem, try again later")
    } else {
        let text = http_status_text(status);
        format!("server error ({status} {text})")
    }
}

pub(crate) fn http_status_text(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        _ => "Error",
    }
}

// ─── Workflow errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Client-side validation failure. Blocks submission; never reaches the
    /// network.
    #[error("{0}")]
    Validation(String),

    #[error("cannot {action} while in the {stage} stage")]
    InvalidTransition { stage: String, action: String },

    /// A generation call is already outstanding for this stage.
    #[error("a generation request is already in flight")]
    Busy,
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, SalonPostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = SalonPostError::Config(ConfigError::Validation("bad base url".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn auth_required_prefers_server_message() {
        let err = ApiError::AuthRequired {
            message: Some("session expired".into()),
        };
        assert_eq!(err.to_string(), "session expired");
    }

    #[test]
    fn auth_required_default_instructs_reauth() {
        let err = ApiError::AuthRequired { message: None };
        assert!(err.to_string().contains("log in again"));
    }

    #[test]
    fn server_error_carries_status() {
        let err = ApiError::Server {
            status: 502,
            message: None,
        };
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn server_error_other_non_2xx_includes_status_text() {
        let err = ApiError::Server {
            status: 404,
            message: None,
        };
        assert!(err.to_string().contains("404 Not Found"));
    }

    #[test]
    fn timeout_displays_seconds() {
        let err = ApiError::Timeout {
            endpoint: "/generate".into(),
            timeout_ms: 60_000,
        };
        assert!(err.to_string().contains("/generate"));
        assert!(err.to_string().contains("60s"));
    }

    #[test]
    fn invalid_transition_names_stage_and_action() {
        let err = WorkflowError::InvalidTransition {
            stage: "profile_entry".into(),
            action: "generate posts".into(),
        };
        assert!(err.to_string().contains("profile_entry"));
        assert!(err.to_string().contains("generate posts"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let sp_err: SalonPostError = anyhow_err.into();
        assert!(sp_err.to_string().contains("something went wrong"));
    }
}
