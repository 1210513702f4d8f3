//! Topic candidate set: the batch of topic variants one generation call
//! returns, with the active selection and in-place edits.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

use super::types::ResultOrigin;

/// One generated topic option. `body` is the full topic text threaded into
/// post generation; `summary` is the short label shown in the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCandidate {
    #[serde(default)]
    pub summary: String,
    /// The wire field is named `context`.
    #[serde(rename = "context")]
    pub body: String,
}

/// The candidate batch for the current topic-generation round. Rebuilt from
/// scratch on every submission; addressed by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCandidateSet {
    candidates: Vec<TopicCandidate>,
    active: usize,
    origin: ResultOrigin,
}

#[derive(Debug, Deserialize)]
struct TopicResponse {
    #[serde(default)]
    results: Vec<TopicCandidate>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl TopicCandidateSet {
    /// Interpret a decoded `/generate` payload (topic mode). The remote layer
    /// guarantees only that the payload is JSON; the shape is checked here.
    ///
    /// Fails with [`ApiError::Generation`] when the payload carries an error
    /// field or zero candidates.
    pub fn from_response(payload: &Value) -> Result<Self, ApiError> {
        let response: TopicResponse = serde_json::from_value(payload.clone())
            .map_err(|e| ApiError::Generation(format!("unexpected topic payload: {e}")))?;

        if let Some(error) = response.error {
            let message = response.message.unwrap_or(error);
            return Err(ApiError::Generation(message));
        }
        if response.results.is_empty() {
            return Err(ApiError::Generation(
                "the service returned no topic candidates".into(),
            ));
        }

        Ok(Self {
            candidates: response.results,
            active: 0,
            origin: ResultOrigin::Generated,
        })
    }

    /// Locally synthesized single-candidate set for degraded mode. Marked as
    /// placeholder content so the display layer can flag it.
    pub fn placeholder(context: &str) -> Self {
        let body = if context.is_empty() {
            "Draft topic: share one thing happening at the salon this week.".to_string()
        } else {
            format!("Draft topic: {context}")
        };
        Self {
            candidates: vec![TopicCandidate {
                summary: "Placeholder draft".into(),
                body,
            }],
            active: 0,
            origin: ResultOrigin::Placeholder,
        }
    }

    /// Set the active index. Out-of-range is a no-op; the set is always
    /// freshly populated so this should not occur.
    pub fn select(&mut self, index: usize) {
        if index < self.candidates.len() {
            self.active = index;
        }
    }

    /// Replace the body of the candidate at `index`, keeping its summary and
    /// position. Local-only; nothing is sent until the user proceeds.
    pub fn edit(&mut self, index: usize, new_body: impl Into<String>) {
        if let Some(candidate) = self.candidates.get_mut(index) {
            candidate.body = new_body.into();
        }
    }

    /// The candidate threaded forward to post generation: the most recent
    /// `select`, or index 0 absent any.
    pub fn active(&self) -> &TopicCandidate {
        &self.candidates[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn candidates(&self) -> &[TopicCandidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn origin(&self) -> ResultOrigin {
        self.origin
    }
}
