//! Post result set: one generated post per requested channel, with in-place
//! edits and the composed copy-ready text.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

use super::types::{Channel, ResultOrigin};

/// One generated post. Hashtags are kept separate from the body until the
/// user edits the post, at which point they are folded into the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPost {
    pub channel: Channel,
    pub text: String,
    pub hashtags: Option<Vec<String>>,
}

impl GeneratedPost {
    /// The copy-ready string: body plus, when hashtags are present, a blank
    /// line and the hashtags joined by single spaces.
    pub fn composed_text(&self) -> String {
        match &self.hashtags {
            Some(tags) if !tags.is_empty() => {
                format!("{}\n\n{}", self.text, tags.join(" "))
            }
            _ => self.text.clone(),
        }
    }
}

/// The post batch for the current round, keyed by channel. Channel values are
/// unique within a batch; lookup and edit rely on that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostResultSet {
    posts: Vec<GeneratedPost>,
    origin: ResultOrigin,
}

#[derive(Debug, Deserialize)]
struct PostResponse {
    #[serde(default)]
    results: Vec<WireResult>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireResult {
    channel: Channel,
    #[serde(default)]
    outputs: Vec<WireOutput>,
}

#[derive(Debug, Deserialize)]
struct WireOutput {
    text: String,
    #[serde(default)]
    hashtags: Option<Vec<String>>,
}

impl PostResultSet {
    /// Interpret a decoded `/generate` payload (post mode). Each result's
    /// first output is the post; the backend does not produce deeper outputs.
    ///
    /// Fails with [`ApiError::Generation`] on an error field, an empty batch,
    /// a result with no outputs, or a duplicate channel.
    pub fn from_response(payload: &Value) -> Result<Self, ApiError> {
        let response: PostResponse = serde_json::from_value(payload.clone())
            .map_err(|e| ApiError::Generation(format!("unexpected post payload: {e}")))?;

        if let Some(error) = response.error {
            let message = response.message.unwrap_or(error);
            return Err(ApiError::Generation(message));
        }
        if response.results.is_empty() {
            return Err(ApiError::Generation(
                "the service returned no posts".into(),
            ));
        }

        let mut posts: Vec<GeneratedPost> = Vec::with_capacity(response.results.len());
        for result in response.results {
            if posts.iter().any(|p| p.channel == result.channel) {
                return Err(ApiError::Generation(format!(
                    "duplicate channel {} in response",
                    result.channel
                )));
            }
            let output = result.outputs.into_iter().next().ok_or_else(|| {
                ApiError::Generation(format!("no output for channel {}", result.channel))
            })?;
            posts.push(GeneratedPost {
                channel: result.channel,
                text: output.text,
                hashtags: output.hashtags,
            });
        }

        Ok(Self {
            posts,
            origin: ResultOrigin::Generated,
        })
    }

    /// Locally synthesized degraded-mode set: one marked post per selected
    /// channel, built from the chosen topic.
    pub fn placeholder(topic_body: &str, channels: &[Channel]) -> Self {
        let posts = channels
            .iter()
            .map(|&channel| GeneratedPost {
                channel,
                text: format!(
                    "[{} draft]\n\n{topic_body}",
                    channel.label()
                ),
                hashtags: None,
            })
            .collect();
        Self {
            posts,
            origin: ResultOrigin::Placeholder,
        }
    }

    /// Replace the text of the post for `channel`. Hashtags are folded: the
    /// composed text afterwards is exactly the new text. Returns false when
    /// no post exists for the channel.
    pub fn edit(&mut self, channel: Channel, new_text: impl Into<String>) -> bool {
        match self.posts.iter_mut().find(|p| p.channel == channel) {
            Some(post) => {
                post.text = new_text.into();
                post.hashtags = None;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, channel: Channel) -> Option<&GeneratedPost> {
        self.posts.iter().find(|p| p.channel == channel)
    }

    pub fn composed_text(&self, channel: Channel) -> Option<String> {
        self.get(channel).map(GeneratedPost::composed_text)
    }

    /// Character count of the composed text, shown in the results view.
    pub fn char_count(&self, channel: Channel) -> Option<usize> {
        self.composed_text(channel)
            .map(|text| text.chars().count())
    }

    pub fn posts(&self) -> &[GeneratedPost] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn origin(&self) -> ResultOrigin {
        self.origin
    }
}
