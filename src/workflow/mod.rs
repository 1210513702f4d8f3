//! Workflow state machine.
//!
//! Sequences the four stages of a generation session and carries data
//! between them, enforcing the allowed transition graph:
//!
//! ```text
//! profile_entry    -> topic_generation   (submit profile)
//! topic_generation -> topic_generation   (generate topics)
//! topic_generation -> post_generation    (choose + proceed)
//! topic_generation -> profile_entry      (back; profile retained)
//! post_generation  -> results            (generate posts)
//! post_generation  -> topic_generation   (back; candidates discarded)
//! results          -> results            (edit a post)
//! results          -> topic_generation   (new topic; results discarded)
//! results          -> profile_entry      (edit profile; topic and results discarded)
//! ```
//!
//! The machine is cyclic by design; there is no terminal state.

pub mod posts;
pub mod topics;
pub mod types;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::WorkflowError;

use posts::PostResultSet;
use topics::TopicCandidateSet;
use types::{BusinessProfile, Channel};

/// One step of the four-step workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowStage {
    #[default]
    ProfileEntry,
    TopicGeneration,
    PostGeneration,
    Results,
}

/// Check whether `from -> to` is an edge of the stage graph.
pub fn is_valid_transition(from: WorkflowStage, to: WorkflowStage) -> bool {
    use WorkflowStage::{PostGeneration, ProfileEntry, Results, TopicGeneration};
    matches!(
        (from, to),
        (ProfileEntry, TopicGeneration)
            | (TopicGeneration, TopicGeneration)
            | (TopicGeneration, PostGeneration)
            | (TopicGeneration, ProfileEntry)
            | (PostGeneration, Results)
            | (PostGeneration, TopicGeneration)
            | (Results, Results)
            | (Results, TopicGeneration)
            | (Results, ProfileEntry)
    )
}

/// One user's generation session: the current stage plus everything threaded
/// between stages. Single-threaded; the only in-flight guard is the busy
/// flag, which disables generation triggers while a remote call is
/// outstanding.
#[derive(Debug, Default)]
pub struct WorkflowSession {
    stage: WorkflowStage,
    profile: BusinessProfile,
    topics: Option<TopicCandidateSet>,
    chosen_topic: Option<String>,
    posts: Option<PostResultSet>,
    busy: bool,
}

impl WorkflowSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> WorkflowStage {
        self.stage
    }

    pub fn profile(&self) -> &BusinessProfile {
        &self.profile
    }

    pub fn topics(&self) -> Option<&TopicCandidateSet> {
        self.topics.as_ref()
    }

    pub fn topics_mut(&mut self) -> Option<&mut TopicCandidateSet> {
        self.topics.as_mut()
    }

    /// The topic body captured when the user proceeded to post generation.
    pub fn chosen_topic(&self) -> Option<&str> {
        self.chosen_topic.as_deref()
    }

    pub fn posts(&self) -> Option<&PostResultSet> {
        self.posts.as_ref()
    }

    // ── Busy guard ──────────────────────────────────────────────────────

    /// Mark a generation call outstanding. The triggering action must call
    /// this first and refuse to fire while it returns `Busy`.
    pub fn begin_request(&mut self) -> Result<(), WorkflowError> {
        if self.busy {
            return Err(WorkflowError::Busy);
        }
        self.busy = true;
        Ok(())
    }

    pub fn finish_request(&mut self) {
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    // ── Transitions ─────────────────────────────────────────────────────

    fn guard(&self, expected: WorkflowStage, action: &str) -> Result<(), WorkflowError> {
        if self.stage != expected {
            return Err(WorkflowError::InvalidTransition {
                stage: self.stage.to_string(),
                action: action.to_string(),
            });
        }
        Ok(())
    }

    /// ProfileEntry -> TopicGeneration. The caller persists the profile via
    /// the remote layer before invoking this; the session keeps the copy for
    /// re-editing on the way back.
    pub fn submit_profile(&mut self, profile: BusinessProfile) -> Result<(), WorkflowError> {
        self.guard(WorkflowStage::ProfileEntry, "submit the profile")?;
        self.profile = profile;
        self.stage = WorkflowStage::TopicGeneration;
        Ok(())
    }

    /// Replace the profile in place (prefetch at ProfileEntry entry).
    pub fn load_profile(&mut self, profile: BusinessProfile) {
        self.profile = profile;
    }

    /// TopicGeneration -> TopicGeneration (results shown). The previous
    /// candidate set is discarded; the batch is always fresh.
    pub fn store_topics(&mut self, set: TopicCandidateSet) -> Result<(), WorkflowError> {
        self.guard(WorkflowStage::TopicGeneration, "store topic candidates")?;
        self.topics = Some(set);
        Ok(())
    }

    /// Discard the current candidate batch ahead of regeneration; the batch
    /// is always rebuilt fresh on submission.
    pub fn discard_topics(&mut self) -> Result<(), WorkflowError> {
        self.guard(WorkflowStage::TopicGeneration, "discard topic candidates")?;
        self.topics = None;
        Ok(())
    }

    /// TopicGeneration -> PostGeneration. Captures the active candidate body;
    /// the candidate set itself does not survive the stage exit.
    pub fn choose_topic(&mut self) -> Result<(), WorkflowError> {
        self.guard(WorkflowStage::TopicGeneration, "proceed to post generation")?;
        let set = self.topics.take().ok_or_else(|| {
            WorkflowError::Validation("generate topic candidates before proceeding".into())
        })?;
        self.chosen_topic = Some(set.active().body.clone());
        self.stage = WorkflowStage::PostGeneration;
        Ok(())
    }

    /// PostGeneration -> Results.
    pub fn store_posts(&mut self, set: PostResultSet) -> Result<(), WorkflowError> {
        self.guard(WorkflowStage::PostGeneration, "store generated posts")?;
        self.posts = Some(set);
        self.stage = WorkflowStage::Results;
        Ok(())
    }

    /// Step back one stage. From TopicGeneration the profile stays
    /// re-editable; from PostGeneration the candidate set is discarded and
    /// must be regenerated, while the profile is kept.
    pub fn back(&mut self) -> Result<(), WorkflowError> {
        match self.stage {
            WorkflowStage::TopicGeneration => {
                self.stage = WorkflowStage::ProfileEntry;
                Ok(())
            }
            WorkflowStage::PostGeneration => {
                self.topics = None;
                self.chosen_topic = None;
                self.posts = None;
                self.stage = WorkflowStage::TopicGeneration;
                Ok(())
            }
            _ => Err(WorkflowError::InvalidTransition {
                stage: self.stage.to_string(),
                action: "step back".to_string(),
            }),
        }
    }

    /// Results -> Results: replace the text of one post in place.
    pub fn edit_post(&mut self, channel: Channel, new_text: &str) -> Result<(), WorkflowError> {
        self.guard(WorkflowStage::Results, "edit a post")?;
        let posts = self.posts.as_mut().ok_or_else(|| {
            WorkflowError::Validation("no generated posts to edit".into())
        })?;
        if !posts.edit(channel, new_text) {
            return Err(WorkflowError::Validation(format!(
                "no post for channel {channel}"
            )));
        }
        Ok(())
    }

    /// Results -> TopicGeneration: start over from a new topic; the previous
    /// results are discarded.
    pub fn new_topic(&mut self) -> Result<(), WorkflowError> {
        self.guard(WorkflowStage::Results, "start a new topic")?;
        self.posts = None;
        self.topics = None;
        self.chosen_topic = None;
        self.stage = WorkflowStage::TopicGeneration;
        Ok(())
    }

    /// Results -> ProfileEntry: back to the profile; topic and results are
    /// discarded.
    pub fn edit_profile(&mut self) -> Result<(), WorkflowError> {
        self.guard(WorkflowStage::Results, "edit the profile")?;
        self.posts = None;
        self.topics = None;
        self.chosen_topic = None;
        self.stage = WorkflowStage::ProfileEntry;
        Ok(())
    }
}
