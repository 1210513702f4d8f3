use serde::{Deserialize, Serialize};
use strum::Display;

// ─── Business profile ───────────────────────────────────────────────────────

/// Salon profile used as generation context. All fields are free text and
/// optional; an empty string means "omit from generation context". The core
/// passes this through to the backend unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BusinessProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub services: String,
}

impl BusinessProfile {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.location.is_empty()
            && self.strengths.is_empty()
            && self.services.is_empty()
    }
}

// ─── Topic suggestion tags ──────────────────────────────────────────────────

/// Starting-point hints for topic generation. Closed set; "none selected" is
/// modeled as `Option::None` on the selection, not as a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TopicSuggestionTag {
    Seasonal,
    CurrentEvents,
    Trend,
    MiddleAged,
    Elderly,
    SalonPr,
    DailyTalk,
}

impl TopicSuggestionTag {
    pub const ALL: [TopicSuggestionTag; 7] = [
        TopicSuggestionTag::Seasonal,
        TopicSuggestionTag::CurrentEvents,
        TopicSuggestionTag::Trend,
        TopicSuggestionTag::MiddleAged,
        TopicSuggestionTag::Elderly,
        TopicSuggestionTag::SalonPr,
        TopicSuggestionTag::DailyTalk,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TopicSuggestionTag::Seasonal => "Seasonal",
            TopicSuggestionTag::CurrentEvents => "Current events",
            TopicSuggestionTag::Trend => "Trend",
            TopicSuggestionTag::MiddleAged => "30s-50s audience",
            TopicSuggestionTag::Elderly => "50+ audience",
            TopicSuggestionTag::SalonPr => "Salon PR",
            TopicSuggestionTag::DailyTalk => "Daily talk",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TopicSuggestionTag::Seasonal => "content matched to the season",
            TopicSuggestionTag::CurrentEvents => "latest topics and news",
            TopicSuggestionTag::Trend => "trending styles and techniques",
            TopicSuggestionTag::MiddleAged => "content aimed at 30-50 year olds",
            TopicSuggestionTag::Elderly => "content aimed at 50 and up",
            TopicSuggestionTag::SalonPr => "highlight what makes the salon special",
            TopicSuggestionTag::DailyTalk => "casual everyday topics",
        }
    }
}

/// Single-select with toggle semantics: selecting the active tag clears the
/// selection back to "none".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagSelection {
    active: Option<TopicSuggestionTag>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, tag: TopicSuggestionTag) {
        if self.active == Some(tag) {
            self.active = None;
        } else {
            self.active = Some(tag);
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<TopicSuggestionTag> {
        self.active
    }
}

// ─── Tone ───────────────────────────────────────────────────────────────────

/// Voice of the generated posts. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChannelTone {
    #[default]
    Friendly,
    Professional,
    Trendy,
    Elegant,
}

impl ChannelTone {
    pub const ALL: [ChannelTone; 4] = [
        ChannelTone::Friendly,
        ChannelTone::Professional,
        ChannelTone::Trendy,
        ChannelTone::Elegant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChannelTone::Friendly => "Friendly",
            ChannelTone::Professional => "Professional",
            ChannelTone::Trendy => "Trendy",
            ChannelTone::Elegant => "Elegant",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ChannelTone::Friendly => "approachable and warm",
            ChannelTone::Professional => "trustworthy and expert",
            ChannelTone::Trendy => "tuned to what is current",
            ChannelTone::Elegant => "refined and polished",
        }
    }
}

// ─── Channels ───────────────────────────────────────────────────────────────

/// Target publishing destination.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Channel {
    Instagram,
    Threads,
    Facebook,
    Line,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Instagram,
        Channel::Threads,
        Channel::Facebook,
        Channel::Line,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Channel::Instagram => "Instagram",
            Channel::Threads => "Threads",
            Channel::Facebook => "Facebook",
            Channel::Line => "LINE",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Channel::Instagram => "hashtag-heavy, visual posts",
            Channel::Threads => "short text, real-time feel",
            Channel::Facebook => "longer copy, community tone",
            Channel::Line => "customer-facing, familiar voice",
        }
    }
}

/// Multi-select over channels. Unordered, per-member toggle; submission
/// requires a non-empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSelection {
    members: Vec<Channel>,
}

impl ChannelSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with Instagram active, matching the form default.
    pub fn with_default() -> Self {
        Self {
            members: vec![Channel::Instagram],
        }
    }

    pub fn toggle(&mut self, channel: Channel) {
        if let Some(pos) = self.members.iter().position(|c| *c == channel) {
            self.members.remove(pos);
        } else {
            self.members.push(channel);
        }
    }

    pub fn contains(&self, channel: Channel) -> bool {
        self.members.contains(&channel)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Channel] {
        &self.members
    }
}

// ─── Result origin ──────────────────────────────────────────────────────────

/// Whether a candidate or post set came from the backend or was synthesized
/// locally as degraded-mode placeholder content. Placeholder data must stay
/// distinguishable all the way to the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResultOrigin {
    #[default]
    Generated,
    Placeholder,
}

impl ResultOrigin {
    pub fn is_placeholder(self) -> bool {
        matches!(self, ResultOrigin::Placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_toggle_twice_returns_to_none() {
        let mut sel = TagSelection::new();
        sel.toggle(TopicSuggestionTag::Seasonal);
        assert_eq!(sel.active(), Some(TopicSuggestionTag::Seasonal));
        sel.toggle(TopicSuggestionTag::Seasonal);
        assert_eq!(sel.active(), None);
    }

    #[test]
    fn tag_toggle_switches_between_tags() {
        let mut sel = TagSelection::new();
        sel.toggle(TopicSuggestionTag::Trend);
        sel.toggle(TopicSuggestionTag::SalonPr);
        assert_eq!(sel.active(), Some(TopicSuggestionTag::SalonPr));
    }

    #[test]
    fn channel_toggle_twice_restores_prior_set() {
        let mut sel = ChannelSelection::with_default();
        let before = sel.clone();
        sel.toggle(Channel::Line);
        assert!(sel.contains(Channel::Line));
        sel.toggle(Channel::Line);
        assert_eq!(sel, before);
    }

    #[test]
    fn channel_selection_can_become_empty() {
        let mut sel = ChannelSelection::with_default();
        sel.toggle(Channel::Instagram);
        assert!(sel.is_empty());
    }

    #[test]
    fn channel_serializes_snake_case() {
        let json = serde_json::to_string(&Channel::Instagram).unwrap();
        assert_eq!(json, "\"instagram\"");
        let json = serde_json::to_string(&Channel::Line).unwrap();
        assert_eq!(json, "\"line\"");
    }

    #[test]
    fn tag_display_matches_wire_form() {
        assert_eq!(TopicSuggestionTag::CurrentEvents.to_string(), "current_events");
        assert_eq!(TopicSuggestionTag::SalonPr.to_string(), "salon_pr");
    }

    #[test]
    fn tone_display_matches_wire_form() {
        assert_eq!(ChannelTone::Friendly.to_string(), "friendly");
    }

    #[test]
    fn empty_profile_detected() {
        assert!(BusinessProfile::default().is_empty());
        let profile = BusinessProfile {
            name: "Salon A".into(),
            ..BusinessProfile::default()
        };
        assert!(!profile.is_empty());
    }
}
