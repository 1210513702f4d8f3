//! TopicGeneration stage: collect a draft and an optional suggestion tag,
//! generate topic candidates, then let the user pick, edit, or regenerate.

use anyhow::Result;
use dialoguer::{Editor, Input, Select};

use crate::api::ApiClient;
use crate::config::Config;
use crate::ui::style::{dim, success};
use crate::workflow::WorkflowSession;
use crate::workflow::topics::TopicCandidateSet;
use crate::workflow::types::{TagSelection, TopicSuggestionTag};

use super::view::{print_bullet, print_candidates, print_error, print_step};

pub async fn run_stage(
    api: &ApiClient,
    config: &Config,
    session: &mut WorkflowSession,
) -> Result<()> {
    print_step(2, 4, "Topic Candidates");

    loop {
        // Reuse candidates that survived a round trip through other stages;
        // otherwise collect inputs and generate a fresh batch.
        if session.topics().is_none() {
            let generated = generate_round(api, config, session).await?;
            if !generated {
                // Generation failed (and no placeholder): offer the way back.
                let choice = Select::new()
                    .with_prompt("  Try again or go back to the profile?")
                    .items(&["Try again", "Back to profile"])
                    .default(0)
                    .interact()?;
                if choice == 1 {
                    session.back()?;
                    return Ok(());
                }
                continue;
            }
        }

        if review_candidates(session)? {
            return Ok(());
        }
        // Regenerate: drop the current batch and loop.
    }
}

/// Collect context + tag and run one generation call. Returns false when the
/// call failed and nothing was stored.
async fn generate_round(
    api: &ApiClient,
    config: &Config,
    session: &mut WorkflowSession,
) -> Result<bool> {
    print_bullet("Describe what you want to post about. Leave empty to let the tag lead.");
    let context: String = Input::new()
        .with_prompt("  Draft / direction")
        .allow_empty(true)
        .interact_text()?;
    let context = context.trim().to_string();

    let tag = pick_tag()?;

    session.begin_request()?;
    println!("  {}", dim("generating topic candidates…"));
    let outcome = api.generate_topics(&context, tag).await;
    session.finish_request();

    let set = match outcome.and_then(|payload| TopicCandidateSet::from_response(&payload)) {
        Ok(set) => set,
        Err(e) => {
            print_error(&e.to_string());
            if !config.degraded_fallback {
                return Ok(false);
            }
            TopicCandidateSet::placeholder(&context)
        }
    };

    session.store_topics(set)?;
    Ok(true)
}

/// Single-select with toggle semantics: picking the active tag clears it.
fn pick_tag() -> Result<Option<TopicSuggestionTag>> {
    let mut selection = TagSelection::new();

    loop {
        let mut items: Vec<String> = TopicSuggestionTag::ALL
            .iter()
            .map(|&tag| {
                let marker = if selection.active() == Some(tag) {
                    "●"
                } else {
                    "○"
                };
                format!("{marker} {:<16} — {}", tag.label(), tag.description())
            })
            .collect();
        items.push("Done — generate".to_string());

        let choice = Select::new()
            .with_prompt("  Stuck for a topic? Toggle a starting point (optional)")
            .items(&items)
            .default(items.len() - 1)
            .interact()?;

        if choice == items.len() - 1 {
            return Ok(selection.active());
        }
        selection.toggle(TopicSuggestionTag::ALL[choice]);
    }
}

/// Review loop over the stored batch. Returns true when the stage changed
/// (proceed or back), false to regenerate.
fn review_candidates(session: &mut WorkflowSession) -> Result<bool> {
    loop {
        let set = session
            .topics()
            .expect("review requires a stored candidate set");
        print_candidates(set);

        let active_summary = set.active().summary.clone();
        let actions = [
            format!("Use \"{active_summary}\" and continue"),
            "Choose a different candidate".to_string(),
            "Edit a candidate".to_string(),
            "Regenerate".to_string(),
            "Back to profile".to_string(),
        ];

        let choice = Select::new()
            .with_prompt("  Next")
            .items(&actions)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                session.choose_topic()?;
                println!("  {} topic captured", success("✓"));
                return Ok(true);
            }
            1 => {
                let set = session.topics_mut().expect("candidate set present");
                let index = pick_candidate(set, "  Make active")?;
                set.select(index);
            }
            2 => {
                let set = session.topics_mut().expect("candidate set present");
                let index = pick_candidate(set, "  Edit which candidate?")?;
                let current = set.candidates()[index].body.clone();
                if let Some(edited) = Editor::new().edit(&current)? {
                    let trimmed = edited.trim();
                    if !trimmed.is_empty() {
                        set.edit(index, trimmed);
                    }
                }
            }
            3 => {
                session.discard_topics()?;
                return Ok(false);
            }
            _ => {
                session.back()?;
                return Ok(true);
            }
        }
    }
}

fn pick_candidate(set: &TopicCandidateSet, prompt: &str) -> Result<usize> {
    let items: Vec<String> = set
        .candidates()
        .iter()
        .map(|c| c.summary.clone())
        .collect();
    let index = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(set.active_index())
        .interact()?;
    Ok(index)
}
