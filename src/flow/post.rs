//! PostGeneration stage: pick channels and tone for the chosen topic, then
//! generate one post per channel in a single call.

use anyhow::Result;
use dialoguer::Select;

use crate::api::ApiClient;
use crate::config::Config;
use crate::ui::style::dim;
use crate::workflow::WorkflowSession;
use crate::workflow::posts::PostResultSet;
use crate::workflow::types::{Channel, ChannelSelection, ChannelTone};

use super::view::{channel_option_label, print_bullet, print_error, print_step};

pub async fn run_stage(
    api: &ApiClient,
    config: &Config,
    session: &mut WorkflowSession,
) -> Result<()> {
    print_step(3, 4, "Post Generation");

    let topic = session
        .chosen_topic()
        .map(str::to_string)
        .unwrap_or_default();
    print_bullet("Chosen topic:");
    for line in topic.lines() {
        println!("      {line}");
    }
    println!();

    loop {
        let Some(channels) = pick_channels()? else {
            session.back()?;
            return Ok(());
        };
        let tone = pick_tone()?;

        session.begin_request()?;
        println!("  {}", dim("generating posts…"));
        let outcome = api
            .generate_posts(&topic, channels.members(), tone)
            .await;
        session.finish_request();

        let set = match outcome.and_then(|payload| PostResultSet::from_response(&payload)) {
            Ok(set) => set,
            Err(e) => {
                print_error(&e.to_string());
                if !config.degraded_fallback {
                    continue;
                }
                PostResultSet::placeholder(&topic, channels.members())
            }
        };

        session.store_posts(set)?;
        return Ok(());
    }
}

/// Multi-select with per-member toggle. An empty set blocks submission;
/// `None` means the user chose to step back instead.
fn pick_channels() -> Result<Option<ChannelSelection>> {
    let mut selection = ChannelSelection::with_default();

    loop {
        let mut items: Vec<String> = Channel::ALL
            .iter()
            .map(|&c| channel_option_label(c, selection.contains(c)))
            .collect();
        items.push("Done — choose tone".to_string());
        items.push("Back to topic".to_string());

        let done = items.len() - 2;
        let back = items.len() - 1;

        let choice = Select::new()
            .with_prompt("  Toggle target channels")
            .items(&items)
            .default(done)
            .interact()?;

        if choice == back {
            return Ok(None);
        }
        if choice == done {
            if selection.is_empty() {
                // Client-side validation: never reaches the network.
                print_error("select at least one channel");
                continue;
            }
            return Ok(Some(selection));
        }
        selection.toggle(Channel::ALL[choice]);
    }
}

fn pick_tone() -> Result<ChannelTone> {
    let items: Vec<String> = ChannelTone::ALL
        .iter()
        .map(|&t| format!("{:<14} — {}", t.label(), t.description()))
        .collect();

    let choice = Select::new()
        .with_prompt("  Tone of voice")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(ChannelTone::ALL[choice])
}
