//! Results stage: review the generated posts, edit them in place, or loop
//! back for a new topic or a profile change.

use anyhow::Result;
use dialoguer::{Editor, Select};

use crate::ui::style::success;
use crate::workflow::WorkflowSession;
use crate::workflow::types::Channel;

use super::view::{print_posts, print_step};

/// Returns true when the user is done and the program should exit.
pub fn run_stage(session: &mut WorkflowSession) -> Result<bool> {
    print_step(4, 4, "Results");

    loop {
        let posts = session.posts().expect("results stage requires posts");
        print_posts(posts);

        let choice = Select::new()
            .with_prompt("  Next")
            .items(&[
                "Edit a post",
                "New topic",
                "Edit profile",
                "Done — quit",
            ])
            .default(3)
            .interact()?;

        match choice {
            0 => {
                let channel = pick_channel(session)?;
                let current = session
                    .posts()
                    .and_then(|p| p.composed_text(channel))
                    .unwrap_or_default();
                if let Some(edited) = Editor::new().edit(&current)? {
                    let trimmed = edited.trim();
                    if !trimmed.is_empty() {
                        session.edit_post(channel, trimmed)?;
                        println!("  {} post updated", success("✓"));
                    }
                }
            }
            1 => {
                session.new_topic()?;
                return Ok(false);
            }
            2 => {
                session.edit_profile()?;
                return Ok(false);
            }
            _ => return Ok(true),
        }
    }
}

fn pick_channel(session: &WorkflowSession) -> Result<Channel> {
    let posts = session.posts().expect("results stage requires posts");
    let channels: Vec<Channel> = posts.posts().iter().map(|p| p.channel).collect();
    let items: Vec<&str> = channels.iter().map(|c| c.label()).collect();

    let choice = Select::new()
        .with_prompt("  Which post?")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(channels[choice])
}
