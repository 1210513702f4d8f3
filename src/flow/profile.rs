//! ProfileEntry stage: fetch the stored salon profile, let the user edit it,
//! persist it, and move on to topic generation.

use anyhow::Result;
use dialoguer::Input;

use crate::api::ApiClient;
use crate::ui::style::{dim, success};
use crate::workflow::WorkflowSession;
use crate::workflow::types::BusinessProfile;

use super::view::{print_bullet, print_error, print_step};

pub async fn run_stage(api: &ApiClient, session: &mut WorkflowSession) -> Result<()> {
    print_step(1, 4, "Salon Profile");
    print_bullet("Used as generation context. Every field may stay empty.");

    // Prefetch the stored profile once on stage entry; not-found just means
    // there is nothing to prefill yet.
    if session.profile().is_empty() {
        println!("  {}", dim("fetching stored profile…"));
        match api.fetch_profile().await {
            Ok(Some(profile)) => session.load_profile(profile),
            Ok(None) => {}
            Err(e) => print_error(&e.to_string()),
        }
    }

    let current = session.profile().clone();
    let profile = BusinessProfile {
        name: field("Salon name", &current.name)?,
        location: field("Location", &current.location)?,
        strengths: field("Strengths", &current.strengths)?,
        services: field("Services", &current.services)?,
    };

    println!("  {}", dim("saving profile…"));
    match api.update_profile(&profile).await {
        Ok(()) => {
            println!("  {} profile saved", success("✓"));
            session.submit_profile(profile)?;
        }
        Err(e) => {
            // Stay on this stage; the user can retry or fix the input.
            print_error(&e.to_string());
        }
    }
    Ok(())
}

fn field(prompt: &str, current: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(format!("  {prompt}"))
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}
