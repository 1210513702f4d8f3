//! Interactive flow: the terminal forms driving each workflow stage.
//!
//! The stage loop dispatches on [`WorkflowSession::stage`]; each stage module
//! collects input, calls the remote layer, and applies the resulting
//! transition. Every remote failure returns control to the current stage.

pub mod auth;
pub mod post;
pub mod profile;
pub mod results;
pub mod topic;
pub mod view;

use anyhow::Result;

use crate::api::ApiClient;
use crate::config::Config;
use crate::workflow::{WorkflowSession, WorkflowStage};

use view::print_welcome_banner;

/// Run the whole interactive workflow: session gate, then the cyclic
/// four-stage loop until the user quits from the results view.
pub async fn run(config: &Config) -> Result<()> {
    print_welcome_banner();

    let api = ApiClient::from_config(config)?;
    auth::ensure_session(&api).await?;

    let mut session = WorkflowSession::new();
    loop {
        match session.stage() {
            WorkflowStage::ProfileEntry => profile::run_stage(&api, &mut session).await?,
            WorkflowStage::TopicGeneration => {
                topic::run_stage(&api, config, &mut session).await?;
            }
            WorkflowStage::PostGeneration => post::run_stage(&api, config, &mut session).await?,
            WorkflowStage::Results => {
                if results::run_stage(&mut session)? {
                    return Ok(());
                }
            }
        }
    }
}
