#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use salonpost::api::ApiClient;
use salonpost::cli::{Cli, Commands};
use salonpost::config::{Config, validate_base_url};
use salonpost::flow;
use salonpost::ui::style::{header, value};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut config = Config::load_or_init()?;
    config.apply_env_overrides();
    if let Some(base_url) = cli.base_url.as_deref() {
        config.base_url = validate_base_url(base_url)?;
    }

    dispatch(cli, &config).await
}

async fn dispatch(cli: Cli, config: &Config) -> Result<()> {
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => flow::run(config).await,
        Commands::Login => {
            let api = ApiClient::from_config(config)?;
            let user = flow::auth::login_once(&api).await?;
            println!("signed in as {}", value(&user.email));
            Ok(())
        }
        Commands::Signup => {
            let api = ApiClient::from_config(config)?;
            let user = flow::auth::signup_once(&api).await?;
            println!("account created for {}", value(&user.email));
            Ok(())
        }
        Commands::Profile => {
            let api = ApiClient::from_config(config)?;
            match api.fetch_profile().await? {
                Some(profile) => {
                    println!("{}", header("Stored salon profile"));
                    println!("  name:      {}", profile.name);
                    println!("  location:  {}", profile.location);
                    println!("  strengths: {}", profile.strengths);
                    println!("  services:  {}", profile.services);
                }
                None => println!("no profile stored yet"),
            }
            Ok(())
        }
        Commands::Config => {
            println!("{}", header("Active configuration"));
            println!("  config:                {}", config.config_path.display());
            println!("  base_url:              {}", config.base_url);
            println!("  timeout_secs:          {}", config.timeout_secs);
            println!("  generate_timeout_secs: {}", config.generate_timeout_secs);
            println!("  degraded_fallback:     {}", config.degraded_fallback);
            Ok(())
        }
    }
}
