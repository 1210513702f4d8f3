use clap::{Parser, Subcommand};

/// salonpost — interactive SNS post generation assistant for hair salons.
#[derive(Parser, Debug)]
#[command(name = "salonpost", version, about)]
pub struct Cli {
    /// Override the backend base URL for this run
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive generation workflow (default)
    Run,
    /// Log in and establish a session
    Login,
    /// Create an account and establish a session
    Signup,
    /// Show the stored salon profile
    Profile,
    /// Show the active configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_no_subcommand() {
        let cli = Cli::parse_from(["salonpost"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_base_url_override() {
        let cli = Cli::parse_from(["salonpost", "--base-url", "https://api.example.com", "run"]);
        assert_eq!(cli.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(cli.command, Some(Commands::Run));
    }
}
