use clap::{ArgAction, ArgGroup, Parser, Subcommand};

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "portfoliobot",
    version,
    about = "Terminal portfolio with an LLM-backed assistant"
)]
#[command(group(
    ArgGroup::new("model_group")
        .args(["model", "no_model"])
        .multiple(false)
))]
pub struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Model name to use (e.g. gemini-2.5-flash)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Disable model calls; return dummy replies instead
    #[arg(long, global = true)]
    pub no_model: bool,

    /// API key (otherwise uses GEMINI_API_KEY env var or the config file)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Base URL of the generation API
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands, e.g. `portfoliobot insight 2`
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the whole portfolio
    Profile {
        /// Show the long-form summary instead of the brief one
        #[arg(long)]
        full: bool,
    },

    /// List projects with their numbers
    Projects,

    /// Ask the assistant for a future technical direction for one project
    Insight {
        /// Project number (see `projects`) or part of its title
        project: String,
    },

    /// Chat with the portfolio's digital assistant
    Chat,
}
