use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "stale-prs")]
#[command(about = "Find open pull requests that have gone stale", version)]
#[command(after_help = "EXAMPLES:
    stale-prs stale --repo mantidproject/mantid      List PRs idle for 7+ days
    stale-prs stale --threshold 30 --format json     Use a 30 day threshold
    stale-prs init                                   Write a config file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress informational messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List open pull requests that have been inactive past the threshold
    #[command(
        alias = "s",
        after_help = "EXAMPLES:
    stale-prs stale
    stale-prs stale --repo rust-lang/rust --threshold 30
    stale-prs stale --page-size 50 --format compact"
    )]
    Stale(StaleArgs),
    /// Initialize configuration
    Init,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    stale-prs completions bash > ~/.bash_completion.d/stale-prs
    stale-prs completions zsh > ~/.zfunc/_stale-prs
    stale-prs completions fish > ~/.config/fish/completions/stale-prs.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args, Debug)]
pub struct StaleArgs {
    /// Repository as owner/name (defaults to owner/repo from config)
    #[arg(long, short)]
    pub repo: Option<String>,

    /// Days without activity before a PR counts as stale [default: 7]
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    pub threshold: Option<u32>,

    /// Pull requests fetched per request, at most 100 [default: 100]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: Option<u32>,
}
