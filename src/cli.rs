use crate::config::{ExplorerConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "profile-explorer")]
#[command(about = "Look up a GitHub user and page through their repositories")]
#[command(version)]
pub struct Cli {
    /// User to look up right away
    pub query: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "EXPLORER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Repository page to show after the lookup
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Start in dark mode
    #[arg(long)]
    pub dark: bool,

    /// Keep reading commands from stdin after the first lookup
    #[arg(short, long)]
    pub interactive: bool,
}

impl Cli {
    pub fn config(&self) -> Result<ExplorerConfig> {
        ExplorerConfig::new(&self.api_url, self.timeout)
    }
}

/// A line typed in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Lookup(String),
    Page(u32),
    Theme,
    Show,
    Help,
    Quit,
}

impl ReplCommand {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            // The lookup query is sent as typed, even when empty.
            "lookup" | "l" => Ok(ReplCommand::Lookup(rest.to_string())),
            // Pages start at 1, same as `--page`.
            "page" | "p" => match rest.parse::<u32>() {
                Ok(page) if page >= 1 => Ok(ReplCommand::Page(page)),
                _ => Err(format!("Not a page number: {:?}", rest)),
            },
            "theme" | "t" => Ok(ReplCommand::Theme),
            "show" | "s" | "" => Ok(ReplCommand::Show),
            "help" | "h" | "?" => Ok(ReplCommand::Help),
            "quit" | "q" | "exit" => Ok(ReplCommand::Quit),
            other => Err(format!("Unknown command: {}", other)),
        }
    }
}
