//! Command-line argument parsing.

use std::time::Duration;

use clap::{Parser, Subcommand};
use fetch_core::{FetchConfig, StatusPolicy};

use crate::app::Example;

/// Fetch users and todos and create a post against the placeholder API.
#[derive(Parser, Debug, Clone)]
#[command(name = "fetch-demo")]
#[command(about = "Run the placeholder API examples and render their request state")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the placeholder API (overrides PLACEHOLDER_BASE_URL).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds (overrides FETCH_TIMEOUT_MS).
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Parse response bodies even when the status is not 2xx.
    #[arg(long)]
    pub accept_any_status: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// GET /users and show the first user.
    Users,
    /// GET /todos and show the whole list.
    Todos,
    /// POST /posts with the sample post.
    Post,
    /// Run every example in turn.
    All,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Layer the flags on top of an environment-derived config.
    pub fn apply(&self, mut config: FetchConfig) -> FetchConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout = Duration::from_millis(timeout_ms);
        }
        if self.accept_any_status {
            config.status_policy = StatusPolicy::AcceptAny;
        }
        config
    }

    pub fn examples(&self) -> Vec<Example> {
        match self.command.unwrap_or(Command::All) {
            Command::Users => vec![Example::Users],
            Command::Todos => vec![Example::Todos],
            Command::Post => vec![Example::CreatePost],
            Command::All => vec![Example::Users, Example::Todos, Example::CreatePost],
        }
    }
}
