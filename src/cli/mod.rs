//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod agent;
pub mod analytics;
pub mod args;
pub mod auth;
pub mod chat;
pub mod completions;
pub mod context;
pub mod init;
pub mod source;
pub mod status;

pub use args::{OutputFormat, PaginationArgs};
pub use context::CommandContext;

/// Verseop CLI - Companion for the ChatVerse agent platform
#[derive(Parser, Debug)]
#[command(name = "verseop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "VERSEOP_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override the API host
    #[arg(long, global = true, env = "VERSEOP_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "VERSEOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "VERSEOP_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass the response cache, fetch fresh data from the API
    #[arg(long, global = true, env = "VERSEOP_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize verseop configuration
    Init,

    /// Sign in to ChatVerse
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show authentication and configuration status
    Status,

    /// Manage agents
    #[command(subcommand)]
    Agent(AgentCommands),

    /// Manage knowledge sources
    #[command(subcommand)]
    Source(SourceCommands),

    /// Chat with an agent
    #[command(subcommand)]
    Chat(ChatCommands),

    /// View usage analytics
    #[command(subcommand)]
    Analytics(AnalyticsCommands),

    /// Generate shell completions
    #[command(after_help = "\
Completions (subcommands/flags):
  bash:   verseop completion bash > /etc/bash_completion.d/verseop
  zsh:    verseop completion zsh > \"${fpath[1]}/_verseop\"
  fish:   verseop completion fish > ~/.config/fish/completions/verseop.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Agent management subcommands
#[derive(Subcommand, Debug)]
pub enum AgentCommands {
    /// List agents
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show one agent
    #[command(visible_alias = "g")]
    Get {
        /// Agent ID (defaults to the configured default agent)
        agent_id: Option<String>,
    },

    /// Create a new agent
    Create {
        /// Agent name
        name: String,

        /// Backing model identifier
        #[arg(long)]
        model: Option<String>,

        /// System instructions
        #[arg(long)]
        instructions: Option<String>,

        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f32>,
    },

    /// Update an agent (only the given fields change)
    Update {
        /// Agent ID
        agent_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        instructions: Option<String>,

        #[arg(long)]
        temperature: Option<f32>,

        /// Visibility (public, private)
        #[arg(long)]
        visibility: Option<String>,
    },

    /// Delete an agent
    Delete {
        /// Agent ID
        agent_id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Set the default agent for other commands
    Use {
        /// Agent ID
        agent_id: String,
    },
}

/// Knowledge source subcommands
#[derive(Subcommand, Debug)]
pub enum SourceCommands {
    /// List an agent's knowledge sources
    #[command(visible_alias = "ls")]
    List {
        /// Agent ID (defaults to the configured default agent)
        #[arg(long, short = 'a')]
        agent: Option<String>,
    },

    /// Add a plain text source
    AddText {
        /// Source title
        title: String,

        /// Text content (reads stdin when omitted)
        #[arg(long)]
        content: Option<String>,

        #[arg(long, short = 'a')]
        agent: Option<String>,
    },

    /// Add a website source
    AddWebsite {
        /// Page URL
        url: String,

        /// Crawl linked pages under the same host
        #[arg(long)]
        crawl: bool,

        #[arg(long, short = 'a')]
        agent: Option<String>,
    },

    /// Add a database source
    AddDatabase {
        /// Connection URI
        connection_uri: String,

        /// Tables to ingest, comma-separated or repeated (default: all)
        #[arg(long, short = 't', value_delimiter = ',')]
        tables: Vec<String>,

        #[arg(long, short = 'a')]
        agent: Option<String>,
    },

    /// Add a Q&A source from a JSON file of {question, answer} pairs
    AddQa {
        /// Path to the JSON file
        file: String,

        #[arg(long, short = 'a')]
        agent: Option<String>,
    },

    /// Delete a knowledge source
    Delete {
        /// Source ID
        source_id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Chat subcommands
#[derive(Subcommand, Debug)]
pub enum ChatCommands {
    /// List chat sessions for an agent
    Sessions {
        #[arg(long, short = 'a')]
        agent: Option<String>,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show the messages in a session
    History {
        /// Session ID
        session_id: String,
    },

    /// Send one message (creates a session unless --session is given)
    Send {
        /// Message content
        message: String,

        /// Existing session to continue
        #[arg(long, short = 's')]
        session: Option<String>,

        #[arg(long, short = 'a')]
        agent: Option<String>,
    },
}

/// Analytics subcommands
#[derive(Subcommand, Debug)]
pub enum AnalyticsCommands {
    /// Show headline numbers and recent usage
    Overview {
        /// Scope to one agent
        #[arg(long, short = 'a')]
        agent: Option<String>,
    },

    /// Show a daily usage series
    Usage {
        /// Number of days to cover
        #[arg(long, short = 'd', default_value_t = 30)]
        days: u32,

        /// Scope to one agent
        #[arg(long, short = 'a')]
        agent: Option<String>,
    },
}
