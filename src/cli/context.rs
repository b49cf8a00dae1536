//! Command execution context
//!
//! One place that loads config, opens the session store, and builds the API
//! client, so individual commands stay free of setup boilerplate.

use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::SessionStore;
use crate::cache::CacheConfig;
use crate::cli::OutputFormat;
use crate::client::ChatVerseClient;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Shared state every command runs against.
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Session store backing the client (Arc: the client holds it too)
    pub session: Arc<SessionStore>,
    /// API client with the full request pipeline
    pub client: Arc<ChatVerseClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Build a context from global CLI options.
    ///
    /// Precedence for the API host: `--api-host` flag (or env), then the
    /// config file, then the production default. `--no-cache` disables the
    /// response cache regardless of config.
    pub fn new(
        format: OutputFormat,
        api_host_override: Option<&str>,
        config_path: Option<&str>,
        no_cache: bool,
    ) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(PathBuf::from(path))?,
            None => Config::load()?,
        };

        let session = Arc::new(open_session_store(config_path)?);

        let api_host = api_host_override
            .map(str::to_string)
            .or_else(|| config.api_host.clone());

        let mut cache_config: CacheConfig = config.preferences.cache.to_cache_config();
        if no_cache {
            cache_config.enabled = false;
        }

        let client = Arc::new(ChatVerseClient::with_base_url(
            session.clone(),
            api_host,
            cache_config,
        )?);

        Ok(Self {
            config,
            session,
            client,
            format,
        })
    }

    /// Fail early when no token is stored.
    pub fn require_auth(&self) -> Result<()> {
        if self.session.token().is_none() {
            return Err(ConfigError::NotSignedIn.into());
        }
        Ok(())
    }

    /// The agent a command should act on: explicit ID wins, then the
    /// configured default.
    pub fn resolve_agent(&self, explicit: Option<&str>) -> Result<String> {
        self.config.resolve_agent(explicit)
    }
}

/// The session file lives next to the config file, so a `--config` override
/// relocates both.
pub fn open_session_store(config_path: Option<&str>) -> Result<SessionStore> {
    match config_path {
        Some(path) => {
            let config = PathBuf::from(path);
            let dir = config
                .parent()
                .ok_or_else(|| ConfigError::Invalid(format!("Bad config path: {}", path)))?;
            SessionStore::open_at(&dir.join("session.yaml"))
        }
        None => SessionStore::open(),
    }
}
