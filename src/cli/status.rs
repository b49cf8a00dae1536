//! Status command implementation

use colored::Colorize;

use crate::auth::SessionStore;
use crate::cli::context::open_session_store;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration and session status.
///
/// Works without a config file so users can see what is missing.
pub fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}\n", "Verseop Status".bold());

    let config_result = match config_path {
        Some(path) => Config::load_from(path.into()),
        None => Config::load(),
    };

    match config_result {
        Ok(config) => {
            let path = match config_path {
                Some(p) => p.into(),
                None => Config::default_path()?,
            };
            println!("Config file: {}", path.display().to_string().cyan());

            if let Some(ref host) = config.api_host {
                println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
            }

            if let Some(ref agent) = config.default_agent {
                println!("{} Default agent: {}", "✓".green(), agent);
            } else {
                println!("{} No default agent set", "○".dimmed());
                println!("  → Run 'verseop agent use <ID>' to set one");
            }

            if config.preferences.cache.enabled {
                println!(
                    "{} Response cache enabled ({}s TTL)",
                    "✓".green(),
                    config.preferences.cache.ttl_secs
                );
            } else {
                println!("{} Response cache disabled", "○".dimmed());
            }
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!("  → Run {} to create one", "verseop init".cyan());
        }
    }

    println!();

    match open_session_store(config_path) {
        Ok(session) => print_session(&session),
        Err(_) => println!("{} Could not read session state", "✗".red()),
    }

    println!();
    Ok(())
}

fn print_session(session: &SessionStore) {
    match session.token() {
        Some(_) => {
            let who = session
                .user()
                .map(|u| u.email)
                .unwrap_or_else(|| "unknown user".to_string());

            if session.is_token_expired() {
                println!("{} Signed in as {} (token expired)", "⚠".yellow(), who);
                println!("  → Run {} to refresh", "verseop login".cyan());
            } else if let Some(expires_at) = session.token_expiry() {
                let remaining = expires_at.signed_duration_since(chrono::Utc::now());
                println!(
                    "{} Signed in as {} (token valid for {}h {}m)",
                    "✓".green(),
                    who.bold(),
                    remaining.num_hours(),
                    remaining.num_minutes() % 60
                );
            } else {
                println!("{} Signed in as {}", "✓".green(), who.bold());
            }
        }
        None => {
            println!("{} Not signed in", "✗".red());
            println!("  → Run {} to authenticate", "verseop login".cyan());
        }
    }
}
