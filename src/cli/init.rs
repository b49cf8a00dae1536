//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

use crate::config::Config;
use crate::error::Result;

/// Run the init command: interactive first-time setup.
pub async fn run(config_path: Option<&str>, api_host: Option<&str>) -> Result<()> {
    println!("{}", "Welcome to verseop!".bold().green());
    println!("Let's set up your ChatVerse configuration.\n");

    let mut config = load_existing(config_path);

    if let Some(host) = api_host {
        config.api_host = Some(host.to_string());
    } else {
        let use_custom = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Use a custom API host?")
            .default(false)
            .interact()?;

        if use_custom {
            let host: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("API host (e.g. http://localhost:4000)")
                .interact_text()?;
            config.api_host = Some(host);
        } else {
            config.api_host = None;
        }
    }

    let cache = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Cache GET responses for 60 seconds?")
        .default(true)
        .interact()?;
    config.preferences.cache.enabled = cache;

    let path = match config_path {
        Some(p) => std::path::PathBuf::from(p),
        None => Config::default_path()?,
    };
    config.save_to(path.clone())?;

    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Sign in to ChatVerse", "verseop login".cyan());
    println!("  {} - List your agents", "verseop agent list".cyan());

    Ok(())
}

/// Re-running init keeps existing settings as the starting point.
fn load_existing(config_path: Option<&str>) -> Config {
    let result = match config_path {
        Some(path) => Config::load_from(path.into()),
        None => Config::load(),
    };
    result.unwrap_or_default()
}
