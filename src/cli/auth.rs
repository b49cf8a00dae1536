//! Login, logout, and whoami commands

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::CommandContext;
use crate::client::ChatVerseApi;
use crate::error::Result;
use crate::models::UserDisplay;
use crate::output;

/// Run the login command. Email and password are prompted unless the email
/// was passed on the command line.
pub async fn login(ctx: &CommandContext, email: Option<&str>) -> Result<()> {
    let email = match email {
        Some(email) => email.to_string(),
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .interact_text()?,
    };

    let password: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    let login = ctx.client.login(&email, &password).await?;

    println!(
        "{} Signed in as {}",
        "✓".green(),
        login.user.email.bold()
    );

    Ok(())
}

/// Run the logout command: clear the stored session.
pub fn logout(ctx: &CommandContext) -> Result<()> {
    if ctx.session.token().is_none() {
        println!("Not signed in.");
        return Ok(());
    }

    ctx.session.clear()?;
    println!("{} Signed out.", "✓".green());

    Ok(())
}

/// Run the whoami command: fetch the signed-in user from the API.
pub async fn whoami(ctx: &CommandContext) -> Result<()> {
    ctx.require_auth()?;

    let user = ctx.client.current_user().await?;
    let rows = vec![UserDisplay::from(user)];
    output::print(&rows, ctx.format)?;

    Ok(())
}
