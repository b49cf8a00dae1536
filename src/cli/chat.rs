//! Chat commands

use colored::Colorize;

use crate::cli::{CommandContext, PaginationArgs};
use crate::client::ChatVerseApi;
use crate::error::Result;
use crate::models::{MessageDisplay, SessionDisplay};
use crate::output;

/// List chat sessions for an agent
pub async fn sessions(
    ctx: &CommandContext,
    agent: Option<&str>,
    pagination: &PaginationArgs,
) -> Result<()> {
    ctx.require_auth()?;

    let agent_id = ctx.resolve_agent(agent)?;
    let params = pagination.to_params(ctx.config.preferences.page_size);
    let sessions = ctx.client.list_sessions(&agent_id, Some(&params)).await?;

    let rows: Vec<SessionDisplay> = sessions.into_iter().map(SessionDisplay::from).collect();
    output::print(&rows, ctx.format)
}

/// Show the messages in a session
pub async fn history(ctx: &CommandContext, session_id: &str) -> Result<()> {
    ctx.require_auth()?;

    let messages = ctx.client.session_messages(session_id).await?;

    let rows: Vec<MessageDisplay> = messages.into_iter().map(MessageDisplay::from).collect();
    output::print(&rows, ctx.format)
}

/// Send one message, creating a session first when none was given
pub async fn send(
    ctx: &CommandContext,
    agent: Option<&str>,
    session: Option<&str>,
    message: &str,
) -> Result<()> {
    ctx.require_auth()?;

    let session_id = match session {
        Some(id) => id.to_string(),
        None => {
            let agent_id = ctx.resolve_agent(agent)?;
            let session = ctx.client.create_session(&agent_id).await?;
            log::debug!("Created session {}", session.id);
            session.id
        }
    };

    let reply = ctx.client.send_message(&session_id, message).await?;

    println!("{}", reply.content);
    eprintln!("{}", format!("(session {})", session_id).dimmed());

    Ok(())
}
