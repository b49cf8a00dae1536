//! Agent management commands

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::cli::{CommandContext, PaginationArgs};
use crate::client::ChatVerseApi;
use crate::client::models::{CreateAgentRequest, UpdateAgentRequest};
use crate::error::Result;
use crate::models::AgentDisplay;
use crate::output;

/// List agents
pub async fn list(ctx: &CommandContext, pagination: &PaginationArgs) -> Result<()> {
    ctx.require_auth()?;

    let params = pagination.to_params(ctx.config.preferences.page_size);
    let agents = ctx.client.list_agents(Some(&params)).await?;

    log::debug!("Fetched {} agents", agents.len());

    let rows: Vec<AgentDisplay> = agents.into_iter().map(AgentDisplay::from).collect();
    output::print(&rows, ctx.format)
}

/// Show one agent
pub async fn get(ctx: &CommandContext, agent_id: Option<&str>) -> Result<()> {
    ctx.require_auth()?;

    let agent_id = ctx.resolve_agent(agent_id)?;
    let agent = ctx.client.get_agent(&agent_id).await?;

    let rows = vec![AgentDisplay::from(agent)];
    output::print(&rows, ctx.format)
}

/// Create a new agent
pub async fn create(
    ctx: &CommandContext,
    name: String,
    model: Option<String>,
    instructions: Option<String>,
    temperature: Option<f32>,
) -> Result<()> {
    ctx.require_auth()?;

    let req = CreateAgentRequest {
        name,
        model,
        instructions,
        temperature,
    };
    let agent = ctx.client.create_agent(&req).await?;

    println!("{} Created agent {} ({})", "✓".green(), agent.name.bold(), agent.id);
    Ok(())
}

/// Update an agent; only the provided fields change
#[allow(clippy::too_many_arguments)]
pub async fn update(
    ctx: &CommandContext,
    agent_id: &str,
    name: Option<String>,
    model: Option<String>,
    instructions: Option<String>,
    temperature: Option<f32>,
    visibility: Option<String>,
) -> Result<()> {
    ctx.require_auth()?;

    let req = UpdateAgentRequest {
        name,
        model,
        instructions,
        temperature,
        visibility,
    };
    let agent = ctx.client.update_agent(agent_id, &req).await?;

    println!("{} Updated agent {}", "✓".green(), agent.name.bold());
    Ok(())
}

/// Delete an agent, with confirmation unless --yes
pub async fn delete(ctx: &CommandContext, agent_id: &str, yes: bool) -> Result<()> {
    ctx.require_auth()?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete agent {}? This cannot be undone", agent_id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    ctx.client.delete_agent(agent_id).await?;
    println!("{} Deleted agent {}", "✓".green(), agent_id);
    Ok(())
}

/// Set the default agent in the config file
pub fn use_agent(ctx: &CommandContext, agent_id: &str, config_path: Option<&str>) -> Result<()> {
    let mut config = ctx.config.clone();
    config.default_agent = Some(agent_id.to_string());

    match config_path {
        Some(path) => config.save_to(path.into())?,
        None => config.save()?,
    }

    println!("{} Default agent set to {}", "✓".green(), agent_id.bold());
    Ok(())
}
