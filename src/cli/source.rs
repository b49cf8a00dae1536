//! Knowledge source commands

use std::io::Read;

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::cli::CommandContext;
use crate::client::ChatVerseApi;
use crate::client::models::{
    DatabaseSourceRequest, QaPair, QaSourceRequest, TextSourceRequest, WebsiteSourceRequest,
};
use crate::error::{Error, Result};
use crate::models::SourceDisplay;
use crate::output;

/// List an agent's knowledge sources
pub async fn list(ctx: &CommandContext, agent: Option<&str>) -> Result<()> {
    ctx.require_auth()?;

    let agent_id = ctx.resolve_agent(agent)?;
    let sources = ctx.client.list_sources(&agent_id).await?;

    log::debug!("Fetched {} sources for agent {}", sources.len(), agent_id);

    let rows: Vec<SourceDisplay> = sources.into_iter().map(SourceDisplay::from).collect();
    output::print(&rows, ctx.format)
}

/// Add a plain text source; content comes from --content or stdin
pub async fn add_text(
    ctx: &CommandContext,
    agent: Option<&str>,
    title: String,
    content: Option<String>,
) -> Result<()> {
    ctx.require_auth()?;
    let agent_id = ctx.resolve_agent(agent)?;

    let content = match content {
        Some(content) => content,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if content.trim().is_empty() {
        return Err(Error::Other("Text content is empty".to_string()));
    }

    let req = TextSourceRequest { title, content };
    let source = ctx.client.add_text_source(&agent_id, &req).await?;

    println!("{} Added text source {} ({})", "✓".green(), source.title.bold(), source.id);
    Ok(())
}

/// Add a website source
pub async fn add_website(
    ctx: &CommandContext,
    agent: Option<&str>,
    url: String,
    crawl: bool,
) -> Result<()> {
    ctx.require_auth()?;
    let agent_id = ctx.resolve_agent(agent)?;

    let req = WebsiteSourceRequest { url, crawl };
    let source = ctx.client.add_website_source(&agent_id, &req).await?;

    println!("{} Added website source {}", "✓".green(), source.title.bold());
    if crawl {
        println!("  Crawling linked pages; check status with 'verseop source list'");
    }
    Ok(())
}

/// Add a database source
pub async fn add_database(
    ctx: &CommandContext,
    agent: Option<&str>,
    connection_uri: String,
    tables: Vec<String>,
) -> Result<()> {
    ctx.require_auth()?;
    let agent_id = ctx.resolve_agent(agent)?;

    let req = DatabaseSourceRequest {
        connection_uri,
        tables,
    };
    let source = ctx.client.add_database_source(&agent_id, &req).await?;

    println!("{} Added database source {}", "✓".green(), source.title.bold());
    Ok(())
}

/// Add a Q&A source from a JSON file of {question, answer} pairs
pub async fn add_qa(ctx: &CommandContext, agent: Option<&str>, file: &str) -> Result<()> {
    ctx.require_auth()?;
    let agent_id = ctx.resolve_agent(agent)?;

    let contents = std::fs::read_to_string(file)?;
    let pairs: Vec<QaPair> = serde_json::from_str(&contents)?;

    if pairs.is_empty() {
        return Err(Error::Other(format!("No Q&A pairs found in {}", file)));
    }

    let count = pairs.len();
    let req = QaSourceRequest { pairs };
    let source = ctx.client.add_qa_source(&agent_id, &req).await?;

    println!(
        "{} Added Q&A source {} ({} pairs)",
        "✓".green(),
        source.id,
        count
    );
    Ok(())
}

/// Delete a knowledge source, with confirmation unless --yes
pub async fn delete(ctx: &CommandContext, source_id: &str, yes: bool) -> Result<()> {
    ctx.require_auth()?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete source {}?", source_id))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    ctx.client.delete_source(source_id).await?;
    println!("{} Deleted source {}", "✓".green(), source_id);
    Ok(())
}
