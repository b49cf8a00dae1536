//! Analytics commands

use colored::Colorize;
use futures::try_join;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::ChatVerseApi;
use crate::error::Result;
use crate::models::UsageDisplay;
use crate::output;
use crate::output::json::format_json;

/// Days of usage shown alongside the overview
const OVERVIEW_USAGE_DAYS: u32 = 7;

/// Show headline numbers plus the last week of usage.
///
/// The two requests are independent, so they run concurrently.
pub async fn overview(ctx: &CommandContext, agent: Option<&str>) -> Result<()> {
    ctx.require_auth()?;

    let (overview, usage) = try_join!(
        ctx.client.analytics_overview(agent),
        ctx.client.usage_series(agent, OVERVIEW_USAGE_DAYS),
    )?;

    if matches!(ctx.format, OutputFormat::Json) {
        let payload = serde_json::json!({
            "overview": overview,
            "usage": usage,
        });
        println!("{}", format_json(&payload)?);
        return Ok(());
    }

    println!("{}\n", "ChatVerse Analytics".bold());
    println!("Sessions:       {}", overview.total_sessions);
    println!("Messages:       {}", overview.total_messages);
    println!("Active agents:  {}", overview.active_agents);
    match overview.avg_messages_per_session {
        Some(avg) => println!("Avg msgs/sess:  {:.1}", avg),
        None => println!("Avg msgs/sess:  N/A"),
    }

    println!("\n{}", format!("Last {} days", OVERVIEW_USAGE_DAYS).bold());
    let rows: Vec<UsageDisplay> = usage.into_iter().map(UsageDisplay::from).collect();
    output::print(&rows, OutputFormat::Table)?;

    Ok(())
}

/// Show a daily usage series
pub async fn usage(ctx: &CommandContext, agent: Option<&str>, days: u32) -> Result<()> {
    ctx.require_auth()?;

    let series = ctx.client.usage_series(agent, days).await?;

    let rows: Vec<UsageDisplay> = series.into_iter().map(UsageDisplay::from).collect();
    output::print(&rows, ctx.format)
}
