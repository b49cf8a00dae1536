//! Verseop CLI - Companion for the ChatVerse agent platform

use clap::Parser;

mod auth;
mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;

use cli::{
    AgentCommands, AnalyticsCommands, ChatCommands, Cli, CommandContext, Commands, SourceCommands,
};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug);

    match cli.command {
        Commands::Init => cli::init::run(cli.config.as_deref(), cli.api_host.as_deref()).await,
        Commands::Status => cli::status::run(cli.config.as_deref()),
        Commands::Completion { shell } => cli::completions::run(shell),

        Commands::Login { ref email } => {
            let ctx = context(&cli)?;
            cli::auth::login(&ctx, email.as_deref()).await
        }
        Commands::Logout => {
            let ctx = context(&cli)?;
            cli::auth::logout(&ctx)
        }
        Commands::Whoami => {
            let ctx = context(&cli)?;
            cli::auth::whoami(&ctx).await
        }

        Commands::Agent(ref cmd) => {
            let ctx = context(&cli)?;
            match cmd {
                AgentCommands::List { pagination } => cli::agent::list(&ctx, pagination).await,
                AgentCommands::Get { agent_id } => {
                    cli::agent::get(&ctx, agent_id.as_deref()).await
                }
                AgentCommands::Create {
                    name,
                    model,
                    instructions,
                    temperature,
                } => {
                    cli::agent::create(
                        &ctx,
                        name.clone(),
                        model.clone(),
                        instructions.clone(),
                        *temperature,
                    )
                    .await
                }
                AgentCommands::Update {
                    agent_id,
                    name,
                    model,
                    instructions,
                    temperature,
                    visibility,
                } => {
                    cli::agent::update(
                        &ctx,
                        agent_id,
                        name.clone(),
                        model.clone(),
                        instructions.clone(),
                        *temperature,
                        visibility.clone(),
                    )
                    .await
                }
                AgentCommands::Delete { agent_id, yes } => {
                    cli::agent::delete(&ctx, agent_id, *yes).await
                }
                AgentCommands::Use { agent_id } => {
                    cli::agent::use_agent(&ctx, agent_id, cli.config.as_deref())
                }
            }
        }

        Commands::Source(ref cmd) => {
            let ctx = context(&cli)?;
            match cmd {
                SourceCommands::List { agent } => {
                    cli::source::list(&ctx, agent.as_deref()).await
                }
                SourceCommands::AddText {
                    title,
                    content,
                    agent,
                } => {
                    cli::source::add_text(&ctx, agent.as_deref(), title.clone(), content.clone())
                        .await
                }
                SourceCommands::AddWebsite { url, crawl, agent } => {
                    cli::source::add_website(&ctx, agent.as_deref(), url.clone(), *crawl).await
                }
                SourceCommands::AddDatabase {
                    connection_uri,
                    tables,
                    agent,
                } => {
                    cli::source::add_database(
                        &ctx,
                        agent.as_deref(),
                        connection_uri.clone(),
                        tables.clone(),
                    )
                    .await
                }
                SourceCommands::AddQa { file, agent } => {
                    cli::source::add_qa(&ctx, agent.as_deref(), file).await
                }
                SourceCommands::Delete { source_id, yes } => {
                    cli::source::delete(&ctx, source_id, *yes).await
                }
            }
        }

        Commands::Chat(ref cmd) => {
            let ctx = context(&cli)?;
            match cmd {
                ChatCommands::Sessions { agent, pagination } => {
                    cli::chat::sessions(&ctx, agent.as_deref(), pagination).await
                }
                ChatCommands::History { session_id } => {
                    cli::chat::history(&ctx, session_id).await
                }
                ChatCommands::Send {
                    message,
                    session,
                    agent,
                } => {
                    cli::chat::send(&ctx, agent.as_deref(), session.as_deref(), message).await
                }
            }
        }

        Commands::Analytics(ref cmd) => {
            let ctx = context(&cli)?;
            match cmd {
                AnalyticsCommands::Overview { agent } => {
                    cli::analytics::overview(&ctx, agent.as_deref()).await
                }
                AnalyticsCommands::Usage { days, agent } => {
                    cli::analytics::usage(&ctx, agent.as_deref(), *days).await
                }
            }
        }
    }
}

fn context(cli: &Cli) -> Result<CommandContext> {
    CommandContext::new(
        cli.format,
        cli.api_host.as_deref(),
        cli.config.as_deref(),
        cli.no_cache,
    )
}

/// RUST_LOG still wins when set; --debug raises the default level.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
