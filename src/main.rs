// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use query_router::{Agent, AgentOutcome, Config, LlmClient, SearchClient};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "query_router")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Query-routing agent backed by Groq and Tavily", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single query, searching the web first when the model asks for it
    Ask {
        /// The question to answer
        query: String,
    },

    /// Run the built-in example queries back to back
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    query_router::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Query router agent");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    if config.llm.api_key.is_none() {
        warn!("No language model API key configured; completions will fail with an authentication error");
    }
    if config.search.api_key.is_none() {
        warn!("No search API key configured; searches will fail with an authentication error");
    }

    let llm = LlmClient::new(config.llm.clone()).context("Failed to create LLM client")?;
    let search =
        SearchClient::new(config.search.clone()).context("Failed to create search client")?;
    let agent = Agent::new(llm, search);

    match cli.command {
        Commands::Ask { query } => {
            cmd_ask(&agent, &query).await?;
        }
        Commands::Demo => {
            cmd_demo(&agent).await?;
        }
    }

    Ok(())
}

async fn cmd_ask(agent: &Agent<LlmClient, SearchClient>, query: &str) -> Result<()> {
    println!("\nUser Query: '{}'", query.bold());

    let spinner = make_spinner("Thinking...");
    let outcome = agent.run(query).await;
    spinner.finish_and_clear();

    let outcome = outcome.context("Query pipeline failed")?;
    print_outcome(&outcome);

    Ok(())
}

// The two example queries the agent originally shipped with: one answerable
// from model knowledge, one that routes through a web search.
async fn cmd_demo(agent: &Agent<LlmClient, SearchClient>) -> Result<()> {
    let queries = [
        "What is the capital of France?",
        "What are the key features of the new Llama 3 model?",
    ];

    for query in queries {
        cmd_ask(agent, query).await?;
    }

    Ok(())
}

fn print_outcome(outcome: &AgentOutcome) {
    println!(
        "LLM Decision: Search required? -> {}",
        if outcome.searched {
            outcome.decision.green()
        } else {
            outcome.decision.yellow()
        }
    );

    if let Some(context) = &outcome.context {
        info!("Search context ({} chars)", context.len());
    }

    println!("\n{}", "Final Answer:".bold());
    println!("{}", outcome.answer);
}

fn make_spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
