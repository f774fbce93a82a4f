use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use travel_planner::cli::Args;
use travel_planner::prelude::*;

fn init_tracing() {
    // Diagnostics go to stderr so the conversation on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: &Args, agent: &TravelPlanningAgent) -> Result<()> {
    let mut stdout = io::stdout();

    if args.list_tools {
        for name in agent.tool_names() {
            writeln!(stdout, "{}", name)?;
        }
        return Ok(());
    }

    if let Some(request) = &args.request {
        agent.plan_trip(request, &mut stdout).await?;
        return Ok(());
    }

    let interrupt = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    agent
        .interactive_mode(BufReader::new(tokio::io::stdin()), &mut stdout, interrupt)
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let mut stdout = io::stdout();

    let mut config = match TravelAgentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            writeln!(stdout, "Fatal error: {}", e)?;
            return Ok(());
        }
    };
    args.apply(&mut config);

    let mut agent = match TravelPlanningAgent::initialize(&config, &mut stdout).await {
        Ok(agent) => agent,
        Err(e) => {
            writeln!(stdout, "Fatal error: {}", e)?;
            return Ok(());
        }
    };

    if let Err(e) = run(&args, &agent).await {
        writeln!(stdout, "Fatal error: {}", e)?;
    }

    agent.cleanup().await;
    stdout.flush()?;

    // A stdin read left pending by Ctrl-C would keep the runtime from shutting down
    std::process::exit(0)
}
