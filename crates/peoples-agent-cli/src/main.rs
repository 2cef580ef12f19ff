use anyhow::Result;
use clap::Parser;

mod app;
mod commands;

#[derive(Parser)]
#[command(name = "peoples-agent")]
#[command(about = "The People's Agent - chat with government documents")]
#[command(version)]
struct Cli {
    /// Ask a single question and exit
    #[arg(short, long)]
    query: Option<String>,

    /// Backend base URL (overrides the config file)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut settings = peoples_agent_core::Settings::load();
    if let Some(url) = cli.api_url {
        settings.api.base_url = url;
    }

    if let Some(query) = cli.query {
        app::run_single_query(&settings, &query).await?;
    } else {
        app::run(settings).await?;
    }

    Ok(())
}
