mod commands;
mod cycle;
mod scheduler;
#[cfg(test)]
mod test_support;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stockwatch")]
#[command(about = "Crawl stock forum news into a deduplicated corpus and an HTML report")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Commands {
    /// Crawl now, then on every update interval until interrupted (default)
    Run,
    /// Run exactly one crawl cycle and exit
    Crawl,
    /// Re-partition the stored corpus with the current filter rules
    Partition,
    /// Re-render the HTML report from the stored shards
    Report,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = stockwatch_core::load_app_config()?;
    init_tracing(&config.log_level)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => scheduler::run_scheduled(config, shutdown_signal()).await?,
        Commands::Crawl => commands::crawl_once(config).await?,
        Commands::Partition => commands::repartition(&config)?,
        Commands::Report => commands::rerender(&config)?,
    }

    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduler");
}

#[cfg(test)]
mod tests;
