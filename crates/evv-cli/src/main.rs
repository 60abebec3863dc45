use anyhow::Context;
use clap::Parser;
use evv_config::EvvConfig;
use tokio_util::sync::CancellationToken;

mod cli;
mod commands;
mod context;
mod output;

use commands::Outcome;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(Outcome::Success) => {}
        Ok(Outcome::Failure) => std::process::exit(1),
        Err(error) => {
            eprintln!("evv error: {error:#}");
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<Outcome> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();

    let mut config = EvvConfig::load_with_dotenv().context("failed to load evv configuration")?;
    context::apply_overrides(&mut config, &flags);
    config
        .validate()
        .context("invalid command-line override")?;

    init_tracing(flags.quiet, flags.verbose, &config.general.log_filter)?;

    let cancel = CancellationToken::new();
    cancel_on_interrupt(cancel.clone());

    let ctx = context::AppContext::init(config, cancel)
        .await
        .context("failed to initialize evv application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

/// Install the stderr subscriber. `EVV_LOG` wins over the flags, which win
/// over `general.log_filter`.
fn init_tracing(quiet: bool, verbose: bool, configured: &str) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        configured
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("EVV_LOG")
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Ctrl-C cancels whatever request is in flight; the handler then prints the
/// cancellation envelope.
fn cancel_on_interrupt(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received; cancelling request");
            cancel.cancel();
        }
    });
}
