//! ecg-plot entry point

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ecg_cli::{app, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Data goes to stdout, logs to stderr
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Decode(args) => app::decode(&args, &mut out, &mut std::io::stderr())?,
        Commands::Stats(args) => app::stats(&args, &mut out)?,
        Commands::Simulate(args) => app::simulate(&args, &mut out)?,
        Commands::Config => app::print_config(&mut out)?,
    }

    Ok(())
}
