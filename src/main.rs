//! awscost - Daily AWS cost reports by service

use awscost::{
    aws::{CostExplorerSource, S3Store, load_sdk_config},
    cli::Cli,
    config::{Config, DOTENV_PATH, load_dotenv},
    error::Result,
    output::get_formatter,
    pipeline::Pipeline,
};
use clap::Parser;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // The dotfile has to be in the environment before clap reads env fallbacks
    let dotenv = load_dotenv(Path::new(DOTENV_PATH))?;
    let cli = Cli::parse();

    // --verbose overrides RUST_LOG
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("awscost=info,awscost_core=info,awscost_aws=info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = dotenv {
        info!("Loaded settings from {}", path.display());
    }

    let config = Config::from_cli(&cli).inspect_err(|e| error!(kind = %e.kind(), "{e}"))?;
    info!(
        "Reporting {} (timezone {})",
        config.selection,
        config.timezone.display_name()
    );

    let sdk_config = load_sdk_config(config.profile.as_deref()).await;
    let source = CostExplorerSource::new(&sdk_config);
    let store = S3Store::new(&sdk_config);

    let show_progress = !cli.json && is_terminal::is_terminal(std::io::stderr());
    let report = Pipeline::new(&config, &source, &store)
        .with_progress(show_progress)
        .run(config.timezone.today())
        .await
        .inspect_err(|e| error!(kind = %e.kind(), "{e}"))?;

    let colored_output = !cli.json
        && is_terminal::is_terminal(std::io::stdout())
        && std::env::var("NO_COLOR").is_err();
    let formatter = get_formatter(cli.json, colored_output);
    println!("{}", formatter.format_report(&report.view(&config), cli.breakdown));

    Ok(())
}
