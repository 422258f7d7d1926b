use anyhow::Context as _;
use clap::Parser as _;
use log::info;
use rule_tracker::{
    cli::{args::Args, run},
    errors::{TrackerError, init_error},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> Result<(), TrackerError> {
    let args = Args::parse();
    let use_colors = args.color.use_colors();
    colored::control::set_override(use_colors);

    let level = args.verbose.log_level_filter().as_str().to_lowercase();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!(
                "{level},{}={level},rule_redline={level},tower_http={level},axum::rejection=trace",
                env!("CARGO_CRATE_NAME")
            )
            .into()
        }))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(use_colors)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to initialise tracing")
        .map_err(init_error)?;

    info!("Starting rule-tracker version {}", env!("CARGO_PKG_VERSION"));

    run(args).await
}
