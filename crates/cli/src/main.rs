mod config;
mod plan;
mod schema;

use anyhow::{Context, Result};
use sqlclient_argparse::ArgParser;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::DriverRegistry;
use crate::plan::Invocation;

fn main() -> Result<()> {
    // RUST_LOG may come from .env, so load it before the subscriber.
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "failed to load .env"),
    }

    let mut registry = DriverRegistry::builtin();
    if let Some(config) = config::load_config()? {
        registry = registry.with_config(config);
    }

    let parser = ArgParser::new(schema::switches(&registry)).context("invalid switch schema")?;
    let matches = parser.parse_env();

    let invocation = Invocation::from_matches(&matches, &registry)?;
    tracing::info!(
        driver = %invocation.driver,
        output = ?invocation.output,
        "prepared invocation"
    );

    let json = serde_json::to_string_pretty(&invocation).context("failed to serialize invocation")?;
    println!("{json}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
