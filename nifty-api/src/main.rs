use clap::Parser;
use nifty_api::{NiftyApi, NiftyConfig};
use nifty_core::collection::Collection;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Serve a non-fungible token collection over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind, overriding the config file
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nifty_api=info,nifty_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => NiftyConfig::from_file(path)?,
        None => NiftyConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let collection = Collection::new(config.collection)?;
    info!(
        name = collection.name(),
        symbol = collection.symbol(),
        deployer = %collection.deployer(),
        "collection ready"
    );

    NiftyApi::new(collection).serve(&config.server.bind).await
}
