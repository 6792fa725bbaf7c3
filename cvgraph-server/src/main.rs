use clap::Parser;
use cvgraph_core::{CvgraphConfig, OntologyStore};
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "cvgraph.toml")]
    config: String,

    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience — production uses real env vars)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config
    let config = match CvgraphConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    // Init logging
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.service.log_level.clone())),
        )
        .init();

    // Load the ontology into the in-memory store
    let store = match OntologyStore::open(&config.ontology) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load ontology from {}: {}", config.ontology.file, e);
            std::process::exit(1);
        }
    };

    if args.health {
        println!("Ontology loaded: {} triples", store.triple_count()?);
        return Ok(());
    }

    let (tx, _rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    cvgraph_server::http::start_http_server(store, config, tx.subscribe()).await?;

    Ok(())
}
