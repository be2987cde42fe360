use anyhow::Result;
use clap::Parser;
use elasticizer::config::{Config, LoggingConfig};
use elasticizer::Elasticizer;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapter;
mod router;

#[derive(Parser, Debug)]
#[command(name = "elasticizer-server")]
#[command(about = "CRUD HTTP front for an Elasticsearch cluster")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "elasticizer.toml", env = "ELASTICIZER_CONFIG")]
    config: String,

    /// Address to bind to, e.g. 0.0.0.0:7071
    #[arg(long, env = "ELASTICIZER_BIND")]
    bind: Option<String>,

    /// Elasticsearch host URL
    #[arg(long, env = "ELASTICSEARCH_HOST")]
    host: Option<String>,

    /// Document type used for every engine call
    #[arg(long, env = "ELASTICSEARCH_TYPE")]
    document_type: Option<String>,

    /// Prefix prepended to every logical index name
    #[arg(long, env = "ELASTICSEARCH_INDEX_PREFIX")]
    prefix: Option<String>,

    /// Refresh policy for writes
    #[arg(long, env = "ELASTICSEARCH_REFRESH")]
    refresh: Option<String>,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.server.bind_addr = bind.clone();
        }
        if let Some(host) = &self.host {
            config.engine.host = host.clone();
        }
        if let Some(document_type) = &self.document_type {
            config.engine.document_type = document_type.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.engine.prefix = prefix.clone();
        }
        if let Some(refresh) = &self.refresh {
            config.engine.refresh = refresh.clone();
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| logging.level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load_or_default(Path::new(&args.config))?;
    args.apply(&mut config);
    config.engine.validate()?;

    init_tracing(&config.logging);

    tracing::info!("Config file: {}", args.config);
    tracing::info!(
        "Engine {} (type {}, prefix {:?}, refresh {})",
        config.engine.host,
        config.engine.document_type,
        config.engine.prefix,
        config.engine.refresh
    );

    let elasticizer = Arc::new(Elasticizer::new(config.engine.clone())?);
    let app = router::router(elasticizer, &config.server);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    tracing::info!("Listening on {}", config.server.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
