use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tokengate_api::{app, config::{normalize_prefix, Config}, AppState};

#[derive(Parser)]
#[command(name = "api", about = "Token-gated auth and posts API")]
struct Args {
    /// Bind host (overrides HOST)
    #[arg(long)]
    host: Option<String>,
    /// Bind port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
    /// Route prefix such as `/api`, or "" for none (overrides API_PREFIX)
    #[arg(long)]
    api_prefix: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(prefix) = args.api_prefix {
        config.api_prefix = normalize_prefix(&prefix);
    }

    let state = AppState::from_config(&config)?;
    info!(
        "tokens: access ttl {}s, refresh ttl {}s",
        state.tokens.access_ttl_seconds(),
        state.tokens.refresh_ttl_seconds()
    );

    let router = app(state, &config.api_prefix);

    let addr = format!("{}:{}", config.host, config.port);
    info!("token-gate API listening on {} (prefix '{}')", addr, config.api_prefix);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
