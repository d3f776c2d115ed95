use anyhow::Result;
use axum::Router;
use clap::Parser;
use search_core::{MissingTermPolicy, SearchConfig};
use search_server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Documents to index at startup (.xml, .json, .jsonl, or a directory)
    #[arg(long)]
    docs: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Ignore unknown query terms instead of returning no results
    #[arg(long, default_value_t = false)]
    skip_missing: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let missing_terms = if args.skip_missing { MissingTermPolicy::Skip } else { MissingTermPolicy::Empty };
    let app: Router = build_app(&args.docs, SearchConfig { missing_terms })?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
