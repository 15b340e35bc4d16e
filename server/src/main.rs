use anyhow::Result;
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use stemdex_core::PipelineConfig;
use stemdex_server::{build_app, load_corpus_or_sample};
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Corpus file or directory (JSON/JSONL); the sample corpus when omitted
    #[arg(long)]
    corpus: Option<String>,
    /// JSON pipeline config (block_size, irregulars, overrides)
    #[arg(long)]
    config: Option<String>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let corpus = load_corpus_or_sample(args.corpus.as_deref())?;
    let config = match &args.config {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::default(),
    };
    let app: Router = build_app(corpus, config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
