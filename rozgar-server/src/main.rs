use anyhow::Result;
use clap::Parser;
use rozgar_core::store::DocumentStore;
use rozgar_core::traits::Translator;
use rozgar_retrieval::{HttpDenseIndex, HybridRetriever};
use rozgar_server::collab::{HttpGenerator, HttpTranslator, NoopTranslator};
use rozgar_server::{build_app, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8000)]
    port: u16,
    /// Document store directory
    #[arg(long, default_value = "./data/store")]
    store: String,
    /// Vector index query endpoint
    #[arg(long, default_value = "http://127.0.0.1:9200/query")]
    dense_url: String,
    /// Generation endpoint
    #[arg(long)]
    generator_url: String,
    /// Translation endpoint; omitted disables translation
    #[arg(long)]
    translator_url: Option<String>,
    /// Per-channel retrieval deadline in milliseconds
    #[arg(long, default_value_t = 2000)]
    channel_timeout_ms: u64,
    /// Collaborator request timeout in seconds
    #[arg(long, default_value_t = 30)]
    collaborator_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let channel_timeout = Duration::from_millis(args.channel_timeout_ms);
    let collaborator_timeout = Duration::from_secs(args.collaborator_timeout_secs);

    let store = Arc::new(DocumentStore::open(&args.store)?);
    let dense = HttpDenseIndex::new(args.dense_url.clone(), channel_timeout)?;
    let retriever = Arc::new(HybridRetriever::with_timeout(Box::new(dense), channel_timeout));

    // An unreadable store leaves the empty index; the refresh route is the
    // recovery path.
    match store.list_all() {
        Ok(docs) => {
            retriever.rebuild(docs);
        }
        Err(error) => {
            tracing::warn!(%error, "could not build lexical index at startup, serving without sparse results");
        }
    }

    let generator = Arc::new(HttpGenerator::new(
        args.generator_url.clone(),
        std::env::var("GENERATOR_API_KEY").ok(),
        collaborator_timeout,
    )?);
    let translator: Arc<dyn Translator> = match &args.translator_url {
        Some(url) => Arc::new(HttpTranslator::new(url.clone(), collaborator_timeout)?),
        None => Arc::new(NoopTranslator),
    };

    let state = AppState {
        store,
        retriever,
        generator,
        translator,
        admin_token: std::env::var("ADMIN_TOKEN").ok(),
    };
    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
