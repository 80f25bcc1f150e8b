mod records;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use records::{render, RawRecord};
use rozgar_core::store::DocumentStore;
use rozgar_core::types::ContentType;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "rozgar-ingest")]
#[command(about = "Load portal records into the document store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load records from JSON/JSONL files or a directory of them
    Load {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Document store directory
        #[arg(long, default_value = "./data/store")]
        store: String,
        /// Server refresh endpoint to hit once loading finishes
        #[arg(long)]
        refresh_url: Option<String>,
        /// Token for the refresh endpoint; falls back to ADMIN_TOKEN
        #[arg(long)]
        admin_token: Option<String>,
    },
    /// Print per-type document counts
    Stats {
        #[arg(long, default_value = "./data/store")]
        store: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Load { input, store, refresh_url, admin_token } => {
            let admin_token = admin_token.or_else(|| std::env::var("ADMIN_TOKEN").ok());
            load(&input, &store, refresh_url.as_deref(), admin_token.as_deref()).await
        }
        Commands::Stats { store } => stats(&store),
    }
}

async fn load(
    input: &str,
    store_path: &str,
    refresh_url: Option<&str>,
    admin_token: Option<&str>,
) -> Result<()> {
    let files = collect_files(Path::new(input))?;
    if files.is_empty() {
        return Err(anyhow!("no .json or .jsonl files under {input}"));
    }

    let store = DocumentStore::open(store_path)?;
    let mut loaded: HashMap<ContentType, usize> = HashMap::new();
    let mut skipped = 0usize;

    for file in &files {
        let is_jsonl = file.extension().and_then(|s| s.to_str()) == Some("jsonl");
        if is_jsonl {
            for (line_no, line) in BufReader::new(File::open(file)?).lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<RawRecord>(&line) {
                    Ok(record) => upsert(&store, record, &mut loaded)?,
                    Err(error) => {
                        skipped += 1;
                        tracing::warn!(file = %file.display(), line = line_no + 1, %error, "skipping malformed record");
                    }
                }
            }
        } else {
            let value: serde_json::Value = serde_json::from_reader(File::open(file)?)?;
            let items = match value {
                serde_json::Value::Array(items) => items,
                single => vec![single],
            };
            for item in items {
                match serde_json::from_value::<RawRecord>(item) {
                    Ok(record) => upsert(&store, record, &mut loaded)?,
                    Err(error) => {
                        skipped += 1;
                        tracing::warn!(file = %file.display(), %error, "skipping malformed record");
                    }
                }
            }
        }
    }
    store.flush()?;

    let total: usize = loaded.values().sum();
    for content_type in ContentType::ALL {
        if let Some(count) = loaded.get(&content_type) {
            tracing::info!(content_type = content_type.as_str(), count, "loaded");
        }
    }
    tracing::info!(total, skipped, files = files.len(), "ingestion complete");

    if let Some(url) = refresh_url {
        trigger_refresh(url, admin_token).await;
    }
    Ok(())
}

fn upsert(
    store: &DocumentStore,
    record: RawRecord,
    loaded: &mut HashMap<ContentType, usize>,
) -> Result<()> {
    let doc = render(record);
    *loaded.entry(doc.content_type).or_insert(0) += 1;
    store.upsert(&doc)?;
    Ok(())
}

fn stats(store_path: &str) -> Result<()> {
    let store = DocumentStore::open(store_path)?;
    for content_type in ContentType::ALL {
        println!("{:>10}: {}", content_type.as_str(), store.list(content_type)?.len());
    }
    println!("{:>10}: {}", "total", store.len());
    Ok(())
}

fn collect_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_file() {
                if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(path.to_path_buf());
                    }
                }
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    Ok(files)
}

/// Ingestion already succeeded at this point; a refresh failure is the
/// operator's to retry, not a reason to fail the load.
async fn trigger_refresh(url: &str, admin_token: Option<&str>) {
    let client = reqwest::Client::new();
    let mut request = client.post(url);
    if let Some(token) = admin_token {
        request = request.header("X-ADMIN-TOKEN", token);
    }
    match request.send().await.and_then(|r| r.error_for_status()) {
        Ok(_) => tracing::info!(url, "index refresh triggered"),
        Err(error) => tracing::error!(url, %error, "index refresh failed"),
    }
}
