use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use lexicon_store::{LoadMode, fingerprint, load_records};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use lexicon_lab::{AppState, Lexicon, router, snapshot};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_CORPUS: &str = "data";
const DEFAULT_MAX_PAGE_SIZE: usize = 500;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!("binding to {}:{}", config.host, config.port);
    info!(
        "using corpus at {} (mode: {:?})",
        config.corpus_path.display(),
        config.load_mode
    );
    if config.disable_cache {
        info!("cache headers disabled");
    }

    let start = Instant::now();
    let lexicon = load_lexicon(&config)?;
    info!(
        "lexicon ready with {} entries in {} ms",
        lexicon.store().len(),
        start.elapsed().as_millis()
    );

    let state = AppState {
        lexicon: Arc::new(lexicon),
        max_page_size: config.max_page_size,
        disable_cache: config.disable_cache,
    };

    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the lexicon from the corpus, going through the snapshot file when
/// one is configured and its fingerprint still matches.
fn load_lexicon(config: &Config) -> anyhow::Result<Lexicon> {
    let records = load_records(&config.corpus_path, config.load_mode)
        .with_context(|| format!("loading corpus from {}", config.corpus_path.display()))?;
    let current = fingerprint(&records);

    if let Some(path) = &config.snapshot_path
        && let Some(lexicon) = restore(path, config.load_mode, &current)
    {
        return Ok(lexicon);
    }

    let lexicon = Lexicon::build(&records).context("building lexicon")?;
    if let Some(path) = &config.snapshot_path
        && let Err(err) = snapshot::save(path, &current, &lexicon)
    {
        warn!("could not save snapshot to {}: {err:#}", path.display());
    }
    Ok(lexicon)
}

fn restore(path: &Path, mode: LoadMode, current: &str) -> Option<Lexicon> {
    if !path.exists() {
        info!("no snapshot at {}", path.display());
        return None;
    }
    match snapshot::load(path, mode) {
        Ok((stored, lexicon)) if stored == current => {
            info!("restored lexicon from snapshot {}", path.display());
            Some(lexicon)
        }
        Ok(_) => {
            warn!("snapshot {} is stale, rebuilding", path.display());
            None
        }
        Err(err) => {
            warn!("could not read snapshot {}: {err:#}", path.display());
            None
        }
    }
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    corpus_path: PathBuf,
    load_mode: LoadMode,
    snapshot_path: Option<PathBuf>,
    max_page_size: usize,
    disable_cache: bool,
}

fn load_config() -> Config {
    let mut disable_cache = false;
    let mut cli_corpus: Option<PathBuf> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-cache" => disable_cache = true,
            "--corpus" => {
                if let Some(path) = args.next() {
                    cli_corpus = Some(PathBuf::from(path));
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--corpus=") {
                    cli_corpus = Some(PathBuf::from(path));
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let corpus_path = cli_corpus
        .or_else(|| env::var("CORPUS_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS));
    let load_mode = env::var("CORPUS_LOAD_MODE")
        .ok()
        .as_deref()
        .and_then(LoadMode::parse)
        .unwrap_or(LoadMode::Mmap);
    let snapshot_path = env::var("SNAPSHOT_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let max_page_size = env::var("MAX_PAGE_SIZE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_MAX_PAGE_SIZE);

    Config {
        host,
        port,
        corpus_path,
        load_mode,
        snapshot_path,
        max_page_size,
        disable_cache,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
