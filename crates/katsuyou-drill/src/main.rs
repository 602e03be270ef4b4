use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::http::HeaderName;
use katsuyou_lexicon::{Lexicon, LoadMode};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use katsuyou_drill::rate_limit::{DEFAULT_CLIENT_HEADER, RateLimiterLayer};
use katsuyou_drill::{AppState, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const MAX_PAGE_SIZE: usize = 500;
const DEFAULT_RATE_LIMIT_RPS: u32 = 5;
const DEFAULT_RATE_LIMIT_BURST: u32 = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!("binding to {}:{}", config.host, config.port);
    match &config.lexicon_path {
        Some(path) => info!(
            "using lexicon at {} (mode: {:?})",
            path.display(),
            config.lexicon_mode
        ),
        None => info!("using bundled lexicon"),
    }
    if config.disable_cache {
        info!("cache headers disabled");
    }
    info!(
        "rate limit: {} req/s (burst {}) keyed on {}",
        config.rate_limit_rps, config.rate_limit_burst, config.rate_limit_client_header
    );

    let start = Instant::now();
    let lexicon = match &config.lexicon_path {
        Some(path) => Lexicon::load_with_mode(path, config.lexicon_mode)?,
        None => Lexicon::builtin()?,
    };
    info!(
        "lexicon loaded in {} ms ({} entries)",
        start.elapsed().as_millis(),
        lexicon.len()
    );
    if lexicon.mismatch_count() > 0 {
        info!(
            "{} entries carry a group the suffix heuristic would not guess",
            lexicon.mismatch_count()
        );
    }

    let state = AppState {
        lexicon: Arc::new(lexicon),
        max_page_size: MAX_PAGE_SIZE,
        disable_cache: config.disable_cache,
    };

    let rate_limiter = RateLimiterLayer::new(
        config.rate_limit_rps,
        config.rate_limit_burst,
        config.rate_limit_client_header.clone(),
    );
    let app = router(state)
        .layer(rate_limiter)
        .layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    lexicon_path: Option<PathBuf>,
    lexicon_mode: LoadMode,
    disable_cache: bool,
    rate_limit_rps: u32,
    rate_limit_burst: u32,
    rate_limit_client_header: HeaderName,
}

fn load_config() -> Config {
    let mut disable_cache = false;
    let mut cli_lexicon: Option<PathBuf> = None;
    let mut cli_lexicon_mode: Option<LoadMode> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-cache" => disable_cache = true,
            "--lexicon" => {
                if let Some(path) = args.next() {
                    cli_lexicon = Some(PathBuf::from(path));
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--lexicon=") {
                    cli_lexicon = Some(PathBuf::from(path));
                } else if let Some(mode) = arg.strip_prefix("--lexicon-mode=") {
                    cli_lexicon_mode = parse_load_mode(mode);
                } else {
                    warn!("ignoring unknown argument {arg}");
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let lexicon_path = cli_lexicon.or_else(|| {
        env::var("LEXICON_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    });
    let lexicon_mode = cli_lexicon_mode
        .or_else(|| {
            env::var("LEXICON_LOAD_MODE")
                .ok()
                .as_deref()
                .and_then(parse_load_mode)
        })
        .unwrap_or(LoadMode::Mmap);
    let rate_limit_rps = env::var("RATE_LIMIT_RPS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RATE_LIMIT_RPS);
    let rate_limit_burst = env::var("RATE_LIMIT_BURST")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RATE_LIMIT_BURST);
    let rate_limit_client_header = env::var("RATE_LIMIT_CLIENT_HEADER")
        .ok()
        .and_then(|v| HeaderName::try_from(v.trim()).ok())
        .unwrap_or_else(|| HeaderName::from_static(DEFAULT_CLIENT_HEADER));

    Config {
        host,
        port,
        lexicon_path,
        lexicon_mode,
        disable_cache,
        rate_limit_rps,
        rate_limit_burst,
        rate_limit_client_header,
    }
}

fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    raw.parse().ok()
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
