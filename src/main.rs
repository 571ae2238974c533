use std::env;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use actus_indexer::db::DbPool;
use actus_indexer::feed::stream_events;
use actus_indexer::rpc::{RateLimitConfig, RpcChainReader, RpcClient, RpcClientConfig};
use actus_indexer::store::{EntityStore, MemoryEntityStore, PgEntityStore};
use actus_indexer::transformations::{build_registry, TransformationEngine};
use actus_indexer::types::config::{ChainConfig, IndexerConfig};

const DEFAULT_CONFIG_PATH: &str = "config/config.json";
const MIGRATIONS_DIR: &str = "migrations";
const CHANNEL_CAPACITY: usize = 1000;

struct Args {
    config_path: PathBuf,
    dry_run: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = env::args().skip(1);
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut dry_run = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config requires a path")?;
                config_path = PathBuf::from(path);
            }
            "--dry-run" => dry_run = true,
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    Ok(Args {
        config_path,
        dry_run,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = parse_args()?;
    let config = IndexerConfig::load(&args.config_path)?;
    load_required_env_vars(&config, args.dry_run)?;

    tracing::info!(
        "Loaded config with {} chain(s), revert policy {:?}",
        config.chains.len(),
        config.reconciliation.revert_policy
    );
    if args.dry_run {
        tracing::info!("Running in dry-run mode (in-memory entity store)");
    }

    let db_pool = if args.dry_run {
        None
    } else {
        let database_url = env::var(&config.database_url_env_var).with_context(|| {
            format!("env var {} not set", config.database_url_env_var)
        })?;
        let pool = DbPool::new(&database_url)
            .await
            .context("failed to create database pool")?;
        pool.run_migrations(Path::new(MIGRATIONS_DIR))
            .await
            .context("failed to run database migrations")?;

        tracing::info!("Database pool initialized and migrations complete");
        Some(Arc::new(pool))
    };

    for chain in &config.chains {
        let store: Arc<dyn EntityStore> = match &db_pool {
            Some(pool) => Arc::new(PgEntityStore::new(pool.clone(), chain.chain_id)?),
            None => Arc::new(MemoryEntityStore::new()),
        };
        process_chain(&config, chain, store).await?;
    }

    tracing::info!("All chains processed successfully");
    Ok(())
}

/// Ensures all required env vars are set, loading .env if needed.
fn load_required_env_vars(config: &IndexerConfig, dry_run: bool) -> anyhow::Result<()> {
    let mut required: Vec<&str> = config
        .chains
        .iter()
        .map(|c| c.rpc_url_env_var.as_str())
        .collect();
    if !dry_run {
        required.push(config.database_url_env_var.as_str());
    }

    let missing: Vec<&&str> = required
        .iter()
        .filter(|var| env::var(var).is_err())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    dotenvy::dotenv().with_context(|| {
        format!(
            "Missing env vars {:?} and failed to load .env file",
            missing
        )
    })?;

    let still_missing: Vec<&str> = required
        .iter()
        .filter(|var| env::var(var).is_err())
        .copied()
        .collect();

    anyhow::ensure!(
        still_missing.is_empty(),
        "Missing required env vars after loading .env: {:?}",
        still_missing
    );

    Ok(())
}

fn build_reader(chain: &ChainConfig) -> anyhow::Result<RpcChainReader> {
    let rpc_url = env::var(&chain.rpc_url_env_var).with_context(|| {
        format!(
            "env var {} not set for chain {}",
            chain.rpc_url_env_var, chain.name
        )
    })?;

    let mut rpc_config = RpcClientConfig::from_url(&rpc_url)
        .with_context(|| format!("invalid RPC url for chain {}", chain.name))?;
    if let Some(rps) = chain.rpc_requests_per_second {
        let rps = NonZeroU32::new(rps).with_context(|| {
            format!("rpc_requests_per_second must be positive for chain {}", chain.name)
        })?;
        rpc_config = rpc_config.with_rate_limit(RateLimitConfig::per_second(rps));
        tracing::info!("Chain {} - RPC rate limit: {} requests/s", chain.name, rps);
    }

    Ok(RpcChainReader::new(RpcClient::new(rpc_config)))
}

async fn process_chain(
    config: &IndexerConfig,
    chain: &ChainConfig,
    store: Arc<dyn EntityStore>,
) -> anyhow::Result<()> {
    tracing::info!("Processing chain: {}", chain.name);

    let registry = build_registry(chain);
    if registry.is_empty() {
        tracing::warn!("No contracts configured for chain {}, skipping", chain.name);
        return Ok(());
    }

    let reader = Arc::new(build_reader(chain)?);
    let engine = TransformationEngine::new(
        Arc::new(registry),
        store,
        reader,
        chain,
        config.reconciliation.revert_policy,
    );

    let (events_tx, events_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let events_path = chain.events_path.clone();
    let feed = tokio::spawn(async move { stream_events(&events_path, events_tx).await });

    let summary = engine
        .run(events_rx)
        .await
        .with_context(|| format!("transformation failed for chain {}", chain.name))?;

    let sent = feed
        .await
        .context("event feed task panicked")?
        .with_context(|| format!("event feed failed for chain {}", chain.name))?;

    tracing::info!(
        "Chain {} complete: {} events fed, {} processed",
        chain.name,
        sent,
        summary.processed
    );
    Ok(())
}
