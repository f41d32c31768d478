use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;

use lapse_core::app::{ExpirationScanner, ScannerConfig, ScannerHost};
use lapse_core::domain::Policy;
use lapse_core::impls::{FileCheckpointStore, InMemoryPolicySource, TracingSink};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CHECKPOINT_PATH: &str = "./lapse-checkpoint.json";

/// JSON 配列のポリシーを読む。パス未指定なら空で始める。
async fn load_policies(path: Option<PathBuf>) -> anyhow::Result<Vec<Policy>> {
    let Some(path) = path else {
        tracing::warn!("LAPSE_POLICIES_PATH not set, starting with no policies");
        return Ok(Vec::new());
    };
    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("reading policies from {}", path.display()))?;
    let policies: Vec<Policy> = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing policies from {}", path.display()))?;
    tracing::info!(count = policies.len(), path = %path.display(), "loaded policies");
    Ok(policies)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lapse=info,lapse_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // (A) 設定
    let config = ScannerConfig::from_env()?;
    let checkpoint_path = std::env::var("LAPSE_CHECKPOINT_PATH")
        .unwrap_or_else(|_| DEFAULT_CHECKPOINT_PATH.to_string());
    let policies_path = std::env::var("LAPSE_POLICIES_PATH").ok().map(PathBuf::from);
    tracing::info!(
        key = %config.checkpoint_key,
        interval_secs = config.interval.as_secs(),
        checkpoint = %checkpoint_path,
        "starting policy expiration scanner"
    );

    // (B) ports の実装を用意
    let checkpoints = Arc::new(FileCheckpointStore::new(checkpoint_path));
    let source = Arc::new(InMemoryPolicySource::from_policies(
        load_policies(policies_path).await?,
    ));
    let sink = Arc::new(TracingSink);

    // (C) スキャナを起動（1 回目はすぐ走る）
    let scanner = ExpirationScanner::new(config, checkpoints, source, sink);
    let host = ScannerHost::start(scanner);

    // (D) Ctrl-C で協調的に止める
    tokio::signal::ctrl_c()
        .await
        .context("waiting for ctrl-c")?;

    let status = host.stop().await?;
    tracing::info!(
        status = %serde_json::to_string(&status)?,
        "policy expiration scanner stopped"
    );

    Ok(())
}
