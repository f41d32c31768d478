//! ScannerHost - スキャナのライフサイクル管理
//!
//! - `start()` で即座に 1 回目の反復が始まる（初回の待ちはない）
//! - `request_stop()` はシグナルを送るだけ。実行中の反復は強制終了しない
//! - `stop()` はシグナルを送ってループの終了を待つ
//! - ホストを drop してもシグナルの sender が消えるのでループは止まる

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::scanner::ExpirationScanner;
use super::status::ScannerStatus;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("scanner task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub struct ScannerHost {
    shutdown_tx: watch::Sender<bool>,
    status_rx: watch::Receiver<ScannerStatus>,
    join: JoinHandle<ScannerStatus>,
}

impl ScannerHost {
    /// Spawn the scanner loop on the current tokio runtime.
    pub fn start(scanner: ExpirationScanner) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let status_rx = scanner.subscribe();

        tracing::info!("Policy Expiration Hosted Service running.");
        let join = tokio::spawn(async move {
            tracing::info!("Policy Expiration Hosted Service is working.");
            scanner.run(shutdown_rx).await
        });

        Self {
            shutdown_tx,
            status_rx,
            join,
        }
    }

    /// Request cooperative cancellation; returns immediately.
    pub fn request_stop(&self) {
        // ignore send error: the loop may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    /// Request cancellation and wait for the loop to finish.
    pub async fn stop(self) -> Result<ScannerStatus, HostError> {
        tracing::info!("Policy Expiration Hosted Service is stopping.");
        self.request_stop();
        Ok(self.join.await?)
    }

    pub fn status(&self) -> ScannerStatus {
        self.status_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScannerStatus> {
        self.status_rx.clone()
    }
}
