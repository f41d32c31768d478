//! ExpirationScanner - 期限切れポリシーの定期スキャン
//!
//! # 1 反復のフロー
//! 1. キャンセル確認（ループ入口）
//! 2. today を Clock から 1 回だけ計算（UTC の暦日）
//! 3. CheckpointStore から watermark を読む（無ければ today で作る）
//! 4. 窓 `[watermark, today)` を PolicySource に問い合わせる（空なら問い合わせない）
//! 5. 候補ごとに NotificationSink へ通知
//! 6. 候補数に関係なく watermark = today を保存
//! 7. 失敗したらログに出して 8 へ（watermark は据え置き → 同じ窓を次回やり直す）
//! 8. キャンセル確認 → interval だけ sleep（キャンセルで即座に起きる）→ 1 へ
//!
//! # 配送保証
//! at-least-once。通知後・保存前に落ちる／保存に失敗すると、次の反復で
//! 同じ窓の通知がもう一度出る。取りこぼしはない。

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;

use super::config::ScannerConfig;
use super::status::ScannerStatus;
use crate::domain::{ExpirationNotice, ScanWindow, ScannerState};
use crate::error::ScanError;
use crate::ports::{CheckpointStore, Clock, NotificationSink, PolicySource, SystemClock};

/// What one successful iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationReport {
    pub window: ScanWindow,
    pub notified: usize,
    /// Watermark persisted at the end of the iteration.
    pub watermark: NaiveDate,
}

/// The scanning state machine.
///
/// 依存はすべて注入される（サービスロケータは使わない）。
/// 同時に動くインスタンスは 1 つだけという前提なのでロックは持たない。
pub struct ExpirationScanner {
    config: ScannerConfig,
    checkpoints: Arc<dyn CheckpointStore>,
    source: Arc<dyn PolicySource>,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    status_tx: watch::Sender<ScannerStatus>,
}

impl ExpirationScanner {
    pub fn new(
        config: ScannerConfig,
        checkpoints: Arc<dyn CheckpointStore>,
        source: Arc<dyn PolicySource>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let (status_tx, _) = watch::channel(ScannerStatus::default());
        Self {
            config,
            checkpoints,
            source,
            sink,
            clock: Arc::new(SystemClock),
            status_tx,
        }
    }

    /// Replace the system clock (tests use `FixedClock`).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<ScannerStatus> {
        self.status_tx.subscribe()
    }

    pub fn status(&self) -> ScannerStatus {
        self.status_tx.borrow().clone()
    }

    fn transition(&self, next: ScannerState) {
        self.status_tx.send_modify(|status| {
            if status.state != next {
                tracing::debug!(from = %status.state, to = %next, "scanner state transition");
                status.state = next;
            }
        });
    }

    /// Run the loop until `shutdown` turns `true` or its sender is dropped.
    ///
    /// キャンセルを見るのはループ入口と sleep の前後だけ。
    /// 反復の途中では止まらない（今のステップを終えてから止まる）。
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> ScannerStatus {
        loop {
            if cancellation_requested(&shutdown) {
                break;
            }

            match self.run_once().await {
                Ok(report) if report.notified > 0 => {
                    tracing::info!(
                        window = %report.window,
                        notified = report.notified,
                        watermark = %report.watermark,
                        "policy expiration scan finished"
                    );
                }
                Ok(report) => {
                    tracing::debug!(
                        window = %report.window,
                        watermark = %report.watermark,
                        "policy expiration scan found nothing"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        kind = e.kind(),
                        "error processing policy expirations"
                    );
                }
            }

            if cancellation_requested(&shutdown) {
                break;
            }

            self.transition(ScannerState::Sleeping);
            let cancelled = tokio::select! {
                // sender が drop されても Err で返ってくるので、それもキャンセル扱い
                _ = shutdown.wait_for(|stop| *stop) => true,
                _ = tokio::time::sleep(self.config.interval) => false,
            };
            if cancelled {
                break;
            }
        }

        self.transition(ScannerState::Cancelled);
        tracing::info!(key = %self.config.checkpoint_key, "policy expiration scanner cancelled");
        self.status()
    }

    /// One iteration (steps 2–7). Updates the published status either way.
    pub async fn run_once(&self) -> Result<IterationReport, ScanError> {
        self.status_tx.send_modify(|s| s.stats.iterations += 1);

        let result = self.scan().await;

        self.status_tx.send_modify(|s| match &result {
            Ok(_) => {
                s.stats.succeeded += 1;
                s.last_error = None;
            }
            Err(e) => {
                s.stats.failed += 1;
                s.last_error = Some(e.to_string());
            }
        });
        result
    }

    async fn scan(&self) -> Result<IterationReport, ScanError> {
        self.transition(ScannerState::Scanning);

        let key = self.config.checkpoint_key.as_str();
        let today = self.clock.today();
        let watermark = self.checkpoints.load_or_init(key, today).await?;
        let window = ScanWindow::new(watermark, today);
        self.status_tx.send_modify(|s| {
            s.watermark = Some(watermark);
            s.last_window = Some(window);
        });

        let candidates = if window.is_empty() {
            Vec::new()
        } else {
            self.source.find_expiring(&window).await?
        };

        self.transition(ScannerState::Notifying);
        for policy in &candidates {
            self.sink.emit(&ExpirationNotice::from(policy))?;
            self.status_tx.send_modify(|s| s.stats.notified += 1);
        }

        self.transition(ScannerState::Checkpointing);
        // 時計が戻っても watermark は下げない
        let next = today.max(watermark);
        self.checkpoints.save(key, next).await?;
        self.status_tx.send_modify(|s| s.watermark = Some(next));

        Ok(IterationReport {
            window,
            notified: candidates.len(),
            watermark: next,
        })
    }
}

fn cancellation_requested(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow() || shutdown.has_changed().is_err()
}
