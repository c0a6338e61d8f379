use crate::adapters::storage::LocalStorage;
use crate::app::extractor::LibraryExtractor;
use crate::app::pipeline::LibraryPipeline;
use crate::app::writer::CsvWriter;
use crate::config::AppConfig;
use crate::core::etl::{EtlEngine, RunSummary};
use crate::core::scheduler::DailySchedule;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::{DateTime, Local, TimeZone};
use reqwest::Client;
use std::future::Future;
use tokio::time::MissedTickBehavior;

/// 輪詢一次的結果
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// 尚未到期
    Idle,
    Completed(RunSummary),
    /// 到期但執行失敗，已記錄
    Failed,
}

/// 持有設定與儲存位置，提供單次執行與每日排程兩種模式
pub struct Runner<S: Storage + Clone> {
    config: AppConfig,
    storage: S,
    client: Client,
}

impl Runner<LocalStorage> {
    pub fn new(config: AppConfig) -> Self {
        let storage = LocalStorage::new(config.output_path.clone());
        Self::with_storage(config, storage)
    }
}

impl<S: Storage + Clone> Runner<S> {
    pub fn with_storage(config: AppConfig, storage: S) -> Self {
        Self {
            config,
            storage,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn pipeline(&self) -> LibraryPipeline<S> {
        LibraryPipeline::new(
            LibraryExtractor::with_client(self.client.clone(), &self.config),
            CsvWriter::new(self.storage.clone()),
            self.config.filename.clone(),
        )
    }

    /// 執行一次完整的抽取；失敗會記錄後往上拋，不會寫出檔案
    pub async fn run_once(&self) -> Result<RunSummary> {
        let engine = EtlEngine::new(self.pipeline());

        match engine.run().await {
            Ok(summary) => {
                tracing::info!(
                    "✅ Extraction finished: {} libraries -> {}",
                    summary.records,
                    summary.output_path
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::error!("❌ Extraction run failed: {}", e);
                Err(e)
            }
        }
    }

    /// 登記每日觸發點。單純登記不會執行任何東西，需搭配 [`Runner::tick`] 或 [`Runner::run_daily`]
    pub fn register_daily<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<DailySchedule<Tz>> {
        DailySchedule::register(self.config.trigger, now)
    }

    /// 輪詢迴圈的一步：到期就執行一次。
    ///
    /// 單次執行失敗只記錄，回傳 [`TickOutcome::Failed`]；排程已先推進到下一天，不會當天重跑。
    pub async fn tick<Tz: TimeZone>(
        &self,
        schedule: &mut DailySchedule<Tz>,
        now: &DateTime<Tz>,
    ) -> Result<TickOutcome> {
        if !schedule.run_pending(now)? {
            return Ok(TickOutcome::Idle);
        }

        match self.run_once().await {
            Ok(summary) => Ok(TickOutcome::Completed(summary)),
            Err(e) => {
                tracing::warn!("Scheduled run skipped until the next trigger: {}", e);
                Ok(TickOutcome::Failed)
            }
        }
    }

    /// 阻塞式輪詢迴圈，直到 Ctrl-C
    pub async fn run_daily(&self) -> Result<()> {
        self.run_daily_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Cannot listen for Ctrl-C, running until killed: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// 每個 poll interval 呼叫一次 [`Runner::tick`]，`shutdown` 完成時結束。
    /// 只有排程本身出錯才會以錯誤結束。
    pub async fn run_daily_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let mut schedule = self.register_daily(&Local::now())?;
        tracing::info!(
            "⏰ Daily extraction registered at {} (next run {}), polling every {}s",
            schedule.trigger(),
            schedule.next_run().format("%Y-%m-%d %H:%M"),
            self.config.poll_interval.as_secs()
        );

        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("⏹️ Daily extraction loop stopping");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    if self.tick(&mut schedule, &Local::now()).await? != TickOutcome::Idle {
                        tracing::info!(
                            "⏰ Next run at {}",
                            schedule.next_run().format("%Y-%m-%d %H:%M")
                        );
                    }
                }
            }
        }
    }
}
