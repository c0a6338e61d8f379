use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// 一次完整的執行結果
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub records: usize,
    pub output_path: String,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 依序執行 extract → transform → load，任一步失敗就中止，不會留下部分結果
    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting library extraction");

        let records = self.pipeline.extract().await?;
        let records = self.pipeline.transform(records).await?;
        let count = records.len();

        let output_path = self.pipeline.load(records).await?;

        Ok(RunSummary {
            records: count,
            output_path,
        })
    }
}
