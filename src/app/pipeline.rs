use crate::app::extractor::LibraryExtractor;
use crate::app::writer::CsvWriter;
use crate::domain::model::LibraryRecord;
use crate::domain::ports::{Pipeline, Storage};
use crate::utils::error::Result;

/// Golemio 圖書館資料：HTTP 取得 → 欄位對應 → CSV
pub struct LibraryPipeline<S: Storage> {
    extractor: LibraryExtractor,
    writer: CsvWriter<S>,
    filename: Option<String>,
}

impl<S: Storage> LibraryPipeline<S> {
    pub fn new(extractor: LibraryExtractor, writer: CsvWriter<S>, filename: Option<String>) -> Self {
        Self {
            extractor,
            writer,
            filename,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for LibraryPipeline<S> {
    async fn extract(&self) -> Result<Vec<LibraryRecord>> {
        tracing::info!("🌐 Fetching libraries from {}", self.extractor.endpoint());
        self.extractor.extract().await
    }

    async fn load(&self, records: Vec<LibraryRecord>) -> Result<String> {
        self.writer.save(&records, self.filename.as_deref()).await
    }
}
