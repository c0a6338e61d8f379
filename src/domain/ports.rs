use crate::domain::model::LibraryRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 給日誌與使用者看的完整位置
    fn location(&self, path: &str) -> String;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<LibraryRecord>>;

    /// 預設不做額外處理
    async fn transform(&self, records: Vec<LibraryRecord>) -> Result<Vec<LibraryRecord>> {
        Ok(records)
    }

    async fn load(&self, records: Vec<LibraryRecord>) -> Result<String>;
}
