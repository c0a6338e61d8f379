use crate::config::{AppConfig, Credential};
use crate::core::mapper::RecordMapper;
use crate::domain::model::{FeatureCollection, RawFeature, ResultSet};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;

pub const ACCESS_TOKEN_HEADER: &str = "X-Access-Token";

/// 呼叫 Golemio `municipallibraries` 並轉成 ResultSet。
///
/// 不重試、不分頁，逾時沿用 reqwest 預設。
pub struct LibraryExtractor {
    client: Client,
    endpoint: String,
    credential: Credential,
    mapper: RecordMapper,
}

impl LibraryExtractor {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            endpoint: config.libraries_endpoint(),
            credential: config.credential.clone(),
            mapper: RecordMapper::new(config.defaults.clone()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 取得原始 features；連線失敗或非 2xx 都是錯誤，不回傳部分結果
    pub async fn fetch_features(&self) -> Result<Vec<RawFeature>> {
        tracing::debug!("Making API request to: {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, self.credential.expose())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            tracing::debug!("Non-success status {} from {}", status, self.endpoint);
            return Err(EtlError::HttpStatusError {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.bytes().await?;
        let collection: FeatureCollection = serde_json::from_slice(&body)?;

        Ok(collection.into_features())
    }

    /// 取得並轉換全部圖書館，筆數與順序和 API 回應相同
    pub async fn extract(&self) -> Result<ResultSet> {
        let features = self.fetch_features().await?;
        let records = self.mapper.map_all(&features);
        tracing::info!("📊 Extracted {} libraries", records.len());
        Ok(records)
    }
}
