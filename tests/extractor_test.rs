use anyhow::Result;
use httpmock::prelude::*;
use library_etl::{AppConfig, Credential, EtlError, LibraryExtractor};
use serde_json::json;

fn extractor_for(server: &MockServer) -> LibraryExtractor {
    let config = AppConfig::new(Credential::new("extract-token")).with_base_url(server.base_url());
    LibraryExtractor::new(&config)
}

#[tokio::test]
async fn test_extract_keeps_count_and_order() -> Result<()> {
    let server = MockServer::start_async().await;

    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/municipallibraries")
                .header("X-Access-Token", "extract-token");
            then.status(200).json_body(json!({
                "type": "FeatureCollection",
                "features": [
                    {"properties": {"id": "c", "name": "Knihovna Chodov"}},
                    {"properties": {"id": "a"}, "geometry": {"coordinates": [14.41, 50.08]}},
                    {},
                    {"properties": {"id": "b", "address": {"locality": "Praha 4"}}}
                ]
            }));
        })
        .await;

    let records = extractor_for(&server).extract().await?;

    api_mock.assert_async().await;
    assert_eq!(records.len(), 4);

    let ids: Vec<Option<&str>> = records.iter().map(|r| r.id.as_deref()).collect();
    assert_eq!(ids, vec![Some("c"), Some("a"), None, Some("b")]);

    assert_eq!(records[1].longitude, Some(14.41));
    assert_eq!(records[1].latitude, Some(50.08));
    assert_eq!(records[2].city, "Praha");
    assert_eq!(records[3].city, "Praha 4");

    Ok(())
}

#[tokio::test]
async fn test_extract_server_error_returns_no_records() -> Result<()> {
    let server = MockServer::start_async().await;

    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/municipallibraries");
            then.status(500);
        })
        .await;

    let result = extractor_for(&server).extract().await;

    api_mock.assert_async().await;
    assert!(matches!(
        result,
        Err(EtlError::HttpStatusError { status: 500, .. })
    ));

    Ok(())
}

#[tokio::test]
async fn test_extract_missing_features_is_empty() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/municipallibraries");
            then.status(200).json_body(json!({"type": "FeatureCollection"}));
        })
        .await;

    let records = extractor_for(&server).extract().await?;
    assert!(records.is_empty());

    Ok(())
}
