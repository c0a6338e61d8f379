use crate::domain::model::LibraryRecord;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::{Local, NaiveDateTime};
use csv::WriterBuilder;

/// 讓 Excel 正確辨識 UTF-8
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct CsvWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> CsvWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// `kniznice_YYYYMMDD_HHMMSS.csv`
    pub fn default_filename(now: NaiveDateTime) -> String {
        format!("kniznice_{}.csv", now.format("%Y%m%d_%H%M%S"))
    }

    /// BOM + 標題列 + 每筆一列；沒有資料時仍會輸出標題列
    pub fn encode(records: &[LibraryRecord]) -> Result<Vec<u8>> {
        let mut buffer = UTF8_BOM.to_vec();
        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut buffer);
            writer.write_record(LibraryRecord::COLUMNS)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        Ok(buffer)
    }

    /// 寫入檔案並回傳完整路徑。直接覆寫同名檔案
    pub async fn save(&self, records: &[LibraryRecord], filename: Option<&str>) -> Result<String> {
        let filename = match filename {
            Some(name) => name.to_string(),
            None => Self::default_filename(Local::now().naive_local()),
        };

        let data = Self::encode(records)?;
        tracing::debug!("Writing {} bytes to {}", data.len(), filename);
        self.storage.write_file(&filename, &data).await?;

        let location = self.storage.location(&filename);
        tracing::info!("💾 Data saved to {}", location);
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn location(&self, path: &str) -> String {
            format!("mock://{}", path)
        }
    }

    fn sample_record() -> LibraryRecord {
        LibraryRecord {
            id: Some("1".to_string()),
            name: Some("Knihovna Ládví, pobočka".to_string()),
            street: None,
            postal_code: Some("18200".to_string()),
            city: "Praha".to_string(),
            region: "Hlavní město Praha".to_string(),
            country: "Česká republika".to_string(),
            latitude: Some(50.08),
            longitude: Some(14.41),
            opening_hours: "Pondelok: 9-18; Utorok: 9-18".to_string(),
        }
    }

    #[test]
    fn test_default_filename_has_second_resolution() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(7, 0, 5)
            .unwrap();
        assert_eq!(
            CsvWriter::<MockStorage>::default_filename(now),
            "kniznice_20261018_070005.csv"
        );
    }

    #[test]
    fn test_encode_empty_has_bom_and_header_only() {
        let data = CsvWriter::<MockStorage>::encode(&[]).unwrap();
        assert!(data.starts_with(UTF8_BOM));

        let text = std::str::from_utf8(&data[UTF8_BOM.len()..]).unwrap();
        assert_eq!(text, format!("{}\n", LibraryRecord::COLUMNS.join(",")));
    }

    #[test]
    fn test_encode_quotes_and_blanks() {
        let data = CsvWriter::<MockStorage>::encode(&[sample_record()]).unwrap();
        let text = std::str::from_utf8(&data[UTF8_BOM.len()..]).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "1,\"Knihovna Ládví, pobočka\",,18200,Praha,Hlavní město Praha,Česká republika,50.08,14.41,Pondelok: 9-18; Utorok: 9-18"
        );
    }

    #[tokio::test]
    async fn test_save_with_explicit_filename() {
        let storage = MockStorage::new();
        let writer = CsvWriter::new(storage.clone());

        let location = writer
            .save(&[sample_record(), sample_record()], Some("export.csv"))
            .await
            .unwrap();

        assert_eq!(location, "mock://export.csv");
        let data = storage.read_file("export.csv").await.unwrap();
        let text = String::from_utf8(data).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_save_generates_timestamped_name() {
        let storage = MockStorage::new();
        let writer = CsvWriter::new(storage.clone());

        let location = writer.save(&[], None).await.unwrap();

        assert!(location.starts_with("mock://kniznice_"));
        assert!(location.ends_with(".csv"));
        let name = location.trim_start_matches("mock://");
        // kniznice_ + YYYYMMDD_HHMMSS + .csv
        assert_eq!(name.len(), "kniznice_".len() + 15 + ".csv".len());
        assert!(storage.read_file(name).await.is_ok());
    }
}
