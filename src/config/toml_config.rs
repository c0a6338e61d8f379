use crate::core::mapper::AddressDefaults;
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 可選的 TOML 設定檔，所有欄位都可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub schedule: ScheduleSection,
    pub defaults: Option<AddressDefaults>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleSection {
    pub at: Option<String>,
    pub poll_interval_seconds: Option<u64>,
}

const PLACEHOLDER_PATTERN: &str = r"\$\{([^}]+)\}";

/// 值裡還留著沒有被環境變數替換掉的 `${VAR}`
pub fn has_unresolved_placeholder(value: &str) -> bool {
    Regex::new(PLACEHOLDER_PATTERN)
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOLEMIO_API_KEY})，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(PLACEHOLDER_PATTERN).map_err(|e| EtlError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[api]
base_url = "https://api.golemio.cz/v2"
api_key = "abc"

[output]
path = "./exports"
filename = "kniznice.csv"

[schedule]
at = "06:30"
poll_interval_seconds = 30

[defaults]
city = "Praha"
region = "Hlavní město Praha"
country = "Česká republika"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api.api_key.as_deref(), Some("abc"));
        assert_eq!(config.output.path.as_deref(), Some("./exports"));
        assert_eq!(config.schedule.at.as_deref(), Some("06:30"));
        assert_eq!(config.schedule.poll_interval_seconds, Some(30));
        assert_eq!(config.defaults.unwrap(), AddressDefaults::default());
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.api.base_url.is_none());
        assert!(config.output.filename.is_none());
        assert!(config.defaults.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LIBRARY_ETL_TEST_TOKEN", "token-from-env");

        let toml_content = r#"
[api]
api_key = "${LIBRARY_ETL_TEST_TOKEN}"
base_url = "${LIBRARY_ETL_TEST_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.api_key.as_deref(), Some("token-from-env"));
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("${LIBRARY_ETL_TEST_UNSET_VAR}")
        );

        std::env::remove_var("LIBRARY_ETL_TEST_TOKEN");
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(has_unresolved_placeholder("${GOLEMIO_API_KEY}"));
        assert!(has_unresolved_placeholder("Bearer ${TOKEN}"));
        assert!(!has_unresolved_placeholder("eyJhbGciOi"));
        assert!(!has_unresolved_placeholder("${}"));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = TomlConfig::from_toml_str("[api\nbase_url = 1").unwrap_err();
        assert!(matches!(err, EtlError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\npath = \"/tmp/kniznice\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.path.as_deref(), Some("/tmp/kniznice"));
    }
}
