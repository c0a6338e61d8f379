#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::mapper::AddressDefaults;
use crate::config::toml_config::has_unresolved_placeholder;
use crate::core::scheduler::DailyTrigger;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.golemio.cz/v2";
pub const API_KEY_ENV: &str = "GOLEMIO_API_KEY";
pub const DEFAULT_OUTPUT_PATH: &str = ".";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Golemio 的 access token。Debug 輸出會遮蔽內容
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// 明確給的值優先，否則用環境變數 `GOLEMIO_API_KEY` 的值。
    ///
    /// 空白或仍含未替換 `${...}` 的值視為沒給。
    pub fn resolve(explicit: Option<String>, env_value: Option<String>) -> Result<Self> {
        explicit
            .filter(|token| Self::usable(token))
            .or_else(|| env_value.filter(|token| Self::usable(token)))
            .map(Self)
            .ok_or_else(|| EtlError::MissingConfigError {
                field: format!("api_key (or {})", API_KEY_ENV),
            })
    }

    fn usable(token: &str) -> bool {
        !token.trim().is_empty() && !has_unresolved_placeholder(token)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// 一次執行所需的全部設定，由呼叫端建立後傳給 Runner
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub credential: Credential,
    pub output_path: String,
    pub filename: Option<String>,
    pub trigger: DailyTrigger,
    pub poll_interval: Duration,
    pub defaults: AddressDefaults,
}

impl AppConfig {
    pub fn new(credential: Credential) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credential,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            filename: None,
            trigger: DailyTrigger::default(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            defaults: AddressDefaults::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_output_path(mut self, output_path: impl Into<String>) -> Self {
        self.output_path = output_path.into();
        self
    }

    pub fn with_filename(mut self, filename: Option<String>) -> Self {
        self.filename = filename;
        self
    }

    pub fn with_trigger(mut self, trigger: DailyTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_defaults(mut self, defaults: AddressDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// 圖書館清單的完整 URL
    pub fn libraries_endpoint(&self) -> String {
        format!("{}/municipallibraries", self.base_url.trim_end_matches('/'))
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_path("output_path", &self.output_path)?;
        if let Some(filename) = &self.filename {
            validation::validate_filename("filename", filename)?;
        }
        validation::validate_positive_number(
            "poll_interval_seconds",
            self.poll_interval.as_secs(),
            1,
        )?;
        validation::validate_non_empty_string("defaults.city", &self.defaults.city)?;
        validation::validate_non_empty_string("defaults.region", &self.defaults.region)?;
        validation::validate_non_empty_string("defaults.country", &self.defaults.country)?;
        Ok(())
    }
}
