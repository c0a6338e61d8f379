use crate::config::toml_config::TomlConfig;
use crate::config::{AppConfig, Credential, API_KEY_ENV};
use crate::core::scheduler::DailyTrigger;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "library-etl")]
#[command(about = "Exports Prague municipal libraries from the Golemio API to CSV")]
pub struct CliConfig {
    #[arg(long, help = "Golemio access token (defaults to $GOLEMIO_API_KEY)")]
    pub api_key: Option<String>,

    #[arg(long, help = "API base URL [default: https://api.golemio.cz/v2]")]
    pub base_url: Option<String>,

    #[arg(long, help = "Output directory [default: .]")]
    pub output_path: Option<String>,

    #[arg(long, help = "Output file name [default: kniznice_<YYYYMMDD_HHMMSS>.csv]")]
    pub filename: Option<String>,

    #[arg(long, help = "Optional TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Stay running and extract every day at --at")]
    pub daily: bool,

    #[arg(long, help = "Daily trigger time, local HH:MM [default: 07:00]")]
    pub at: Option<String>,

    #[arg(long, requires = "daily", help = "With --daily, also run once right away")]
    pub run_now: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn load_file(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => TomlConfig::from_file(path),
            None => Ok(TomlConfig::default()),
        }
    }

    /// 命令列 > 設定檔 > 內建預設；token 最後才看環境變數
    pub fn resolve(&self, file: TomlConfig) -> Result<AppConfig> {
        self.resolve_with_env(file, std::env::var(API_KEY_ENV).ok())
    }

    pub fn resolve_with_env(&self, file: TomlConfig, env_key: Option<String>) -> Result<AppConfig> {
        let explicit_key = self.api_key.clone().or(file.api.api_key);
        let credential = Credential::resolve(explicit_key, env_key)?;

        let mut config = AppConfig::new(credential)
            .with_filename(self.filename.clone().or(file.output.filename));

        if let Some(base_url) = self.base_url.clone().or(file.api.base_url) {
            config = config.with_base_url(base_url);
        }
        if let Some(output_path) = self.output_path.clone().or(file.output.path) {
            config = config.with_output_path(output_path);
        }
        if let Some(at) = self.at.as_deref().or(file.schedule.at.as_deref()) {
            config = config.with_trigger(DailyTrigger::parse(at)?);
        }
        if let Some(seconds) = file.schedule.poll_interval_seconds {
            config = config.with_poll_interval(Duration::from_secs(seconds));
        }
        if let Some(defaults) = file.defaults {
            config = config.with_defaults(defaults);
        }

        config.validate()?;
        Ok(config)
    }
}
