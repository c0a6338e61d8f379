pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::storage::LocalStorage;
pub use app::{
    extractor::LibraryExtractor,
    runner::{Runner, TickOutcome},
    writer::CsvWriter,
};
pub use config::{AppConfig, Credential};
pub use crate::core::{
    etl::{EtlEngine, RunSummary},
    mapper::RecordMapper,
    scheduler::{DailySchedule, DailyTrigger},
};
pub use domain::model::{LibraryRecord, RawFeature, ResultSet};
pub use utils::error::{EtlError, Result};
