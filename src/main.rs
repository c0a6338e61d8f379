use anyhow::Context;
use clap::Parser;
use library_etl::utils::error::ErrorSeverity;
use library_etl::utils::logger::{self, LogFormat};
use library_etl::{CliConfig, EtlError, Runner};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(LogFormat::from_json_flag(cli.json_logs), cli.verbose);

    tracing::info!("Starting library-etl");

    let file = cli
        .load_file()
        .with_context(|| format!("failed to load config file {:?}", cli.config))?;

    let config = match cli.resolve(file) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    let runner = Runner::new(config);

    if cli.daily {
        if cli.run_now {
            run_once(&runner).await;
        }
        if let Err(e) = runner.run_daily().await {
            exit_with(&e);
        }
        return Ok(());
    }

    // 預設模式：登記每日觸發點但不進入輪詢迴圈，只跑一次
    let schedule = runner.register_daily(&chrono::Local::now())?;
    tracing::debug!(
        "Daily trigger {} registered but not polled (use --daily), next due {}",
        schedule.trigger(),
        schedule.next_run().format("%Y-%m-%d %H:%M")
    );
    run_once(&runner).await;

    Ok(())
}

async fn run_once(runner: &Runner<library_etl::LocalStorage>) {
    match runner.run_once().await {
        Ok(summary) => {
            println!("✅ Extracted {} libraries", summary.records);
            println!("📁 Output saved to: {}", summary.output_path);
        }
        Err(e) => exit_with(&e),
    }
}

fn exit_with(e: &EtlError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
