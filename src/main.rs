use clap::Parser;
use shelf_sync::config::profile::SyncProfile;
use shelf_sync::utils::{logger, validation::Validate};
use shelf_sync::{CliConfig, LocalStorage, SyncEngine, SyncPipeline};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting shelf-sync CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入解析設定檔（未指定時使用內建預設）
    let profile = match &config.profile {
        Some(path) => match SyncProfile::from_file(path) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!("❌ Failed to load profile: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => SyncProfile::default(),
    };
    if config.tolerance_days.is_none() {
        config.tolerance_days = Some(profile.matching.tolerance_days);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 創建存儲和管道
    let storage = LocalStorage::new(config.output_dir.clone());
    let pipeline = SyncPipeline::new(storage, config, profile);

    let engine = SyncEngine::new(pipeline);

    match engine.run() {
        Ok(output_dir) => {
            tracing::info!("✅ Sync completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_dir);
            println!("\n✅ Done!");
        }
        Err(e) => {
            tracing::error!(
                "❌ Sync failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                shelf_sync::utils::error::ErrorSeverity::Low => 0,
                shelf_sync::utils::error::ErrorSeverity::Medium => 2,
                shelf_sync::utils::error::ErrorSeverity::High => 1,
                shelf_sync::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
