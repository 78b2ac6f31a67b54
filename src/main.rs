use clap::Parser;
use space_explorer::utils::error::ErrorSeverity;
use space_explorer::utils::logger;
use space_explorer::{CliConfig, FeedClient, GalleryApp, LoadOutcome, LocalStorage};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting space-explorer");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let feed = FeedClient::from_config(&config)?;
    let storage = LocalStorage::new(config.output_path.clone());
    let today = chrono::Utc::now().date_naive();
    let mut app = GalleryApp::new(config, storage, feed, today);

    match app.run().await {
        Ok(report) => {
            if let Some(status) = &report.status {
                println!("{}", status.message);
            }
            println!("📁 Gallery saved to: {}", report.output_path);

            // the page is still written on a failed load; the exit code reports it
            if report.outcome == LoadOutcome::Failed {
                std::process::exit(2);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Gallery build failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
