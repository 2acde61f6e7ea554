use clap::Parser;
use claimcheck::app::{check_once, run_session};
use claimcheck::utils::error::{CheckError, ErrorSeverity};
use claimcheck::utils::{logger, validation::Validate};
use claimcheck::{AppConfig, ClaimPipeline, CliConfig, Outcome};

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 4,      // 輸入錯誤
        ErrorSeverity::Medium => 2,   // 外部服務錯誤，可重新提交
        ErrorSeverity::High => 1,     // 配置錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}

fn report_startup_error(e: &CheckError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Kind: {:?}, Severity: {:?})",
        e,
        e.kind(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(exit_code(e.severity()));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.log_format);

    tracing::info!("🚀 Starting claimcheck");
    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    // 載入並驗證配置，缺少金鑰直接結束
    let config: AppConfig = cli
        .load_app_config()
        .unwrap_or_else(|e| report_startup_error(&e));
    if let Err(e) = config.validate() {
        report_startup_error(&e);
    }
    tracing::info!("✅ Configuration loaded (model: {})", config.model_name());

    let pipeline = ClaimPipeline::from_config(&config).unwrap_or_else(|e| report_startup_error(&e));

    match &cli.claim {
        Some(claim) => {
            let (outcome, rendered) = check_once(&pipeline, claim, cli.json).await?;
            println!("{}", rendered);
            if let Outcome::Failed(failure) = outcome {
                let severity = match failure.kind {
                    claimcheck::ErrorKind::InvalidInput => ErrorSeverity::Low,
                    _ => ErrorSeverity::Medium,
                };
                std::process::exit(exit_code(severity));
            }
        }
        None => {
            tracing::info!("⌨️ Reading claims from stdin, one per line");
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            let summary = run_session(&pipeline, stdin, &mut stdout, cli.json).await?;
            if summary.submitted > 0 && summary.done == 0 {
                std::process::exit(exit_code(ErrorSeverity::Medium));
            }
        }
    }

    Ok(())
}
