use crate::config::toml_config::AppConfig;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "claimcheck")]
#[command(about = "Check a claim against web search results, source bias labels and a language model")]
pub struct CliConfig {
    /// Claim to check. When omitted, claims are read from stdin, one per line
    pub claim: Option<String>,

    /// Path to TOML configuration file (defaults to environment variables)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the language model name
    #[arg(long)]
    pub model: Option<String>,

    /// CSV bias table (domain,bias,credibility) merged over the builtin table
    #[arg(long)]
    pub bias_table: Option<String>,

    /// Print the outcome as JSON instead of Markdown
    #[arg(long)]
    pub json: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入配置並套用命令列覆蓋設定
    pub fn load_app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                AppConfig::from_file(path)?
            }
            None => {
                tracing::info!("📁 Loading configuration from environment");
                AppConfig::from_env()
            }
        };

        if let Some(model) = &self.model {
            config.llm.model = Some(model.clone());
            tracing::info!("🔧 Model overridden to: {}", model);
        }
        if let Some(table) = &self.bias_table {
            config.bias.table_path = Some(table.clone());
            tracing::info!("🔧 Bias table overridden to: {}", table);
        }

        Ok(config)
    }
}
