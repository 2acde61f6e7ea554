use crate::bias::Region;
use crate::utils::error::{CheckError, Result};
use crate::utils::validation::{
    validate_api_key, validate_file_extension, validate_non_empty_string, validate_one_of,
    validate_path, validate_range, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.tavily.com/search";
pub const DEFAULT_LLM_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// API 金鑰，Debug 輸出時遮蔽內容
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub bias: BiasConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub api_key: Option<ApiKey>,
    pub endpoint: Option<String>,
    pub max_results: Option<usize>,
    pub search_depth: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub max_query_words: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_key: Option<ApiKey>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BiasConfig {
    pub table_path: Option<String>,
    pub region: Option<Region>,
}

impl SearchConfig {
    pub fn api_key(&self) -> &str {
        self.api_key.as_ref().map(ApiKey::expose).unwrap_or("")
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_SEARCH_ENDPOINT)
    }

    /// 搜尋 API 單次最多 10 筆
    pub fn max_results(&self) -> usize {
        self.max_results.unwrap_or(6).min(10)
    }

    pub fn search_depth(&self) -> &str {
        self.search_depth.as_deref().unwrap_or("advanced")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(18))
    }

    pub fn max_query_words(&self) -> usize {
        self.max_query_words.unwrap_or(12)
    }
}

impl LlmConfig {
    pub fn api_key(&self) -> &str {
        self.api_key.as_ref().map(ApiKey::expose).unwrap_or("")
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_LLM_ENDPOINT)
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(0.2)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(60))
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CheckError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CheckError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 只用環境變數建立配置
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            search: SearchConfig {
                api_key: var("TAVILY_API_KEY").map(ApiKey::new),
                endpoint: var("TAVILY_URL"),
                ..SearchConfig::default()
            },
            llm: LlmConfig {
                api_key: var("OPENAI_API_KEY").map(ApiKey::new),
                endpoint: var("OPENAI_BASE_URL")
                    .map(|base| format!("{}/chat/completions", base.trim_end_matches('/'))),
                model: var("OPENAI_MODEL"),
                ..LlmConfig::default()
            },
            bias: BiasConfig {
                table_path: var("BIAS_TABLE"),
                region: None,
            },
        }
    }

    /// 替換環境變數 (例如 ${OPENAI_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn model_name(&self) -> &str {
        self.llm.model()
    }

    pub fn bias_table_path(&self) -> Option<&str> {
        self.bias.table_path.as_deref()
    }

    pub fn region(&self) -> Region {
        self.bias.region.unwrap_or_default()
    }

    /// 驗證配置；缺少金鑰屬於啟動時的致命錯誤
    pub fn validate_config(&self) -> Result<()> {
        let search_key = validate_required_field("search.api_key", &self.search.api_key)?;
        validate_api_key("search.api_key", search_key.expose())?;
        let llm_key = validate_required_field("llm.api_key", &self.llm.api_key)?;
        validate_api_key("llm.api_key", llm_key.expose())?;

        validate_url("search.endpoint", self.search.endpoint())?;
        validate_url("llm.endpoint", self.llm.endpoint())?;

        if let Some(max_results) = self.search.max_results {
            validate_range("search.max_results", max_results, 1, 10)?;
        }
        validate_one_of(
            "search.search_depth",
            self.search.search_depth(),
            &["basic", "advanced"],
        )?;
        validate_range("search.max_query_words", self.search.max_query_words(), 1, 64)?;
        validate_range(
            "search.timeout_seconds",
            self.search.timeout().as_secs(),
            1,
            600,
        )?;

        validate_non_empty_string("llm.model", self.llm.model())?;
        validate_range("llm.temperature", self.llm.temperature(), 0.0, 2.0)?;
        validate_range("llm.timeout_seconds", self.llm.timeout().as_secs(), 1, 600)?;

        if let Some(path) = self.bias_table_path() {
            validate_path("bias.table_path", path)?;
            validate_file_extension("bias.table_path", path, &["csv"])?;
        }

        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
