use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Search unavailable: {message}")]
    SearchUnavailable { message: String },

    #[error("Verdict unavailable: {message}")]
    VerdictUnavailable { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Bias table error: {message}")]
    BiasTableError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// 錯誤種類，提交失敗時回報給呼叫端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    SearchUnavailable,
    VerdictUnavailable,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CheckError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn search_unavailable(message: impl Into<String>) -> Self {
        Self::SearchUnavailable {
            message: message.into(),
        }
    }

    pub fn verdict_unavailable(message: impl Into<String>) -> Self {
        Self::VerdictUnavailable {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::SearchUnavailable { .. } => ErrorKind::SearchUnavailable,
            Self::VerdictUnavailable { .. } => ErrorKind::VerdictUnavailable,
            Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. }
            | Self::BiasTableError { .. } => ErrorKind::Configuration,
            Self::IoError(_) | Self::CsvError(_) | Self::SerializationError(_) => ErrorKind::System,
        }
    }

    /// 嚴重程度決定 CLI 的退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self.kind() {
            ErrorKind::InvalidInput => ErrorSeverity::Low,
            ErrorKind::SearchUnavailable | ErrorKind::VerdictUnavailable => ErrorSeverity::Medium,
            ErrorKind::Configuration => ErrorSeverity::High,
            ErrorKind::System => ErrorSeverity::Critical,
        }
    }

    /// 訊息本體，不含種類前綴
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput { message }
            | Self::SearchUnavailable { message }
            | Self::VerdictUnavailable { message }
            | Self::BiasTableError { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "Enter a non-empty claim and submit it again",
            Self::SearchUnavailable { .. } => {
                "Check the search API key and network connectivity, then re-submit the claim"
            }
            Self::VerdictUnavailable { .. } => {
                "The language model did not return a usable verdict; wait a moment and re-submit"
            }
            Self::MissingConfigError { .. } => {
                "Set the missing key in the config file or the matching environment variable"
            }
            Self::InvalidConfigValueError { .. } | Self::ConfigValidationError { .. } => {
                "Fix the configuration value and restart"
            }
            Self::BiasTableError { .. } | Self::CsvError(_) => {
                "Check the bias table CSV (header: domain,bias,credibility)"
            }
            Self::IoError(_) => "Check that the referenced file exists and is readable",
            Self::SerializationError(_) => "Re-run without --json to get the Markdown output",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.kind() {
            ErrorKind::InvalidInput => format!("Nothing to check: {}", self.message()),
            ErrorKind::SearchUnavailable => {
                format!("Web search is unavailable: {}", self.message())
            }
            ErrorKind::VerdictUnavailable => {
                format!("Could not obtain a verdict: {}", self.message())
            }
            ErrorKind::Configuration => format!("Configuration problem: {}", self),
            ErrorKind::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
