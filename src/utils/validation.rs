use crate::utils::error::{CheckError, Result};
use std::fmt::Display;
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid_value(field_name: &str, value: impl Display, reason: impl Into<String>) -> CheckError {
    CheckError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 只接受 http/https
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid_value(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid_value(field_name, url_str, format!("Invalid URL format: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid_value(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        Err(invalid_value(field_name, path, "Path cannot be empty"))
    } else if path.contains('\0') {
        Err(invalid_value(field_name, path, "Path contains null bytes"))
    } else {
        Ok(())
    }
}

/// 副檔名比對不分大小寫
pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let ext = Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| invalid_value(field_name, file, "File has no extension"))?;

    if allowed_extensions.contains(&ext.as_str()) {
        return Ok(());
    }
    Err(invalid_value(
        field_name,
        file,
        format!("Unsupported file extension: {} (allowed: {})", ext, allowed_extensions.join(", ")),
    ))
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| CheckError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// API 金鑰：空白或未替換的 `${VAR}` 都視為缺少
pub fn validate_api_key(field_name: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() || (trimmed.starts_with("${") && trimmed.ends_with('}')) {
        return Err(CheckError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid_value(field_name, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(invalid_value(field_name, value, format!("Valid values: {}", allowed.join(", "))))
}

/// NaN 不在任何範圍內
pub fn validate_range<T: PartialOrd + Display + Copy>(field_name: &str, value: T, min: T, max: T) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(invalid_value(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("search.endpoint", "https://api.tavily.com/search").is_ok());
        assert!(validate_url("search.endpoint", "http://127.0.0.1:8080/search").is_ok());
        assert!(validate_url("search.endpoint", "").is_err());
        assert!(validate_url("search.endpoint", "invalid-url").is_err());
        assert!(validate_url("search.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key("llm.api_key", "sk-test").is_ok());
        assert!(matches!(
            validate_api_key("llm.api_key", "   "),
            Err(CheckError::MissingConfigError { .. })
        ));
        assert!(matches!(
            validate_api_key("llm.api_key", "${OPENAI_API_KEY}"),
            Err(CheckError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("bias.table_path", "data/media_bias.csv", &["csv"]).is_ok());
        assert!(validate_file_extension("bias.table_path", "data/MEDIA.CSV", &["csv"]).is_ok());
        assert!(validate_file_extension("bias.table_path", "data/media_bias.txt", &["csv"]).is_err());
        assert!(validate_file_extension("bias.table_path", "data/media_bias", &["csv"]).is_err());
    }

    #[test]
    fn test_validate_range_and_one_of() {
        assert!(validate_range("search.max_results", 6, 1, 10).is_ok());
        assert!(validate_range("search.max_results", 11, 1, 10).is_err());
        assert!(validate_range("llm.temperature", f32::NAN, 0.0, 2.0).is_err());
        assert!(validate_range("llm.temperature", 2.0_f32, 0.0, 2.0).is_ok());
        assert!(validate_one_of("search.search_depth", "basic", &["basic", "advanced"]).is_ok());
        assert!(validate_one_of("search.search_depth", "deep", &["basic", "advanced"]).is_err());
    }
}
