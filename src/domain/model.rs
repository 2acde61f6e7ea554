use crate::utils::error::{CheckError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 使用者輸入的待查證陳述，建立後不可變
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Claim(String);

impl Claim {
    /// 空字串或只有空白時回傳 `InvalidInput`
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CheckError::invalid_input(
                "claim is empty or whitespace-only",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub source_domain: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BiasLabel {
    Left,
    CenterLeft,
    Center,
    CenterRight,
    Right,
    Mixed,
    Unknown,
}

impl BiasLabel {
    /// 寬鬆解析：不分大小寫，接受 centre/center 與 `-`、`_`、空白分隔；
    /// 無法辨識時回傳 `Unknown`
    pub fn parse_lenient(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .to_ascii_lowercase()
            .replace("centre", "center")
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c })
            .collect();

        match normalized.as_str() {
            "left" | "far-left" | "left-wing" => Self::Left,
            "center-left" | "left-center" | "lean-left" => Self::CenterLeft,
            "center" | "least-biased" | "neutral" => Self::Center,
            "center-right" | "right-center" | "lean-right" => Self::CenterRight,
            "right" | "far-right" | "right-wing" => Self::Right,
            "mixed" => Self::Mixed,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::CenterLeft => "center-left",
            Self::Center => "center",
            Self::CenterRight => "center-right",
            Self::Right => "right",
            Self::Mixed => "mixed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BiasLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasEntry {
    pub domain: String,
    pub label: BiasLabel,
    pub credibility_score: Option<f64>,
}

impl BiasEntry {
    pub fn new(domain: &str, label: BiasLabel, credibility_score: Option<f64>) -> Self {
        Self {
            domain: domain.to_string(),
            label,
            credibility_score,
        }
    }

    /// 查無資料時的哨兵值
    pub fn unknown(domain: &str) -> Self {
        Self::new(domain, BiasLabel::Unknown, None)
    }

    pub fn is_unknown(&self) -> bool {
        self.label == BiasLabel::Unknown && self.credibility_score.is_none()
    }
}

/// 來源可信層級：3 官方/司法，2 區域主要媒體，1 國際組織或可信媒體，0 其他
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrustTier {
    pub level: u8,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedEvidence {
    pub result: SearchResult,
    pub bias: BiasEntry,
    pub trust: TrustTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictLabel {
    #[serde(rename = "Verified")]
    Verified,
    #[serde(rename = "Partially supported")]
    PartiallySupported,
    #[serde(rename = "Unsubstantiated")]
    Unsubstantiated,
    #[serde(rename = "Unsupported & polarising")]
    UnsupportedAndPolarising,
    #[serde(rename = "Uncertain")]
    Uncertain,
}

impl VerdictLabel {
    pub const ALL: [VerdictLabel; 5] = [
        Self::Verified,
        Self::PartiallySupported,
        Self::Unsubstantiated,
        Self::UnsupportedAndPolarising,
        Self::Uncertain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::PartiallySupported => "Partially supported",
            Self::Unsubstantiated => "Unsubstantiated",
            Self::UnsupportedAndPolarising => "Unsupported & polarising",
            Self::Uncertain => "Uncertain",
        }
    }

    /// 模型回傳的標籤：不分大小寫，`_`/`-` 視為空白，`and` 視為 `&`
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw
            .trim()
            .to_ascii_lowercase()
            .replace(['_', '-'], " ")
            .replace(" and ", " & ")
            .replace("polarizing", "polarising");
        let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

        Self::ALL
            .into_iter()
            .find(|label| label.as_str().to_ascii_lowercase() == normalized)
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub label: VerdictLabel,
    pub explanation: String,
    pub evidence_used: Vec<AnnotatedEvidence>,
    pub checked_at: DateTime<Utc>,
}

impl Verdict {
    pub fn new(label: VerdictLabel, explanation: String, evidence_used: Vec<AnnotatedEvidence>) -> Self {
        Self {
            label,
            explanation,
            evidence_used,
            checked_at: Utc::now(),
        }
    }
}
