use crate::domain::model::{BiasEntry, BiasLabel};
use crate::utils::error::{CheckError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// 內建的媒體偏向表：(網域, 偏向, 可信度)
const BUILTIN_TABLE: &[(&str, BiasLabel, Option<f64>)] = &[
    ("apnews.com", BiasLabel::Center, Some(0.9)),
    ("reuters.com", BiasLabel::Center, Some(0.9)),
    ("bbc.com", BiasLabel::CenterLeft, Some(0.85)),
    ("bbc.co.uk", BiasLabel::CenterLeft, Some(0.85)),
    ("npr.org", BiasLabel::CenterLeft, Some(0.8)),
    ("nytimes.com", BiasLabel::CenterLeft, Some(0.8)),
    ("washingtonpost.com", BiasLabel::CenterLeft, Some(0.8)),
    ("theguardian.com", BiasLabel::CenterLeft, Some(0.75)),
    ("cnn.com", BiasLabel::Left, Some(0.65)),
    ("msnbc.com", BiasLabel::Left, Some(0.6)),
    ("wsj.com", BiasLabel::CenterRight, Some(0.8)),
    ("ft.com", BiasLabel::CenterRight, Some(0.85)),
    ("economist.com", BiasLabel::CenterRight, Some(0.85)),
    ("foxnews.com", BiasLabel::Right, Some(0.5)),
    ("breitbart.com", BiasLabel::Right, Some(0.3)),
    ("aljazeera.com", BiasLabel::CenterLeft, Some(0.7)),
    ("thehindu.com", BiasLabel::CenterLeft, Some(0.75)),
    ("indianexpress.com", BiasLabel::Center, Some(0.75)),
    ("timesofindia.com", BiasLabel::CenterRight, Some(0.6)),
    ("ndtv.com", BiasLabel::CenterLeft, Some(0.65)),
    ("nasa.gov", BiasLabel::Center, Some(0.95)),
    ("who.int", BiasLabel::Center, Some(0.9)),
    ("snopes.com", BiasLabel::CenterLeft, Some(0.8)),
    ("politifact.com", BiasLabel::CenterLeft, Some(0.8)),
    ("factcheck.org", BiasLabel::Center, Some(0.85)),
    ("fullfact.org", BiasLabel::Center, Some(0.85)),
    ("wikipedia.org", BiasLabel::Mixed, Some(0.6)),
];

#[derive(Debug, Deserialize)]
struct BiasRow {
    domain: String,
    #[serde(default)]
    bias: String,
    #[serde(default)]
    credibility: String,
}

/// 網域 → 偏向/可信度的唯讀對照表。啟動時載入一次，之後不再變動，
/// 可在多個同時執行的查證之間共用而不需加鎖。
#[derive(Debug, Clone, Default)]
pub struct BiasDirectory {
    entries: HashMap<String, BiasEntry>,
}

impl BiasDirectory {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self::empty().with_overrides(
            BUILTIN_TABLE
                .iter()
                .map(|(domain, label, score)| BiasEntry::new(domain, *label, *score)),
        )
    }

    /// 從 CSV 檔載入（標頭：`domain,bias,credibility`）
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(&path)?;
        tracing::debug!("Loading bias table from {}", path.as_ref().display());
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (line, row) in csv_reader.deserialize::<BiasRow>().enumerate() {
            let row = row?;
            if row.domain.is_empty() {
                tracing::warn!("⚠️ Skipping bias table row {} with empty domain", line + 2);
                continue;
            }
            let credibility_score = parse_credibility(&row.credibility).map_err(|reason| {
                CheckError::BiasTableError {
                    message: format!("row {} ({}): {}", line + 2, row.domain, reason),
                }
            })?;
            entries.push(BiasEntry::new(
                &row.domain,
                BiasLabel::parse_lenient(&row.bias),
                credibility_score,
            ));
        }

        let directory = Self::empty().with_overrides(entries);
        tracing::info!("📚 Loaded {} bias table entries", directory.len());
        Ok(directory)
    }

    /// 後加入的項目會覆蓋相同網域的舊項目
    pub fn with_overrides<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = BiasEntry>,
    {
        for mut entry in entries {
            let key = normalize_domain(&entry.domain);
            entry.domain = key.clone();
            self.entries.insert(key, entry);
        }
        self
    }

    /// 一定回傳結果；查無此網域時回傳 `unknown` 哨兵值
    pub fn lookup(&self, domain: &str) -> BiasEntry {
        let key = normalize_domain(domain);
        self.entries
            .get(&key)
            .cloned()
            .unwrap_or_else(|| BiasEntry::unknown(&key))
    }

    pub fn into_entries(self) -> impl Iterator<Item = BiasEntry> {
        self.entries.into_values()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

fn normalize_domain(domain: &str) -> String {
    let lowered = domain.trim().to_ascii_lowercase();
    lowered
        .strip_prefix("www.")
        .map(str::to_string)
        .unwrap_or(lowered)
}

fn parse_credibility(raw: &str) -> std::result::Result<Option<f64>, String> {
    let trimmed = raw.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" | "unknown" | "n/a" => return Ok(None),
        "high" => return Ok(Some(0.9)),
        "medium" | "mixed" => return Ok(Some(0.6)),
        "low" => return Ok(Some(0.3)),
        _ => {}
    }

    let score: f64 = trimmed
        .parse()
        .map_err(|_| format!("unrecognised credibility '{}'", trimmed))?;
    if !(0.0..=1.0).contains(&score) {
        return Err(format!("credibility {} is outside 0.0..=1.0", score));
    }
    Ok(Some(score))
}
