use crate::domain::model::{AnnotatedEvidence, Claim, SearchResult, Verdict};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 網路搜尋協作者。任何失敗都必須以 `SearchUnavailable` 回報。
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// 語言模型協作者。任何失敗都必須以 `VerdictUnavailable` 回報。
#[async_trait]
pub trait VerdictRequester: Send + Sync {
    async fn request(&self, claim: &Claim, evidence: &[AnnotatedEvidence]) -> Result<Verdict>;
}

