use crate::adapters::{OpenAiVerdictRequester, TavilySearchClient};
use crate::bias::{BiasDirectory, TrustTiers};
use crate::config::AppConfig;
use crate::core::annotator::EvidenceAnnotator;
use crate::domain::model::{Claim, Verdict};
use crate::domain::ports::{SearchClient, VerdictRequester};
use crate::utils::error::{CheckError, ErrorKind, Result};
use chrono::Utc;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// 查證流程的狀態。`Done`/`Failed` 由 [`Outcome`] 表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Submitted,
    Searching,
    Annotating,
    Verdicting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Submitted => "submitted",
            Self::Searching => "searching",
            Self::Annotating => "annotating",
            Self::Verdicting => "verdicting",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub stage: Stage,
    pub message: String,
    pub suggestion: &'static str,
}

impl Failure {
    fn from_error(stage: Stage, error: &CheckError) -> Self {
        Self {
            kind: error.kind(),
            stage,
            message: error.message(),
            suggestion: error.recovery_suggestion(),
        }
    }
}

/// 一次提交的終止狀態：恰好是其中之一
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Done(Verdict),
    Failed(Failure),
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// 搜尋 → 標註 → 判定，線性執行一次。不重試、不快取，每次提交彼此獨立。
pub struct ClaimPipeline<S: SearchClient, V: VerdictRequester> {
    search: S,
    requester: V,
    annotator: EvidenceAnnotator,
}

impl<S: SearchClient, V: VerdictRequester> ClaimPipeline<S, V> {
    pub fn new(search: S, requester: V, annotator: EvidenceAnnotator) -> Self {
        Self {
            search,
            requester,
            annotator,
        }
    }

    pub fn from_parts(search: S, requester: V, directory: Arc<BiasDirectory>, tiers: TrustTiers) -> Self {
        Self::new(search, requester, EvidenceAnnotator::new(directory, tiers))
    }

    pub async fn run(&self, raw_claim: &str) -> Result<Verdict> {
        self.execute(raw_claim).await.map_err(|(_, error)| error)
    }

    pub async fn run_outcome(&self, raw_claim: &str) -> Outcome {
        match self.execute(raw_claim).await {
            Ok(verdict) => Outcome::Done(verdict),
            Err((stage, error)) => Outcome::Failed(Failure::from_error(stage, &error)),
        }
    }

    async fn execute(&self, raw_claim: &str) -> std::result::Result<Verdict, (Stage, CheckError)> {
        let run_id = next_run_id();
        let started = Instant::now();
        tracing::info!("🔎 [{}] Claim submitted ({} chars)", run_id, raw_claim.len());

        let claim = Claim::new(raw_claim).map_err(|e| {
            tracing::warn!("❌ [{}] Rejected before search: {}", run_id, e);
            (Stage::Submitted, e)
        })?;

        // Searching
        transition(&run_id, Stage::Submitted, Stage::Searching);
        let results = self
            .search
            .search(claim.as_str())
            .await
            .map_err(|e| fail(&run_id, Stage::Searching, tag(ErrorKind::SearchUnavailable, e)))?;
        tracing::info!("🌐 [{}] Search returned {} results", run_id, results.len());

        // Annotating
        transition(&run_id, Stage::Searching, Stage::Annotating);
        let evidence = self.annotator.annotate(results);

        // Verdicting
        transition(&run_id, Stage::Annotating, Stage::Verdicting);
        let verdict = self
            .requester
            .request(&claim, &evidence)
            .await
            .map_err(|e| fail(&run_id, Stage::Verdicting, tag(ErrorKind::VerdictUnavailable, e)))?;

        // 結果組裝：判定附上的證據一律以本次標註結果為準
        let verdict = Verdict {
            evidence_used: evidence,
            ..verdict
        };

        tracing::info!(
            "✅ [{}] Verdict '{}' with {} sources in {:?}",
            run_id,
            verdict.label,
            verdict.evidence_used.len(),
            started.elapsed()
        );
        Ok(verdict)
    }
}

impl ClaimPipeline<TavilySearchClient, OpenAiVerdictRequester> {
    /// 依設定建立使用 Tavily 與 OpenAI 的查證流程，偏向表只在這裡載入一次
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let directory = match config.bias_table_path() {
            Some(path) => {
                let from_csv = BiasDirectory::from_csv_path(path)?;
                let entries = from_csv.len();
                let merged = BiasDirectory::builtin().with_overrides(from_csv.into_entries());
                tracing::info!("📚 Bias table: builtin + {} entries from {}", entries, path);
                merged
            }
            None => BiasDirectory::builtin(),
        };

        Ok(Self::from_parts(
            TavilySearchClient::new(config.search.clone())?,
            OpenAiVerdictRequester::new(config.llm.clone())?,
            Arc::new(directory),
            TrustTiers::new(config.region()),
        ))
    }
}

static RUN_SEQ: AtomicU64 = AtomicU64::new(1);

/// 時間戳加上行程內遞增序號，同一毫秒內的並行查證也不會重複
fn next_run_id() -> String {
    let seq = RUN_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", Utc::now().format("%Y%m%dT%H%M%S%.3f"), seq)
}

fn transition(run_id: &str, from: Stage, to: Stage) {
    tracing::debug!("[{}] {} -> {}", run_id, from, to);
}

fn fail(run_id: &str, stage: Stage, error: CheckError) -> (Stage, CheckError) {
    tracing::error!("❌ [{}] {} -> failed: {}", run_id, stage, error);
    (stage, error)
}

/// 只標記來源階段：協作者已回報正確種類時原樣傳遞
fn tag(kind: ErrorKind, error: CheckError) -> CheckError {
    if error.kind() == kind {
        return error;
    }
    match kind {
        ErrorKind::SearchUnavailable => CheckError::search_unavailable(error.to_string()),
        ErrorKind::VerdictUnavailable => CheckError::verdict_unavailable(error.to_string()),
        _ => error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use crate::bias::Region;
    use crate::domain::model::{AnnotatedEvidence, BiasEntry, BiasLabel, SearchResult, VerdictLabel};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSearch {
        results: Vec<SearchResult>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SearchClient for FixedSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.results.clone())
        }
    }

    struct BrokenSearch;

    #[async_trait]
    impl SearchClient for BrokenSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
            Err(CheckError::IoError(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "socket timed out",
            )))
        }
    }

    struct EchoRequester {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl VerdictRequester for EchoRequester {
        async fn request(&self, claim: &Claim, _evidence: &[AnnotatedEvidence]) -> Result<Verdict> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // 故意不附證據，由流程負責組裝
            Ok(Verdict::new(
                VerdictLabel::Uncertain,
                format!("checked: {}", claim),
                Vec::new(),
            ))
        }
    }

    fn directory() -> Arc<BiasDirectory> {
        Arc::new(
            BiasDirectory::empty()
                .with_overrides([BiasEntry::new("nasa.gov", BiasLabel::Center, Some(0.95))]),
        )
    }

    fn result(domain: &str) -> SearchResult {
        SearchResult {
            title: "t".to_string(),
            url: format!("https://{}/", domain),
            snippet: "s".to_string(),
            source_domain: domain.to_string(),
        }
    }

    #[tokio::test]
    async fn test_pipeline_assembles_evidence_into_verdict() {
        let pipeline = ClaimPipeline::from_parts(
            FixedSearch {
                results: vec![result("nasa.gov"), result("example-blog.com")],
                calls: AtomicUsize::new(0),
            },
            EchoRequester {
                calls: AtomicUsize::new(0),
            },
            directory(),
            TrustTiers::new(Region::Global),
        );

        let verdict = pipeline.run("  moon landing  ").await.unwrap();

        assert_eq!(verdict.explanation, "checked: moon landing");
        assert_eq!(verdict.evidence_used.len(), 2);
        assert_eq!(verdict.evidence_used[0].bias.label, BiasLabel::Center);
        assert_eq!(verdict.evidence_used[1].bias.label, BiasLabel::Unknown);
    }

    #[tokio::test]
    async fn test_foreign_search_errors_are_tagged_with_stage() {
        let pipeline = ClaimPipeline::from_parts(
            BrokenSearch,
            EchoRequester {
                calls: AtomicUsize::new(0),
            },
            directory(),
            TrustTiers::default(),
        );

        match pipeline.run_outcome("claim").await {
            Outcome::Failed(failure) => {
                assert_eq!(failure.kind, ErrorKind::SearchUnavailable);
                assert_eq!(failure.stage, Stage::Searching);
                assert!(failure.message.contains("socket timed out"));
            }
            Outcome::Done(_) => panic!("expected failure"),
        }
        assert_eq!(pipeline.requester.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_claim_makes_no_calls() {
        let pipeline = ClaimPipeline::from_parts(
            FixedSearch {
                results: vec![],
                calls: AtomicUsize::new(0),
            },
            EchoRequester {
                calls: AtomicUsize::new(0),
            },
            directory(),
            TrustTiers::default(),
        );

        let err = pipeline.run("   ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(pipeline.search.calls.load(Ordering::SeqCst), 0);
        assert_eq!(pipeline.requester.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = Outcome::Failed(Failure {
            kind: ErrorKind::VerdictUnavailable,
            stage: Stage::Verdicting,
            message: "bad json".to_string(),
            suggestion: "retry",
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["kind"], "verdict_unavailable");
        assert_eq!(json["stage"], "verdicting");
    }

    #[test]
    fn test_run_ids_unique_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| (0..50).map(|_| next_run_id()).collect::<Vec<_>>()))
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id), "duplicate run id");
            }
        }
        assert_eq!(ids.len(), 400);
    }
}
