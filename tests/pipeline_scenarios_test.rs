use async_trait::async_trait;
use claimcheck::{
    AnnotatedEvidence, BiasDirectory, BiasEntry, BiasLabel, CheckError, Claim, ClaimPipeline,
    ErrorKind, EvidenceAnnotator, Outcome, Region, Result, SearchClient, SearchResult, Stage,
    TrustTiers, Verdict, VerdictLabel, VerdictRequester,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

enum SearchBehaviour {
    Results(Vec<SearchResult>),
    Timeout,
}

struct MockSearch {
    behaviour: SearchBehaviour,
    calls: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockSearch {
    fn returning(results: Vec<SearchResult>) -> Self {
        Self {
            behaviour: SearchBehaviour::Results(results),
            calls: Arc::new(AtomicUsize::new(0)),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn timing_out() -> Self {
        Self {
            behaviour: SearchBehaviour::Timeout,
            ..Self::returning(Vec::new())
        }
    }
}

#[async_trait]
impl SearchClient for MockSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        match &self.behaviour {
            SearchBehaviour::Results(results) => Ok(results.clone()),
            SearchBehaviour::Timeout => Err(CheckError::search_unavailable(
                "request failed: operation timed out",
            )),
        }
    }
}

enum RequesterBehaviour {
    Label(VerdictLabel),
    Malformed,
}

struct MockRequester {
    behaviour: RequesterBehaviour,
    calls: Arc<AtomicUsize>,
    seen_evidence: Arc<Mutex<Vec<AnnotatedEvidence>>>,
}

impl MockRequester {
    fn answering(label: VerdictLabel) -> Self {
        Self {
            behaviour: RequesterBehaviour::Label(label),
            calls: Arc::new(AtomicUsize::new(0)),
            seen_evidence: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn malformed() -> Self {
        Self {
            behaviour: RequesterBehaviour::Malformed,
            ..Self::answering(VerdictLabel::Uncertain)
        }
    }
}

#[async_trait]
impl VerdictRequester for MockRequester {
    async fn request(&self, claim: &Claim, evidence: &[AnnotatedEvidence]) -> Result<Verdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen_evidence.lock().unwrap() = evidence.to_vec();
        match self.behaviour {
            RequesterBehaviour::Label(label) => Ok(Verdict::new(
                label,
                format!("Assessment of '{}'", claim),
                evidence.to_vec(),
            )),
            RequesterBehaviour::Malformed => Err(CheckError::verdict_unavailable(
                "model response is not a structured verdict: expected value at line 1 column 1",
            )),
        }
    }
}

fn scenario_directory() -> Arc<BiasDirectory> {
    Arc::new(BiasDirectory::empty().with_overrides([
        BiasEntry::new("nasa.gov", BiasLabel::Center, Some(0.95)),
        BiasEntry::new("nytimes.com", BiasLabel::CenterLeft, Some(0.8)),
    ]))
}

fn result(domain: &str, title: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        url: format!("https://{}/{}", domain, title.replace(' ', "-")),
        snippet: format!("{} snippet", title),
        source_domain: domain.to_string(),
    }
}

fn moon_results() -> Vec<SearchResult> {
    vec![
        result("nasa.gov", "Apollo 11 mission"),
        result("example-blog.com", "They faked it"),
        result("nytimes.com", "Moon hoax debunked"),
    ]
}

fn pipeline(search: MockSearch, requester: MockRequester) -> ClaimPipeline<MockSearch, MockRequester> {
    ClaimPipeline::from_parts(search, requester, scenario_directory(), TrustTiers::new(Region::Global))
}

#[test]
fn scenario_a_empty_claim_fails_without_outbound_calls() {
    let search = MockSearch::returning(moon_results());
    let requester = MockRequester::answering(VerdictLabel::Verified);
    let search_calls = search.calls.clone();
    let requester_calls = requester.calls.clone();
    let pipeline = pipeline(search, requester);

    let outcome = tokio_test::block_on(pipeline.run_outcome(""));

    match outcome {
        Outcome::Failed(failure) => {
            assert_eq!(failure.kind, ErrorKind::InvalidInput);
            assert_eq!(failure.stage, Stage::Submitted);
        }
        Outcome::Done(_) => panic!("empty claim must not produce a verdict"),
    }
    assert_eq!(search_calls.load(Ordering::SeqCst), 0);
    assert_eq!(requester_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn scenario_b_annotation_preserves_order_with_unknown_middle() {
    let annotator = EvidenceAnnotator::new(scenario_directory(), TrustTiers::default());

    let evidence = annotator.annotate(moon_results());

    assert_eq!(evidence.len(), 3);
    let domains: Vec<&str> = evidence.iter().map(|e| e.result.source_domain.as_str()).collect();
    assert_eq!(domains, vec!["nasa.gov", "example-blog.com", "nytimes.com"]);

    assert_eq!(evidence[0].bias.label, BiasLabel::Center);
    assert_eq!(evidence[0].bias.credibility_score, Some(0.95));
    assert_eq!(evidence[1].bias.label, BiasLabel::Unknown);
    assert_eq!(evidence[1].bias.credibility_score, None);
    assert_eq!(evidence[2].bias.label, BiasLabel::CenterLeft);
    assert_eq!(evidence[2].bias.credibility_score, Some(0.8));
}

#[tokio::test]
async fn scenario_b_full_run_passes_annotated_evidence_to_requester() {
    let requester = MockRequester::answering(VerdictLabel::UnsupportedAndPolarising);
    let seen = requester.seen_evidence.clone();
    let search = MockSearch::returning(moon_results());
    let queries = search.queries.clone();
    let pipeline = pipeline(search, requester);

    let verdict = pipeline.run("the moon landing was staged").await.unwrap();

    assert_eq!(queries.lock().unwrap().as_slice(), ["the moon landing was staged"]);
    assert_eq!(verdict.label, VerdictLabel::UnsupportedAndPolarising);
    assert_eq!(verdict.evidence_used.len(), 3);
    assert_eq!(verdict.evidence_used[1].bias.label, BiasLabel::Unknown);
    assert_eq!(*seen.lock().unwrap(), verdict.evidence_used);
}

#[tokio::test]
async fn scenario_c_search_timeout_never_reaches_requester() {
    let requester = MockRequester::answering(VerdictLabel::Verified);
    let requester_calls = requester.calls.clone();
    let pipeline = pipeline(MockSearch::timing_out(), requester);

    let outcome = pipeline.run_outcome("the moon landing was staged").await;

    match outcome {
        Outcome::Failed(failure) => {
            assert_eq!(failure.kind, ErrorKind::SearchUnavailable);
            assert_eq!(failure.stage, Stage::Searching);
            assert!(failure.message.contains("timed out"));
        }
        Outcome::Done(_) => panic!("expected SearchUnavailable"),
    }
    assert_eq!(requester_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn scenario_d_malformed_model_response_fails_in_verdicting() {
    let search = MockSearch::returning(moon_results());
    let search_calls = search.calls.clone();
    let pipeline = pipeline(search, MockRequester::malformed());

    let err = pipeline.run("the moon landing was staged").await.unwrap_err();
    assert!(matches!(err, CheckError::VerdictUnavailable { .. }));
    assert_eq!(search_calls.load(Ordering::SeqCst), 1);

    match pipeline.run_outcome("the moon landing was staged").await {
        Outcome::Failed(failure) => {
            assert_eq!(failure.kind, ErrorKind::VerdictUnavailable);
            assert_eq!(failure.stage, Stage::Verdicting);
        }
        Outcome::Done(_) => panic!("expected VerdictUnavailable"),
    }
}

#[tokio::test]
async fn zero_search_results_still_produce_a_verdict() {
    let pipeline = pipeline(
        MockSearch::returning(Vec::new()),
        MockRequester::answering(VerdictLabel::Uncertain),
    );

    let verdict = pipeline.run("an obscure local rumour").await.unwrap();
    assert_eq!(verdict.label, VerdictLabel::Uncertain);
    assert!(verdict.evidence_used.is_empty());
}

#[tokio::test]
async fn every_claim_yields_exactly_one_outcome() {
    let claims = ["", "   ", "x", "the moon landing was staged", "vaccines contain microchips"];
    let pipelines = [
        pipeline(MockSearch::returning(moon_results()), MockRequester::answering(VerdictLabel::Verified)),
        pipeline(MockSearch::timing_out(), MockRequester::answering(VerdictLabel::Verified)),
        pipeline(MockSearch::returning(moon_results()), MockRequester::malformed()),
    ];

    for pipeline in &pipelines {
        for claim in claims {
            let outcome = pipeline.run_outcome(claim).await;
            let result = pipeline.run(claim).await;
            // run 與 run_outcome 必須一致
            assert_eq!(outcome.is_done(), result.is_ok(), "claim {:?}", claim);
            if claim.trim().is_empty() {
                assert!(matches!(outcome, Outcome::Failed(ref f) if f.kind == ErrorKind::InvalidInput));
            }
        }
    }
}

#[tokio::test]
async fn resubmission_runs_pipeline_again_from_scratch() {
    let search = MockSearch::returning(moon_results());
    let search_calls = search.calls.clone();
    let requester = MockRequester::answering(VerdictLabel::Verified);
    let requester_calls = requester.calls.clone();
    let pipeline = pipeline(search, requester);

    pipeline.run("same claim").await.unwrap();
    pipeline.run("same claim").await.unwrap();

    assert_eq!(search_calls.load(Ordering::SeqCst), 2);
    assert_eq!(requester_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn concurrent_runs_share_the_directory() {
    let pipeline = Arc::new(pipeline(
        MockSearch::returning(moon_results()),
        MockRequester::answering(VerdictLabel::Verified),
    ));

    let mut handles = Vec::new();
    for i in 0..8 {
        let pipeline = pipeline.clone();
        handles.push(tokio::spawn(async move {
            pipeline.run(&format!("claim number {}", i)).await
        }));
    }

    for handle in handles {
        let verdict = handle.await.unwrap().unwrap();
        assert_eq!(verdict.evidence_used[0].bias.label, BiasLabel::Center);
    }
}
