use crate::bias::{BiasDirectory, TrustTiers};
use crate::domain::model::{AnnotatedEvidence, SearchResult};
use std::sync::Arc;

/// 把搜尋結果與偏向表、可信層級結合。純函數：不做 I/O、保持順序、不丟棄任何一筆。
#[derive(Debug, Clone)]
pub struct EvidenceAnnotator {
    directory: Arc<BiasDirectory>,
    tiers: TrustTiers,
}

impl EvidenceAnnotator {
    pub fn new(directory: Arc<BiasDirectory>, tiers: TrustTiers) -> Self {
        Self { directory, tiers }
    }

    pub fn annotate(&self, results: Vec<SearchResult>) -> Vec<AnnotatedEvidence> {
        results
            .into_iter()
            .map(|result| {
                let bias = self.directory.lookup(&result.source_domain);
                let trust = self.tiers.classify(&result.source_domain);
                if bias.is_unknown() {
                    tracing::debug!("No bias entry for '{}'", result.source_domain);
                }
                AnnotatedEvidence {
                    result,
                    bias,
                    trust,
                }
            })
            .collect()
    }
}
