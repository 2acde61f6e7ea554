pub mod annotator;
pub mod pipeline;

pub use crate::domain::model::{AnnotatedEvidence, Claim, SearchResult, Verdict};
pub use crate::domain::ports::{SearchClient, VerdictRequester};
pub use crate::utils::error::Result;
pub use annotator::EvidenceAnnotator;
pub use pipeline::{ClaimPipeline, Failure, Outcome, Stage};
