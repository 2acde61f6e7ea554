pub mod adapters;
pub mod app;
pub mod bias;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{OpenAiVerdictRequester, TavilySearchClient};
pub use bias::{BiasDirectory, Region, TrustTiers};
pub use config::AppConfig;
pub use core::{ClaimPipeline, EvidenceAnnotator, Failure, Outcome, Stage};
pub use domain::{
    AnnotatedEvidence, BiasEntry, BiasLabel, Claim, SearchClient, SearchResult, TrustTier, Verdict,
    VerdictLabel, VerdictRequester,
};
pub use utils::error::{CheckError, ErrorKind, Result};
