// Domain layer: core models and ports (interfaces) for the claim check.

pub mod model;
pub mod ports;

pub use model::{
    AnnotatedEvidence, BiasEntry, BiasLabel, Claim, SearchResult, TrustTier, Verdict, VerdictLabel,
};
pub use ports::{SearchClient, VerdictRequester};
