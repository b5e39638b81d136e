pub mod corpus;
pub mod llm;
pub mod normalizer;
pub mod prompts;
pub mod scoring;
pub mod searcher;
pub mod terms;
pub mod verification;

pub use corpus::CorpusAggregator;
pub use llm::{GatewayReasoner, TextReasoner};
pub use scoring::aggregate_scores;
pub use verification::{NewsAnalysis, VerificationError, VerificationService};
