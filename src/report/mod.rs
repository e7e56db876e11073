pub mod normalizer;
pub mod ranker;
pub mod types;

pub use normalizer::normalize;
pub use ranker::rank;
pub use types::{
    BlockingBin, ClosurePrediction, CoverageReport, CrossCoverage, Suggestion, UncoveredBin,
};
