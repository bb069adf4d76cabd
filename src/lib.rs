pub mod analyzer;
pub mod api;
pub mod config;
pub mod distance;
pub mod features;
pub mod feedback;
pub mod fusion;
pub mod intel;
pub mod lists;
pub mod normalize;
pub mod scorer;
pub mod urls;

pub use analyzer::{AnalysisReport, Analyzer};
pub use config::Config;
pub use features::FeatureVector;
pub use fusion::Verdict;
pub use intel::{ClassifierSignal, ReputationSignal};
