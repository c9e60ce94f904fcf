// Analyzer module: cycle summary statistics.

pub mod market_summary;
pub mod ranking;

pub use market_summary::{AnalysisSummary, Analyzer, AnalyzerImpl};
