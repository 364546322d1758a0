// Analyzer module: aggregates submodules for different aspects of analysis.

pub mod ledger_analysis;
pub mod market_indicators;
pub mod performance;
pub mod player_ledger;

// Re-export the main Analyzer implementation for ease of use.
pub use ledger_analysis::{AnalyticsResult, Analyzer, AnalyzerImpl, LedgerSummary};
