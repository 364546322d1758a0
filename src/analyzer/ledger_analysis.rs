use crate::analyzer::market_indicators::{ClauseSummary, MarketAnalyzer, TradingPartner, TypeSummary};
use crate::analyzer::performance::{PerformanceAnalyzer, PlayerProfit, RoiEntry, SquadHolding, WinRate};
use crate::analyzer::player_ledger::build_player_ledgers;
use crate::model::TransactionRecord;
use crate::utils::saturating_sum;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Trait defining the interface for a ledger analyzer.
pub trait Analyzer {
    fn analyze(&self, records: &[TransactionRecord]) -> AnalyticsResult;
}

/// Money flow over the whole ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_transactions: usize,
    pub total_inflow: i64,
    pub total_outflow: i64,
    pub net_flow: i64,
    pub first_transaction: Option<DateTime<Utc>>,
    pub last_transaction: Option<DateTime<Utc>>,
    /// Balance after the most recent movement.
    pub latest_balance: Option<i64>,
}

/// Structure representing the overall analysis result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsResult {
    pub summary: LedgerSummary,
    /// Players bought and sold, by net profit descending.
    pub player_profitability: Vec<PlayerProfit>,
    pub best_deals: Vec<PlayerProfit>,
    pub biggest_losses: Vec<PlayerProfit>,
    pub total_profitability: i64,
    pub type_summary: BTreeMap<String, TypeSummary>,
    pub top_buyout_signings: Vec<TransactionRecord>,
    pub top_buyout_sales: Vec<TransactionRecord>,
    pub trading_partners: Vec<TradingPartner>,
    pub clause_summary: ClauseSummary,
    /// Players still held, by investment descending.
    pub current_squad: Vec<SquadHolding>,
    pub current_squad_total_investment: i64,
    pub roi_players: Vec<RoiEntry>,
    pub best_roi_players: Vec<RoiEntry>,
    pub worst_roi_players: Vec<RoiEntry>,
    pub average_hold_time: f64,
    pub win_rate: WinRate,
}

impl AnalyticsResult {
    pub fn partner(&self, name: &str) -> Option<&TradingPartner> {
        self.trading_partners.iter().find(|p| p.name == name)
    }
}

/// Implementation of the ledger analyzer.
pub struct AnalyzerImpl {
    ranking_limit: usize,
}

impl AnalyzerImpl {
    pub const DEFAULT_RANKING_LIMIT: usize = 20;

    pub fn new() -> Self {
        Self::with_ranking_limit(Self::DEFAULT_RANKING_LIMIT)
    }

    /// `ranking_limit` bounds the best and worst ROI slices.
    pub fn with_ranking_limit(ranking_limit: usize) -> Self {
        Self { ranking_limit }
    }

    pub fn summarize(records: &[TransactionRecord]) -> LedgerSummary {
        let total_inflow = saturating_sum(records.iter().map(|r| r.amount).filter(|a| *a > 0));
        let total_outflow = saturating_sum(
            records
                .iter()
                .map(|r| r.amount)
                .filter(|a| *a < 0)
                .map(i64::saturating_abs),
        );

        let dated = records.iter().filter_map(|r| r.timestamp.map(|ts| (ts, r)));
        let first_transaction = dated.clone().map(|(ts, _)| ts).min();
        // the feed is newest-first, so without dates the first entry is the latest
        let latest = dated
            .max_by_key(|(ts, _)| *ts)
            .map(|(_, r)| r)
            .or_else(|| records.first());

        LedgerSummary {
            total_transactions: records.len(),
            total_inflow,
            total_outflow,
            net_flow: total_inflow.saturating_sub(total_outflow),
            first_transaction,
            last_transaction: latest.and_then(|r| r.timestamp),
            latest_balance: latest.map(|r| r.balance_after),
        }
    }
}

impl Default for AnalyzerImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for AnalyzerImpl {
    /// Builds the player ledgers once and derives every metric from the same records.
    fn analyze(&self, records: &[TransactionRecord]) -> AnalyticsResult {
        let ledgers = build_player_ledgers(records);

        let player_profitability = PerformanceAnalyzer::player_profitability(&ledgers);
        let best_deals = PerformanceAnalyzer::best_deals(&player_profitability);
        let biggest_losses = PerformanceAnalyzer::biggest_losses(&player_profitability);
        let total_profitability = saturating_sum(player_profitability.iter().map(|p| p.net_profit));

        let current_squad = PerformanceAnalyzer::current_squad(&ledgers);
        let current_squad_total_investment = saturating_sum(current_squad.iter().map(|s| s.total_invested));

        let roi = PerformanceAnalyzer::hold_time_roi(&ledgers, &player_profitability, self.ranking_limit);
        let win_rate = PerformanceAnalyzer::win_rate(&roi.players);

        debug!(
            "Analyzed {} records: {} players, {} traded, {} held",
            records.len(),
            ledgers.len(),
            player_profitability.len(),
            current_squad.len()
        );

        AnalyticsResult {
            summary: Self::summarize(records),
            player_profitability,
            best_deals,
            biggest_losses,
            total_profitability,
            type_summary: MarketAnalyzer::type_breakdown(records),
            top_buyout_signings: MarketAnalyzer::top_buyout_signings(records),
            top_buyout_sales: MarketAnalyzer::top_buyout_sales(records),
            trading_partners: MarketAnalyzer::trading_partners(records),
            clause_summary: MarketAnalyzer::clause_summary(records),
            current_squad,
            current_squad_total_investment,
            roi_players: roi.players,
            best_roi_players: roi.best,
            worst_roi_players: roi.worst,
            average_hold_time: roi.average_hold_time,
            win_rate,
        }
    }
}
