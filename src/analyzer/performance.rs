use crate::analyzer::player_ledger::PlayerLedgers;
use crate::utils::{safe_ratio, saturating_sum};
use chrono::Duration;
use serde::Serialize;
use std::cmp::Ordering;

/// A completed buy/sell history for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfit {
    pub player: String,
    pub total_spent: i64,
    pub total_earned: i64,
    pub net_profit: i64,
    pub purchases: usize,
    pub sales: usize,
    pub clause_increases: usize,
}

/// A player still in the squad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquadHolding {
    pub player: String,
    pub total_invested: i64,
    pub purchases: usize,
    pub clause_increases: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiEntry {
    pub player: String,
    pub total_spent: i64,
    pub net_profit: i64,
    pub hold_days: i64,
    pub roi_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiReport {
    /// Every dated trade, best ROI first.
    pub players: Vec<RoiEntry>,
    pub best: Vec<RoiEntry>,
    pub worst: Vec<RoiEntry>,
    pub average_hold_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinRate {
    pub total_trades: usize,
    pub profitable_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
}

/// Whole days in a window, rounded down; a window of -1.5 days counts as -2.
fn whole_days(window: Duration) -> i64 {
    window.num_seconds().div_euclid(SECONDS_PER_DAY)
}

const SECONDS_PER_DAY: i64 = 86_400;

pub struct PerformanceAnalyzer;

impl PerformanceAnalyzer {
    /// Players with both a cost and a disposal, by net profit descending.
    pub fn player_profitability(ledgers: &PlayerLedgers) -> Vec<PlayerProfit> {
        let mut result: Vec<PlayerProfit> = ledgers
            .iter()
            .filter(|l| l.has_cost() && l.has_disposal())
            .map(|l| {
                let total_spent = l.total_spent();
                let total_earned = l.total_earned();
                PlayerProfit {
                    player: l.player.clone(),
                    total_spent,
                    total_earned,
                    net_profit: total_earned.saturating_sub(total_spent),
                    purchases: l.acquisitions.len(),
                    sales: l.disposals.len(),
                    clause_increases: l.clause_increases.len(),
                }
            })
            .collect();

        // stable: ties keep encounter order
        result.sort_by(|a, b| b.net_profit.cmp(&a.net_profit));
        result
    }

    pub fn best_deals(profits: &[PlayerProfit]) -> Vec<PlayerProfit> {
        profits.iter().filter(|p| p.net_profit > 0).cloned().collect()
    }

    pub fn biggest_losses(profits: &[PlayerProfit]) -> Vec<PlayerProfit> {
        let mut losses: Vec<PlayerProfit> = profits.iter().filter(|p| p.net_profit < 0).cloned().collect();
        losses.sort_by(|a, b| a.net_profit.cmp(&b.net_profit));
        losses
    }

    /// Players with a cost but no disposal, by investment descending.
    pub fn current_squad(ledgers: &PlayerLedgers) -> Vec<SquadHolding> {
        let mut squad: Vec<SquadHolding> = ledgers
            .iter()
            .filter(|l| l.has_cost() && !l.has_disposal())
            .map(|l| SquadHolding {
                player: l.player.clone(),
                total_invested: l.total_spent(),
                purchases: l.acquisitions.len(),
                clause_increases: l.clause_increases.len(),
            })
            .collect();

        squad.sort_by(|a, b| b.total_invested.cmp(&a.total_invested));
        squad
    }

    /// Hold time and ROI for profitable-population players whose window can be dated.
    /// The window runs from the first acquisition to the last disposal, so a player
    /// bought and sold several times is measured as one long holding.
    pub fn hold_time_roi(ledgers: &PlayerLedgers, profits: &[PlayerProfit], limit: usize) -> RoiReport {
        let mut players: Vec<RoiEntry> = profits
            .iter()
            .filter_map(|p| {
                let ledger = ledgers.get(&p.player)?;
                let acquired = ledger.first_acquired()?;
                let disposed = ledger.last_disposed()?;
                Some(RoiEntry {
                    player: p.player.clone(),
                    total_spent: p.total_spent,
                    net_profit: p.net_profit,
                    hold_days: whole_days(disposed - acquired),
                    roi_percentage: safe_ratio(p.net_profit as f64, p.total_spent as f64) * 100.0,
                })
            })
            .collect();

        players.sort_by(|a, b| {
            b.roi_percentage
                .partial_cmp(&a.roi_percentage)
                .unwrap_or(Ordering::Equal)
        });

        let best = players
            .iter()
            .filter(|e| e.roi_percentage > 0.0)
            .take(limit)
            .cloned()
            .collect();

        let losers: Vec<&RoiEntry> = players.iter().filter(|e| e.roi_percentage < 0.0).collect();
        let worst = losers[losers.len().saturating_sub(limit)..]
            .iter()
            .map(|e| (*e).clone())
            .collect();

        let total_days = saturating_sum(players.iter().map(|e| e.hold_days));
        let average_hold_time = safe_ratio(total_days as f64, players.len() as f64);

        RoiReport {
            players,
            best,
            worst,
            average_hold_time,
        }
    }

    pub fn win_rate(roi: &[RoiEntry]) -> WinRate {
        let total_trades = roi.len();
        let profitable_trades = roi.iter().filter(|e| e.net_profit > 0).count();
        WinRate {
            total_trades,
            profitable_trades,
            losing_trades: total_trades - profitable_trades,
            win_rate: safe_ratio(profitable_trades as f64, total_trades as f64) * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::player_ledger::build_player_ledgers;
    use crate::model::{TransactionKind, TransactionRecord};
    use crate::utils::parse_datetime;

    fn rec(kind: TransactionKind, player: &str, amount: i64, date: &str) -> TransactionRecord {
        TransactionRecord {
            kind,
            player_name: Some(player.to_string()),
            counterparty_name: None,
            timestamp: parse_datetime(date),
            amount,
            balance_after: 0,
        }
    }

    fn buy(player: &str, amount: i64, date: &str) -> TransactionRecord {
        rec(TransactionKind::Purchase, player, amount, date)
    }

    fn sell(player: &str, amount: i64, date: &str) -> TransactionRecord {
        rec(TransactionKind::Sale, player, amount, date)
    }

    #[test]
    fn profitability_ties_keep_encounter_order() {
        let records = vec![
            buy("X", -100, ""),
            sell("X", 200, ""),
            buy("Y", -300, ""),
            sell("Y", 400, ""),
            buy("Z", -100, ""),
            sell("Z", 900, ""),
        ];
        let ledgers = build_player_ledgers(&records);
        let profits = PerformanceAnalyzer::player_profitability(&ledgers);
        let names: Vec<_> = profits.iter().map(|p| p.player.as_str()).collect();
        assert_eq!(names, vec!["Z", "X", "Y"]);
    }

    #[test]
    fn clause_increase_counts_as_cost() {
        let records = vec![
            rec(TransactionKind::ClauseIncrease, "Kubo", -500, ""),
            buy("Kubo", -1_000, ""),
            sell("Kubo", 1_200, ""),
            sell("Free", 700, ""),
        ];
        let ledgers = build_player_ledgers(&records);
        let profits = PerformanceAnalyzer::player_profitability(&ledgers);
        assert_eq!(profits.len(), 1);
        assert_eq!(profits[0].total_spent, 1_500);
        assert_eq!(profits[0].net_profit, -300);
        assert_eq!(profits[0].clause_increases, 1);
        assert!(PerformanceAnalyzer::current_squad(&ledgers).is_empty());
    }

    #[test]
    fn losses_are_most_negative_first() {
        let records = vec![
            buy("A", -1_000, ""),
            sell("A", 900, ""),
            buy("B", -1_000, ""),
            sell("B", 100, ""),
            buy("C", -1_000, ""),
            sell("C", 1_000, ""),
        ];
        let ledgers = build_player_ledgers(&records);
        let profits = PerformanceAnalyzer::player_profitability(&ledgers);
        let losses = PerformanceAnalyzer::biggest_losses(&profits);
        let names: Vec<_> = losses.iter().map(|p| p.player.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert!(PerformanceAnalyzer::best_deals(&profits).is_empty());
    }

    #[test]
    fn hold_window_spans_first_buy_to_last_sale() {
        let records = vec![
            sell("R", 1_500, "2024-09-30"),
            buy("R", -1_000, "2024-09-10"),
            sell("R", 1_000, "2024-09-05"),
            buy("R", -1_000, "2024-09-01"),
        ];
        let ledgers = build_player_ledgers(&records);
        let profits = PerformanceAnalyzer::player_profitability(&ledgers);
        let roi = PerformanceAnalyzer::hold_time_roi(&ledgers, &profits, 20);
        assert_eq!(roi.players.len(), 1);
        assert_eq!(roi.players[0].hold_days, 29);
        assert_eq!(roi.players[0].roi_percentage, 25.0);
        assert_eq!(roi.average_hold_time, 29.0);
    }

    #[test]
    fn sale_dated_before_purchase_gives_negative_window() {
        let records = vec![
            sell("N", 1_100, "03/09/2024 00:00"),
            buy("N", -1_000, "04/09/2024 12:00"),
            sell("M", 1_000, "05/09/2024 18:00"),
            buy("M", -1_000, "05/09/2024 06:00"),
        ];
        let ledgers = build_player_ledgers(&records);
        let profits = PerformanceAnalyzer::player_profitability(&ledgers);
        let roi = PerformanceAnalyzer::hold_time_roi(&ledgers, &profits, 20);

        let days: Vec<_> = roi.players.iter().map(|e| (e.player.as_str(), e.hold_days)).collect();
        assert_eq!(days, vec![("N", -2), ("M", 0)]);
        assert_eq!(roi.average_hold_time, -1.0);
    }

    #[test]
    fn undated_trades_are_left_out_of_roi() {
        let records = vec![buy("U", -1_000, "2024-09-01"), sell("U", 2_000, "")];
        let ledgers = build_player_ledgers(&records);
        let profits = PerformanceAnalyzer::player_profitability(&ledgers);
        assert_eq!(profits.len(), 1);
        let roi = PerformanceAnalyzer::hold_time_roi(&ledgers, &profits, 20);
        assert!(roi.players.is_empty());
        assert_eq!(roi.average_hold_time, 0.0);
        assert_eq!(PerformanceAnalyzer::win_rate(&roi.players).win_rate, 0.0);
    }

    #[test]
    fn roi_slices_are_strict_and_limited() {
        let mut records = Vec::new();
        for (i, sale) in [1_500, 1_200, 1_000, 900, 500].iter().enumerate() {
            let name = format!("P{}", i);
            records.push(buy(&name, -1_000, "2024-09-01"));
            records.push(sell(&name, *sale, "2024-09-11"));
        }
        let ledgers = build_player_ledgers(&records);
        let profits = PerformanceAnalyzer::player_profitability(&ledgers);
        let roi = PerformanceAnalyzer::hold_time_roi(&ledgers, &profits, 1);

        assert_eq!(roi.players.len(), 5);
        assert_eq!(roi.best.len(), 1);
        assert_eq!(roi.best[0].player, "P0");
        assert_eq!(roi.worst.len(), 1);
        assert_eq!(roi.worst[0].player, "P4");
        assert_eq!(roi.worst[0].roi_percentage, -50.0);

        let wide = PerformanceAnalyzer::hold_time_roi(&ledgers, &profits, 20);
        let worst: Vec<_> = wide.worst.iter().map(|e| e.player.as_str()).collect();
        assert_eq!(worst, vec!["P3", "P4"]);
        assert_eq!(wide.best.len(), 2);

        let wins = PerformanceAnalyzer::win_rate(&wide.players);
        assert_eq!(wins.total_trades, 5);
        assert_eq!(wins.profitable_trades, 2);
        assert_eq!(wins.losing_trades, 3);
        assert_eq!(wins.win_rate, 40.0);
    }
}
