// report/summary.rs

use crate::analyzer::AnalyticsResult;
use crate::analyzer::performance::{PlayerProfit, RoiEntry};
use crate::model::TransactionRecord;
use crate::utils::format_amount;
use std::fmt::Write;

/// Renders the full plain-text report.
pub fn render_text(result: &AnalyticsResult) -> String {
    let mut out = String::new();
    push_headline(&mut out, result);
    push_profits(&mut out, "🏆 Best deals", &result.best_deals);
    push_profits(&mut out, "📉 Biggest losses", &result.biggest_losses);
    push_squad(&mut out, result);
    push_buyouts(&mut out, "💣 Top buyout signings", &result.top_buyout_signings);
    push_buyouts(&mut out, "💰 Top buyout sales", &result.top_buyout_sales);
    push_partners(&mut out, result);
    push_types(&mut out, result);
    push_roi(&mut out, "🚀 Best ROI", &result.best_roi_players);
    push_roi(&mut out, "🧊 Worst ROI", &result.worst_roi_players);
    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}\n{}", title, "-".repeat(title.chars().count()));
}

fn push_headline(out: &mut String, result: &AnalyticsResult) {
    let s = &result.summary;
    let _ = writeln!(out, "📊 Mister balance report");
    let _ = writeln!(out, "Transactions: {}", s.total_transactions);
    if let (Some(first), Some(last)) = (s.first_transaction, s.last_transaction) {
        let _ = writeln!(out, "Period: {} → {}", first.format("%d/%m/%Y"), last.format("%d/%m/%Y"));
    }
    if let Some(balance) = s.latest_balance {
        let _ = writeln!(out, "Balance: {}", format_amount(balance));
    }
    let _ = writeln!(
        out,
        "Inflow: {} | Outflow: {} | Net: {}",
        format_amount(s.total_inflow),
        format_amount(s.total_outflow),
        format_amount(s.net_flow)
    );
    let _ = writeln!(out, "Total profitability: {}", format_amount(result.total_profitability));
    let w = &result.win_rate;
    let _ = writeln!(
        out,
        "Win rate: {:.1}% ({} won / {} lost of {})",
        w.win_rate, w.profitable_trades, w.losing_trades, w.total_trades
    );
    let _ = writeln!(out, "Average hold time: {:.1} days", result.average_hold_time);
    let c = &result.clause_summary;
    let _ = writeln!(
        out,
        "Clause increases: {} for {} (avg {})",
        c.total_count,
        format_amount(c.total_cost),
        format_amount(c.avg_cost.round() as i64)
    );
}

fn push_profits(out: &mut String, title: &str, profits: &[PlayerProfit]) {
    if profits.is_empty() {
        return;
    }
    section(out, title);
    for (i, p) in profits.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} — {} (spent {}, earned {})",
            i + 1,
            p.player,
            format_amount(p.net_profit),
            format_amount(p.total_spent),
            format_amount(p.total_earned)
        );
    }
}

fn push_squad(out: &mut String, result: &AnalyticsResult) {
    if result.current_squad.is_empty() {
        return;
    }
    section(out, "⚽ Current squad");
    for holding in &result.current_squad {
        let _ = writeln!(out, "🔹 {} — {}", holding.player, format_amount(holding.total_invested));
    }
    let _ = writeln!(out, "Total invested: {}", format_amount(result.current_squad_total_investment));
}

fn push_buyouts(out: &mut String, title: &str, records: &[TransactionRecord]) {
    if records.is_empty() {
        return;
    }
    section(out, title);
    for (i, r) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({}) — {}",
            i + 1,
            r.player_name.as_deref().unwrap_or("?"),
            r.counterparty_name.as_deref().unwrap_or("?"),
            format_amount(r.amount)
        );
    }
}

fn push_partners(out: &mut String, result: &AnalyticsResult) {
    if result.trading_partners.is_empty() {
        return;
    }
    section(out, "🤝 Trading partners");
    for p in &result.trading_partners {
        let _ = writeln!(
            out,
            "🔸 {} — net {} (bought {} for {}, sold {} for {})",
            p.name,
            format_amount(p.net_exchange),
            p.purchases,
            format_amount(p.spent),
            p.sales,
            format_amount(p.earned)
        );
    }
}

fn push_types(out: &mut String, result: &AnalyticsResult) {
    if result.type_summary.is_empty() {
        return;
    }
    section(out, "🧾 Transaction types");
    for (kind, t) in &result.type_summary {
        let _ = writeln!(
            out,
            "{}: {} × avg {} = {}",
            kind,
            t.count,
            format_amount(t.avg_amount.round() as i64),
            format_amount(t.total_amount)
        );
    }
}

fn push_roi(out: &mut String, title: &str, entries: &[RoiEntry]) {
    if entries.is_empty() {
        return;
    }
    section(out, title);
    for e in entries {
        let _ = writeln!(
            out,
            "{} — {:.1}% over {} days ({})",
            e.player,
            e.roi_percentage,
            e.hold_days,
            format_amount(e.net_profit)
        );
    }
}
