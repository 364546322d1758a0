use crate::model::{RawTransaction, TransactionKind, TransactionRecord};
use crate::utils::{parse_amount, parse_datetime};
use chrono::{DateTime, Utc};
use tracing::debug;

pub fn normalize_all(raw: &[RawTransaction]) -> Vec<TransactionRecord> {
    raw.iter().map(normalize_transaction).collect()
}

fn normalize_transaction(raw: &RawTransaction) -> TransactionRecord {
    let kind = TransactionKind::from_label(&raw.kind_label);
    let (player_name, counterparty_name) = extract_parties(&kind, &raw.reason);
    let timestamp = parse_datetime(&raw.date);

    if timestamp.is_none() && !raw.date.is_empty() {
        debug!("Unparsable date '{}' for '{}'", raw.date, raw.reason);
    }

    TransactionRecord {
        kind,
        player_name,
        counterparty_name,
        timestamp,
        amount: parse_amount(&raw.amount),
        balance_after: parse_amount(&raw.balance),
    }
}

/// Pulls the player and the counterparty manager out of the movement text.
fn extract_parties(kind: &TransactionKind, reason: &str) -> (Option<String>, Option<String>) {
    let reason = reason.trim();
    match kind {
        TransactionKind::Purchase => (market_player(reason, "Purchased "), None),
        TransactionKind::Sale => (market_player(reason, "Sold "), None),
        TransactionKind::ClauseIncrease => (market_player(reason, "Clause increase for "), None),
        TransactionKind::BuyoutSigning => peer_parties(reason, "Buyout of ", " from "),
        TransactionKind::BuyoutSale => peer_parties(reason, "Buyout of ", " by "),
        TransactionKind::LoanPurchase => peer_parties(reason, "Loan of ", " from "),
        TransactionKind::LoanSale => peer_parties(reason, "Loan of ", " to "),
        TransactionKind::Bonuses | TransactionKind::Unknown(_) => (None, None),
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn market_player(reason: &str, prefix: &str) -> Option<String> {
    non_empty(reason.strip_prefix(prefix).unwrap_or(reason))
}

fn peer_parties(reason: &str, prefix: &str, separator: &str) -> (Option<String>, Option<String>) {
    let Some(rest) = reason.strip_prefix(prefix) else {
        return (None, None);
    };
    match rest.rsplit_once(separator) {
        Some((player, manager)) => (non_empty(player), non_empty(manager)),
        None => (non_empty(rest), None),
    }
}

/// Keeps records inside the inclusive `[start, end]` window.
/// With any bound set, records without a timestamp are dropped.
pub fn filter_by_range(
    records: Vec<TransactionRecord>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Vec<TransactionRecord> {
    if start.is_none() && end.is_none() {
        return records;
    }

    records
        .into_iter()
        .filter(|r| match r.timestamp {
            Some(ts) => start.is_none_or(|s| ts >= s) && end.is_none_or(|e| ts <= e),
            None => false,
        })
        .collect()
}
