use crate::model::{TransactionKind, TransactionRecord};
use crate::utils::{safe_ratio, saturating_sum};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSummary {
    pub count: usize,
    pub total_amount: i64,
    pub avg_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradingPartner {
    pub name: String,
    pub purchases: usize,
    pub spent: i64,
    pub sales: usize,
    pub earned: i64,
    pub net_exchange: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClauseSummary {
    pub total_count: usize,
    pub total_cost: i64,
    pub avg_cost: f64,
}

pub struct MarketAnalyzer;

impl MarketAnalyzer {
    /// Count, sum and mean amount per kind label, in label order.
    pub fn type_breakdown(records: &[TransactionRecord]) -> BTreeMap<String, TypeSummary> {
        let mut totals: BTreeMap<String, (usize, i64)> = BTreeMap::new();

        for record in records {
            let entry = totals.entry(record.kind.label().to_string()).or_default();
            entry.0 += 1;
            entry.1 = entry.1.saturating_add(record.amount);
        }

        totals
            .into_iter()
            .map(|(kind, (count, total_amount))| {
                let summary = TypeSummary {
                    count,
                    total_amount,
                    avg_amount: safe_ratio(total_amount as f64, count as f64),
                };
                (kind, summary)
            })
            .collect()
    }

    /// Buyout signings ranked by cost.
    pub fn top_buyout_signings(records: &[TransactionRecord]) -> Vec<TransactionRecord> {
        let mut signings: Vec<TransactionRecord> = records
            .iter()
            .filter(|r| r.kind == TransactionKind::BuyoutSigning)
            .cloned()
            .collect();
        signings.sort_by(|a, b| b.amount.unsigned_abs().cmp(&a.amount.unsigned_abs()));
        signings
    }

    /// Buyout sales ranked by proceeds.
    pub fn top_buyout_sales(records: &[TransactionRecord]) -> Vec<TransactionRecord> {
        let mut sales: Vec<TransactionRecord> = records
            .iter()
            .filter(|r| r.kind == TransactionKind::BuyoutSale)
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.amount.cmp(&a.amount));
        sales
    }

    /// Money exchanged with each rival manager, best balance first.
    pub fn trading_partners(records: &[TransactionRecord]) -> Vec<TradingPartner> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut partners: Vec<TradingPartner> = Vec::new();

        for record in records {
            let Some(name) = record.counterparty_name.as_deref() else {
                continue;
            };

            let slot = *index.entry(name).or_insert_with(|| {
                partners.push(TradingPartner {
                    name: name.to_string(),
                    purchases: 0,
                    spent: 0,
                    sales: 0,
                    earned: 0,
                    net_exchange: 0,
                });
                partners.len() - 1
            });
            let partner = &mut partners[slot];

            match record.kind {
                TransactionKind::BuyoutSigning | TransactionKind::LoanPurchase => {
                    partner.purchases += 1;
                    partner.spent = partner.spent.saturating_add(record.amount.saturating_abs());
                }
                TransactionKind::BuyoutSale | TransactionKind::LoanSale => {
                    partner.sales += 1;
                    partner.earned = partner.earned.saturating_add(record.amount);
                }
                _ => {}
            }
        }

        for partner in partners.iter_mut() {
            partner.net_exchange = partner.earned.saturating_sub(partner.spent);
        }
        partners.sort_by(|a, b| b.net_exchange.cmp(&a.net_exchange));
        partners
    }

    pub fn clause_summary(records: &[TransactionRecord]) -> ClauseSummary {
        let clauses: Vec<i64> = records
            .iter()
            .filter(|r| r.kind == TransactionKind::ClauseIncrease)
            .map(|r| r.amount.saturating_abs())
            .collect();
        let total_count = clauses.len();
        let total_cost = saturating_sum(clauses);

        ClauseSummary {
            total_count,
            total_cost,
            avg_cost: safe_ratio(total_cost as f64, total_count as f64),
        }
    }
}
