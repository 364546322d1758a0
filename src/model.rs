// Core structs: TransactionKind, TransactionRecord, RawTransaction, error types
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// The transaction kinds the game's balance feed knows about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Purchase,
    Sale,
    BuyoutSigning,
    BuyoutSale,
    LoanPurchase,
    LoanSale,
    ClauseIncrease,
    Bonuses,
    Unknown(String),
}

/// Direction of a transaction from the point of view of a player's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Acquisition,
    ClauseIncrease,
    Disposal,
}

impl TransactionKind {
    /// Parses a feed label. Matching ignores case and treats spaces and dashes as underscores.
    pub fn from_label(label: &str) -> Self {
        let slug = label.trim().to_lowercase().replace([' ', '-'], "_");
        match slug.as_str() {
            "purchase" => Self::Purchase,
            "sale" => Self::Sale,
            "buyout_signing" => Self::BuyoutSigning,
            "buyout_sale" => Self::BuyoutSale,
            "loan_purchase" => Self::LoanPurchase,
            "loan_sale" => Self::LoanSale,
            "clause_increase" => Self::ClauseIncrease,
            "bonuses" | "bonus" => Self::Bonuses,
            _ => Self::Unknown(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Purchase => "purchase",
            Self::Sale => "sale",
            Self::BuyoutSigning => "buyout_signing",
            Self::BuyoutSale => "buyout_sale",
            Self::LoanPurchase => "loan_purchase",
            Self::LoanSale => "loan_sale",
            Self::ClauseIncrease => "clause_increase",
            Self::Bonuses => "bonuses",
            Self::Unknown(raw) => raw,
        }
    }

    /// Role of the kind in per-player accounting. Bonuses and unknown kinds have none.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Purchase | Self::BuyoutSigning | Self::LoanPurchase => Some(Role::Acquisition),
            Self::ClauseIncrease => Some(Role::ClauseIncrease),
            Self::Sale | Self::BuyoutSale | Self::LoanSale => Some(Role::Disposal),
            Self::Bonuses | Self::Unknown(_) => None,
        }
    }

    /// Peer-to-peer kinds, which carry a counterparty manager.
    pub fn is_peer(&self) -> bool {
        matches!(
            self,
            Self::BuyoutSigning | Self::BuyoutSale | Self::LoanPurchase | Self::LoanSale
        )
    }
}

/// A normalized ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub kind: TransactionKind,
    pub player_name: Option<String>,
    pub counterparty_name: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub amount: i64,
    pub balance_after: i64,
}

/// Text fields of one feed entry, as found in the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTransaction {
    pub kind_label: String,
    pub reason: String,
    pub date: String,
    pub amount: String,
    pub balance: String,
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector `{0}`")]
    Selector(String),
    #[error("no movements found in document")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level error for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("failed to read input {0}: {1}")]
    Input(String, std::io::Error),
}
