use crate::model::{Role, TransactionRecord};
use crate::utils::saturating_sum;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Acquisition, clause-increase and disposal records of one player.
#[derive(Debug, Clone)]
pub struct PlayerLedger<'a> {
    pub player: String,
    pub acquisitions: Vec<&'a TransactionRecord>,
    pub clause_increases: Vec<&'a TransactionRecord>,
    pub disposals: Vec<&'a TransactionRecord>,
}

impl<'a> PlayerLedger<'a> {
    fn new(player: &str) -> Self {
        Self {
            player: player.to_string(),
            acquisitions: Vec::new(),
            clause_increases: Vec::new(),
            disposals: Vec::new(),
        }
    }

    /// Acquisition cost including clause increases, as a positive number.
    pub fn total_spent(&self) -> i64 {
        saturating_sum(
            self.acquisitions
                .iter()
                .chain(self.clause_increases.iter())
                .map(|r| r.amount.saturating_abs()),
        )
    }

    pub fn total_earned(&self) -> i64 {
        saturating_sum(self.disposals.iter().map(|r| r.amount))
    }

    /// The player cost the manager something: bought or had the clause raised.
    pub fn has_cost(&self) -> bool {
        !self.acquisitions.is_empty() || !self.clause_increases.is_empty()
    }

    pub fn has_disposal(&self) -> bool {
        !self.disposals.is_empty()
    }

    /// Earliest dated acquisition, clause increases included.
    pub fn first_acquired(&self) -> Option<DateTime<Utc>> {
        self.acquisitions
            .iter()
            .chain(self.clause_increases.iter())
            .filter_map(|r| r.timestamp)
            .min()
    }

    pub fn last_disposed(&self) -> Option<DateTime<Utc>> {
        self.disposals.iter().filter_map(|r| r.timestamp).max()
    }
}

/// Ledgers for every player in first-encounter order.
#[derive(Debug, Clone, Default)]
pub struct PlayerLedgers<'a> {
    entries: Vec<PlayerLedger<'a>>,
    index: HashMap<&'a str, usize>,
}

impl<'a> PlayerLedgers<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &PlayerLedger<'a>> {
        self.entries.iter()
    }

    pub fn get(&self, player: &str) -> Option<&PlayerLedger<'a>> {
        self.index.get(player).map(|&slot| &self.entries[slot])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Groups player-related records by player name.
/// Bonuses, unknown kinds and records without a player are left out.
pub fn build_player_ledgers(records: &[TransactionRecord]) -> PlayerLedgers<'_> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<PlayerLedger> = Vec::new();

    for record in records {
        let (Some(role), Some(player)) = (record.kind.role(), record.player_name.as_deref()) else {
            continue;
        };

        let slot = *index.entry(player).or_insert_with(|| {
            entries.push(PlayerLedger::new(player));
            entries.len() - 1
        });
        let entry = &mut entries[slot];

        match role {
            Role::Acquisition => entry.acquisitions.push(record),
            Role::ClauseIncrease => entry.clause_increases.push(record),
            Role::Disposal => entry.disposals.push(record),
        }
    }

    PlayerLedgers { entries, index }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionKind;
    use crate::utils::parse_datetime;

    fn rec(kind: TransactionKind, player: Option<&str>, amount: i64, date: &str) -> TransactionRecord {
        TransactionRecord {
            kind,
            player_name: player.map(str::to_string),
            counterparty_name: None,
            timestamp: parse_datetime(date),
            amount,
            balance_after: 0,
        }
    }

    #[test]
    fn groups_by_player_in_encounter_order() {
        let records = vec![
            rec(TransactionKind::Sale, Some("Pedri"), 1_500, "2024-09-10"),
            rec(TransactionKind::Purchase, Some("Gavi"), -800, "2024-09-05"),
            rec(TransactionKind::Purchase, Some("Pedri"), -1_000, "2024-09-01"),
            rec(TransactionKind::ClauseIncrease, Some("Pedri"), -200, "2024-08-20"),
            rec(TransactionKind::Bonuses, None, 300, "2024-09-02"),
            rec(TransactionKind::Unknown("gift".into()), Some("Pedri"), 50, ""),
        ];

        let ledgers = build_player_ledgers(&records);
        let names: Vec<_> = ledgers.iter().map(|l| l.player.as_str()).collect();
        assert_eq!(names, vec!["Pedri", "Gavi"]);

        let pedri = ledgers.get("Pedri").unwrap();
        assert_eq!(pedri.acquisitions.len(), 1);
        assert_eq!(pedri.clause_increases.len(), 1);
        assert_eq!(pedri.disposals.len(), 1);
        assert_eq!(pedri.total_spent(), 1_200);
        assert_eq!(pedri.total_earned(), 1_500);
        assert_eq!(pedri.first_acquired(), parse_datetime("2024-08-20"));
        assert_eq!(pedri.last_disposed(), parse_datetime("2024-09-10"));

        assert!(ledgers.get("Nobody").is_none());

        let gavi = ledgers.get("Gavi").unwrap();
        assert!(gavi.has_cost());
        assert!(!gavi.has_disposal());
    }

    #[test]
    fn empty_input_has_no_ledgers() {
        assert!(build_player_ledgers(&[]).is_empty());
    }
}
