use crate::transaction::Transaction;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// Read-only aggregate queries over a fixed snapshot of transactions.
///
/// The engine takes ownership of the transaction sequence at construction
/// (its snapshot of the data) and never mutates it afterwards. Every query
/// is a pure function of that snapshot; calling one twice gives identical
/// results. Input is assumed already validated by the reader layer, so
/// construction cannot fail.
pub struct TransactionQueryEngine {
    transactions: Vec<Transaction>,
}

impl TransactionQueryEngine {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// The snapshot held by the engine, in input order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Sum of all transaction amounts. Zero for an empty snapshot.
    pub fn total_amount(&self) -> Decimal {
        self.transactions.iter().map(|tx| tx.amount).sum()
    }

    /// Sum of amounts sent by `sender_full_name` (exact name match).
    /// Zero when the sender has no transactions.
    pub fn total_amount_sent_by(&self, sender_full_name: &str) -> Decimal {
        self.transactions
            .iter()
            .filter(|tx| tx.sender_full_name == sender_full_name)
            .map(|tx| tx.amount)
            .sum()
    }

    /// The largest single transaction amount. Zero for an empty snapshot;
    /// the sentinel, not an error.
    pub fn max_amount(&self) -> Decimal {
        self.transactions
            .iter()
            .map(|tx| tx.amount)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Number of distinct client names across senders and beneficiaries.
    /// A name appearing on both sides counts once.
    pub fn count_unique_clients(&self) -> usize {
        let mut clients = HashSet::new();
        for tx in &self.transactions {
            clients.insert(tx.sender_full_name.as_str());
            clients.insert(tx.beneficiary_full_name.as_str());
        }
        clients.len()
    }

    /// Whether `client_full_name` (as sender or beneficiary) appears on any
    /// transaction carrying at least one unsolved issue.
    pub fn has_open_compliance_issue(&self, client_full_name: &str) -> bool {
        self.transactions
            .iter()
            .any(|tx| tx.involves(client_full_name) && tx.has_open_issue())
    }

    /// Transactions indexed by beneficiary name.
    ///
    /// Last-write-wins: when several transactions share a beneficiary, only
    /// the last one in input order is kept. This collapsing is inherited
    /// behavior that callers depend on, not an aggregation; all earlier
    /// transactions for that beneficiary are dropped from the result.
    pub fn transactions_by_beneficiary(&self) -> HashMap<&str, &Transaction> {
        let mut by_beneficiary = HashMap::new();
        for tx in &self.transactions {
            by_beneficiary.insert(tx.beneficiary_full_name.as_str(), tx);
        }
        by_beneficiary
    }

    /// Distinct ids of all unsolved issues across the snapshot.
    pub fn unsolved_issue_ids(&self) -> HashSet<u32> {
        self.transactions
            .iter()
            .flat_map(|tx| &tx.issues)
            .filter(|issue| !issue.issue_solved)
            .map(|issue| issue.issue_id)
            .collect()
    }

    /// Messages of all solved issues, in input encounter order.
    /// Duplicates are retained; the order is stable for reproducibility.
    pub fn all_solved_issue_messages(&self) -> Vec<&str> {
        self.transactions
            .iter()
            .flat_map(|tx| &tx.issues)
            .filter(|issue| issue.issue_solved)
            .map(|issue| issue.issue_message.as_str())
            .collect()
    }

    /// Up to three transactions with the largest amounts, descending.
    /// The sort is stable, so equal amounts keep their input order.
    pub fn top3_by_amount(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
        sorted.truncate(3);
        sorted
    }

    /// The sender with the greatest total sent amount, or `None` for an
    /// empty snapshot. Senders are grouped in first-seen order and a later
    /// sender must strictly exceed the current best to replace it, so ties
    /// resolve to the sender encountered first in the input.
    pub fn top_sender(&self) -> Option<&str> {
        let mut totals: HashMap<&str, Decimal> = HashMap::new();
        let mut first_seen: Vec<&str> = Vec::new();
        for tx in &self.transactions {
            let name = tx.sender_full_name.as_str();
            totals
                .entry(name)
                .and_modify(|total| *total += tx.amount)
                .or_insert_with(|| {
                    first_seen.push(name);
                    tx.amount
                });
        }

        let mut best: Option<(&str, Decimal)> = None;
        for name in first_seen {
            let total = totals[name];
            match best {
                Some((_, best_total)) if total <= best_total => {}
                _ => best = Some((name, total)),
            }
        }
        best.map(|(name, _)| name)
    }
}
