use crate::error::{QueryError, Result};
use crate::transaction::{ComplianceIssue, Transaction};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

/// Reads transactions from a JSON source.
///
/// Expects a top-level array of transaction objects with camelCase field
/// names, matching the upstream data export format. The whole document is
/// validated before any transaction is handed out, so a bad file fails
/// here rather than surfacing as inconsistent query results later.
pub struct TransactionReader<R: Read> {
    source: R,
}

impl<R: Read> TransactionReader<R> {
    /// Creates a new `TransactionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read_all(self) -> Result<Vec<Transaction>> {
        let transactions: Vec<Transaction> = serde_json::from_reader(self.source)?;
        validate(&transactions)?;
        Ok(transactions)
    }
}

/// Reads transactions from a CSV source.
///
/// The flat export format carries one row per (transaction, issue) pair:
/// rows sharing an `mtn` describe the same transfer and are merged into a
/// single transaction with the issues appended in row order. Empty issue
/// columns mean the row carries no issue. Rows whose scalar fields disagree
/// with an earlier row for the same `mtn` are rejected.
pub struct CsvTransactionReader<R: Read> {
    reader: csv::Reader<R>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    mtn: String,
    amount: Decimal,
    sender_full_name: String,
    sender_age: u8,
    beneficiary_full_name: String,
    beneficiary_age: u8,
    issue_id: Option<u32>,
    issue_solved: Option<bool>,
    issue_message: Option<String>,
}

impl CsvRow {
    fn into_parts(self) -> (Transaction, Option<ComplianceIssue>) {
        let issue = self.issue_id.map(|issue_id| ComplianceIssue {
            issue_id,
            issue_solved: self.issue_solved.unwrap_or(false),
            issue_message: self.issue_message.unwrap_or_default(),
        });
        let tx = Transaction {
            mtn: self.mtn,
            amount: self.amount,
            sender_full_name: self.sender_full_name,
            sender_age: self.sender_age,
            beneficiary_full_name: self.beneficiary_full_name,
            beneficiary_age: self.beneficiary_age,
            issues: vec![],
        };
        (tx, issue)
    }
}

impl<R: Read> CsvTransactionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn read_all(mut self) -> Result<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = Vec::new();
        let mut index_by_mtn: HashMap<String, usize> = HashMap::new();

        for row in self.reader.deserialize() {
            let row: CsvRow = row?;
            let (tx, issue) = row.into_parts();
            match index_by_mtn.get(&tx.mtn) {
                Some(&i) => {
                    let existing = &mut transactions[i];
                    if existing.amount != tx.amount
                        || existing.sender_full_name != tx.sender_full_name
                        || existing.sender_age != tx.sender_age
                        || existing.beneficiary_full_name != tx.beneficiary_full_name
                        || existing.beneficiary_age != tx.beneficiary_age
                    {
                        return Err(QueryError::Data(format!(
                            "conflicting rows for transaction {}",
                            tx.mtn
                        )));
                    }
                    existing.issues.extend(issue);
                }
                None => {
                    index_by_mtn.insert(tx.mtn.clone(), transactions.len());
                    let mut tx = tx;
                    tx.issues.extend(issue);
                    transactions.push(tx);
                }
            }
        }

        validate(&transactions)?;
        Ok(transactions)
    }
}

/// Construction-time checks the engine relies on. Rejects the whole batch
/// on the first bad record.
fn validate(transactions: &[Transaction]) -> Result<()> {
    for tx in transactions {
        if tx.mtn.is_empty() {
            return Err(QueryError::Data("transaction with empty mtn".to_string()));
        }
        if tx.amount < Decimal::ZERO {
            return Err(QueryError::Data(format!(
                "transaction {} has negative amount {}",
                tx.mtn, tx.amount
            )));
        }
    }
    Ok(())
}
