use crate::engine::TransactionQueryEngine;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// The fixed query set evaluated over one snapshot, in a serializable form.
///
/// Set-valued results are sorted and map-valued results are keyed through
/// sorted entries, so the same snapshot always serializes to the same bytes.
#[derive(Debug, Serialize, PartialEq)]
pub struct QueryReport {
    pub transaction_count: usize,
    pub total_amount: Decimal,
    pub max_amount: Decimal,
    pub unique_clients: usize,
    pub top_sender: Option<String>,
    pub top3_by_amount: Vec<RankedTransaction>,
    pub unsolved_issue_ids: Vec<u32>,
    pub solved_issue_messages: Vec<String>,
    /// The beneficiary index, one entry per beneficiary sorted by name.
    /// Each entry points at the last transaction for that beneficiary in
    /// input order, matching the engine's last-write-wins index.
    pub transactions_by_beneficiary: Vec<BeneficiaryEntry>,
    /// Filled only when the caller asked about a specific sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sent_by: Option<SenderTotal>,
    /// Filled only when the caller asked about a specific client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_open_issues: Option<ClientIssueStatus>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct BeneficiaryEntry {
    pub beneficiary_full_name: String,
    pub mtn: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RankedTransaction {
    pub mtn: String,
    pub amount: Decimal,
    pub sender_full_name: String,
    pub beneficiary_full_name: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SenderTotal {
    pub sender_full_name: String,
    pub total_amount: Decimal,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ClientIssueStatus {
    pub client_full_name: String,
    pub open_issues: bool,
}

impl QueryReport {
    pub fn build(engine: &TransactionQueryEngine) -> Self {
        let mut unsolved_issue_ids: Vec<u32> = engine.unsolved_issue_ids().into_iter().collect();
        unsolved_issue_ids.sort_unstable();

        let mut transactions_by_beneficiary: Vec<BeneficiaryEntry> = engine
            .transactions_by_beneficiary()
            .into_iter()
            .map(|(beneficiary, tx)| BeneficiaryEntry {
                beneficiary_full_name: beneficiary.to_string(),
                mtn: tx.mtn.clone(),
            })
            .collect();
        transactions_by_beneficiary.sort_by(|a, b| {
            a.beneficiary_full_name.cmp(&b.beneficiary_full_name)
        });

        Self {
            transaction_count: engine.transactions().len(),
            total_amount: engine.total_amount(),
            max_amount: engine.max_amount(),
            unique_clients: engine.count_unique_clients(),
            top_sender: engine.top_sender().map(str::to_string),
            top3_by_amount: engine
                .top3_by_amount()
                .into_iter()
                .map(|tx| RankedTransaction {
                    mtn: tx.mtn.clone(),
                    amount: tx.amount,
                    sender_full_name: tx.sender_full_name.clone(),
                    beneficiary_full_name: tx.beneficiary_full_name.clone(),
                })
                .collect(),
            unsolved_issue_ids,
            transactions_by_beneficiary,
            solved_issue_messages: engine
                .all_solved_issue_messages()
                .into_iter()
                .map(str::to_string)
                .collect(),
            total_sent_by: None,
            has_open_issues: None,
        }
    }

    pub fn with_sender_lookup(mut self, engine: &TransactionQueryEngine, sender: &str) -> Self {
        self.total_sent_by = Some(SenderTotal {
            sender_full_name: sender.to_string(),
            total_amount: engine.total_amount_sent_by(sender),
        });
        self
    }

    pub fn with_client_lookup(mut self, engine: &TransactionQueryEngine, client: &str) -> Self {
        self.has_open_issues = Some(ClientIssueStatus {
            client_full_name: client.to_string(),
            open_issues: engine.has_open_compliance_issue(client),
        });
        self
    }
}

/// Writes a `QueryReport` as pretty-printed JSON to any sink.
pub struct ReportWriter<W: Write> {
    sink: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn write_report(&mut self, report: &QueryReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.sink, report)?;
        self.sink.write_all(b"\n")?;
        Ok(())
    }
}
