use rust_decimal::Decimal;
use serde::Deserialize;

/// A money transfer between two named parties, with zero or more compliance
/// issues flagged on it. Immutable once constructed; queries never mutate it.
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Money transfer number, the unique transaction identifier.
    pub mtn: String,
    pub amount: Decimal,
    pub sender_full_name: String,
    pub sender_age: u8,
    pub beneficiary_full_name: String,
    pub beneficiary_age: u8,
    /// An absent or null `issues` field reads as an empty list, so every
    /// issue-scanning query has a single code path.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub issues: Vec<ComplianceIssue>,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceIssue {
    /// Not unique across transactions.
    pub issue_id: u32,
    pub issue_solved: bool,
    pub issue_message: String,
}

impl Transaction {
    /// True iff any attached issue is still unsolved.
    pub fn has_open_issue(&self) -> bool {
        self.issues.iter().any(|issue| !issue.issue_solved)
    }

    /// True iff `name` is this transaction's sender or beneficiary.
    pub fn involves(&self, name: &str) -> bool {
        self.sender_full_name == name || self.beneficiary_full_name == name
    }
}

fn deserialize_null_default<'de, D>(deserializer: D) -> Result<Vec<ComplianceIssue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
