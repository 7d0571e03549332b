use rust_decimal::Decimal;
use txquery::transaction::{ComplianceIssue, Transaction};

pub fn tx(mtn: &str, amount: Decimal, sender: &str, beneficiary: &str) -> Transaction {
    Transaction {
        mtn: mtn.to_string(),
        amount,
        sender_full_name: sender.to_string(),
        sender_age: 30,
        beneficiary_full_name: beneficiary.to_string(),
        beneficiary_age: 40,
        issues: vec![],
    }
}

pub fn issue(id: u32, solved: bool, message: &str) -> ComplianceIssue {
    ComplianceIssue {
        issue_id: id,
        issue_solved: solved,
        issue_message: message.to_string(),
    }
}

pub fn with_issue(mut tx: Transaction, issue: ComplianceIssue) -> Transaction {
    tx.issues.push(issue);
    tx
}
