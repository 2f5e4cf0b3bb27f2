//! Transaction records and the request/response envelopes of the
//! budgeting API's bulk transaction endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::milliunits::Milliunits;

/// A normalized transaction, ready to be submitted.
///
/// Every field is left out of the JSON body when empty, matching what the
/// API accepts for partially specified transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Budget account the transaction belongs to (constant across a batch)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account_id: String,
    /// Effective transaction date, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    /// Signed amount in milliunits (negative = outflow)
    #[serde(default, skip_serializing_if = "Milliunits::is_zero")]
    pub amount: Milliunits,
    /// Short counterparty label
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub payee_name: String,
    /// Original statement description, verbatim
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
    #[serde(default)]
    pub cleared: ClearedStatus,
    /// Deduplication key, see `ynab_ingest::import_id`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub import_id: String,
}

/// Clearing state of a transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearedStatus {
    Cleared,
    #[default]
    Uncleared,
    Reconciled,
}

impl Transaction {
    /// Create a cleared transaction; statement lines are always settled.
    pub fn cleared(
        account_id: impl Into<String>,
        date: NaiveDate,
        amount: Milliunits,
        payee_name: impl Into<String>,
        memo: impl Into<String>,
        import_id: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            date,
            amount,
            payee_name: payee_name.into(),
            memo: memo.into(),
            cleared: ClearedStatus::Cleared,
            import_id: import_id.into(),
        }
    }

    pub fn is_outflow(&self) -> bool {
        self.amount.is_outflow()
    }
}

/// Body of `POST /v1/budgets/{budget_id}/transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsPayload {
    pub transactions: Vec<Transaction>,
}

impl TransactionsPayload {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

/// Response of the bulk create endpoint; only the parts we report on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionsResponse {
    #[serde(default)]
    pub data: TransactionsData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionsData {
    #[serde(default)]
    pub transaction_ids: Vec<String>,
    /// Import ids the service already knew about and skipped
    #[serde(default)]
    pub duplicate_import_ids: Vec<String>,
}

impl TransactionsResponse {
    pub fn duplicate_count(&self) -> usize {
        self.data.duplicate_import_ids.len()
    }
}
