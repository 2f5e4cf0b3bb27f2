//! Deterministic import ids.
//!
//! An import id is `<namespace>:<amount>:<date>:<occurrence>`, where the
//! occurrence counts earlier transactions of the same run sharing amount and
//! date. Re-running a conversion on the same file yields the same ids, which
//! is what lets the API recognise repeat submissions.

use chrono::NaiveDate;
use std::collections::HashMap;
use ynab_core::Milliunits;

/// Namespace used unless the caller configures another one
pub const DEFAULT_NAMESPACE: &str = "YNAB";

/// Occurrence counter for one conversion run. Never shared between runs.
#[derive(Debug, Clone)]
pub struct ImportIds {
    namespace: String,
    seen: HashMap<(Milliunits, NaiveDate), u32>,
}

impl ImportIds {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            seen: HashMap::new(),
        }
    }

    /// Allocate the next id for `(amount, date)`.
    pub fn next(&mut self, amount: Milliunits, date: NaiveDate) -> String {
        let occurrence = self.seen.entry((amount, date)).or_insert(0);
        *occurrence += 1;
        format!(
            "{}:{}:{}:{}",
            self.namespace,
            amount.value(),
            date.format("%Y-%m-%d"),
            occurrence
        )
    }
}

impl Default for ImportIds {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}
