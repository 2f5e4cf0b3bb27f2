//! ynab-core: wire types shared by the statement converter and the push CLI

pub mod milliunits;
pub mod transaction;

pub use milliunits::Milliunits;
pub use transaction::{
    ClearedStatus, Transaction, TransactionsData, TransactionsPayload, TransactionsResponse,
};
