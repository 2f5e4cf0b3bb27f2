//! ynab-ingest: semicolon-separated bank statement conversion into budget
//! transactions with deterministic import ids.

pub mod convert;
pub mod error;
pub mod import_id;
pub mod layout;
pub mod line;
pub mod types;

pub use convert::{Converter, convert};
pub use error::{ConvertError, LineError};
pub use import_id::{DEFAULT_NAMESPACE, ImportIds};
pub use line::{parse_amount, parse_line};
pub use types::{Conversion, Reconciled};
