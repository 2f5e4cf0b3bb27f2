//! Errors raised while converting a statement.

use thiserror::Error;

/// A single record could not be converted.
#[derive(Debug, Error)]
pub enum LineError {
    #[error("parsing date {value:?}")]
    Date {
        value: String,
        source: chrono::ParseError,
    },

    #[error("parsing date {value:?}: expected {expected}")]
    DateShape {
        value: String,
        expected: &'static str,
    },

    #[error("parsing amount {value:?}: not a decimal number")]
    AmountSyntax { value: String },

    #[error("parsing amount {value:?}")]
    Amount {
        value: String,
        source: rust_decimal::Error,
    },

    #[error("amount {value:?} does not fit in milliunits")]
    AmountOutOfRange { value: String },

    #[error("record has no field {index}")]
    MissingField { index: usize },
}

/// The whole batch was rejected. Nothing is returned on error.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("converting line {line}")]
    Line {
        /// 1-based record number in the input
        line: u64,
        #[source]
        source: LineError,
    },

    #[error("reading csv line {line}: {reason}")]
    Quote { line: u64, reason: &'static str },

    #[error("reading csv line")]
    Read(#[from] csv::Error),

    #[error("reading input")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
