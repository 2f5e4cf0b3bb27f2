//! Column layout of the bank's semicolon statement export.
//!
//! Transaction rows (debit and credit rows are shaped differently):
//!   29/10/2024;-21,32;Carte;;CB  MERCH          28/10/24;;0;Divers
//!   29/10/2024;80;Virement;;;VIREMENT M JEAN MARTIN OU;;
//!
//! Footer row, carrying the reconciled balance:
//!   29/11/2024;100,06;;01234 123456A

/// Field separator
pub const DELIMITER: u8 = b';';

/// Statement date of the row
pub const DATE: usize = 0;
/// Signed amount, `,` as decimal separator
pub const AMOUNT: usize = 1;
/// Description column of debit rows
pub const DEBIT_DESCRIPTION: usize = 4;
/// Description column of credit rows
pub const CREDIT_DESCRIPTION: usize = 5;

/// Fewest fields a row needs to be read as a transaction
pub const MIN_TRANSACTION_FIELDS: usize = CREDIT_DESCRIPTION + 1;

/// Statement date column, zero-padded
pub const ROW_DATE_SHAPE: &str = "DD/MM/YYYY";
pub const ROW_DATE_FORMAT: &str = "%d/%m/%Y";
/// Stamp appended to card payment descriptions, zero-padded
pub const EMBEDDED_DATE_SHAPE: &str = "DD/MM/YY";
pub const EMBEDDED_DATE_FORMAT: &str = "%d/%m/%y";
/// Byte length of an embedded date stamp
pub const EMBEDDED_DATE_LEN: usize = EMBEDDED_DATE_SHAPE.len();

/// Check `value` against a date shape such as `DD/MM/YYYY`: same length,
/// `/` where the shape has `/`, an ASCII digit everywhere else.
///
/// chrono accepts one-digit and space-padded fields, which the export
/// never produces.
pub fn matches_date_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(b, s)| match s {
            b'/' => b == b'/',
            _ => b.is_ascii_digit(),
        })
}

/// Which side of the account a row books to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Debit,
    Credit,
}

impl Side {
    /// Zero amounts are laid out like debits.
    pub fn of(amount: i64) -> Self {
        if amount > 0 { Side::Credit } else { Side::Debit }
    }

    /// Column holding the free-text description for this side
    pub fn description_column(self) -> usize {
        match self {
            Side::Debit => DEBIT_DESCRIPTION,
            Side::Credit => CREDIT_DESCRIPTION,
        }
    }
}
