//! Conversion of a single statement record into a transaction.
//!
//! Card payments carry the actual purchase date at the end of their
//! description, e.g. `CB  MERCHANT NAME          28/10/24`, while the
//! statement's own date column holds the booking date. When that stamp is
//! present it wins, and the payee is the description without it.

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;
use ynab_core::{Milliunits, Transaction};

use crate::error::LineError;
use crate::import_id::ImportIds;
use crate::layout::{
    AMOUNT, DATE, EMBEDDED_DATE_FORMAT, EMBEDDED_DATE_LEN, EMBEDDED_DATE_SHAPE, ROW_DATE_FORMAT,
    ROW_DATE_SHAPE, Side, matches_date_shape,
};

/// Parse one transaction row.
///
/// `import_ids` belongs to the enclosing conversion run; the transaction's
/// import id is allocated from it once the effective date is known.
pub fn parse_line(
    record: &StringRecord,
    account_id: &str,
    import_ids: &mut ImportIds,
) -> Result<Transaction, LineError> {
    let row_date = parse_row_date(field(record, DATE)?)?;
    let amount = parse_amount(field(record, AMOUNT)?)?;

    let description = field(record, Side::of(amount.value()).description_column())?;

    let (date, payee) = match embedded_date(description) {
        Some((date, payee)) => {
            tracing::trace!(%row_date, %date, "using date embedded in description");
            (date, payee)
        }
        None => (row_date, description),
    };

    let import_id = import_ids.next(amount, date);

    Ok(Transaction::cleared(
        account_id,
        date,
        amount,
        payee,
        description,
        import_id,
    ))
}

/// Parse a statement amount such as `-21,32` into milliunits.
///
/// The decimal comma is swapped for a dot, the value is scaled by 1000 and
/// truncated toward zero. Only an optional sign, digits and one decimal
/// separator are accepted.
pub fn parse_amount(raw: &str) -> Result<Milliunits, LineError> {
    if !is_plain_decimal(raw) {
        return Err(LineError::AmountSyntax {
            value: raw.to_string(),
        });
    }

    let value = Decimal::from_str(&raw.replace(',', ".")).map_err(|source| LineError::Amount {
        value: raw.to_string(),
        source,
    })?;

    value
        .checked_mul(Decimal::ONE_THOUSAND)
        .and_then(|scaled| scaled.trunc().to_i64())
        .map(Milliunits)
        .ok_or_else(|| LineError::AmountOutOfRange {
            value: raw.to_string(),
        })
}

/// `[+-]digits[,digits]`, with at least one digit. `rust_decimal` also
/// takes `_` separators, which would silently scale `1_000` up.
fn is_plain_decimal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (int, frac) = digits.split_once([',', '.']).unwrap_or((digits, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && all_digits(frac) && !(int.is_empty() && frac.is_empty())
}

fn parse_row_date(raw: &str) -> Result<NaiveDate, LineError> {
    if !matches_date_shape(raw, ROW_DATE_SHAPE) {
        return Err(LineError::DateShape {
            value: raw.to_string(),
            expected: ROW_DATE_SHAPE,
        });
    }
    NaiveDate::parse_from_str(raw, ROW_DATE_FORMAT).map_err(|source| LineError::Date {
        value: raw.to_string(),
        source,
    })
}

/// Split a trailing `DD/MM/YY` stamp off `description`.
///
/// Returns the stamp's date and the trimmed text before it, or `None` when
/// the description does not end with a valid date.
fn embedded_date(description: &str) -> Option<(NaiveDate, &str)> {
    let split = description.len().checked_sub(EMBEDDED_DATE_LEN)?;
    let stamp = description.get(split..)?;
    if !matches_date_shape(stamp, EMBEDDED_DATE_SHAPE) {
        return None;
    }
    let date = NaiveDate::parse_from_str(stamp, EMBEDDED_DATE_FORMAT).ok()?;
    Some((date, description[..split].trim()))
}

fn field(record: &StringRecord, index: usize) -> Result<&str, LineError> {
    record.get(index).ok_or(LineError::MissingField { index })
}
