//! Whole-statement conversion.
//!
//! Records are read in order. The first record fixes the transaction row
//! shape; the first record with a different field count is the footer,
//! which carries the reconciled balance and ends the data. Anything after
//! the footer is ignored.
//!
//! Quoting is strict: a `"` inside an unquoted field, or a quoted field
//! that does not close right before a `;` or the end of the line, rejects
//! the statement. Bytes that are not UTF-8 are replaced with U+FFFD.

use csv::{ByteRecord, ReaderBuilder, StringRecord};
use std::io::Read;

use crate::error::{ConvertError, Result};
use crate::import_id::{DEFAULT_NAMESPACE, ImportIds};
use crate::layout::{AMOUNT, DELIMITER, MIN_TRANSACTION_FIELDS};
use crate::line::{parse_amount, parse_line};
use crate::types::{Conversion, Reconciled};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const BARE_QUOTE: &str = "bare \" in non-quoted-field";
const EXTRANEOUS_QUOTE: &str = "extraneous or missing \" in quoted-field";

/// Converts statements for one budget account.
#[derive(Debug, Clone)]
pub struct Converter {
    account_id: String,
    namespace: String,
}

impl Converter {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    /// Prefix used for import ids (default `YNAB`)
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Convert a statement stream.
    ///
    /// `None` is accepted and converts to nothing. Any line that fails to
    /// parse rejects the whole statement. The stream is consumed.
    pub fn convert<R: Read>(&self, reader: Option<R>) -> Result<Conversion> {
        let Some(mut reader) = reader else {
            return Ok(Conversion::default());
        };

        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;
        let input = strip_bom(&input);

        let mut rdr = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .flexible(true)
            .from_reader(input);

        // Fresh per run: ids must not depend on earlier conversions.
        let mut import_ids = ImportIds::new(self.namespace.as_str());
        let mut transactions = Vec::new();
        let mut row_len = None;
        let mut raw = ByteRecord::new();
        let mut index = 0u64;

        while rdr.read_byte_record(&mut raw)? {
            index += 1;
            let line = raw.position().map_or(index, |pos| pos.line());

            let start = raw.position().map_or(0, |pos| pos.byte() as usize);
            let end = rdr.position().byte() as usize;
            check_quotes(input.get(start..end).unwrap_or_default())
                .map_err(|reason| ConvertError::Quote { line, reason })?;

            let record = StringRecord::from_byte_record_lossy(raw.clone());

            let expected = *row_len.get_or_insert(record.len());
            if record.len() != expected || record.len() < MIN_TRANSACTION_FIELDS {
                tracing::debug!(line, fields = record.len(), expected, "footer row reached");
                return Ok(Conversion {
                    transactions,
                    reconciled: footer_balance(&record, line),
                });
            }

            let txn = parse_line(&record, &self.account_id, &mut import_ids)
                .map_err(|source| ConvertError::Line { line, source })?;
            transactions.push(txn);
        }

        tracing::debug!(count = transactions.len(), "statement ended without footer row");
        Ok(Conversion {
            transactions,
            reconciled: Reconciled::NotFound,
        })
    }
}

/// Convert a statement stream with the default import id namespace.
pub fn convert<R: Read>(reader: Option<R>, account_id: &str) -> Result<Conversion> {
    Converter::new(account_id).convert(reader)
}

fn footer_balance(record: &StringRecord, line: u64) -> Reconciled {
    let raw = record.get(AMOUNT).unwrap_or_default();
    match parse_amount(raw) {
        Ok(amount) => Reconciled::Balance(amount),
        Err(err) => {
            tracing::warn!(line, error = %err, "footer balance is not a number, reporting 0");
            Reconciled::Unparsable {
                raw: raw.to_string(),
            }
        }
    }
}

/// Drop a leading UTF-8 byte-order mark.
fn strip_bom(input: &[u8]) -> &[u8] {
    input.strip_prefix(UTF8_BOM).unwrap_or(input)
}

/// Check the quoting of one raw record, terminator included.
///
/// The csv reader keeps stray quotes as literal text; these are the cases
/// a strict reader refuses.
fn check_quotes(mut raw: &[u8]) -> std::result::Result<(), &'static str> {
    while let [b'\r' | b'\n', rest @ ..] = raw {
        raw = rest;
    }
    while let [rest @ .., b'\r' | b'\n'] = raw {
        raw = rest;
    }

    let mut rest = raw;
    loop {
        match rest.strip_prefix(b"\"") {
            Some(mut quoted) => loop {
                let close = quoted
                    .iter()
                    .position(|&b| b == b'"')
                    .ok_or(EXTRANEOUS_QUOTE)?;
                match quoted.get(close + 1) {
                    Some(&b'"') => quoted = &quoted[close + 2..],
                    Some(&DELIMITER) => {
                        rest = &quoted[close + 2..];
                        break;
                    }
                    Some(_) => return Err(EXTRANEOUS_QUOTE),
                    None => return Ok(()),
                }
            },
            None => {
                let end = rest
                    .iter()
                    .position(|&b| b == DELIMITER)
                    .unwrap_or(rest.len());
                if rest[..end].contains(&b'"') {
                    return Err(BARE_QUOTE);
                }
                match rest.get(end + 1..) {
                    Some(next) => rest = next,
                    None => return Ok(()),
                }
            }
        }
    }
}
