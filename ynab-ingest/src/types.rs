use ynab_core::{Milliunits, Transaction};

/// Balance figure taken from the statement's footer row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Reconciled {
    /// The input ended without a footer row
    #[default]
    NotFound,
    /// Footer row found and its amount parsed
    Balance(Milliunits),
    /// Footer row found but its amount column was missing or malformed
    Unparsable { raw: String },
}

impl Reconciled {
    /// The balance to display; zero unless a footer amount was parsed.
    pub fn amount(&self) -> Milliunits {
        match self {
            Reconciled::Balance(amount) => *amount,
            Reconciled::NotFound | Reconciled::Unparsable { .. } => Milliunits::ZERO,
        }
    }

    pub fn footer_seen(&self) -> bool {
        !matches!(self, Reconciled::NotFound)
    }
}

/// Output of converting one statement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    /// Transactions in file order
    pub transactions: Vec<Transaction>,
    pub reconciled: Reconciled,
}

impl Conversion {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }
}
