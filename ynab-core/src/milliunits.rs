//! Fixed-point currency amounts as used by the budgeting API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount scaled by 1000 (three implied decimal digits).
///
/// Negative values are outflows (debits), positive values inflows.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Milliunits(pub i64);

impl Milliunits {
    pub const ZERO: Milliunits = Milliunits(0);

    /// Number of implied decimal digits.
    pub const SCALE: u32 = 3;

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if this amount leaves the account
    pub fn is_outflow(self) -> bool {
        self.0 <= 0
    }

    /// The amount as an exact decimal in currency units.
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, Self::SCALE)
    }
}

impl From<i64> for Milliunits {
    fn from(value: i64) -> Self {
        Milliunits(value)
    }
}

/// Renders currency units with two decimals, e.g. `100060` as `100.06`.
impl fmt::Display for Milliunits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_decimal().round_dp(2))
    }
}
