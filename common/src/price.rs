//! [`Price`]-related definitions.

use std::{fmt, str::FromStr};

use derive_more::Display;
use rust_decimal::{prelude::FromPrimitive as _, Decimal};

/// Non-negative monetary value of something.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Price(Decimal);

impl Price {
    /// [`Price`] of nothing.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Price`] if the provided `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount >= Decimal::ZERO).then_some(Self(amount.normalize()))
    }

    /// Creates a new [`Price`] out of the provided floating-point `amount`.
    ///
    /// [`None`] is returned if the `amount` is negative or not finite.
    #[must_use]
    pub fn from_f64(amount: f64) -> Option<Self> {
        Decimal::from_f64(amount).and_then(Self::new)
    }

    /// Returns the amount of this [`Price`].
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .or_else(|_| Decimal::from_scientific(s.trim()))
            .map_err(|_| ParseError::NotNumeric)?;
        Self::new(amount).ok_or(ParseError::Negative)
    }
}

/// Error of parsing a [`Price`] from a string.
#[derive(Clone, Copy, Debug, Display, Eq, derive_more::Error, PartialEq)]
pub enum ParseError {
    /// Input is not a number.
    #[display("not a numeric value")]
    NotNumeric,

    /// Input is a negative number.
    #[display("negative value")]
    Negative,
}
