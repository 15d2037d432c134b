//! User-related definitions.
//!
//! Users are owned by an external store. This crate only consumes their
//! [`Key`] as an opaque identity.

use derive_more::{Display, From, Into};
use rust_decimal::Decimal;

use common::Price;

/// Identity of a user in the external user store.
#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{name} ({phone})")]
pub struct Key {
    /// [`Name`] of the user.
    pub name: Name,

    /// [`Phone`] of the user.
    pub phone: Phone,
}

impl Key {
    /// Creates a new [`Key`] out of the provided parts.
    #[must_use]
    pub fn new(name: Name, phone: Phone) -> Self {
        Self { name, phone }
    }
}

define_text! {
    #[doc = "Name of a user."]
    Name
}

define_text! {
    #[doc = "Phone number of a user."]
    Phone
}

/// Reputation score accumulated by a user.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, Into, Ord, PartialEq,
    PartialOrd,
)]
pub struct Reputation(Decimal);

impl Reputation {
    /// Adds the provided `amount` to this [`Reputation`], saturating at
    /// [`Decimal::MAX`].
    pub fn gain(&mut self, amount: Decimal) {
        self.0 = self.0.saturating_add(amount);
    }
}

/// [`Reputation`] gained by a user for registering an item.
#[derive(Clone, Debug)]
pub struct ReputationGain {
    /// [`Key`] of the user gaining [`Reputation`].
    pub user: Key,

    /// [`Price`] of the registered item.
    pub price: Price,
}
