//! [`Item`] read model definitions.

use std::cmp::Ordering;

use derive_more::Display;

use crate::domain::{item::Status, Item};

/// Order to list [`Item`]s in.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Order {
    /// By [`Item`] names, lexicographically.
    #[default]
    Name,

    /// By [`Item`] prices, the cheapest first.
    Price,
}

impl Order {
    /// Compares the provided [`Item`]s according to this [`Order`].
    #[must_use]
    pub fn compare(self, a: &Item, b: &Item) -> Ordering {
        match self {
            Self::Name => a.cmp_by_name(b),
            Self::Price => a.cmp_by_price(b),
        }
    }
}

/// Filter of listed [`Item`]s by their [`Status`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Filter {
    /// All the [`Item`]s.
    #[default]
    All,

    /// Only [`Item`]s being lent at the moment.
    OnLoan,

    /// Only [`Item`]s not being lent at the moment.
    Available,
}

impl Filter {
    /// Checks whether the provided [`Item`] passes this [`Filter`].
    #[must_use]
    pub fn matches(self, item: &Item) -> bool {
        match self {
            Self::All => true,
            Self::OnLoan => item.status() == Status::OnLoan,
            Self::Available => item.status() == Status::Available,
        }
    }
}

/// [`Item`] with its position in a popularity ranking.
#[derive(Clone, Debug, Display)]
#[display("{rank}) {} loans - {item}", item.loan_count)]
pub struct Ranked {
    /// 1-based position of the [`Item`] in the ranking.
    pub rank: usize,

    /// Ranked [`Item`].
    pub item: Item,
}
