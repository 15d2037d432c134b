//! [`Loan`] read model definitions.

use crate::domain::{item, loan, user};
#[cfg(doc)]
use crate::domain::Loan;

/// Wrapper around [`Loan`] indicating that it [`is_open()`].
///
/// [`is_open()`]: Loan::is_open
#[derive(Clone, Copy, Debug)]
pub struct Open<T>(pub T);

/// Filter of listed [`Loan`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Filter {
    /// [`Loan`]s of items owned by the specified user.
    Owner(user::Key),

    /// [`Loan`]s of items lent to the specified user.
    Borrower(user::Key),

    /// [`Loan`]s of items with the specified name, whoever owns them.
    Item(item::Name),
}

impl Filter {
    /// Checks whether the [`Loan`] with the provided [`loan::Key`] passes
    /// this [`Filter`].
    #[must_use]
    pub fn matches(&self, key: &loan::Key) -> bool {
        match self {
            Self::Owner(owner) => key.owner == *owner,
            Self::Borrower(borrower) => key.borrower == *borrower,
            Self::Item(name) => key.item == *name,
        }
    }
}
