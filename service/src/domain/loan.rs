//! [`Loan`] definitions.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use common::Date;
use derive_more::Display;

use crate::domain::{item, user};

/// Identity of a [`Loan`].
///
/// Two [`Loan`]s with the same [`Key`] are considered the same [`Loan`],
/// regardless of their [`Period`]s and return dates.
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[display("`{item}` of {owner} lent to {borrower} at {started_at}")]
pub struct Key {
    /// [`user::Key`] of the owner of the lent item.
    pub owner: user::Key,

    /// [`user::Key`] of the user the item is lent to.
    pub borrower: user::Key,

    /// [`item::Name`] of the lent item.
    pub item: item::Name,

    /// [`Date`] the item was lent at.
    pub started_at: Date,
}

/// Record of an item being lent by its owner to another user.
#[derive(Clone, Debug)]
pub struct Loan {
    /// [`Key`] of this [`Loan`].
    key: Key,

    /// [`Period`] this [`Loan`] is agreed for.
    period: Period,

    /// [`Date`] the item was returned at, if it was.
    returned_at: Option<Date>,
}

impl Loan {
    /// Creates a new open [`Loan`].
    #[must_use]
    pub fn new(key: Key, period: Period) -> Self {
        Self {
            key,
            period,
            returned_at: None,
        }
    }

    /// Returns [`Key`] of this [`Loan`].
    #[must_use]
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Returns [`Period`] of this [`Loan`].
    #[must_use]
    pub fn period(&self) -> Period {
        self.period
    }

    /// Returns [`Date`] the item was returned at, if it was.
    #[must_use]
    pub fn returned_at(&self) -> Option<&Date> {
        self.returned_at.as_ref()
    }

    /// Records the [`Date`] the item was returned at.
    ///
    /// Overwrites the previously recorded one, if any.
    pub fn set_return_date(&mut self, date: Date) {
        self.returned_at = Some(date);
    }

    /// Indicates whether the item of this [`Loan`] hasn't been returned yet.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }

    /// Returns the [`Date`] the item is expected to be returned at.
    ///
    /// [`None`] is returned if the start date is not a calendar date.
    #[must_use]
    pub fn due_date(&self) -> Option<Date> {
        self.key.started_at.plus_days(self.period)
    }

    /// Returns the number of days the item was returned after its
    /// [`Loan::due_date()`].
    ///
    /// Zero is returned for an in-time return. [`None`] is returned if the
    /// [`Loan`] is still open, or its dates are not calendar ones.
    #[must_use]
    pub fn days_late(&self) -> Option<u32> {
        let late = self.due_date()?.days_until(self.returned_at.as_ref()?)?;
        Some(u32::try_from(late.max(0)).unwrap_or(u32::MAX))
    }
}

impl PartialEq for Loan {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Loan {}

impl Hash for Loan {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Key {
            owner,
            borrower,
            item,
            started_at,
        } = &self.key;
        write!(
            f,
            "LOAN - From: {}, To: {}, {item}, {started_at}, {} days, \
             RETURNED: ",
            owner.name, borrower.name, self.period,
        )?;
        match &self.returned_at {
            Some(date) => write!(f, "{date}"),
            None => f.write_str("In progress"),
        }
    }
}

/// Number of days a [`Loan`] is agreed for.
pub type Period = u32;

#[cfg(test)]
mod spec {
    use std::collections::HashSet;

    use common::Date;

    use crate::domain::{item, user};

    use super::{Key, Loan};

    fn key(start: &str) -> Key {
        let user = |name: &str, phone: &str| {
            user::Key::new(name.parse().unwrap(), phone.parse().unwrap())
        };
        Key {
            owner: user("Ana", "1"),
            borrower: user("Bia", "2"),
            item: item::Name::new("Catan").unwrap(),
            started_at: Date::new(start).unwrap(),
        }
    }

    #[test]
    fn identity_excludes_period_and_return() {
        let mut returned = Loan::new(key("01/01/2024"), 3);
        returned.set_return_date(Date::new("02/01/2024").unwrap());

        assert_eq!(Loan::new(key("01/01/2024"), 7), returned);
        assert_ne!(
            Loan::new(key("01/01/2024"), 7),
            Loan::new(key("02/01/2024"), 7),
        );

        let set = [Loan::new(key("01/01/2024"), 7), returned]
            .into_iter()
            .collect::<HashSet<_>>();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn closes_on_return() {
        let mut loan = Loan::new(key("01/01/2024"), 7);
        assert!(loan.is_open());
        assert_eq!(loan.returned_at(), None);

        loan.set_return_date(Date::new("05/01/2024").unwrap());

        assert!(!loan.is_open());
        assert_eq!(
            loan.returned_at().map(AsRef::<str>::as_ref),
            Some("05/01/2024"),
        );
    }

    #[test]
    fn computes_due_date_and_lateness() {
        let mut loan = Loan::new(key("01/01/2024"), 7);
        assert_eq!(loan.due_date(), Date::new("08/01/2024"));
        assert_eq!(loan.days_late(), None);

        loan.set_return_date(Date::new("05/01/2024").unwrap());
        assert_eq!(loan.days_late(), Some(0));

        loan.set_return_date(Date::new("11/01/2024").unwrap());
        assert_eq!(loan.days_late(), Some(3));

        let free_form = Loan::new(key("new year"), 7);
        assert_eq!(free_form.due_date(), None);
    }

    #[test]
    fn renders() {
        let mut loan = Loan::new(key("01/01/2024"), 7);
        assert_eq!(
            loan.to_string(),
            "LOAN - From: Ana, To: Bia, Catan, 01/01/2024, 7 days, \
             RETURNED: In progress",
        );

        loan.set_return_date(Date::new("05/01/2024").unwrap());
        assert_eq!(
            loan.to_string(),
            "LOAN - From: Ana, To: Bia, Catan, 01/01/2024, 7 days, \
             RETURNED: 05/01/2024",
        );
    }
}
