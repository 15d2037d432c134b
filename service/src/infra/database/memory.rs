//! In-memory [`Database`] implementation.
//!
//! Holds the users' [`Catalog`]s with their [`Reputation`]s and the ledger of
//! [`Loan`]s. Interior mutability is done via [`RefCell`]s, so [`Memory`] is
//! not [`Sync`] and can't be shared between threads.

use std::{
    cell::{BorrowError, BorrowMutError, RefCell},
    collections::BTreeMap,
};

use common::operations::{By, Insert, Select, Update};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::{
    domain::{
        loan,
        user::{self, Reputation, ReputationGain},
        Catalog, Item, Loan,
    },
    infra::{database, Database},
    read::{self, loan::Open},
};

/// In-memory [`Database`].
#[derive(Debug, Default)]
pub struct Memory {
    /// [`Record`]s of the registered users.
    users: RefCell<BTreeMap<user::Key, Record>>,

    /// Ledger of [`Loan`]s in the order they were registered.
    loans: RefCell<Vec<Loan>>,
}

/// Data of a single user stored in [`Memory`].
#[derive(Debug)]
struct Record {
    /// [`Catalog`] of the user's [`Item`]s.
    catalog: Catalog,

    /// [`Reputation`] of the user.
    reputation: Reputation,
}

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Database<Insert<Catalog>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    /// Registers the owner of the provided [`Catalog`] as a user, replacing
    /// the [`Catalog`] of the same user, if any.
    fn execute(
        &self,
        Insert(catalog): Insert<Catalog>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut users = self
            .users
            .try_borrow_mut()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        let reputation = users
            .get(catalog.owner())
            .map(|r| r.reputation)
            .unwrap_or_default();
        _ = users.insert(
            catalog.owner().clone(),
            Record {
                catalog,
                reputation,
            },
        );
        Ok(())
    }
}

impl Database<Select<By<Option<Catalog>, user::Key>>> for Memory {
    type Ok = Option<Catalog>;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Select(by): Select<By<Option<Catalog>, user::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let owner = by.into_inner();
        Ok(self
            .users
            .try_borrow()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?
            .get(&owner)
            .map(|r| r.catalog.clone()))
    }
}

impl Database<Update<Catalog>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    /// Replaces the stored [`Catalog`] of the same owner.
    ///
    /// Does nothing if the owner is not a registered user.
    fn execute(
        &self,
        Update(catalog): Update<Catalog>,
    ) -> Result<Self::Ok, Self::Err> {
        if let Some(record) = self
            .users
            .try_borrow_mut()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?
            .get_mut(catalog.owner())
        {
            record.catalog = catalog;
        }
        Ok(())
    }
}

impl Database<Select<By<Vec<Item>, ()>>> for Memory {
    type Ok = Vec<Item>;
    type Err = Traced<database::Error>;

    /// Selects [`Item`]s of all the users, grouped by their owners.
    fn execute(
        &self,
        _: Select<By<Vec<Item>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .users
            .try_borrow()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?
            .values()
            .flat_map(|r| r.catalog.items())
            .cloned()
            .collect())
    }
}

impl Database<Insert<ReputationGain>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    /// Adds the gained [`Reputation`] to the user.
    ///
    /// Does nothing if the user is not registered.
    fn execute(
        &self,
        Insert(gain): Insert<ReputationGain>,
    ) -> Result<Self::Ok, Self::Err> {
        if let Some(record) = self
            .users
            .try_borrow_mut()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?
            .get_mut(&gain.user)
        {
            record.reputation.gain(gain.price.amount());
        }
        Ok(())
    }
}

impl Database<Select<By<Option<Reputation>, user::Key>>> for Memory {
    type Ok = Option<Reputation>;
    type Err = Traced<database::Error>;

    fn execute(
        &self,
        Select(by): Select<By<Option<Reputation>, user::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user = by.into_inner();
        Ok(self
            .users
            .try_borrow()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?
            .get(&user)
            .map(|r| r.reputation))
    }
}

impl Database<Insert<Loan>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    /// Appends the provided [`Loan`] to the ledger.
    fn execute(
        &self,
        Insert(loan): Insert<Loan>,
    ) -> Result<Self::Ok, Self::Err> {
        self.loans
            .try_borrow_mut()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?
            .push(loan);
        Ok(())
    }
}

impl Database<Select<By<Vec<Loan>, read::loan::Filter>>> for Memory {
    type Ok = Vec<Loan>;
    type Err = Traced<database::Error>;

    /// Selects the matching [`Loan`]s in the ledger order.
    fn execute(
        &self,
        Select(by): Select<By<Vec<Loan>, read::loan::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        Ok(self
            .loans
            .try_borrow()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?
            .iter()
            .filter(|l| filter.matches(l.key()))
            .cloned()
            .collect())
    }
}

impl Database<Select<By<Option<Loan>, loan::Key>>> for Memory {
    type Ok = Option<Loan>;
    type Err = Traced<database::Error>;

    /// Selects the earliest registered [`Loan`] with the provided
    /// [`loan::Key`], whether open or not.
    fn execute(
        &self,
        Select(by): Select<By<Option<Loan>, loan::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let key = by.into_inner();
        Ok(self
            .loans
            .try_borrow()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?
            .iter()
            .find(|l| *l.key() == key)
            .cloned())
    }
}

impl Database<Select<By<Option<Open<Loan>>, loan::Key>>> for Memory {
    type Ok = Option<Open<Loan>>;
    type Err = Traced<database::Error>;

    /// Selects the earliest registered open [`Loan`] with the provided
    /// [`loan::Key`].
    fn execute(
        &self,
        Select(by): Select<By<Option<Open<Loan>>, loan::Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let key = by.into_inner();
        Ok(self
            .loans
            .try_borrow()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?
            .iter()
            .find(|l| l.is_open() && *l.key() == key)
            .cloned()
            .map(Open))
    }
}

impl Database<Update<Open<Loan>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    /// Replaces the earliest registered open [`Loan`] with the same
    /// [`loan::Key`].
    ///
    /// Does nothing if there is no such [`Loan`].
    fn execute(
        &self,
        Update(Open(loan)): Update<Open<Loan>>,
    ) -> Result<Self::Ok, Self::Err> {
        if let Some(stored) = self
            .loans
            .try_borrow_mut()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?
            .iter_mut()
            .find(|l| l.is_open() && l.key() == loan.key())
        {
            *stored = loan;
        }
        Ok(())
    }
}

/// [`Memory`] database error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Stored data is being modified at the moment.
    #[display("Failed to read stored data: {_0}")]
    Borrow(BorrowError),

    /// Stored data is being read or modified at the moment.
    #[display("Failed to modify stored data: {_0}")]
    BorrowMut(BorrowMutError),
}
