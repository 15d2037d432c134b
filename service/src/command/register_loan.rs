//! [`Command`] for registering a new [`Loan`].

use common::operations::{By, Insert, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        catalog,
        loan::{self, Period},
        user, Catalog, Loan,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for lending an item to another user.
///
/// The item is marked as lent in its owner's [`Catalog`] before the [`Loan`]
/// is recorded in the ledger.
#[derive(Clone, Debug)]
pub struct RegisterLoan {
    /// [`loan::Key`] of the new [`Loan`].
    pub key: loan::Key,

    /// [`Period`] the item is lent for.
    pub period: Period,
}

impl<Db> Command<RegisterLoan> for Service<Db>
where
    Db: Database<
            Select<By<Option<Catalog>, user::Key>>,
            Ok = Option<Catalog>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Loan>, loan::Key>>,
            Ok = Option<Loan>,
            Err = Traced<database::Error>,
        > + Database<Update<Catalog>, Err = Traced<database::Error>>
        + Database<Insert<Loan>, Err = Traced<database::Error>>,
{
    type Ok = Loan;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: RegisterLoan) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RegisterLoan { key, period } = cmd;

        let mut catalog = self
            .database()
            .execute(Select(By::<Option<Catalog>, _>::new(key.owner.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::OwnerNotExists(key.owner.clone()))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Select(By::<Option<Catalog>, _>::new(
                key.borrower.clone(),
            )))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::BorrowerNotExists(key.borrower.clone()))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        if self.config().unique_loans {
            let existing = self
                .database()
                .execute(Select(By::<Option<Loan>, _>::new(key.clone())))
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if existing.is_some() {
                return Err(tracerr::new!(E::LoanAlreadyExists(key)));
            }
        }

        _ = catalog
            .lend(&key.item)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.database()
            .execute(Update(catalog))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let loan = Loan::new(key, period);
        self.database()
            .execute(Insert(loan.clone()))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("{} registered", loan.key());
        Ok(loan)
    }
}

/// Error of [`RegisterLoan`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Borrower with the provided [`user::Key`] does not exist.
    #[display("Borrower {_0} does not exist")]
    BorrowerNotExists(#[error(not(source))] user::Key),

    /// [`Catalog`] refused to lend the item.
    #[display("`Catalog` operation failed: {_0}")]
    #[from]
    Catalog(catalog::Error),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Loan`] with the provided [`loan::Key`] is registered already.
    #[display("`Loan` of {_0} already exists")]
    LoanAlreadyExists(#[error(not(source))] loan::Key),

    /// Owner with the provided [`user::Key`] does not exist.
    #[display("Owner {_0} does not exist")]
    OwnerNotExists(#[error(not(source))] user::Key),
}
