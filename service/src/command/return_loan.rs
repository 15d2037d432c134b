//! [`Command`] for returning a lent item.

use common::{
    operations::{By, Select, Update},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{catalog, loan, user, Catalog, Loan},
    infra::{database, Database},
    read::loan::Open,
    Service,
};

use super::Command;

/// [`Command`] for closing an open [`Loan`] and giving the item back to its
/// owner.
#[derive(Clone, Debug)]
pub struct ReturnLoan {
    /// [`loan::Key`] of the [`Loan`] to be closed.
    pub key: loan::Key,

    /// [`Date`] the item is returned at.
    pub returned_at: Date,
}

impl<Db> Command<ReturnLoan> for Service<Db>
where
    Db: Database<
            Select<By<Option<Catalog>, user::Key>>,
            Ok = Option<Catalog>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Open<Loan>>, loan::Key>>,
            Ok = Option<Open<Loan>>,
            Err = Traced<database::Error>,
        > + Database<Update<Open<Loan>>, Err = Traced<database::Error>>
        + Database<Update<Catalog>, Err = Traced<database::Error>>,
{
    type Ok = Loan;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: ReturnLoan) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReturnLoan { key, returned_at } = cmd;

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

        let Open(mut loan) = self
            .database()
            .execute(Select(By::<Option<Open<Loan>>, _>::new(key.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LoanNotExists(key))
            .map_err(tracerr::wrap!())?;

        _ = catalog
            .take_back(&loan.key().item)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        loan.set_return_date(returned_at);

        self.database()
            .execute(Update(Open(loan.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        self.database()
            .execute(Update(catalog))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        match loan.days_late() {
            Some(days) if days > 0 => {
                log::info!("{} returned {days} days late", loan.key());
            }
            _ => log::info!("{} returned", loan.key()),
        }
        Ok(loan)
    }
}

/// Error of [`ReturnLoan`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Borrower with the provided [`user::Key`] does not exist.
    #[display("Borrower {_0} does not exist")]
    BorrowerNotExists(#[error(not(source))] user::Key),

    /// Lent item is missing from its owner's [`Catalog`].
    #[display("`Catalog` operation failed: {_0}")]
    #[from]
    Catalog(catalog::Error),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Open [`Loan`] with the provided [`loan::Key`] does not exist.
    #[display("Open `Loan` of {_0} does not exist")]
    LoanNotExists(#[error(not(source))] loan::Key),

    /// Owner with the provided [`user::Key`] does not exist.
    #[display("Owner {_0} does not exist")]
    OwnerNotExists(#[error(not(source))] user::Key),
}

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::{
        command::{
            fixture::{board_game, catalog, name, service, user},
            RegisterItem, RegisterLoan, RegisterUser, RemoveItem,
        },
        domain::loan,
        Config,
    };

    use super::{Command as _, ExecutionError, ReturnLoan};

    fn key(item: &str) -> loan::Key {
        loan::Key {
            owner: user("Ana"),
            borrower: user("Bia"),
            item: name(item),
            started_at: Date::new("01/01/2024").unwrap(),
        }
    }

    fn give_back(item: &str, at: &str) -> ReturnLoan {
        ReturnLoan {
            key: key(item),
            returned_at: Date::new(at).unwrap(),
        }
    }

    #[test]
    fn closes_loan_and_frees_item() {
        let svc = service(Config::default());
        _ = svc
            .execute(RegisterLoan {
                key: key("Catan"),
                period: 7,
            })
            .unwrap();

        let loan = svc.execute(give_back("Catan", "05/01/2024")).unwrap();

        assert_eq!(loan.returned_at(), Date::new("05/01/2024").as_ref());
        assert_eq!(loan.days_late(), Some(0));
        let item = catalog(&svc, "Ana").get(&name("Catan")).cloned().unwrap();
        assert!(!item.is_on_loan);
        assert_eq!(item.loan_count, 1);
    }

    #[test]
    fn second_return_is_not_found() {
        let svc = service(Config::default());
        _ = svc
            .execute(RegisterLoan {
                key: key("Catan"),
                period: 7,
            })
            .unwrap();
        _ = svc.execute(give_back("Catan", "05/01/2024")).unwrap();

        let err = svc.execute(give_back("Catan", "06/01/2024")).unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::LoanNotExists(k) if *k == key("Catan"),
        ));
    }

    #[test]
    fn rejects_unknown_loan() {
        let svc = service(Config::default());

        let err = svc.execute(give_back("Halo", "05/01/2024")).unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::LoanNotExists(_)));

        let mut cmd = give_back("Halo", "05/01/2024");
        cmd.key.borrower = user("Caio");
        let err = svc.execute(cmd).unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::BorrowerNotExists(_)));
    }

    #[test]
    fn lent_item_is_removable_once_returned() {
        let svc = service(Config::default());
        _ = svc.execute(RegisterUser { user: user("Caio") }).unwrap();
        _ = svc
            .execute(RegisterLoan {
                key: key("Catan"),
                period: 3,
            })
            .unwrap();
        let remove = || RemoveItem {
            owner: user("Ana"),
            name: name("Catan"),
        };
        assert!(svc.execute(remove()).is_err());

        let loan = svc.execute(give_back("Catan", "10/01/2024")).unwrap();
        assert!(!loan.is_open());
        assert_eq!(loan.days_late(), Some(6));

        _ = svc.execute(remove()).unwrap();
        _ = svc
            .execute(RegisterItem {
                owner: user("Ana"),
                item: board_game("Catan"),
            })
            .unwrap();
        let mut to_caio = key("Catan");
        to_caio.borrower = user("Caio");
        to_caio.started_at = Date::new("11/01/2024").unwrap();
        _ = svc
            .execute(RegisterLoan {
                key: to_caio,
                period: 7,
            })
            .unwrap();

        let err = svc.execute(give_back("Catan", "12/01/2024")).unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::LoanNotExists(_)));
        let catan = catalog(&svc, "Ana").get(&name("Catan")).cloned().unwrap();
        assert!(catan.is_on_loan);
        assert_eq!(catan.loan_count, 1);
    }
}
