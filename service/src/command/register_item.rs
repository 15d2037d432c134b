//! [`Command`] for registering a new [`Item`].

use common::operations::{By, Insert, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        catalog,
        user::{self, ReputationGain},
        Catalog, Item,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`Item`] in its owner's [`Catalog`].
///
/// The owner gains reputation for every registered [`Item`].
#[derive(Clone, Debug)]
pub struct RegisterItem {
    /// [`user::Key`] of the owner of the [`Item`].
    pub owner: user::Key,

    /// [`Item`] to be registered.
    pub item: Item,
}

impl<Db> Command<RegisterItem> for Service<Db>
where
    Db: Database<
            Select<By<Option<Catalog>, user::Key>>,
            Ok = Option<Catalog>,
            Err = Traced<database::Error>,
        > + Database<Insert<ReputationGain>, Err = Traced<database::Error>>
        + Database<Update<Catalog>, Err = Traced<database::Error>>,
{
    type Ok = Item;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: RegisterItem) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RegisterItem { owner, item } = cmd;

        let mut catalog = self
            .database()
            .execute(Select(By::<Option<Catalog>, _>::new(owner.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::OwnerNotExists(owner.clone()))
            .map_err(tracerr::wrap!())?;

        if self.config().unique_item_names && catalog.contains(&item.name) {
            return Err(tracerr::new!(E::Catalog(
                catalog::Error::ItemAlreadyExists(item.name)
            )));
        }

        let replaced = catalog
            .register(item.clone())
            .map_err(tracerr::from_and_wrap!(=> E))?;
        if let Some(replaced) = replaced {
            log::warn!("`Item(name: {})` replaced", replaced.name);
        }

        self.database()
            .execute(Insert(ReputationGain {
                user: owner,
                price: item.price,
            }))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        self.database()
            .execute(Update(catalog))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!(
            "`Item(name: {})` registered as {}",
            item.name,
            item.kind(),
        );
        Ok(item)
    }
}

/// Error of [`RegisterItem`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Catalog`] rejected the [`Item`].
    #[display("`Catalog` operation failed: {_0}")]
    #[from]
    Catalog(catalog::Error),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Owner with the provided [`user::Key`] does not exist.
    #[display("Owner {_0} does not exist")]
    OwnerNotExists(#[error(not(source))] user::Key),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};
    use rust_decimal::Decimal;

    use crate::{
        command::{
            fixture::{
                board_game, catalog, electronic_game, name, price, service,
                user,
            },
            RegisterLoan,
        },
        domain::{catalog, loan, user::Reputation},
        infra::Database as _,
        Config,
    };

    use super::{Command as _, ExecutionError, RegisterItem};

    #[test]
    fn registers_available_item() {
        let svc = service(Config::default());

        let item = svc
            .execute(RegisterItem {
                owner: user("Bia"),
                item: electronic_game("Zelda", "199.9"),
            })
            .unwrap();

        let stored = catalog(&svc, "Bia");
        let stored = stored.get(&name("Zelda")).unwrap();
        assert_eq!(stored.name, item.name);
        assert_eq!(stored.price, price("199.9"));
        assert!(!stored.is_on_loan);
        assert_eq!(stored.loan_count, 0);
    }

    #[test]
    fn rewards_owner_with_price() {
        let svc = service(Config::default());

        let reputation = svc
            .database()
            .execute(Select(By::<Option<Reputation>, _>::new(user("Ana"))))
            .unwrap()
            .unwrap();

        assert_eq!(Decimal::from(reputation), Decimal::from(240));
    }

    #[test]
    fn rejects_unknown_owner() {
        let svc = service(Config::default());

        let err = svc
            .execute(RegisterItem {
                owner: user("Caio"),
                item: board_game("Go"),
            })
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::OwnerNotExists(_)));
    }

    #[test]
    fn rejects_duplicate_name_without_changes() {
        let svc = service(Config::default());

        let err = svc
            .execute(RegisterItem {
                owner: user("Ana"),
                item: electronic_game("Catan", "1"),
            })
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Catalog(catalog::Error::ItemAlreadyExists(n))
                if *n == name("Catan"),
        ));
        let catalog = catalog(&svc, "Ana");
        assert_eq!(catalog.get(&name("Catan")).unwrap().price, price("50"));
        let reputation = svc
            .database()
            .execute(Select(By::<Option<Reputation>, _>::new(user("Ana"))))
            .unwrap()
            .unwrap();
        assert_eq!(Decimal::from(reputation), Decimal::from(240));
    }

    #[test]
    fn overwrites_duplicate_name_when_allowed() {
        let svc = service(Config {
            unique_item_names: false,
            ..Config::default()
        });

        _ = svc
            .execute(RegisterItem {
                owner: user("Ana"),
                item: electronic_game("Catan", "1"),
            })
            .unwrap();

        let catalog = catalog(&svc, "Ana");
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(&name("Catan")).unwrap().price, price("1"));
    }

    #[test]
    fn never_overwrites_lent_item() {
        let svc = service(Config {
            unique_item_names: false,
            ..Config::default()
        });
        _ = svc
            .execute(RegisterLoan {
                key: loan::Key {
                    owner: user("Ana"),
                    borrower: user("Bia"),
                    item: name("Catan"),
                    started_at: "01/01/2024".parse().unwrap(),
                },
                period: 7,
            })
            .unwrap();

        let err = svc
            .execute(RegisterItem {
                owner: user("Ana"),
                item: board_game("Catan"),
            })
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Catalog(catalog::Error::ItemOnLoan(_)),
        ));
        let catalog = catalog(&svc, "Ana");
        let catan = catalog.get(&name("Catan")).unwrap();
        assert!(catan.is_on_loan);
        assert_eq!(catan.loan_count, 1);
        let reputation = svc
            .database()
            .execute(Select(By::<Option<Reputation>, _>::new(user("Ana"))))
            .unwrap()
            .unwrap();
        assert_eq!(Decimal::from(reputation), Decimal::from(240));
    }
}
