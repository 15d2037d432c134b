//! [`Command`] for removing an [`Item`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{catalog, item, user, Catalog, Item},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for removing an [`Item`] from its owner's [`Catalog`].
#[derive(Clone, Debug)]
pub struct RemoveItem {
    /// [`user::Key`] of the owner of the [`Item`].
    pub owner: user::Key,

    /// [`item::Name`] of the [`Item`] to be removed.
    pub name: item::Name,
}

impl<Db> Command<RemoveItem> for Service<Db>
where
    Db: Database<
            Select<By<Option<Catalog>, user::Key>>,
            Ok = Option<Catalog>,
            Err = Traced<database::Error>,
        > + Database<Update<Catalog>, Err = Traced<database::Error>>,
{
    type Ok = Item;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: RemoveItem) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RemoveItem { owner, name } = cmd;

        let mut catalog = self
            .database()
            .execute(Select(By::<Option<Catalog>, _>::new(owner.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OwnerNotExists(owner))
            .map_err(tracerr::wrap!())?;

        let item = catalog
            .remove(&name)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.database()
            .execute(Update(catalog))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!("`Item(name: {name})` removed");
        Ok(item)
    }
}

/// Error of [`RemoveItem`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Catalog`] has no such [`Item`], or it's lent at the moment.
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
    use crate::{
        command::{
            fixture::{catalog, name, service, user},
            RegisterLoan,
        },
        domain::{catalog, loan},
        Config,
    };

    use super::{Command as _, ExecutionError, RemoveItem};

    #[test]
    fn removes_item_once() {
        let svc = service(Config::default());
        let remove = || RemoveItem {
            owner: user("Ana"),
            name: name("Halo"),
        };

        let removed = svc.execute(remove()).unwrap();
        assert_eq!(removed.name, name("Halo"));
        assert!(!catalog(&svc, "Ana").contains(&name("Halo")));
        assert_eq!(catalog(&svc, "Ana").len(), 2);

        let err = svc.execute(remove()).unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::Catalog(catalog::Error::ItemNotExists(_)),
        ));
    }

    #[test]
    fn looks_only_into_owners_catalog() {
        let svc = service(Config::default());

        let err = svc
            .execute(RemoveItem {
                owner: user("Bia"),
                name: name("Halo"),
            })
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Catalog(_)));
        assert!(catalog(&svc, "Ana").contains(&name("Halo")));
    }

    #[test]
    fn keeps_lent_item() {
        let svc = service(Config::default());
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
            .execute(RemoveItem {
                owner: user("Ana"),
                name: name("Catan"),
            })
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Catalog(catalog::Error::ItemOnLoan(_)),
        ));
        assert!(catalog(&svc, "Ana").get(&name("Catan")).unwrap().is_on_loan);
    }
}
