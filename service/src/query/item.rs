//! [`Query`] collection related to a single [`Item`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{item, user, Catalog, Item},
    infra::{database, Database},
    Query, Service,
};

/// [`Query`] of an [`Item`] by its owner and [`item::Name`].
#[derive(Clone, Debug)]
pub struct ByName {
    /// [`user::Key`] of the owner of the [`Item`].
    pub owner: user::Key,

    /// [`item::Name`] of the [`Item`].
    pub name: item::Name,
}

impl<Db> Query<ByName> for Service<Db>
where
    Db: Database<
        Select<By<Option<Catalog>, user::Key>>,
        Ok = Option<Catalog>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Item;
    type Err = Traced<ExecutionError>;

    fn execute(&self, query: ByName) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ByName { owner, name } = query;

        self.database()
            .execute(Select(By::<Option<Catalog>, _>::new(owner.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OwnerNotExists(owner))
            .map_err(tracerr::wrap!())?
            .get(&name)
            .cloned()
            .ok_or(E::ItemNotExists(name))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`ByName`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Item`] with the provided [`item::Name`] does not exist.
    #[display("`Item(name: {_0})` does not exist")]
    ItemNotExists(#[error(not(source))] item::Name),

    /// Owner with the provided [`user::Key`] does not exist.
    #[display("Owner {_0} does not exist")]
    OwnerNotExists(#[error(not(source))] user::Key),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::fixture::{name, price, service, user},
        Config,
    };

    use super::{ByName, ExecutionError, Query as _};

    #[test]
    fn finds_item_of_owner() {
        let svc = service(Config::default());

        let item = svc
            .execute(ByName {
                owner: user("Ana"),
                name: name("Halo"),
            })
            .unwrap();
        assert_eq!(item.price, price("100"));

        let err = svc
            .execute(ByName {
                owner: user("Bia"),
                name: name("Halo"),
            })
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::ItemNotExists(_)));

        let err = svc
            .execute(ByName {
                owner: user("Caio"),
                name: name("Halo"),
            })
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::OwnerNotExists(_)));
    }
}
