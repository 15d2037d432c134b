//! [`Command`] for updating an [`Item`] attribute.

use common::{
    operations::{By, Select, Update},
    Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{catalog, item, user, Catalog, Item},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for changing a single attribute of an [`Item`].
#[derive(Clone, Debug)]
pub struct UpdateItem {
    /// [`user::Key`] of the owner of the [`Item`].
    pub owner: user::Key,

    /// Current [`item::Name`] of the [`Item`].
    pub name: item::Name,

    /// [`Change`] to be applied.
    pub change: Change,
}

/// Change of an [`Item`] attribute.
#[derive(Clone, Debug)]
pub enum Change {
    /// New [`item::Name`].
    ///
    /// The [`Item`] keeps all its other attributes.
    Name(item::Name),

    /// New [`Price`].
    Price(Price),
}

impl<Db> Command<UpdateItem> for Service<Db>
where
    Db: Database<
            Select<By<Option<Catalog>, user::Key>>,
            Ok = Option<Catalog>,
            Err = Traced<database::Error>,
        > + Database<Update<Catalog>, Err = Traced<database::Error>>,
{
    type Ok = Item;
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: UpdateItem) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateItem {
            owner,
            name,
            change,
        } = cmd;

        let mut catalog = self
            .database()
            .execute(Select(By::<Option<Catalog>, _>::new(owner.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OwnerNotExists(owner))
            .map_err(tracerr::wrap!())?;

        let name = match change {
            Change::Name(new_name) => {
                catalog
                    .rename(&name, new_name.clone())
                    .map_err(tracerr::from_and_wrap!(=> E))?;
                log::debug!("`Item(name: {name})` renamed to `{new_name}`");
                new_name
            }
            Change::Price(price) => {
                catalog
                    .set_price(&name, price)
                    .map_err(tracerr::from_and_wrap!(=> E))?;
                log::debug!("`Item(name: {name})` price set to {price}");
                name
            }
        };
        let item = catalog
            .get(&name)
            .cloned()
            .ok_or(E::Catalog(catalog::Error::ItemNotExists(name)))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Update(catalog))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(item)
    }
}

/// Error of [`UpdateItem`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Catalog`] rejected the [`Change`].
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
