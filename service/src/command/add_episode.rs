//! [`Command`] for adding an [`Episode`] to a [`Series`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::item::Series;
use crate::{
    domain::{
        catalog,
        item::{self, Episode},
        user, Catalog,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for appending an [`Episode`] to a [`Series`].
#[derive(Clone, Debug)]
pub struct AddEpisode {
    /// [`user::Key`] of the owner of the [`Series`].
    pub owner: user::Key,

    /// [`item::Name`] of the [`Series`].
    pub series: item::Name,

    /// [`Episode`] to be added.
    pub episode: Episode,
}

impl<Db> Command<AddEpisode> for Service<Db>
where
    Db: Database<
            Select<By<Option<Catalog>, user::Key>>,
            Ok = Option<Catalog>,
            Err = Traced<database::Error>,
        > + Database<Update<Catalog>, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: AddEpisode) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddEpisode {
            owner,
            series,
            episode,
        } = cmd;

        let mut catalog = self
            .database()
            .execute(Select(By::<Option<Catalog>, _>::new(owner.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OwnerNotExists(owner))
            .map_err(tracerr::wrap!())?;

        catalog
            .add_episode(&series, episode)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.database()
            .execute(Update(catalog))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::debug!(
            "`Episode({} min)` added to `Item(name: {series})`",
            episode.runtime,
        );
        Ok(())
    }
}

/// Error of [`AddEpisode`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Catalog`] has no such [`Series`].
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
