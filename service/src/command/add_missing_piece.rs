//! [`Command`] for recording a missing piece of a [`BoardGame`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::item::BoardGame;
use crate::{
    domain::{
        catalog,
        item::{self, board_game},
        user, Catalog,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for recording a [`board_game::Piece`] missing from a
/// [`BoardGame`].
#[derive(Clone, Debug)]
pub struct AddMissingPiece {
    /// [`user::Key`] of the owner of the [`BoardGame`].
    pub owner: user::Key,

    /// [`item::Name`] of the [`BoardGame`].
    pub board_game: item::Name,

    /// Missing [`board_game::Piece`].
    pub piece: board_game::Piece,
}

impl<Db> Command<AddMissingPiece> for Service<Db>
where
    Db: Database<
            Select<By<Option<Catalog>, user::Key>>,
            Ok = Option<Catalog>,
            Err = Traced<database::Error>,
        > + Database<Update<Catalog>, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    fn execute(&self, cmd: AddMissingPiece) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddMissingPiece {
            owner,
            board_game,
            piece,
        } = cmd;

        let mut catalog = self
            .database()
            .execute(Select(By::<Option<Catalog>, _>::new(owner.clone())))
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OwnerNotExists(owner))
            .map_err(tracerr::wrap!())?;

        log::debug!("`{piece}` is missing from `Item(name: {board_game})`");
        catalog
            .add_missing_piece(&board_game, piece)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.database()
            .execute(Update(catalog))
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)
    }
}

/// Error of [`AddMissingPiece`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Catalog`] has no such [`BoardGame`].
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
