//! [`Command`] definition.

pub mod add_episode;
pub mod add_missing_piece;
pub mod register_item;
pub mod register_loan;
pub mod register_user;
pub mod remove_item;
pub mod return_loan;
pub mod update_item;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_episode::AddEpisode, add_missing_piece::AddMissingPiece,
    register_item::RegisterItem, register_loan::RegisterLoan,
    register_user::RegisterUser, remove_item::RemoveItem,
    return_loan::ReturnLoan, update_item::UpdateItem,
};
