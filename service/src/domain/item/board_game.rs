//! [`BoardGame`] [`Item`] definition.

use std::collections::BTreeSet;

#[cfg(doc)]
use super::Item;

/// Board game, possibly with some of its pieces lost.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BoardGame {
    /// [`Piece`]s missing from this [`BoardGame`].
    pub missing_pieces: BTreeSet<Piece>,
}

impl BoardGame {
    /// Records the provided [`Piece`] as missing.
    ///
    /// Returns `false` if the [`Piece`] has been already missing.
    pub fn add_missing_piece(&mut self, piece: Piece) -> bool {
        self.missing_pieces.insert(piece)
    }

    /// Checks whether this [`BoardGame`] has no missing pieces at all.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_pieces.is_empty()
    }
}

define_text! {
    #[doc = "Piece of a [`BoardGame`]."]
    Piece
}
