//! [`Item`] definitions.

pub mod bluray;
pub mod board_game;
pub mod electronic_game;

use std::{cmp::Ordering, fmt};

use common::{define_kind, Price};
use derive_more::From;
use itertools::Itertools as _;

pub use self::{
    bluray::{Episode, Movie, Rating, Runtime, Series, Show},
    board_game::BoardGame,
    electronic_game::ElectronicGame,
};

/// Belonging registered by its owner to be lent to other users.
#[derive(Clone, Debug)]
pub struct Item {
    /// [`Name`] of this [`Item`], unique within its owner's catalog.
    pub name: Name,

    /// [`Price`] of this [`Item`].
    pub price: Price,

    /// Number of times this [`Item`] has been lent.
    pub loan_count: LoanCount,

    /// Indicator whether this [`Item`] is lent at the moment.
    pub is_on_loan: bool,

    /// [`Kind`]-specific [`Details`] of this [`Item`].
    pub details: Details,
}

impl Item {
    /// Creates a new [`Item`] that has never been lent.
    #[must_use]
    pub fn new(name: Name, price: Price, details: impl Into<Details>) -> Self {
        Self {
            name,
            price,
            loan_count: 0,
            is_on_loan: false,
            details: details.into(),
        }
    }

    /// Returns [`Kind`] of this [`Item`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.details.kind()
    }

    /// Returns [`Status`] of this [`Item`].
    #[must_use]
    pub fn status(&self) -> Status {
        if self.is_on_loan {
            Status::OnLoan
        } else {
            Status::Available
        }
    }

    /// Marks this [`Item`] as lent or not.
    pub fn set_on_loan(&mut self, on_loan: bool) {
        self.is_on_loan = on_loan;
    }

    /// Counts one more loan of this [`Item`].
    pub fn count_loan(&mut self) {
        self.loan_count = self.loan_count.saturating_add(1);
    }

    /// Returns [`BoardGame`] details of this [`Item`], if it's one.
    #[must_use]
    pub fn as_board_game_mut(&mut self) -> Option<&mut BoardGame> {
        match &mut self.details {
            Details::BoardGame(g) => Some(g),
            Details::ElectronicGame(_)
            | Details::Movie(_)
            | Details::Show(_)
            | Details::Series(_) => None,
        }
    }

    /// Returns [`Series`] details of this [`Item`], if it's one.
    #[must_use]
    pub fn as_series_mut(&mut self) -> Option<&mut Series> {
        match &mut self.details {
            Details::Series(s) => Some(s),
            Details::ElectronicGame(_)
            | Details::BoardGame(_)
            | Details::Movie(_)
            | Details::Show(_) => None,
        }
    }

    /// Compares [`Item`]s by their [`Name`]s.
    #[must_use]
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    /// Compares [`Item`]s by their [`Price`]s.
    #[must_use]
    pub fn cmp_by_price(&self, other: &Self) -> Ordering {
        self.price.cmp(&other.price)
    }

    /// Compares [`Item`]s by their [`LoanCount`]s, the most lent first.
    #[must_use]
    pub fn cmp_by_popularity(&self, other: &Self) -> Ordering {
        other.loan_count.cmp(&self.loan_count)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name {
            return false;
        }
        match (&self.details, &other.details) {
            (Details::BoardGame(a), Details::BoardGame(b)) => {
                a.missing_pieces == b.missing_pieces
            }
            (a, b) => a.kind() == b.kind(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { name, price, .. } = self;
        write!(f, "{name} - {price} - ")?;
        match &self.details {
            Details::ElectronicGame(g) => write!(f, "{}", g.platform),
            Details::BoardGame(g) => {
                if g.is_complete() {
                    write!(f, "COMPLETE")
                } else {
                    write!(
                        f,
                        "MISSING PIECES: {}",
                        g.missing_pieces.iter().join(", "),
                    )
                }
            }
            Details::Movie(m) => write!(
                f,
                "{} min - {} - {} - {}",
                m.runtime, m.rating, m.genre, m.release_year,
            ),
            Details::Show(s) => write!(
                f,
                "{} min - {} - {} - {} tracks",
                s.runtime, s.rating, s.artist, s.track_count,
            ),
            Details::Series(s) => write!(
                f,
                "{} - {} min - {} - {} - season {} - {} episodes ({} min)",
                s.description,
                s.runtime,
                s.rating,
                s.genre,
                s.season,
                s.episodes.len(),
                s.episodes_runtime(),
            ),
        }
    }
}

/// [`Kind`]-specific details of an [`Item`].
#[derive(Clone, Debug, From)]
pub enum Details {
    #[doc(hidden)]
    ElectronicGame(ElectronicGame),
    #[doc(hidden)]
    BoardGame(BoardGame),
    #[doc(hidden)]
    Movie(Movie),
    #[doc(hidden)]
    Show(Show),
    #[doc(hidden)]
    Series(Series),
}

impl Details {
    /// Returns [`Kind`] of an [`Item`] having these [`Details`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::ElectronicGame(_) => Kind::ElectronicGame,
            Self::BoardGame(_) => Kind::BoardGame,
            Self::Movie(_) => Kind::BlurayMovie,
            Self::Show(_) => Kind::BlurayShow,
            Self::Series(_) => Kind::BluraySeries,
        }
    }
}

define_text! {
    #[doc = "Name of an [`Item`]."]
    Name
}

/// Number of times an [`Item`] has been lent.
pub type LoanCount = u32;

define_kind! {
    #[doc = "Kind of an [`Item`]."]
    enum Kind {
        #[doc = "[`ElectronicGame`] [`Item`]."]
        ElectronicGame = 1,

        #[doc = "[`BoardGame`] [`Item`]."]
        BoardGame = 2,

        #[doc = "Blu-ray [`Movie`] [`Item`]."]
        BlurayMovie = 3,

        #[doc = "Blu-ray [`Show`] [`Item`]."]
        BlurayShow = 4,

        #[doc = "Blu-ray [`Series`] [`Item`]."]
        BluraySeries = 5,
    }
}

/// Lending status of an [`Item`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    /// The [`Item`] is lent at the moment.
    OnLoan,

    /// The [`Item`] can be lent.
    Available,
}
