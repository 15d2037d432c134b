//! Blu-ray [`Item`]s definitions.

use derive_more::{Display, Into};
use strum::{EnumIter, EnumString};

#[cfg(doc)]
use super::Item;

/// Blu-ray with a movie.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Movie {
    /// [`Runtime`] of this [`Movie`].
    pub runtime: Runtime,

    /// [`Rating`] of this [`Movie`].
    pub rating: Rating,

    /// [`Genre`] of this [`Movie`].
    pub genre: Genre,

    /// Year this [`Movie`] was released in.
    pub release_year: Year,
}

/// Blu-ray with a recorded show of some [`Artist`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Show {
    /// [`Runtime`] of this [`Show`].
    pub runtime: Runtime,

    /// [`Rating`] of this [`Show`].
    pub rating: Rating,

    /// Number of tracks in this [`Show`].
    pub track_count: TrackCount,

    /// [`Artist`] performing in this [`Show`].
    pub artist: Artist,
}

/// Blu-ray box with a season of a series.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Series {
    /// [`Description`] of this [`Series`].
    pub description: Description,

    /// Declared [`Runtime`] of this [`Series`].
    ///
    /// Independent from the [`Episode`]s runtime, see
    /// [`Series::episodes_runtime()`].
    pub runtime: Runtime,

    /// [`Rating`] of this [`Series`].
    pub rating: Rating,

    /// [`Genre`] of this [`Series`].
    pub genre: Genre,

    /// Season of the series contained in this box.
    pub season: Season,

    /// [`Episode`]s of this [`Series`] in the order they were added.
    pub episodes: Vec<Episode>,
}

impl Series {
    /// Creates a new [`Series`] without any [`Episode`]s.
    #[must_use]
    pub fn new(
        description: Description,
        runtime: Runtime,
        rating: Rating,
        genre: Genre,
        season: Season,
    ) -> Self {
        Self {
            description,
            runtime,
            rating,
            genre,
            season,
            episodes: Vec::new(),
        }
    }

    /// Appends the provided [`Episode`] to this [`Series`].
    pub fn add_episode(&mut self, episode: Episode) {
        self.episodes.push(episode);
    }

    /// Returns total runtime of all the [`Episode`]s of this [`Series`] in
    /// minutes.
    #[must_use]
    pub fn episodes_runtime(&self) -> u64 {
        self.episodes
            .iter()
            .map(|e| u64::from(u32::from(e.runtime)))
            .sum()
    }
}

/// Single episode of a [`Series`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Episode {
    /// [`Runtime`] of this [`Episode`].
    pub runtime: Runtime,
}

impl From<Runtime> for Episode {
    fn from(runtime: Runtime) -> Self {
        Self { runtime }
    }
}

/// Positive runtime in minutes.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Runtime(u32);

impl Runtime {
    /// Creates a new [`Runtime`] if the provided `minutes` are positive.
    #[must_use]
    pub fn new(minutes: u32) -> Option<Self> {
        (minutes > 0).then_some(Self(minutes))
    }
}

/// Age rating classification of a Blu-ray.
///
/// Variants are ordered by increasing restrictiveness.
#[derive(
    Clone,
    Copy,
    Debug,
    strum::Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[repr(u8)]
#[strum(ascii_case_insensitive)]
pub enum Rating {
    /// Suitable for all ages.
    #[strum(to_string = "Free", serialize = "FREE", serialize = "LIVRE")]
    Free = 1,

    /// Suitable for 10 years and older.
    #[strum(to_string = "10+", serialize = "DEZ_ANOS")]
    TenPlus = 2,

    /// Suitable for 12 years and older.
    #[strum(to_string = "12+", serialize = "DOZE_ANOS")]
    TwelvePlus = 3,

    /// Suitable for 14 years and older.
    #[strum(to_string = "14+", serialize = "QUATORZE_ANOS")]
    FourteenPlus = 4,

    /// Suitable for 16 years and older.
    #[strum(to_string = "16+", serialize = "DEZESSEIS_ANOS")]
    SixteenPlus = 5,

    /// Suitable for 18 years and older.
    #[strum(to_string = "18+", serialize = "DEZOITO_ANOS")]
    EighteenPlus = 6,
}

define_text! {
    #[doc = "Genre of a [`Movie`] or a [`Series`]."]
    Genre
}

define_text! {
    #[doc = "Artist performing in a [`Show`]."]
    Artist
}

define_text! {
    #[doc = "Description of a [`Series`]."]
    Description
}

/// Year of a [`Movie`] release.
pub type Year = u16;

/// Number of tracks in a [`Show`].
pub type TrackCount = u32;

/// Season of a [`Series`].
pub type Season = u16;

#[cfg(test)]
mod spec {
    use strum::IntoEnumIterator as _;

    use super::{Rating, Runtime, Series};

    #[test]
    fn runtime_must_be_positive() {
        assert!(Runtime::new(0).is_none());
        assert_eq!(Runtime::new(90).map(u32::from), Some(90));
    }

    #[test]
    fn rating_labels() {
        assert_eq!("10+".parse(), Ok(Rating::TenPlus));
        assert_eq!("free".parse(), Ok(Rating::Free));
        assert_eq!("LIVRE".parse(), Ok(Rating::Free));
        assert_eq!("DEZOITO_ANOS".parse(), Ok(Rating::EighteenPlus));
        assert!("21+".parse::<Rating>().is_err());

        assert_eq!(Rating::FourteenPlus.to_string(), "14+");
    }

    #[test]
    fn rating_restrictiveness() {
        let ratings = Rating::iter().collect::<Vec<_>>();

        assert_eq!(ratings.len(), 6);
        assert!(ratings.windows(2).all(|w| w[0] < w[1]));
        assert!(Rating::Free < Rating::EighteenPlus);
    }

    #[test]
    fn series_keeps_episodes_in_order() {
        let mut series = Series::new(
            "Plot".parse().unwrap(),
            Runtime::new(300).unwrap(),
            Rating::TwelvePlus,
            "Drama".parse().unwrap(),
            2,
        );
        for minutes in [45, 50, 42] {
            series.add_episode(Runtime::new(minutes).unwrap().into());
        }

        assert_eq!(
            series
                .episodes
                .iter()
                .map(|e| u32::from(e.runtime))
                .collect::<Vec<_>>(),
            [45, 50, 42],
        );
        assert_eq!(series.episodes_runtime(), 137);
        assert_eq!(u32::from(series.runtime), 300);
    }
}
