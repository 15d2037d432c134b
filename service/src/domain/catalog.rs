//! [`Catalog`] definitions.

use std::collections::BTreeMap;

use common::Price;
use derive_more::{Display, Error as StdError};

use crate::domain::{
    item::{self, board_game, Episode},
    user, Item,
};

/// Collection of [`Item`]s owned by a single user, keyed by their names.
///
/// All the operations upon owned [`Item`]s go through a [`Catalog`], which
/// guarantees that an [`Item`] is always stored under its own name.
#[derive(Clone, Debug)]
pub struct Catalog {
    /// [`user::Key`] of the owner of this [`Catalog`].
    owner: user::Key,

    /// [`Item`]s of this [`Catalog`].
    items: BTreeMap<item::Name, Item>,
}

impl Catalog {
    /// Creates a new empty [`Catalog`] of the provided owner.
    #[must_use]
    pub fn new(owner: user::Key) -> Self {
        Self {
            owner,
            items: BTreeMap::new(),
        }
    }

    /// Returns [`user::Key`] of the owner of this [`Catalog`].
    #[must_use]
    pub fn owner(&self) -> &user::Key {
        &self.owner
    }

    /// Returns the [`Item`] with the provided name, if any.
    #[must_use]
    pub fn get(&self, name: &item::Name) -> Option<&Item> {
        self.items.get(name)
    }

    /// Checks whether this [`Catalog`] contains an [`Item`] with the provided
    /// name.
    #[must_use]
    pub fn contains(&self, name: &item::Name) -> bool {
        self.items.contains_key(name)
    }

    /// Iterates over all the [`Item`]s of this [`Catalog`] in their names
    /// order.
    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.values()
    }

    /// Returns number of [`Item`]s in this [`Catalog`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Indicates whether this [`Catalog`] has no [`Item`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Puts the provided [`Item`] into this [`Catalog`], replacing the one
    /// with the same name, if any.
    ///
    /// # Errors
    ///
    /// If the [`Item`] to be replaced is lent at the moment.
    pub fn register(&mut self, item: Item) -> Result<Option<Item>, Error> {
        if self.items.get(&item.name).is_some_and(|i| i.is_on_loan) {
            return Err(Error::ItemOnLoan(item.name));
        }
        Ok(self.items.insert(item.name.clone(), item))
    }

    /// Removes the [`Item`] with the provided name from this [`Catalog`].
    ///
    /// # Errors
    ///
    /// If there is no such [`Item`] in this [`Catalog`], or it's lent at the
    /// moment.
    pub fn remove(&mut self, name: &item::Name) -> Result<Item, Error> {
        if self.get_mut(name)?.is_on_loan {
            return Err(Error::ItemOnLoan(name.clone()));
        }
        self.items
            .remove(name)
            .ok_or_else(|| Error::ItemNotExists(name.clone()))
    }

    /// Appends the provided [`Episode`] to the [`item::Series`] with the
    /// provided name.
    ///
    /// # Errors
    ///
    /// If there is no such [`Item`], or it's not an [`item::Series`].
    pub fn add_episode(
        &mut self,
        series: &item::Name,
        episode: Episode,
    ) -> Result<(), Error> {
        self.get_mut(series)?
            .as_series_mut()
            .ok_or_else(|| Error::NotSeries(series.clone()))?
            .add_episode(episode);
        Ok(())
    }

    /// Records the provided [`board_game::Piece`] as missing from the
    /// [`item::BoardGame`] with the provided name.
    ///
    /// # Errors
    ///
    /// If there is no such [`Item`], or it's not an [`item::BoardGame`].
    pub fn add_missing_piece(
        &mut self,
        name: &item::Name,
        piece: board_game::Piece,
    ) -> Result<(), Error> {
        _ = self
            .get_mut(name)?
            .as_board_game_mut()
            .ok_or_else(|| Error::NotBoardGame(name.clone()))?
            .add_missing_piece(piece);
        Ok(())
    }

    /// Renames the [`Item`] with the provided name, keeping all its other
    /// properties.
    ///
    /// # Errors
    ///
    /// If there is no such [`Item`], it's lent at the moment, or the
    /// `new_name` is occupied by another [`Item`].
    pub fn rename(
        &mut self,
        name: &item::Name,
        new_name: item::Name,
    ) -> Result<(), Error> {
        let item = self.get_mut(name)?;
        if *name == new_name {
            return Ok(());
        }
        if item.is_on_loan {
            return Err(Error::ItemOnLoan(name.clone()));
        }
        if self.contains(&new_name) {
            return Err(Error::ItemAlreadyExists(new_name));
        }

        let mut item = self.remove(name)?;
        item.name = new_name;
        _ = self.items.insert(item.name.clone(), item);
        Ok(())
    }

    /// Sets a new [`Price`] of the [`Item`] with the provided name.
    ///
    /// # Errors
    ///
    /// If there is no such [`Item`].
    pub fn set_price(
        &mut self,
        name: &item::Name,
        price: Price,
    ) -> Result<(), Error> {
        self.get_mut(name)?.price = price;
        Ok(())
    }

    /// Marks the [`Item`] with the provided name as lent, counting the loan.
    ///
    /// # Errors
    ///
    /// If there is no such [`Item`], or it's already lent.
    pub fn lend(&mut self, name: &item::Name) -> Result<&Item, Error> {
        let item = self.get_mut(name)?;
        if item.is_on_loan {
            return Err(Error::ItemOnLoan(name.clone()));
        }
        item.set_on_loan(true);
        item.count_loan();
        Ok(item)
    }

    /// Marks the [`Item`] with the provided name as given back.
    ///
    /// Does nothing if the [`Item`] is not lent.
    ///
    /// # Errors
    ///
    /// If there is no such [`Item`].
    pub fn take_back(&mut self, name: &item::Name) -> Result<&Item, Error> {
        let item = self.get_mut(name)?;
        item.set_on_loan(false);
        Ok(item)
    }

    /// Returns the [`Item`] with the provided name for modification.
    fn get_mut(&mut self, name: &item::Name) -> Result<&mut Item, Error> {
        self.items
            .get_mut(name)
            .ok_or_else(|| Error::ItemNotExists(name.clone()))
    }
}

/// Error of a [`Catalog`] operation.
#[derive(Clone, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// [`Item`] with the provided name already exists.
    #[display("`Item(name: {_0})` already exists")]
    ItemAlreadyExists(#[error(not(source))] item::Name),

    /// [`Item`] with the provided name does not exist.
    #[display("`Item(name: {_0})` does not exist")]
    ItemNotExists(#[error(not(source))] item::Name),

    /// [`Item`] with the provided name is lent at the moment.
    #[display("`Item(name: {_0})` is on loan")]
    ItemOnLoan(#[error(not(source))] item::Name),

    /// [`Item`] with the provided name is not an [`item::BoardGame`].
    #[display("`Item(name: {_0})` is not a board game")]
    NotBoardGame(#[error(not(source))] item::Name),

    /// [`Item`] with the provided name is not an [`item::Series`].
    #[display("`Item(name: {_0})` is not a Blu-ray series")]
    NotSeries(#[error(not(source))] item::Name),
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Price;

    use crate::domain::{
        item::{self, BoardGame, ElectronicGame, Rating, Runtime, Series},
        user, Item,
    };

    use super::{Catalog, Error};

    fn name(s: &str) -> item::Name {
        item::Name::new(s).unwrap()
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new(user::Key::new(
            "Ana".parse().unwrap(),
            "123".parse().unwrap(),
        ));
        _ = catalog.register(Item::new(
            name("Halo"),
            Price::from_str("100").unwrap(),
            ElectronicGame::new("XBOX".parse().unwrap()),
        ));
        _ = catalog.register(Item::new(
            name("Catan"),
            Price::from_str("50").unwrap(),
            BoardGame::default(),
        ));
        _ = catalog.register(Item::new(
            name("Lost"),
            Price::from_str("70").unwrap(),
            Series::new(
                "Island".parse().unwrap(),
                Runtime::new(600).unwrap(),
                Rating::FourteenPlus,
                "Drama".parse().unwrap(),
                1,
            ),
        ));
        catalog
    }

    #[test]
    fn register_overwrites_same_name() {
        let mut catalog = catalog();

        let replaced = catalog
            .register(Item::new(
                name("Halo"),
                Price::from_str("1").unwrap(),
                ElectronicGame::new("PC".parse().unwrap()),
            ))
            .unwrap();

        assert_eq!(replaced.map(|i| i.price), Price::from_str("100").ok());
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.get(&name("Halo")).map(|i| i.price),
            Price::from_str("1").ok(),
        );
    }

    #[test]
    fn removes_existing_only() {
        let mut catalog = catalog();

        assert!(catalog.remove(&name("Halo")).is_ok());
        assert!(!catalog.contains(&name("Halo")));
        assert_eq!(
            catalog.remove(&name("Halo")),
            Err(Error::ItemNotExists(name("Halo"))),
        );
    }

    #[test]
    fn adds_episodes_to_series_only() {
        let mut catalog = catalog();
        let episode = Runtime::new(42).unwrap().into();

        assert!(catalog.add_episode(&name("Lost"), episode).is_ok());
        assert_eq!(
            catalog.add_episode(&name("Halo"), episode),
            Err(Error::NotSeries(name("Halo"))),
        );
        assert_eq!(
            catalog.add_episode(&name("Fringe"), episode),
            Err(Error::ItemNotExists(name("Fringe"))),
        );

        let item::Details::Series(series) =
            &catalog.get(&name("Lost")).unwrap().details
        else {
            panic!("not a series");
        };
        assert_eq!(series.episodes.len(), 1);
    }

    #[test]
    fn adds_missing_pieces_to_board_games_only() {
        let mut catalog = catalog();

        assert!(catalog
            .add_missing_piece(&name("Catan"), "dice".parse().unwrap())
            .is_ok());
        assert_eq!(
            catalog.add_missing_piece(&name("Halo"), "dice".parse().unwrap()),
            Err(Error::NotBoardGame(name("Halo"))),
        );

        let item::Details::BoardGame(game) =
            &catalog.get(&name("Catan")).unwrap().details
        else {
            panic!("not a board game");
        };
        assert_eq!(game.missing_pieces.len(), 1);
        assert!(!game.is_complete());
    }

    #[test]
    fn rename_moves_entry_and_keeps_fields() {
        let mut catalog = catalog();
        _ = catalog.lend(&name("Halo")).unwrap();
        _ = catalog.take_back(&name("Halo")).unwrap();

        catalog.rename(&name("Halo"), name("Halo 2")).unwrap();

        assert!(!catalog.contains(&name("Halo")));
        let item = catalog.get(&name("Halo 2")).unwrap();
        assert_eq!(item.name, name("Halo 2"));
        assert_eq!(item.price, Price::from_str("100").unwrap());
        assert_eq!(item.loan_count, 1);
        assert!(!item.is_on_loan);
        assert_eq!(item.kind(), item::Kind::ElectronicGame);
    }

    #[test]
    fn lent_item_keeps_its_entry() {
        let mut catalog = catalog();
        _ = catalog.lend(&name("Catan")).unwrap();

        assert_eq!(
            catalog.remove(&name("Catan")),
            Err(Error::ItemOnLoan(name("Catan"))),
        );
        assert_eq!(
            catalog.rename(&name("Catan"), name("Catan 2")),
            Err(Error::ItemOnLoan(name("Catan"))),
        );
        assert_eq!(
            catalog.register(Item::new(
                name("Catan"),
                Price::from_str("1").unwrap(),
                BoardGame::default(),
            )),
            Err(Error::ItemOnLoan(name("Catan"))),
        );
        assert!(catalog.rename(&name("Catan"), name("Catan")).is_ok());

        let catan = catalog.get(&name("Catan")).unwrap();
        assert!(catan.is_on_loan);
        assert_eq!(catan.price, Price::from_str("50").unwrap());
        assert!(!catalog.contains(&name("Catan 2")));

        _ = catalog.take_back(&name("Catan")).unwrap();
        assert!(catalog.remove(&name("Catan")).is_ok());
    }

    #[test]
    fn rename_rejects_occupied_name() {
        let mut catalog = catalog();

        assert_eq!(
            catalog.rename(&name("Halo"), name("Catan")),
            Err(Error::ItemAlreadyExists(name("Catan"))),
        );
        assert!(catalog.contains(&name("Halo")));
        assert!(catalog.rename(&name("Halo"), name("Halo")).is_ok());
        assert_eq!(
            catalog.rename(&name("Doom"), name("Doom 2")),
            Err(Error::ItemNotExists(name("Doom"))),
        );
    }

    #[test]
    fn updates_price() {
        let mut catalog = catalog();

        catalog
            .set_price(&name("Catan"), Price::from_str("55.5").unwrap())
            .unwrap();

        assert_eq!(
            catalog.get(&name("Catan")).unwrap().price.to_string(),
            "55.50",
        );
    }

    #[test]
    fn lending_twice_conflicts() {
        let mut catalog = catalog();

        assert!(catalog.lend(&name("Halo")).is_ok());
        assert_eq!(
            catalog.lend(&name("Halo")),
            Err(Error::ItemOnLoan(name("Halo"))),
        );

        let item = catalog.get(&name("Halo")).unwrap();
        assert!(item.is_on_loan);
        assert_eq!(item.loan_count, 1);
    }

    #[test]
    fn take_back_is_idempotent() {
        let mut catalog = catalog();

        assert!(catalog.take_back(&name("Halo")).is_ok());
        _ = catalog.lend(&name("Halo")).unwrap();
        assert!(catalog.take_back(&name("Halo")).is_ok());
        assert!(catalog.take_back(&name("Halo")).is_ok());
        _ = catalog.lend(&name("Halo")).unwrap();

        let item = catalog.get(&name("Halo")).unwrap();
        assert!(item.is_on_loan);
        assert_eq!(item.loan_count, 2);
        assert!(catalog.take_back(&name("Nope")).is_err());
    }
}
