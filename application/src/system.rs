//! [`System`] definitions.

use std::fmt::Display;

use itertools::Itertools as _;
use service::{
    command,
    domain::{item, loan, user},
    query, read, Command as _, Query as _,
};

use crate::{
    error::UserError,
    input::{self, Attribute},
    AsError, Config, Error, Service,
};

/// Name and phone identifying a user.
pub type User<'a> = (&'a str, &'a str);

/// Façade of the lending system, accepting and producing plain values.
///
/// Listings are rendered as `|`-terminated entries.
#[derive(Debug)]
pub struct System {
    /// Underlying [`Service`].
    service: Service,
}

impl Default for System {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl System {
    /// Name of the [`tracing::Span`] for the [`System`] operations.
    const SPAN_NAME: &'static str = "System operation";

    /// Creates a new empty [`System`] with the provided [`Config`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            service: Service::new(
                config.service.into(),
                service::infra::Memory::new(),
            ),
        }
    }

    /// Registers a new user owning no items.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_USER` - name or phone is blank;
    /// - `USER_ALREADY_EXISTS` - the user is registered already.
    #[tracing::instrument(
        skip_all,
        fields(op = "registerUser", otel.name = Self::SPAN_NAME, user = user.0),
    )]
    pub fn register_user(&self, user: User<'_>) -> Result<(), Error> {
        self.service
            .execute(command::RegisterUser {
                user: input::user(user)?,
            })
            .map_err(AsError::into_error)
            .map(drop)
    }

    /// Registers a new electronic game of the `owner`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NEGATIVE_PRICE`, `INVALID_*` - malformed input;
    /// - `OWNER_NOT_EXISTS` - the `owner` is not registered;
    /// - `ITEM_ALREADY_EXISTS` - the `owner` has an item with the same name;
    /// - `ITEM_ON_LOAN` - the item to be replaced is lent at the moment.
    #[tracing::instrument(
        skip_all,
        fields(
            item = name,
            op = "registerElectronicGame",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
        ),
    )]
    pub fn register_electronic_game(
        &self,
        owner: User<'_>,
        name: &str,
        price: f64,
        platform: &str,
    ) -> Result<(), Error> {
        let item = item::Item::new(
            input::item_name(name)?,
            input::price(price)?,
            item::ElectronicGame::new(input::platform(platform)?),
        );
        self.register_item(owner, item)
    }

    /// Registers a new complete board game of the `owner`.
    ///
    /// # Errors
    ///
    /// Same as [`System::register_electronic_game()`].
    #[tracing::instrument(
        skip_all,
        fields(
            item = name,
            op = "registerBoardGame",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
        ),
    )]
    pub fn register_board_game(
        &self,
        owner: User<'_>,
        name: &str,
        price: f64,
    ) -> Result<(), Error> {
        let item = item::Item::new(
            input::item_name(name)?,
            input::price(price)?,
            item::BoardGame::default(),
        );
        self.register_item(owner, item)
    }

    /// Registers a new Blu-ray movie of the `owner`.
    ///
    /// # Errors
    ///
    /// Same as [`System::register_electronic_game()`], plus:
    /// - `INVALID_RUNTIME` - `runtime` is not positive;
    /// - `INVALID_RATING` - unknown `rating`.
    #[expect(clippy::too_many_arguments, reason = "flat API")]
    #[tracing::instrument(
        skip_all,
        fields(
            item = name,
            op = "registerBlurayMovie",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
        ),
    )]
    pub fn register_bluray_movie(
        &self,
        owner: User<'_>,
        name: &str,
        price: f64,
        runtime: i64,
        rating: &str,
        genre: &str,
        release_year: i64,
    ) -> Result<(), Error> {
        let item = item::Item::new(
            input::item_name(name)?,
            input::price(price)?,
            item::Movie {
                runtime: input::runtime(runtime)?,
                rating: input::rating(rating)?,
                genre: input::genre(genre)?,
                release_year: input::number(release_year)?,
            },
        );
        self.register_item(owner, item)
    }

    /// Registers a new Blu-ray show of the `owner`.
    ///
    /// # Errors
    ///
    /// Same as [`System::register_bluray_movie()`].
    #[expect(clippy::too_many_arguments, reason = "flat API")]
    #[tracing::instrument(
        skip_all,
        fields(
            item = name,
            op = "registerBlurayShow",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
        ),
    )]
    pub fn register_bluray_show(
        &self,
        owner: User<'_>,
        name: &str,
        price: f64,
        runtime: i64,
        rating: &str,
        artist: &str,
        track_count: i64,
    ) -> Result<(), Error> {
        let item = item::Item::new(
            input::item_name(name)?,
            input::price(price)?,
            item::Show {
                runtime: input::runtime(runtime)?,
                rating: input::rating(rating)?,
                track_count: input::number(track_count)?,
                artist: input::text(artist)?,
            },
        );
        self.register_item(owner, item)
    }

    /// Registers a new Blu-ray series box of the `owner` without episodes.
    ///
    /// # Errors
    ///
    /// Same as [`System::register_bluray_movie()`].
    #[expect(clippy::too_many_arguments, reason = "flat API")]
    #[tracing::instrument(
        skip_all,
        fields(
            item = name,
            op = "registerBluraySeries",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
        ),
    )]
    pub fn register_bluray_series(
        &self,
        owner: User<'_>,
        name: &str,
        price: f64,
        description: &str,
        runtime: i64,
        rating: &str,
        genre: &str,
        season: i64,
    ) -> Result<(), Error> {
        let item = item::Item::new(
            input::item_name(name)?,
            input::price(price)?,
            item::Series::new(
                input::text(description)?,
                input::runtime(runtime)?,
                input::rating(rating)?,
                input::genre(genre)?,
                input::number(season)?,
            ),
        );
        self.register_item(owner, item)
    }

    /// Appends an episode to the `owner`'s Blu-ray series.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_RUNTIME`, `INVALID_*` - malformed input;
    /// - `OWNER_NOT_EXISTS` - the `owner` is not registered;
    /// - `ITEM_NOT_EXISTS` - the `owner` has no such item;
    /// - `NOT_SERIES` - the item is not a Blu-ray series.
    #[tracing::instrument(
        skip_all,
        fields(
            item = series,
            op = "addBlurayEpisode",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
        ),
    )]
    pub fn add_bluray_episode(
        &self,
        owner: User<'_>,
        series: &str,
        runtime: i64,
    ) -> Result<(), Error> {
        self.service
            .execute(command::AddEpisode {
                owner: input::user(owner)?,
                series: input::item_name(series)?,
                episode: input::runtime(runtime)?.into(),
            })
            .map_err(AsError::into_error)
    }

    /// Records a piece missing from the `owner`'s board game.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_*` - malformed input;
    /// - `OWNER_NOT_EXISTS` - the `owner` is not registered;
    /// - `ITEM_NOT_EXISTS` - the `owner` has no such item;
    /// - `NOT_BOARD_GAME` - the item is not a board game.
    #[tracing::instrument(
        skip_all,
        fields(
            item = name,
            op = "addMissingPiece",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
            piece = piece,
        ),
    )]
    pub fn add_missing_piece(
        &self,
        owner: User<'_>,
        name: &str,
        piece: &str,
    ) -> Result<(), Error> {
        self.service
            .execute(command::AddMissingPiece {
                owner: input::user(owner)?,
                board_game: input::item_name(name)?,
                piece: input::piece(piece)?,
            })
            .map_err(AsError::into_error)
    }

    /// Removes an item of the `owner`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_*` - malformed input;
    /// - `OWNER_NOT_EXISTS` - the `owner` is not registered;
    /// - `ITEM_NOT_EXISTS` - the `owner` has no such item;
    /// - `ITEM_ON_LOAN` - the item is lent at the moment.
    #[tracing::instrument(
        skip_all,
        fields(
            item = name,
            op = "removeItem",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
        ),
    )]
    pub fn remove_item(
        &self,
        owner: User<'_>,
        name: &str,
    ) -> Result<(), Error> {
        self.service
            .execute(command::RemoveItem {
                owner: input::user(owner)?,
                name: input::item_name(name)?,
            })
            .map_err(AsError::into_error)
            .map(drop)
    }

    /// Changes the `attribute` of the `owner`'s item to the provided `value`.
    ///
    /// Supported attributes are `name` (`nome`) and `price` (`preco`), in any
    /// letter case.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `UNKNOWN_ATTRIBUTE` - unsupported `attribute`;
    /// - `INVALID_PRICE`, `NEGATIVE_PRICE`, `INVALID_*` - malformed `value`;
    /// - `OWNER_NOT_EXISTS` - the `owner` is not registered;
    /// - `ITEM_NOT_EXISTS` - the `owner` has no such item;
    /// - `ITEM_ALREADY_EXISTS` - the new name is occupied by another item;
    /// - `ITEM_ON_LOAN` - renaming an item lent at the moment.
    #[tracing::instrument(
        skip_all,
        fields(
            attribute = attribute,
            item = name,
            op = "updateItem",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
        ),
    )]
    pub fn update_item(
        &self,
        owner: User<'_>,
        name: &str,
        attribute: &str,
        value: &str,
    ) -> Result<(), Error> {
        let owner = input::user(owner)?;
        let name = input::item_name(name)?;
        let change = attribute.parse::<Attribute>()?.change(value)?;
        self.service
            .execute(command::UpdateItem {
                owner,
                name,
                change,
            })
            .map_err(AsError::into_error)
            .map(drop)
    }

    /// Returns the `attribute` of the `owner`'s item.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `UNKNOWN_ATTRIBUTE` - unsupported `attribute`;
    /// - `OWNER_NOT_EXISTS` - the `owner` is not registered;
    /// - `ITEM_NOT_EXISTS` - the `owner` has no such item.
    #[tracing::instrument(
        skip_all,
        fields(
            attribute = attribute,
            item = name,
            op = "itemInfo",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
        ),
    )]
    pub fn item_info(
        &self,
        owner: User<'_>,
        name: &str,
        attribute: &str,
    ) -> Result<String, Error> {
        let attribute = attribute.parse::<Attribute>()?;
        let item = self.item(owner, name)?;
        Ok(match attribute {
            Attribute::Name => item.name.to_string(),
            Attribute::Price => item.price.to_string(),
        })
    }

    /// Returns the kind-specific description of the `owner`'s item.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `OWNER_NOT_EXISTS` - the `owner` is not registered;
    /// - `ITEM_NOT_EXISTS` - the `owner` has no such item.
    #[tracing::instrument(
        skip_all,
        fields(
            item = name,
            op = "itemDetails",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
        ),
    )]
    pub fn item_details(
        &self,
        owner: User<'_>,
        name: &str,
    ) -> Result<String, Error> {
        self.item(owner, name).map(|i| i.to_string())
    }

    /// Lists items of all users by their names.
    ///
    /// # Errors
    ///
    /// On internal failure only.
    #[tracing::instrument(
        skip_all,
        fields(op = "listItemsByName", otel.name = Self::SPAN_NAME),
    )]
    pub fn list_items_by_name(&self) -> Result<String, Error> {
        self.list_items(read::item::Order::Name, read::item::Filter::All)
    }

    /// Lists items of all users by their prices, the cheapest first.
    ///
    /// # Errors
    ///
    /// On internal failure only.
    #[tracing::instrument(
        skip_all,
        fields(op = "listItemsByPrice", otel.name = Self::SPAN_NAME),
    )]
    pub fn list_items_by_price(&self) -> Result<String, Error> {
        self.list_items(read::item::Order::Price, read::item::Filter::All)
    }

    /// Lists items of all users being lent at the moment by their names.
    ///
    /// # Errors
    ///
    /// On internal failure only.
    #[tracing::instrument(
        skip_all,
        fields(op = "listItemsOnLoan", otel.name = Self::SPAN_NAME),
    )]
    pub fn list_items_on_loan(&self) -> Result<String, Error> {
        self.list_items(read::item::Order::Name, read::item::Filter::OnLoan)
    }

    /// Lists items of all users available for lending by their names.
    ///
    /// # Errors
    ///
    /// On internal failure only.
    #[tracing::instrument(
        skip_all,
        fields(op = "listItemsAvailable", otel.name = Self::SPAN_NAME),
    )]
    pub fn list_items_available(&self) -> Result<String, Error> {
        self.list_items(read::item::Order::Name, read::item::Filter::Available)
    }

    /// Lists the most lent items of all users, each as
    /// `<rank>) <count> loans - <item>`.
    ///
    /// # Errors
    ///
    /// On internal failure only.
    #[tracing::instrument(
        skip_all,
        fields(op = "listTopItems", otel.name = Self::SPAN_NAME),
    )]
    pub fn list_top_items(&self) -> Result<String, Error> {
        self.service
            .execute(query::items::Top)
            .map_err(AsError::into_error)
            .map(render)
    }

    /// Lends the `owner`'s item to the `borrower`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PERIOD`, `INVALID_DATE`, `INVALID_*` - malformed input;
    /// - `OWNER_NOT_EXISTS`, `BORROWER_NOT_EXISTS` - unknown user;
    /// - `ITEM_NOT_EXISTS` - the `owner` has no such item;
    /// - `ITEM_ON_LOAN` - the item is lent already;
    /// - `LOAN_ALREADY_EXISTS` - the same loan is registered already.
    #[tracing::instrument(
        skip_all,
        fields(
            borrower = borrower.0,
            item = item,
            op = "registerLoan",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
            start = start,
        ),
    )]
    pub fn register_loan(
        &self,
        owner: User<'_>,
        borrower: User<'_>,
        item: &str,
        start: &str,
        period: i64,
    ) -> Result<(), Error> {
        let key = loan_key(owner, borrower, item, start)?;
        let period = input::period(period)?;
        self.service
            .execute(command::RegisterLoan { key, period })
            .map_err(AsError::into_error)
            .map(drop)
    }

    /// Closes the open loan of the `owner`'s item to the `borrower` started
    /// at `start`, giving the item back.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_DATE`, `INVALID_*` - malformed input;
    /// - `OWNER_NOT_EXISTS`, `BORROWER_NOT_EXISTS` - unknown user;
    /// - `LOAN_NOT_EXISTS` - no such open loan.
    #[tracing::instrument(
        skip_all,
        fields(
            borrower = borrower.0,
            item = item,
            op = "returnLoan",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
            start = start,
        ),
    )]
    pub fn return_loan(
        &self,
        owner: User<'_>,
        borrower: User<'_>,
        item: &str,
        start: &str,
        returned_at: &str,
    ) -> Result<(), Error> {
        let key = loan_key(owner, borrower, item, start)?;
        let returned_at = input::date(returned_at)?;
        self.service
            .execute(command::ReturnLoan { key, returned_at })
            .map_err(AsError::into_error)
            .map(drop)
    }

    /// Lists loans of the `owner`'s items in the order they were registered.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_USER` - malformed `owner`;
    /// - `OWNER_NOT_EXISTS` - the `owner` is not registered.
    #[tracing::instrument(
        skip_all,
        fields(
            op = "listLoansByOwner",
            otel.name = Self::SPAN_NAME,
            owner = owner.0,
        ),
    )]
    pub fn list_loans_by_owner(
        &self,
        owner: User<'_>,
    ) -> Result<String, Error> {
        let owner = input::user(owner)?;
        self.ensure_registered(&owner, UserError::OwnerNotExists)?;
        self.list_loans(read::loan::Filter::Owner(owner))
    }

    /// Lists loans of items to the `borrower` in the order they were
    /// registered.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_USER` - malformed `borrower`;
    /// - `BORROWER_NOT_EXISTS` - the `borrower` is not registered.
    #[tracing::instrument(
        skip_all,
        fields(
            borrower = borrower.0,
            op = "listLoansByBorrower",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub fn list_loans_by_borrower(
        &self,
        borrower: User<'_>,
    ) -> Result<String, Error> {
        let borrower = input::user(borrower)?;
        self.ensure_registered(&borrower, UserError::BorrowerNotExists)?;
        self.list_loans(read::loan::Filter::Borrower(borrower))
    }

    /// Lists loans of items with the provided name, whoever owns them, in
    /// the order they were registered.
    ///
    /// # Errors
    ///
    /// `INVALID_ITEM_NAME` if the `item` is blank.
    #[tracing::instrument(
        skip_all,
        fields(
            item = item,
            op = "listLoansByItem",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub fn list_loans_by_item(&self, item: &str) -> Result<String, Error> {
        self.list_loans(read::loan::Filter::Item(input::item_name(item)?))
    }

    /// Returns the reputation accumulated by the `user`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_USER` - malformed `user`;
    /// - `OWNER_NOT_EXISTS` - the `user` is not registered.
    #[tracing::instrument(
        skip_all,
        fields(op = "reputation", otel.name = Self::SPAN_NAME, user = user.0),
    )]
    pub fn reputation(&self, user: User<'_>) -> Result<String, Error> {
        self.service
            .execute(query::user::Reputation::by(input::user(user)?))
            .map_err(AsError::into_error)?
            .map(|r| r.to_string())
            .ok_or_else(|| UserError::OwnerNotExists.into())
    }

    /// Checks whether the provided `user` is registered, failing with the
    /// provided [`UserError`] otherwise.
    fn ensure_registered(
        &self,
        user: &user::Key,
        err: UserError,
    ) -> Result<(), Error> {
        self.service
            .execute(query::catalog::ByOwner::by(user.clone()))
            .map_err(AsError::into_error)?
            .map(drop)
            .ok_or_else(|| err.into())
    }

    /// Registers the provided `item` in the `owner`'s catalog.
    fn register_item(
        &self,
        owner: User<'_>,
        item: item::Item,
    ) -> Result<(), Error> {
        self.service
            .execute(command::RegisterItem {
                owner: input::user(owner)?,
                item,
            })
            .map_err(AsError::into_error)
            .map(drop)
    }

    /// Looks up the `owner`'s item with the provided `name`.
    fn item(&self, owner: User<'_>, name: &str) -> Result<item::Item, Error> {
        self.service
            .execute(query::item::ByName {
                owner: input::user(owner)?,
                name: input::item_name(name)?,
            })
            .map_err(AsError::into_error)
    }

    /// Lists items of all users in the provided order.
    fn list_items(
        &self,
        order: read::item::Order,
        filter: read::item::Filter,
    ) -> Result<String, Error> {
        self.service
            .execute(query::items::List { order, filter })
            .map_err(AsError::into_error)
            .map(render)
    }

    /// Lists loans passing the provided `filter`.
    fn list_loans(&self, filter: read::loan::Filter) -> Result<String, Error> {
        self.service
            .execute(query::loans::List::by(filter))
            .map_err(AsError::into_error)
            .map(render)
    }
}

/// Parses a [`loan::Key`] out of its parts.
fn loan_key(
    owner: User<'_>,
    borrower: User<'_>,
    item: &str,
    start: &str,
) -> Result<loan::Key, Error> {
    Ok(loan::Key {
        owner: input::user(owner)?,
        borrower: input::user(borrower)?,
        item: input::item_name(item)?,
        started_at: input::date(start)?,
    })
}

/// Renders the provided entries as a `|`-terminated list.
fn render<T: Display>(entries: Vec<T>) -> String {
    entries
        .iter()
        .format_with("", |e, f| f(&format_args!("{e}|")))
        .to_string()
}
