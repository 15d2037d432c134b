//! Parsing of primitive [`System`] inputs into domain values.
//!
//! [`System`]: crate::System

use std::str::FromStr;

use common::{Date, Price};
use service::{
    command::update_item::Change,
    domain::{
        item::{self, board_game, bluray, electronic_game, Rating, Runtime},
        loan, user,
    },
};

use crate::{define_error, Error};

define_error! {
    enum InputError {
        #[code = "INVALID_USER"]
        #[kind = Validation]
        #[message = "User name and phone must not be blank"]
        InvalidUser,

        #[code = "INVALID_ITEM_NAME"]
        #[kind = Validation]
        #[message = "`Item` name must not be blank"]
        InvalidItemName,

        #[code = "NEGATIVE_PRICE"]
        #[kind = Validation]
        #[message = "Price must not be negative"]
        NegativePrice,

        #[code = "INVALID_PRICE"]
        #[kind = Validation]
        #[message = "Price must be a number"]
        InvalidPrice,

        #[code = "INVALID_TEXT"]
        #[kind = Validation]
        #[message = "Mandatory text attribute must not be blank"]
        InvalidText,

        #[code = "INVALID_RUNTIME"]
        #[kind = Validation]
        #[message = "Runtime must be a positive number of minutes"]
        InvalidRuntime,

        #[code = "INVALID_RATING"]
        #[kind = Validation]
        #[message = "Rating must be one of: Free, 10+, 12+, 14+, 16+, 18+"]
        InvalidRating,

        #[code = "INVALID_NUMBER"]
        #[kind = Validation]
        #[message = "Number is out of range"]
        InvalidNumber,

        #[code = "INVALID_DATE"]
        #[kind = Validation]
        #[message = "Date must not be blank"]
        InvalidDate,

        #[code = "INVALID_PERIOD"]
        #[kind = Validation]
        #[message = "Loan period must not be negative"]
        InvalidPeriod,

        #[code = "UNKNOWN_ATTRIBUTE"]
        #[kind = Validation]
        #[message = "Attribute must be either `name` or `price`"]
        UnknownAttribute,
    }
}

/// Attribute of an [`item::Item`] addressable by its name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Attribute {
    /// [`item::Name`] of the [`item::Item`].
    Name,

    /// [`Price`] of the [`item::Item`].
    Price,
}

impl FromStr for Attribute {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if ["nome", "name"].iter().any(|a| s.eq_ignore_ascii_case(a)) {
            Ok(Self::Name)
        } else if ["preco", "price"].iter().any(|a| s.eq_ignore_ascii_case(a))
        {
            Ok(Self::Price)
        } else {
            Err(InputError::UnknownAttribute.into())
        }
    }
}

impl Attribute {
    /// Parses the provided `value` into a [`Change`] of this [`Attribute`].
    pub(crate) fn change(self, value: &str) -> Result<Change, Error> {
        Ok(match self {
            Self::Name => Change::Name(item_name(value)?),
            Self::Price => Change::Price(price_str(value)?),
        })
    }
}

/// Parses a [`user::Key`] out of the user's `name` and `phone`.
pub(crate) fn user((name, phone): (&str, &str)) -> Result<user::Key, Error> {
    let err = || Error::from(InputError::InvalidUser);
    Ok(user::Key::new(
        user::Name::new(name).ok_or_else(err)?,
        user::Phone::new(phone).ok_or_else(err)?,
    ))
}

/// Parses an [`item::Name`].
pub(crate) fn item_name(name: &str) -> Result<item::Name, Error> {
    item::Name::new(name).ok_or_else(|| InputError::InvalidItemName.into())
}

/// Converts the provided `amount` into a [`Price`].
pub(crate) fn price(amount: f64) -> Result<Price, Error> {
    if amount.is_nan() || amount.is_infinite() {
        return Err(InputError::InvalidPrice.into());
    }
    Price::from_f64(amount).ok_or_else(|| InputError::NegativePrice.into())
}

/// Parses a [`Price`] out of its textual representation.
pub(crate) fn price_str(amount: &str) -> Result<Price, Error> {
    Price::from_str(amount).map_err(|e| {
        Error::from(match e {
            common::price::ParseError::NotNumeric => InputError::InvalidPrice,
            common::price::ParseError::Negative => InputError::NegativePrice,
        })
    })
}

/// Parses a mandatory text attribute.
pub(crate) fn text<T: FromStr>(value: &str) -> Result<T, Error> {
    value.parse().map_err(|_| InputError::InvalidText.into())
}

/// Converts the provided `minutes` into a [`Runtime`].
pub(crate) fn runtime(minutes: i64) -> Result<Runtime, Error> {
    u32::try_from(minutes)
        .ok()
        .and_then(Runtime::new)
        .ok_or_else(|| InputError::InvalidRuntime.into())
}

/// Parses a [`Rating`] out of its label.
pub(crate) fn rating(label: &str) -> Result<Rating, Error> {
    label
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidRating.into())
}

/// Converts the provided `number` into a non-negative `T`.
pub(crate) fn number<T: TryFrom<i64>>(number: i64) -> Result<T, Error> {
    T::try_from(number).map_err(|_| InputError::InvalidNumber.into())
}

/// Parses a [`Date`].
pub(crate) fn date(label: &str) -> Result<Date, Error> {
    Date::new(label).ok_or_else(|| InputError::InvalidDate.into())
}

/// Converts the provided number of `days` into a [`loan::Period`].
pub(crate) fn period(days: i64) -> Result<loan::Period, Error> {
    loan::Period::try_from(days).map_err(|_| InputError::InvalidPeriod.into())
}

/// Parses an [`electronic_game::Platform`].
pub(crate) fn platform(
    value: &str,
) -> Result<electronic_game::Platform, Error> {
    text(value)
}

/// Parses a [`board_game::Piece`].
pub(crate) fn piece(value: &str) -> Result<board_game::Piece, Error> {
    text(value)
}

/// Parses a [`bluray::Genre`].
pub(crate) fn genre(value: &str) -> Result<bluray::Genre, Error> {
    text(value)
}

#[cfg(test)]
mod spec {
    use service::{command::update_item::Change, domain::item::Rating};

    use crate::error::Kind;

    use super::{
        number, period, price, price_str, rating, runtime, user, Attribute,
    };

    #[test]
    fn parses_attributes_case_insensitively() {
        for name in ["nome", "Nome", "NAME", " name "] {
            assert_eq!(name.parse::<Attribute>().unwrap(), Attribute::Name);
        }
        for name in ["preco", "Preco", "price", "PRICE"] {
            assert_eq!(name.parse::<Attribute>().unwrap(), Attribute::Price);
        }
        assert_eq!(
            "color".parse::<Attribute>().unwrap_err().kind,
            Kind::Validation,
        );
    }

    #[test]
    fn changes_attribute_values() {
        assert!(matches!(
            Attribute::Name.change("Halo 2").unwrap(),
            Change::Name(n) if n.to_string() == "Halo 2",
        ));
        assert!(matches!(
            Attribute::Price.change("9.90").unwrap(),
            Change::Price(p) if p.to_string() == "9.90",
        ));
        assert_eq!(
            Attribute::Price.change("cheap").unwrap_err().code,
            "INVALID_PRICE",
        );
        assert_eq!(
            Attribute::Name.change(" ").unwrap_err().code,
            "INVALID_ITEM_NAME",
        );
    }

    #[test]
    fn validates_prices() {
        assert_eq!(price(12.5).unwrap().to_string(), "12.50");
        assert_eq!(price(0.0).unwrap().to_string(), "0.00");
        assert_eq!(price(-1.0).unwrap_err().code, "NEGATIVE_PRICE");
        assert_eq!(price(f64::NAN).unwrap_err().code, "INVALID_PRICE");
        assert_eq!(price_str("-3").unwrap_err().code, "NEGATIVE_PRICE");
    }

    #[test]
    fn validates_numbers() {
        assert_eq!(u32::from(runtime(90).unwrap()), 90);
        assert_eq!(runtime(0).unwrap_err().code, "INVALID_RUNTIME");
        assert_eq!(runtime(-5).unwrap_err().code, "INVALID_RUNTIME");
        assert_eq!(period(0).unwrap(), 0);
        assert_eq!(period(-1).unwrap_err().code, "INVALID_PERIOD");
        assert_eq!(number::<u16>(70_000).unwrap_err().code, "INVALID_NUMBER");
    }

    #[test]
    fn parses_ratings_by_both_labels() {
        assert_eq!(rating("Free").unwrap(), Rating::Free);
        assert_eq!(rating("LIVRE").unwrap(), Rating::Free);
        assert_eq!(rating("16+").unwrap(), Rating::SixteenPlus);
        assert_eq!(rating("DEZESSEIS_ANOS").unwrap(), Rating::SixteenPlus);
        assert_eq!(rating("PG").unwrap_err().code, "INVALID_RATING");
    }

    #[test]
    fn validates_users() {
        assert!(user(("Ana", "555")).is_ok());
        assert_eq!(user(("", "555")).unwrap_err().code, "INVALID_USER");
        assert_eq!(user(("Ana", " ")).unwrap_err().code, "INVALID_USER");
    }
}
