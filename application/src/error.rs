//! [`Error`]-related definitions.

use std::fmt;

use derive_more::{Display, Error as StdError};
use itertools::Itertools as _;
use service::{command, domain::catalog, infra::database, query};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[kind = $kind:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            kind: $crate::error::Kind::$kind,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// [`System`] operation [`Error`].
///
/// [`System`]: crate::System
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`Kind`] of this [`Error`].
    pub kind: Kind,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            kind: Kind::Internal,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            kind: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Kind of an [`Error`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Kind {
    /// Malformed or out-of-range input.
    #[display("ValidationError")]
    Validation,

    /// Referenced entity does not exist.
    #[display("NotFoundError")]
    NotFound,

    /// Operation contradicts the current state.
    #[display("ConflictError")]
    Conflict,

    /// Unexpected failure.
    #[display("InternalError")]
    Internal,
}

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

define_error! {
    enum UserError {
        #[code = "OWNER_NOT_EXISTS"]
        #[kind = NotFound]
        #[message = "Owner does not exist"]
        OwnerNotExists,

        #[code = "BORROWER_NOT_EXISTS"]
        #[kind = NotFound]
        #[message = "Borrower does not exist"]
        BorrowerNotExists,

        #[code = "USER_ALREADY_EXISTS"]
        #[kind = Conflict]
        #[message = "User is registered already"]
        UserAlreadyExists,
    }
}

impl AsError for catalog::Error {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ITEM_ALREADY_EXISTS"]
                #[kind = Conflict]
                #[message = "Owner has another `Item` with the same name"]
                ItemAlreadyExists,

                #[code = "ITEM_NOT_EXISTS"]
                #[kind = NotFound]
                #[message = "`Item` does not exist"]
                ItemNotExists,

                #[code = "ITEM_ON_LOAN"]
                #[kind = Conflict]
                #[message = "`Item` is on loan already"]
                ItemOnLoan,

                #[code = "NOT_BOARD_GAME"]
                #[kind = NotFound]
                #[message = "`Item` is not a board game"]
                NotBoardGame,

                #[code = "NOT_SERIES"]
                #[kind = NotFound]
                #[message = "`Item` is not a Blu-ray series"]
                NotSeries,
            }
        }

        Some(
            match self {
                Self::ItemAlreadyExists(_) => Error::ItemAlreadyExists,
                Self::ItemNotExists(_) => Error::ItemNotExists,
                Self::ItemOnLoan(_) => Error::ItemOnLoan,
                Self::NotBoardGame(_) => Error::NotBoardGame,
                Self::NotSeries(_) => Error::NotSeries,
            }
            .into(),
        )
    }
}

impl AsError for command::register_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserAlreadyExists(_) => {
                Some(UserError::UserAlreadyExists.into())
            }
        }
    }
}

impl AsError for command::register_item::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Catalog(e) => e.try_as_error(),
            Self::Db(e) => e.try_as_error(),
            Self::OwnerNotExists(_) => Some(UserError::OwnerNotExists.into()),
        }
    }
}

impl AsError for command::add_episode::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Catalog(e) => e.try_as_error(),
            Self::Db(e) => e.try_as_error(),
            Self::OwnerNotExists(_) => Some(UserError::OwnerNotExists.into()),
        }
    }
}

impl AsError for command::add_missing_piece::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Catalog(e) => e.try_as_error(),
            Self::Db(e) => e.try_as_error(),
            Self::OwnerNotExists(_) => Some(UserError::OwnerNotExists.into()),
        }
    }
}

impl AsError for command::remove_item::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Catalog(e) => e.try_as_error(),
            Self::Db(e) => e.try_as_error(),
            Self::OwnerNotExists(_) => Some(UserError::OwnerNotExists.into()),
        }
    }
}

impl AsError for command::update_item::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Catalog(e) => e.try_as_error(),
            Self::Db(e) => e.try_as_error(),
            Self::OwnerNotExists(_) => Some(UserError::OwnerNotExists.into()),
        }
    }
}

impl AsError for command::register_loan::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LOAN_ALREADY_EXISTS"]
                #[kind = Conflict]
                #[message = "`Loan` with the same owner, borrower, item and \
                             start date exists already"]
                LoanAlreadyExists,
            }
        }

        match self {
            Self::BorrowerNotExists(_) => {
                Some(UserError::BorrowerNotExists.into())
            }
            Self::Catalog(e) => e.try_as_error(),
            Self::Db(e) => e.try_as_error(),
            Self::LoanAlreadyExists(_) => Some(Error::LoanAlreadyExists.into()),
            Self::OwnerNotExists(_) => Some(UserError::OwnerNotExists.into()),
        }
    }
}

impl AsError for command::return_loan::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LOAN_NOT_EXISTS"]
                #[kind = NotFound]
                #[message = "Open `Loan` does not exist"]
                LoanNotExists,
            }
        }

        match self {
            Self::BorrowerNotExists(_) => {
                Some(UserError::BorrowerNotExists.into())
            }
            Self::Catalog(e) => e.try_as_error(),
            Self::Db(e) => e.try_as_error(),
            Self::LoanNotExists(_) => Some(Error::LoanNotExists.into()),
            Self::OwnerNotExists(_) => Some(UserError::OwnerNotExists.into()),
        }
    }
}

impl AsError for query::item::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ItemNotExists(n) => {
                catalog::Error::ItemNotExists(n.clone()).try_as_error()
            }
            Self::OwnerNotExists(_) => Some(UserError::OwnerNotExists.into()),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{domain::catalog, domain::item};

    use super::{AsError as _, Error, Kind};

    #[test]
    fn maps_catalog_errors_to_kinds() {
        let name = || item::Name::new("Halo").unwrap();

        let kind = |e: catalog::Error| e.as_error().kind;
        assert_eq!(kind(catalog::Error::ItemNotExists(name())), Kind::NotFound);
        assert_eq!(kind(catalog::Error::NotSeries(name())), Kind::NotFound);
        assert_eq!(kind(catalog::Error::ItemOnLoan(name())), Kind::Conflict);
        assert_eq!(
            kind(catalog::Error::ItemAlreadyExists(name())),
            Kind::Conflict,
        );
    }

    #[test]
    fn displays_code_and_message() {
        let err = Error::internal(&"boom");

        assert_eq!(err.kind, Kind::Internal);
        assert_eq!(err.to_string(), "[INTERNAL_ERROR]: boom");
        assert_eq!(Kind::NotFound.to_string(), "NotFoundError");
    }
}
