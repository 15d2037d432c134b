//! Domain definitions.

/// Defines a newtype over a non-blank [`String`] of a limited length.
macro_rules! define_text {
    (
        #[doc = $doc:literal]
        $name:ident
    ) => {
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
        )]
        #[as_ref(str, String)]
        #[doc = $doc]
        pub struct $name(String);

        impl $name {
            #[doc = concat!(
                "Creates a new [`", stringify!($name), "`] if the given ",
                "`text` is valid.",
            )]
            #[must_use]
            pub fn new(text: impl Into<String>) -> Option<Self> {
                let text = text.into();
                Self::check(&text).then_some(Self(text))
            }

            #[doc = concat!(
                "Checks whether the given `text` is a valid [`",
                stringify!($name), "`].",
            )]
            fn check(text: impl AsRef<str>) -> bool {
                let text = text.as_ref();
                !text.trim().is_empty() && text.len() <= 512
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    };
}

pub mod catalog;
pub mod item;
pub mod loan;
pub mod user;

pub use self::{catalog::Catalog, item::Item, loan::Loan};
