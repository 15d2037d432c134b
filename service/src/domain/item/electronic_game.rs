//! [`ElectronicGame`] [`Item`] definition.

#[cfg(doc)]
use super::Item;

/// Video game playable on some [`Platform`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElectronicGame {
    /// [`Platform`] this [`ElectronicGame`] runs on.
    pub platform: Platform,
}

impl ElectronicGame {
    /// Creates a new [`ElectronicGame`] for the provided [`Platform`].
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

define_text! {
    #[doc = "Platform an [`ElectronicGame`] runs on."]
    Platform
}
