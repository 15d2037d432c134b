//! Read entities definitions.

pub mod item;
pub mod loan;
