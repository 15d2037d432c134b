//! [`Query`] collection related to a single [`Catalog`].

use common::operations::By;

use crate::domain::{user, Catalog};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Catalog`] by its owner's [`user::Key`].
pub type ByOwner = DatabaseQuery<By<Option<Catalog>, user::Key>>;
