//! [`Query`] collection related to a single user.

use common::operations::By;

use crate::domain::user;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries [`user::Reputation`] of a user by its [`user::Key`].
pub type Reputation = DatabaseQuery<By<Option<user::Reputation>, user::Key>>;
