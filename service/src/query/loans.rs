//! [`Query`] collection related to the multiple [`Loan`]s.

use common::operations::By;

use crate::{domain::Loan, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`Loan`]s matching the [`read::loan::Filter`] in the
/// order they were registered.
pub type List = DatabaseQuery<By<Vec<Loan>, read::loan::Filter>>;
