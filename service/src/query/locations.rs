//! [`Query`] collection related to [`Location`]s.
//!
//! [`Location`]: crate::domain::Location

use common::operations::By;

use crate::domain::Location;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries every [`Location`], ordered by name.
pub type List = DatabaseQuery<By<Vec<Location>, ()>>;
