//! [`Query`] collection related to multiple [`Property`]s.
//!
//! [`Property`]: crate::domain::Property

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Property, Query};

use super::DatabaseQuery;

/// Queries a page of published listings matching a filter.
///
/// The total count re-runs the same predicate set with a count-only query.
pub type List = DatabaseQuery<
    By<read::property::list::Page, read::property::list::Selector>,
>;

/// Queries the featured listings, falling back to the newest published ones
/// when nothing is featured.
pub type Featured =
    DatabaseQuery<By<Vec<read::property::Listing>, read::property::Featured>>;
