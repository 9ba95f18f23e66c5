//! [`Query`] collection related to a single [`Property`].
//!
//! [`Property`]: crate::domain::Property

use common::operations::By;

use crate::{domain::property, read};
#[cfg(doc)]
use crate::{domain::Property, Query};

use super::DatabaseQuery;

/// Queries a single [`Listing`] by its ID.
///
/// [`Listing`]: read::property::Listing
pub type ById =
    DatabaseQuery<By<Option<read::property::Listing>, property::Id>>;

/// Queries a single published [`Listing`] by its slug, bumping its view
/// counter.
///
/// [`Listing`]: read::property::Listing
pub type VisitBySlug =
    DatabaseQuery<By<Option<read::property::Listing>, property::Slug>>;
