//! [`Query`] collection related to [`Favorite`]s.
//!
//! [`Favorite`]: crate::domain::Favorite

use common::operations::By;

use crate::{domain::property, read};
#[cfg(doc)]
use crate::{domain::Favorite, Query};

use super::DatabaseQuery;

/// Queries the number of likes of a property.
pub type LikesCount =
    DatabaseQuery<By<read::favorite::LikesCount, property::Id>>;

/// Queries whether a user currently likes a property.
pub type IsLiked =
    DatabaseQuery<By<read::favorite::IsLiked, read::favorite::Pair>>;
