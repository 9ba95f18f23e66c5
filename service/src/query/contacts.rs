//! [`Query`] collection related to [`Contact`]s.
//!
//! [`Contact`]: crate::domain::Contact

use common::operations::By;

use crate::{domain::contact, read};
#[cfg(doc)]
use crate::{domain::Contact, Query};

use super::DatabaseQuery;

/// Queries a page of [`Contact`]s, newest first.
pub type List =
    DatabaseQuery<By<read::contact::list::Page, read::contact::list::Selector>>;

/// Queries a single [`Contact`] with its property summary.
pub type ById = DatabaseQuery<By<Option<read::contact::Item>, contact::Id>>;

/// Queries the per-status [`Contact`] counters.
pub type Stats = DatabaseQuery<By<read::contact::Stats, ()>>;
