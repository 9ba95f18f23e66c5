//! [`Query`] collection related to [`User`]s.
//!
//! [`User`]: crate::domain::User

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries a page of [`User`]s, newest first.
pub type List =
    DatabaseQuery<By<read::user::list::Page, read::user::list::Selector>>;
