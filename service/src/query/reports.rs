//! [`Query`] collection producing analytics reports.

use common::operations::By;

use crate::read::analytics;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the site-wide [`analytics::Overview`].
pub type Overview = DatabaseQuery<By<analytics::Overview, analytics::Window>>;

/// Queries the [`analytics::PropertiesReport`] of a window.
pub type Properties =
    DatabaseQuery<By<analytics::PropertiesReport, analytics::Window>>;

/// Queries the [`analytics::UsersReport`] of a window.
pub type Users = DatabaseQuery<By<analytics::UsersReport, analytics::Window>>;

/// Queries the [`analytics::ContactsReport`] of a window.
pub type Contacts =
    DatabaseQuery<By<analytics::ContactsReport, analytics::Window>>;

/// Queries the recent-activity feed.
pub type Activity = DatabaseQuery<
    By<crate::read::activity::Feed, crate::read::activity::Limit>,
>;
