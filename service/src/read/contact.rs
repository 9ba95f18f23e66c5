//! [`Contact`]-related read definitions.

use crate::domain::{property, Contact};

/// [`Contact`] along with a summary of the referenced property.
#[derive(Clone, Debug)]
pub struct Item {
    /// The [`Contact`] itself.
    pub contact: Contact,

    /// Summary of the referenced [`Property`], if any.
    ///
    /// [`Property`]: crate::domain::Property
    pub property: Option<PropertySummary>,
}

/// Bare minimum of a [`Property`] shown next to a [`Contact`].
///
/// [`Property`]: crate::domain::Property
#[derive(Clone, Debug)]
pub struct PropertySummary {
    /// ID of the [`Property`].
    ///
    /// [`Property`]: crate::domain::Property
    pub id: property::Id,

    /// Title of the [`Property`].
    ///
    /// [`Property`]: crate::domain::Property
    pub title: property::Title,

    /// Slug of the [`Property`].
    ///
    /// [`Property`]: crate::domain::Property
    pub slug: property::Slug,
}

/// Counters of [`Contact`]s per workflow status.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Total number of [`Contact`]s.
    pub total: usize,

    /// Number of [`Contact`]s in the `new` status.
    pub new: usize,

    /// Number of [`Contact`]s in the `in_progress` status.
    pub in_progress: usize,

    /// Number of [`Contact`]s in the `completed` status.
    pub completed: usize,

    /// Number of [`Contact`]s in the `cancelled` status.
    pub cancelled: usize,

    /// Number of [`Contact`]s received within the last 24 hours.
    pub recent_24h: usize,
}

pub mod list {
    //! [`Contact`] list definitions.

    use common::pagination;

    use crate::domain::contact;
    #[cfg(doc)]
    use crate::domain::Contact;

    use super::Item;

    /// A [`Page`] of [`Contact`]s.
    ///
    /// [`Page`]: pagination::Page
    pub type Page = pagination::Page<Item>;

    /// Arguments for selecting a [`Page`].
    pub type Arguments = pagination::Arguments;

    /// [`Page`] selector.
    pub type Selector = pagination::Selector<Filter>;

    /// Filter of [`Contact`]s.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`contact::Status`] to filter by.
        pub status: Option<contact::Status>,
    }
}
