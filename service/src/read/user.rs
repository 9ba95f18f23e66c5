//! [`User`]-related read definitions.

use derive_more::{From, Into};

#[cfg(doc)]
use crate::domain::User;

/// Number of [`User`]s holding the admin role.
///
/// Guards the deletion of the last administrator.
#[derive(Clone, Copy, Debug, Eq, From, Into, PartialEq)]
pub struct AdminCount(pub usize);

pub mod list {
    //! [`User`] list definitions.

    use common::pagination;

    use crate::domain::{user, User};

    /// A [`Page`] of [`User`]s.
    ///
    /// [`Page`]: pagination::Page
    pub type Page = pagination::Page<User>;

    /// Arguments for selecting a [`Page`].
    pub type Arguments = pagination::Arguments;

    /// [`Page`] selector.
    pub type Selector = pagination::Selector<Filter>;

    /// Filter of [`User`]s.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Free-text needle searched case-insensitively in the first name,
        /// last name and email of a [`User`].
        pub search: Option<String>,

        /// [`user::Role`] to filter by.
        pub role: Option<user::Role>,
    }
}
