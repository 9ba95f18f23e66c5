//! [`Favorite`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};

use crate::domain::{property, user};

/// One [`User`]'s like of one [`Property`].
///
/// Existence of the record IS the like signal; no uniqueness is enforced by
/// the storage layer, so concurrent toggles may leave duplicate rows.
///
/// [`Property`]: crate::domain::Property
/// [`User`]: crate::domain::User
#[derive(Clone, Copy, Debug)]
pub struct Favorite {
    /// [`User`] who likes the [`Property`].
    ///
    /// [`Property`]: crate::domain::Property
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// Liked [`Property`].
    ///
    /// [`Property`]: crate::domain::Property
    pub property_id: property::Id,

    /// [`DateTime`] when the like was recorded.
    pub created_at: CreationDateTime,
}

/// [`DateTime`] when a [`Favorite`] was created.
pub type CreationDateTime = DateTimeOf<(Favorite, unit::Creation)>;
