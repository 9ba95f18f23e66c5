//! [`Favorite`]-related read definitions.

use derive_more::{Deref, From, Into};

use crate::domain::{property, user};
#[cfg(doc)]
use crate::domain::{Favorite, Property, User};

/// Number of [`Favorite`]s recorded for a [`Property`].
#[derive(Clone, Copy, Debug, Eq, From, Into, PartialEq)]
pub struct LikesCount(pub usize);

/// Indicator whether a [`User`] likes a [`Property`].
#[derive(Clone, Copy, Debug, Deref, Eq, PartialEq)]
pub struct IsLiked(pub bool);

impl PartialEq<bool> for IsLiked {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}

/// ([`User`], [`Property`]) pair a [`Favorite`] is keyed by.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Pair {
    /// [`User`] side of the pair.
    pub user_id: user::Id,

    /// [`Property`] side of the pair.
    pub property_id: property::Id,
}
