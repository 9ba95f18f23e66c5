//! Named lookup entities referenced by properties.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Neighbourhood a [`Property`] is located in.
///
/// [`Property`]: crate::domain::Property
#[derive(Clone, Debug)]
pub struct Location {
    /// ID of this [`Location`].
    pub id: LocationId,

    /// Name of this [`Location`].
    pub name: String,

    /// URL slug of this [`Location`].
    pub slug: String,

    /// City this [`Location`] belongs to.
    pub city: String,

    /// Region this [`Location`] belongs to.
    pub region: Option<String>,

    /// [`DateTime`] when this [`Location`] was created.
    pub created_at: DateTimeOf<(Location, unit::Creation)>,
}

/// ID of a [`Location`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct LocationId(Uuid);

impl LocationId {
    /// Creates a new random [`LocationId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Catalog category a [`Property`] is filed under.
///
/// [`Property`]: crate::domain::Property
#[derive(Clone, Debug)]
pub struct Category {
    /// ID of this [`Category`].
    pub id: CategoryId,

    /// Name of this [`Category`].
    pub name: String,

    /// URL slug of this [`Category`].
    pub slug: String,

    /// [`DateTime`] when this [`Category`] was created.
    pub created_at: DateTimeOf<(Category, unit::Creation)>,
}

/// ID of a [`Category`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct CategoryId(Uuid);

impl CategoryId {
    /// Creates a new random [`CategoryId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Amenity a [`Property`] may offer.
///
/// [`Property`]: crate::domain::Property
#[derive(Clone, Debug)]
pub struct Feature {
    /// ID of this [`Feature`].
    pub id: FeatureId,

    /// Name of this [`Feature`].
    pub name: String,

    /// URL slug of this [`Feature`].
    pub slug: Option<String>,
}

/// ID of a [`Feature`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct FeatureId(Uuid);

impl FeatureId {
    /// Creates a new random [`FeatureId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}
