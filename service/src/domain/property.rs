//! [`Property`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{lookup, user};

/// Real-estate property listed in the catalog.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Title`] of this [`Property`].
    pub title: Title,

    /// [`Slug`] of this [`Property`], derived from its [`Title`].
    ///
    /// Best-effort only: collisions are not handled.
    pub slug: Slug,

    /// Description of this [`Property`].
    pub description: Option<String>,

    /// Price of this [`Property`].
    pub price: Money,

    /// [`PriceType`] of this [`Property`].
    pub price_type: PriceType,

    /// [`Kind`] of this [`Property`].
    pub kind: Kind,

    /// [`Status`] of this [`Property`].
    pub status: Status,

    /// Number of bedrooms in this [`Property`].
    pub bedrooms: Option<u16>,

    /// Number of bathrooms in this [`Property`].
    pub bathrooms: Option<u16>,

    /// Living surface of this [`Property`] in square meters.
    pub surface_area: Option<Decimal>,

    /// Land size of this [`Property`] in square meters.
    pub land_size: Option<Decimal>,

    /// [`Address`] of this [`Property`].
    pub address: Option<Address>,

    /// [`Location`] this [`Property`] belongs to.
    ///
    /// [`Location`]: crate::domain::Location
    pub location_id: Option<lookup::LocationId>,

    /// [`Category`] this [`Property`] belongs to.
    ///
    /// [`Category`]: crate::domain::Category
    pub category_id: Option<lookup::CategoryId>,

    /// Agent [`User`] responsible for this [`Property`].
    ///
    /// [`User`]: crate::domain::User
    pub agent_id: Option<user::Id>,

    /// Indicator whether this [`Property`] is visible in the public catalog.
    pub is_published: bool,

    /// Indicator whether this [`Property`] is featured on the landing page.
    pub is_featured: bool,

    /// Number of times the public page of this [`Property`] was visited.
    pub views_count: u32,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Property`] was last updated.
    pub updated_at: UpdateDateTime,
}

/// ID of a [`Property`].
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
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Title of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 512
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// URL slug of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Slug(String);

impl Slug {
    /// Derives a new [`Slug`] from the provided [`Title`].
    ///
    /// Lowercases the title, folds the French accented letters, and collapses
    /// every other non-alphanumeric run into a single `-`. Uniqueness is not
    /// guaranteed.
    #[must_use]
    pub fn derive(title: &Title) -> Self {
        let mut slug = String::with_capacity(AsRef::<str>::as_ref(title).len());
        for c in AsRef::<str>::as_ref(title).chars().flat_map(char::to_lowercase) {
            let c = fold_accent(c);
            if c.is_ascii_alphanumeric() {
                slug.push(c);
            } else if !slug.ends_with('-') && !slug.is_empty() {
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            _ = slug.pop();
        }
        Self(slug)
    }
}

impl FromStr for Slug {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        (!s.is_empty() && s.len() <= 512)
            .then(|| Self(s.to_owned()))
            .ok_or("invalid `Slug`")
    }
}

/// Folds a French accented letter into its base ASCII letter.
const fn fold_accent(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' => 'a',
        'ç' => 'c',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' => 'i',
        'ô' | 'ö' => 'o',
        'ù' | 'û' | 'ü' => 'u',
        c => c,
    }
}

/// Address of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address && !address.is_empty() && address.len() <= 512
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// Kind of a [`Property`].
///
/// Canonical vocabulary of the API surface. The storage layer speaks the
/// localized vocabulary of the legacy schema; the mapping lives in the
/// Postgres adapter.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Kind {
    /// An apartment in a building.
    Apartment,

    /// A standalone house.
    House,

    /// A plot of land.
    Land,

    /// A commercial space.
    Commercial,

    /// An office space.
    Office,
}

define_kind! {
    #[doc = "Availability status of a [`Property`]."]
    enum Status {
        #[doc = "Available for sale or rent."]
        Available = 1,

        #[doc = "Already sold."]
        Sold = 2,

        #[doc = "Already rented out."]
        Rented = 3,

        #[doc = "Transaction in progress."]
        Pending = 4,
    }
}

define_kind! {
    #[doc = "Pricing model of a [`Property`]."]
    enum PriceType {
        #[doc = "One-off price."]
        Fixed = 1,

        #[doc = "Price per month."]
        PerMonth = 2,

        #[doc = "Price per square meter per month."]
        PerSqmPerMonth = 3,
    }
}

/// Image of a [`Property`].
#[derive(Clone, Debug)]
pub struct PropertyImage {
    /// ID of the [`Property`] this [`PropertyImage`] belongs to.
    pub property_id: Id,

    /// URL of this [`PropertyImage`].
    pub url: String,

    /// Alternative text of this [`PropertyImage`].
    pub alt_text: String,

    /// Indicator whether this [`PropertyImage`] is the primary one of its
    /// [`Property`].
    pub is_primary: bool,

    /// Position of this [`PropertyImage`] in the gallery.
    pub sort_order: i32,
}

/// Draft of a [`PropertyImage`] not yet bound to a [`Property`].
#[derive(Clone, Debug)]
pub struct NewImage {
    /// URL of the image.
    pub url: String,

    /// Alternative text of the image.
    pub alt_text: Option<String>,

    /// Indicator whether the image should be the primary one.
    pub is_primary: bool,
}

impl NewImage {
    /// Binds this [`NewImage`] to a [`Property`] at the provided gallery
    /// position.
    ///
    /// The image at position 0 always becomes primary, whether flagged or
    /// not.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn into_image(self, property_id: Id, position: usize) -> PropertyImage {
        PropertyImage {
            property_id,
            url: self.url,
            alt_text: self.alt_text.unwrap_or_default(),
            is_primary: self.is_primary || position == 0,
            sort_order: i32::try_from(position).expect("gallery overflow"),
        }
    }
}

/// Attachment of a [`Feature`] to a [`Property`].
///
/// [`Feature`]: crate::domain::Feature
#[derive(Clone, Copy, Debug)]
pub struct PropertyFeature {
    /// ID of the [`Property`].
    pub property_id: Id,

    /// ID of the attached [`Feature`].
    ///
    /// [`Feature`]: crate::domain::Feature
    pub feature_id: lookup::FeatureId,
}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;

/// [`DateTime`] when a [`Property`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Property, unit::Update)>;

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{Kind, Slug, Title};

    fn title(s: &str) -> Title {
        Title::new(s).unwrap()
    }

    #[test]
    fn slug_derivation() {
        assert_eq!(
            Slug::derive(&title("Villa moderne à Bastos")).as_ref(),
            "villa-moderne-a-bastos",
        );
        assert_eq!(
            Slug::derive(&title("Appartement 3 pièces — Douala")).as_ref(),
            "appartement-3-pieces-douala",
        );
        assert_eq!(
            Slug::derive(&title("Terrain titré (500 m2)")).as_ref(),
            "terrain-titre-500-m2",
        );
        assert_eq!(Slug::derive(&title("---")).as_ref(), "");
    }

    #[test]
    fn kind_vocabulary_is_english_snake_case() {
        assert_eq!(Kind::Apartment.to_string(), "apartment");
        assert_eq!(Kind::from_str("office").unwrap(), Kind::Office);
        assert!(Kind::from_str("appartement").is_err());
    }
}
