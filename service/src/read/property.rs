//! [`Property`]-related read definitions.

use crate::domain::{Category, Location, Property, PropertyImage};

/// Fully-assembled public listing of a [`Property`].
#[derive(Clone, Debug)]
pub struct Listing {
    /// The [`Property`] itself.
    pub property: Property,

    /// [`Location`] the [`Property`] belongs to.
    pub location: Option<Location>,

    /// [`Category`] the [`Property`] is filed under.
    pub category: Option<Category>,

    /// Gallery of the [`Property`].
    pub images: Vec<PropertyImage>,
}

/// Selector of the featured [`Listing`]s.
///
/// When no published property is featured, the newest published ones are
/// served instead.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Featured {
    /// Maximum number of [`Listing`]s to return.
    pub limit: usize,
}

pub mod list {
    //! [`Listing`] list definitions.

    use common::pagination;
    use rust_decimal::Decimal;
    use serde::Deserialize;

    use crate::domain::{lookup, property};
    #[cfg(doc)]
    use crate::domain::Property;

    use super::Listing;

    /// A [`Page`] of [`Listing`]s.
    ///
    /// [`Page`]: pagination::Page
    pub type Page = pagination::Page<Listing>;

    /// Arguments for selecting a [`Page`].
    pub type Arguments = pagination::Arguments;

    /// [`Page`] selector.
    ///
    /// The whole [`Selector`] is the cache key of a listing page, so every
    /// part of it is hashable.
    #[derive(Clone, Debug, Eq, Hash, PartialEq)]
    pub struct Selector {
        /// Pagination [`Arguments`].
        pub arguments: Arguments,

        /// [`Filter`] of the selection.
        pub filter: Filter,

        /// [`Sort`] order of the selection.
        pub sort: Sort,
    }

    /// Filter of [`Listing`]s.
    ///
    /// Absent fields add no predicate; present ones are ANDed together on
    /// top of the implicit `is_published` predicate.
    #[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Filter {
        /// Free-text needle searched case-insensitively in the title,
        /// description and address of a [`Property`].
        pub search: Option<String>,

        /// [`property::Kind`] to filter by.
        pub kind: Option<property::Kind>,

        /// Minimum price to filter by.
        pub min_price: Option<Decimal>,

        /// Maximum price to filter by.
        pub max_price: Option<Decimal>,

        /// [`Location`] to filter by.
        ///
        /// [`Location`]: crate::domain::Location
        pub location_id: Option<lookup::LocationId>,

        /// Exact number of bedrooms to filter by.
        pub bedrooms: Option<u16>,

        /// Exact number of bathrooms to filter by.
        pub bathrooms: Option<u16>,
    }

    /// Sort order of [`Listing`]s.
    ///
    /// Equal sort keys have no defined tie-break.
    #[derive(
        Clone,
        Copy,
        Debug,
        Default,
        Deserialize,
        Eq,
        Hash,
        PartialEq,
        strum::Display,
        strum::EnumString,
    )]
    #[serde(rename_all = "snake_case")]
    #[strum(serialize_all = "snake_case")]
    pub enum Sort {
        /// Cheapest first.
        PriceAsc,

        /// Most expensive first.
        PriceDesc,

        /// Oldest first.
        DateAsc,

        /// Newest first.
        #[default]
        DateDesc,
    }
}
