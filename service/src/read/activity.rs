//! Recent-activity feed definitions.

use common::DateTime;

/// Merged feed of the recent back-office activity.
///
/// Combines the latest properties, contacts and users, newest first.
#[derive(Clone, Debug)]
pub struct Feed {
    /// Items of this [`Feed`], sorted by [`Item::occurred_at`] descending.
    pub items: Vec<Item>,
}

/// Single entry of a [`Feed`].
#[derive(Clone, Debug)]
pub struct Item {
    /// Stable identifier of this [`Item`], unique across sources.
    pub id: String,

    /// [`Source`] this [`Item`] came from.
    pub source: Source,

    /// Headline of this [`Item`].
    pub title: String,

    /// Human-readable description of this [`Item`].
    pub description: String,

    /// [`DateTime`] of the underlying event.
    pub occurred_at: DateTime,

    /// Display [`Hue`] of this [`Item`].
    pub hue: Hue,
}

/// Source of a feed [`Item`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Source {
    /// A property was created.
    Property,

    /// A contact message arrived.
    Contact,

    /// A user signed up.
    User,
}

/// Display hue of a feed [`Item`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Hue {
    /// All good.
    Success,

    /// Needs attention.
    Warning,

    /// Purely informational.
    Info,
}

/// Selector limiting the per-source fetch of a [`Feed`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Limit(pub usize);
