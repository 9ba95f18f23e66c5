//! Domain definitions.

pub mod contact;
pub mod favorite;
pub mod lookup;
pub mod property;
pub mod user;

pub use self::{
    contact::Contact,
    favorite::Favorite,
    lookup::{Category, Feature, Location},
    property::{Property, PropertyFeature, PropertyImage},
    user::User,
};
