//! [`Command`] definitions.

pub mod attach_property_features;
pub mod attach_property_images;
pub mod create_contact;
pub mod create_property;
pub mod create_user;
pub mod delete_contact;
pub mod delete_property;
pub mod delete_user;
pub mod toggle_favorite;
pub mod update_contact;
pub mod update_property;
pub mod update_user;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    attach_property_features::AttachPropertyFeatures,
    attach_property_images::AttachPropertyImages,
    create_contact::CreateContact, create_property::CreateProperty,
    create_user::CreateUser, delete_contact::DeleteContact,
    delete_property::DeleteProperty, delete_user::DeleteUser,
    toggle_favorite::ToggleFavorite, update_contact::UpdateContact,
    update_property::UpdateProperty, update_user::UpdateUser,
};
