//! [`Command`] replacing the gallery of a [`Property`].

use common::operations::{By, Commit, Delete, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, Property, PropertyImage},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] replacing the whole gallery of a [`Property`] with the
/// provided images.
///
/// An empty list leaves the existing gallery untouched.
#[derive(Clone, Debug)]
pub struct AttachPropertyImages {
    /// ID of the [`Property`] to attach the images to.
    pub property_id: property::Id,

    /// Replacement gallery.
    pub images: Vec<property::NewImage>,
}

impl<Db> Command<AttachPropertyImages> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Vec<PropertyImage>, property::Id>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Vec<PropertyImage>>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AttachPropertyImages,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AttachPropertyImages {
            property_id,
            images,
        } = cmd;

        if images.is_empty() {
            return Ok(());
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let property = tx
            .execute(Select(By::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::NotExists))?;

        tx.execute(Delete(By::<Vec<PropertyImage>, _>::new(property.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let images = images
            .into_iter()
            .enumerate()
            .map(|(i, img)| img.into_image(property.id, i))
            .collect::<Vec<_>>();
        tx.execute(Insert(images))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(())
    }
}

/// Error of [`AttachPropertyImages`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property` doesn't exist")]
    NotExists,
}
