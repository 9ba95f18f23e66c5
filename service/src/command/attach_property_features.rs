//! [`Command`] replacing the features of a [`Property`].

use common::operations::{By, Commit, Delete, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Feature;
use crate::{
    domain::{lookup, property, Property, PropertyFeature},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] replacing the whole [`Feature`] set of a [`Property`] with
/// the provided one.
///
/// An empty list leaves the existing set untouched.
#[derive(Clone, Debug)]
pub struct AttachPropertyFeatures {
    /// ID of the [`Property`] to attach the features to.
    pub property_id: property::Id,

    /// Replacement [`Feature`] set.
    pub features: Vec<lookup::FeatureId>,
}

impl<Db> Command<AttachPropertyFeatures> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Vec<PropertyFeature>, property::Id>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Vec<PropertyFeature>>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AttachPropertyFeatures,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AttachPropertyFeatures {
            property_id,
            features,
        } = cmd;

        if features.is_empty() {
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

        tx.execute(Delete(By::<Vec<PropertyFeature>, _>::new(property.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let features = features
            .into_iter()
            .map(|feature_id| PropertyFeature {
                property_id: property.id,
                feature_id,
            })
            .collect::<Vec<_>>();
        tx.execute(Insert(features))
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

/// Error of [`AttachPropertyFeatures`] [`Command`] execution.
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
