//! [`Command`] for deleting a [`Property`].

use common::operations::{By, Delete};
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Property`].
///
/// Images, features and favorites of the [`Property`] go away with it.
/// Deleting a missing [`Property`] is a no-op.
#[derive(Clone, Copy, Debug)]
pub struct DeleteProperty {
    /// ID of the [`Property`] to delete.
    pub id: property::Id,
}

impl<Db> Command<DeleteProperty> for Service<Db>
where
    Db: Database<Delete<By<Property, property::Id>>, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteProperty) -> Result<Self::Ok, Self::Err> {
        let DeleteProperty { id } = cmd;

        self.database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

/// Error of [`DeleteProperty`] [`Command`] execution.
pub type ExecutionError = database::Error;
