//! [`Command`] for deleting a [`Contact`].

use common::operations::{By, Delete};
use tracerr::Traced;

use crate::{
    domain::{contact, Contact},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Contact`].
///
/// Deleting a missing [`Contact`] is a no-op.
#[derive(Clone, Copy, Debug)]
pub struct DeleteContact {
    /// ID of the [`Contact`] to delete.
    pub id: contact::Id,
}

impl<Db> Command<DeleteContact> for Service<Db>
where
    Db: Database<Delete<By<Contact, contact::Id>>, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteContact) -> Result<Self::Ok, Self::Err> {
        let DeleteContact { id } = cmd;

        self.database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

/// Error of [`DeleteContact`] [`Command`] execution.
pub type ExecutionError = database::Error;
