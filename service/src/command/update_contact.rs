//! [`Command`] for updating a [`Contact`].

use common::{
    operations::{By, Commit, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{contact, Contact},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] overwriting the status and/or notes of a [`Contact`].
///
/// The status is a direct overwrite: no transition between the workflow
/// states is guarded.
#[derive(Clone, Debug)]
pub struct UpdateContact {
    /// ID of the [`Contact`] to update.
    pub id: contact::Id,

    /// New [`contact::Status`] of the [`Contact`].
    pub status: Option<contact::Status>,

    /// New notes of the [`Contact`].
    pub notes: Option<String>,
}

impl<Db> Command<UpdateContact> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Contact>, contact::Id>>,
            Ok = Option<Contact>,
            Err = Traced<database::Error>,
        > + Database<Update<Contact>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Contact;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateContact) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateContact { id, status, notes } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut contact = tx
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::NotExists))?;

        if let Some(status) = status {
            contact.status = status;
        }
        if let Some(notes) = notes {
            contact.notes = Some(notes);
        }
        contact.updated_at = DateTime::now().coerce();

        tx.execute(Update(contact.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(contact)
    }
}

/// Error of [`UpdateContact`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Contact`] doesn't exist.
    #[display("`Contact` doesn't exist")]
    NotExists,
}
