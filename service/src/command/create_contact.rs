//! [`Command`] for recording a new [`Contact`].

use common::{
    operations::{Commit, Insert, Transact, Transacted},
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

/// [`Command`] recording a public contact form submission.
///
/// The whole form is validated first; nothing is persisted on a validation
/// failure.
#[derive(Clone, Debug)]
pub struct CreateContact {
    /// Raw [`contact::Form`] as submitted.
    pub form: contact::Form,
}

impl<Db> Command<CreateContact> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Contact>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Contact;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateContact) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateContact { form } = cmd;

        form.validate()
            .map_err(|v| tracerr::new!(E::Invalid(v)))?;

        let contact::Form {
            first_name,
            last_name,
            email,
            phone,
            subject,
            message,
            property_id,
        } = form;

        let now = DateTime::now();
        let contact = Contact {
            id: contact::Id::new(),
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            phone: phone.filter(|p| !p.is_empty()),
            subject,
            message: message.unwrap_or_default(),
            property_id,
            status: contact::Status::New,
            notes: None,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(contact.clone()))
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

/// Error of [`CreateContact`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Submitted [`contact::Form`] is invalid.
    #[display("{_0}")]
    Invalid(contact::Violations),
}
