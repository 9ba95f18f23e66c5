//! [`Command`] for creating a new [`User`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Email, Phone, Role};
use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`User`].
///
/// [`Email`] uniqueness is checked here, at the API boundary, not by the
/// storage layer.
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`Email`] of a new [`User`].
    pub email: user::Email,

    /// First name of a new [`User`].
    pub first_name: Option<String>,

    /// Last name of a new [`User`].
    pub last_name: Option<String>,

    /// [`Role`] of a new [`User`].
    pub role: user::Role,

    /// [`Phone`] of a new [`User`].
    pub phone: Option<user::Phone>,
}

impl<Db> Command<CreateUser> for Service<Db>
where
    Db: for<'e> Database<
            Select<By<Option<User>, &'e user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<User>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser {
            email,
            first_name,
            last_name,
            role,
            phone,
        } = cmd;

        let existing = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::EmailOccupied(email)));
        }

        let now = DateTime::now();
        let user = User {
            id: user::Id::new(),
            email,
            first_name,
            last_name,
            role,
            is_active: true,
            phone,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Email`] is already taken.
    #[display("`{_0}` email is occupied")]
    EmailOccupied(#[error(not(source))] user::Email),
}
