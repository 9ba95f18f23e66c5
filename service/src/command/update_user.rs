//! [`Command`] for updating an existing [`User`].

use common::{
    operations::{By, Commit, Select, Transact, Transacted, Update},
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

/// [`Command`] for updating an existing [`User`].
///
/// Absent fields are left untouched. A changed [`Email`] is checked for
/// uniqueness against every other [`User`].
#[derive(Clone, Debug)]
pub struct UpdateUser {
    /// ID of the [`User`] to update.
    pub id: user::Id,

    /// New [`Email`] of the [`User`].
    pub email: Option<user::Email>,

    /// New first name of the [`User`].
    pub first_name: Option<String>,

    /// New last name of the [`User`].
    pub last_name: Option<String>,

    /// New [`Role`] of the [`User`].
    pub role: Option<user::Role>,

    /// New [`Phone`] of the [`User`].
    pub phone: Option<user::Phone>,

    /// New activity flag of the [`User`].
    pub is_active: Option<bool>,
}

impl<Db> Command<UpdateUser> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + for<'e> Database<
            Select<By<Option<User>, &'e user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Update<User>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUser {
            id,
            email,
            first_name,
            last_name,
            role,
            phone,
            is_active,
        } = cmd;

        let mut user = self
            .database()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::NotExists))?;

        if let Some(email) = email {
            let other = self
                .database()
                .execute(Select(By::new(&email)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if other.is_some_and(|u| u.id != id) {
                return Err(tracerr::new!(E::EmailOccupied(email)));
            }
            user.email = email;
        }
        if let Some(first_name) = first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = last_name {
            user.last_name = Some(last_name);
        }
        if let Some(role) = role {
            user.role = role;
        }
        if let Some(phone) = phone {
            user.phone = Some(phone);
        }
        if let Some(is_active) = is_active {
            user.is_active = is_active;
        }
        user.updated_at = DateTime::now().coerce();

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Update(user.clone()))
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

/// Error of [`UpdateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`User`] doesn't exist.
    #[display("`User` doesn't exist")]
    NotExists,

    /// [`user::Email`] is already taken by another [`User`].
    #[display("`{_0}` email is occupied")]
    EmailOccupied(#[error(not(source))] user::Email),
}
