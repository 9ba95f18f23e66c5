//! [`Command`] for deleting a [`User`].

use common::operations::{By, Commit, Delete, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for deleting a [`User`].
///
/// The last remaining admin cannot be deleted.
#[derive(Clone, Copy, Debug)]
pub struct DeleteUser {
    /// ID of the [`User`] to delete.
    pub id: user::Id,
}

impl<Db> Command<DeleteUser> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::user::AdminCount, ()>>,
            Ok = read::user::AdminCount,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Delete<By<User, user::Id>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteUser { id } = cmd;

        let user = self
            .database()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::NotExists))?;

        if user.role == user::Role::Admin {
            let admins: read::user::AdminCount = self
                .database()
                .execute(Select(By::new(())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if usize::from(admins) <= 1 {
                return Err(tracerr::new!(E::LastAdmin));
            }
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Delete(By::new(id)))
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

/// Error of [`DeleteUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`User`] doesn't exist.
    #[display("`User` doesn't exist")]
    NotExists,

    /// [`User`] is the last remaining admin.
    #[display("`User` is the last remaining admin")]
    LastAdmin,
}

#[cfg(test)]
mod spec {
    use std::sync::{Arc, Mutex};

    use common::{
        operations::{By, Commit, Delete, Select, Transact},
        DateTime,
    };
    use tracerr::Traced;

    use crate::{
        domain::{user, User},
        infra::{database, Database},
        read, Command as _, Service,
    };

    use super::{DeleteUser, ExecutionError};

    /// In-memory [`Database`] of [`User`]s.
    #[derive(Clone, Debug, Default)]
    struct MockDb(Arc<Mutex<Vec<User>>>);

    impl MockDb {
        fn with_users(users: impl IntoIterator<Item = User>) -> Self {
            Self(Arc::new(Mutex::new(users.into_iter().collect())))
        }

        fn len(&self) -> usize {
            self.0.lock().unwrap().len()
        }
    }

    impl Database<Select<By<Option<User>, user::Id>>> for MockDb {
        type Ok = Option<User>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Option<User>, user::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            let id = by.into_inner();
            Ok(self.0.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }
    }

    impl Database<Select<By<read::user::AdminCount, ()>>> for MockDb {
        type Ok = read::user::AdminCount;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            _: Select<By<read::user::AdminCount, ()>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .iter()
                .filter(|u| u.role == user::Role::Admin)
                .count()
                .into())
        }
    }

    impl Database<Transact> for MockDb {
        type Ok = Self;
        type Err = Traced<database::Error>;

        async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
            Ok(self.clone())
        }
    }

    impl Database<Delete<By<User, user::Id>>> for MockDb {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Delete(by): Delete<By<User, user::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            let id = by.into_inner();
            self.0.lock().unwrap().retain(|u| u.id != id);
            Ok(())
        }
    }

    impl Database<Commit> for MockDb {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    fn user(email: &str, role: user::Role) -> User {
        let now = DateTime::now();
        User {
            id: user::Id::new(),
            email: user::Email::new(email).unwrap(),
            first_name: None,
            last_name: None,
            role,
            is_active: true,
            phone: None,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }

    #[tokio::test]
    async fn refuses_to_delete_the_last_admin() {
        let admin = user("admin@example.cm", user::Role::Admin);
        let admin_id = admin.id;
        let db = MockDb::with_users([
            admin,
            user("client@example.cm", user::Role::Client),
        ]);
        let service = Service::new(db.clone());

        let result = service.execute(DeleteUser { id: admin_id }).await;
        assert!(matches!(
            result.unwrap_err().as_ref(),
            ExecutionError::LastAdmin,
        ));
        assert_eq!(db.len(), 2);
    }

    #[tokio::test]
    async fn deletes_an_admin_when_another_remains() {
        let admin = user("admin@example.cm", user::Role::Admin);
        let admin_id = admin.id;
        let db = MockDb::with_users([
            admin,
            user("backup@example.cm", user::Role::Admin),
        ]);
        let service = Service::new(db.clone());

        service.execute(DeleteUser { id: admin_id }).await.unwrap();
        assert_eq!(db.len(), 1);
    }

    #[tokio::test]
    async fn deletes_a_regular_user() {
        let client = user("client@example.cm", user::Role::Client);
        let client_id = client.id;
        let db = MockDb::with_users([
            user("admin@example.cm", user::Role::Admin),
            client,
        ]);
        let service = Service::new(db.clone());

        service.execute(DeleteUser { id: client_id }).await.unwrap();
        assert_eq!(db.len(), 1);
    }

    #[tokio::test]
    async fn missing_user_is_reported() {
        let db = MockDb::default();
        let service = Service::new(db);

        let result = service
            .execute(DeleteUser { id: user::Id::new() })
            .await;
        assert!(matches!(
            result.unwrap_err().as_ref(),
            ExecutionError::NotExists,
        ));
    }
}
