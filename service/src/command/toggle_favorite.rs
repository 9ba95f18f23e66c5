//! [`Command`] toggling a [`Favorite`] on or off.

use common::{
    operations::{By, Commit, Delete, Insert, Select, Transact, Transacted},
    DateTime,
};
use tracerr::Traced;

use crate::{
    domain::{property, user, Favorite},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] toggling a [`Favorite`] of one user for one property.
///
/// Read-then-write: no uniqueness constraint backs the toggle, so two
/// concurrent calls for the same pair may both insert or both delete.
#[derive(Clone, Copy, Debug)]
pub struct ToggleFavorite {
    /// [`User`] toggling the like.
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// [`Property`] being liked or unliked.
    ///
    /// [`Property`]: crate::domain::Property
    pub property_id: property::Id,
}

/// Outcome of a [`ToggleFavorite`] [`Command`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    /// A [`Favorite`] was recorded.
    Liked,

    /// An existing [`Favorite`] was removed.
    Unliked,
}

impl<Db> Command<ToggleFavorite> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Favorite>, read::favorite::Pair>>,
            Ok = Option<Favorite>,
            Err = Traced<database::Error>,
        > + Database<Insert<Favorite>, Err = Traced<database::Error>>
        + Database<
            Delete<By<Favorite, read::favorite::Pair>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Action;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ToggleFavorite) -> Result<Self::Ok, Self::Err> {
        let ToggleFavorite {
            user_id,
            property_id,
        } = cmd;

        let pair = read::favorite::Pair {
            user_id,
            property_id,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;

        let existing = tx
            .execute(Select(By::new(pair)))
            .await
            .map_err(tracerr::wrap!())?;

        let action = if existing.is_some() {
            tx.execute(Delete(By::new(pair)))
                .await
                .map_err(tracerr::wrap!())
                .map(drop)?;
            Action::Unliked
        } else {
            let favorite = Favorite {
                user_id,
                property_id,
                created_at: DateTime::now().coerce(),
            };
            tx.execute(Insert(favorite))
                .await
                .map_err(tracerr::wrap!())
                .map(drop)?;
            Action::Liked
        };

        tx.execute(Commit)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(action)
    }
}

/// Error of [`ToggleFavorite`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use std::sync::{Arc, Mutex};

    use common::operations::{By, Commit, Delete, Insert, Select, Transact};
    use tracerr::Traced;

    use crate::{
        domain::{property, user, Favorite},
        infra::{database, Database},
        read, Command as _, Service,
    };

    use super::{Action, ToggleFavorite};

    /// In-memory [`Database`] of [`Favorite`]s.
    #[derive(Clone, Debug, Default)]
    struct MockDb(Arc<Mutex<Vec<Favorite>>>);

    impl MockDb {
        fn likes_of(&self, property_id: property::Id) -> usize {
            self.0
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.property_id == property_id)
                .count()
        }
    }

    impl Database<Transact> for MockDb {
        type Ok = Self;
        type Err = Traced<database::Error>;

        async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
            Ok(self.clone())
        }
    }

    impl Database<Select<By<Option<Favorite>, read::favorite::Pair>>> for MockDb {
        type Ok = Option<Favorite>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Option<Favorite>, read::favorite::Pair>>,
        ) -> Result<Self::Ok, Self::Err> {
            let pair = by.into_inner();
            Ok(self
                .0
                .lock()
                .unwrap()
                .iter()
                .find(|f| {
                    f.user_id == pair.user_id
                        && f.property_id == pair.property_id
                })
                .copied())
        }
    }

    impl Database<Insert<Favorite>> for MockDb {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Insert(favorite): Insert<Favorite>,
        ) -> Result<Self::Ok, Self::Err> {
            self.0.lock().unwrap().push(favorite);
            Ok(())
        }
    }

    impl Database<Delete<By<Favorite, read::favorite::Pair>>> for MockDb {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Delete(by): Delete<By<Favorite, read::favorite::Pair>>,
        ) -> Result<Self::Ok, Self::Err> {
            let pair = by.into_inner();
            self.0.lock().unwrap().retain(|f| {
                f.user_id != pair.user_id || f.property_id != pair.property_id
            });
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

    #[tokio::test]
    async fn toggling_twice_returns_to_the_original_state() {
        let db = MockDb::default();
        let service = Service::new(db.clone());
        let toggle = ToggleFavorite {
            user_id: user::Id::new(),
            property_id: property::Id::new(),
        };

        let action = service.execute(toggle).await.unwrap();
        assert_eq!(action, Action::Liked);
        assert_eq!(db.likes_of(toggle.property_id), 1);

        let action = service.execute(toggle).await.unwrap();
        assert_eq!(action, Action::Unliked);
        assert_eq!(db.likes_of(toggle.property_id), 0);
    }

    #[tokio::test]
    async fn likes_of_distinct_users_are_independent() {
        let db = MockDb::default();
        let service = Service::new(db.clone());
        let property_id = property::Id::new();

        let first = ToggleFavorite {
            user_id: user::Id::new(),
            property_id,
        };
        let second = ToggleFavorite {
            user_id: user::Id::new(),
            property_id,
        };

        _ = service.execute(first).await.unwrap();
        _ = service.execute(second).await.unwrap();
        assert_eq!(db.likes_of(property_id), 2);

        let action = service.execute(first).await.unwrap();
        assert_eq!(action, Action::Unliked);
        assert_eq!(db.likes_of(property_id), 1);
    }
}
