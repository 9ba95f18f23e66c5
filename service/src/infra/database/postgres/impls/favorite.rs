//! [`Favorite`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{property, Favorite},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::favorite::{IsLiked, LikesCount, Pair},
};

impl<C> Database<Select<By<Option<Favorite>, Pair>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Favorite>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Favorite>, Pair>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Pair {
            user_id,
            property_id,
        } = by.into_inner();

        const SQL: &str = "\
            SELECT user_id, property_id, created_at \
            FROM favorites \
            WHERE user_id = $1::UUID \
              AND property_id = $2::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&user_id, &property_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map(|row| Favorite {
                    user_id: row.get("user_id"),
                    property_id: row.get("property_id"),
                    created_at: row.get("created_at"),
                })
            })
    }
}

impl<C> Database<Select<By<LikesCount, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = LikesCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<LikesCount, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM favorites \
            WHERE property_id = $1::UUID";
        self.query_opt(SQL, &[&property_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                let count =
                    row.expect("always exists").get::<_, i64>(0);
                usize::try_from(count).expect("non-negative count").into()
            })
    }
}

impl<C> Database<Select<By<IsLiked, Pair>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Option<Favorite>, Pair>>,
        Ok = Option<Favorite>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = IsLiked;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<IsLiked, Pair>>,
    ) -> Result<Self::Ok, Self::Err> {
        let pair = by.into_inner();

        let favorite: Option<Favorite> = self
            .execute(Select(By::new(pair)))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(IsLiked(favorite.is_some()))
    }
}

impl<C> Database<Insert<Favorite>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(favorite): Insert<Favorite>,
    ) -> Result<Self::Ok, Self::Err> {
        let Favorite {
            user_id,
            property_id,
            created_at,
        } = favorite;

        const SQL: &str = "\
            INSERT INTO favorites (user_id, property_id, created_at) \
            VALUES ($1::UUID, $2::UUID, $3::TIMESTAMPTZ)";
        self.exec(SQL, &[&user_id, &property_id, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Favorite, Pair>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Favorite, Pair>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Pair {
            user_id,
            property_id,
        } = by.into_inner();

        const SQL: &str = "\
            DELETE FROM favorites \
            WHERE user_id = $1::UUID \
              AND property_id = $2::UUID";
        self.exec(SQL, &[&user_id, &property_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
