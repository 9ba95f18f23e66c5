//! Lookup-entity [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{lookup, Category, Location},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Maps a [`tokio_postgres::Row`] into a [`Location`].
///
/// [`tokio_postgres::Row`]: tokio_postgres::Row
fn location_from_row(row: &tokio_postgres::Row) -> Location {
    Location {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
        city: row.get("city"),
        region: row.get("region"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Vec<Location>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Location>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Location>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, slug, city, region, created_at \
            FROM locations \
            ORDER BY name";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(location_from_row)
            .collect())
    }
}

impl<C, IDs> Database<Select<By<HashMap<lookup::LocationId, Location>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[lookup::LocationId]>,
{
    type Ok = HashMap<lookup::LocationId, Location>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<lookup::LocationId, Location>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[lookup::LocationId] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT id, name, slug, city, region, created_at \
            FROM locations \
            WHERE id = ANY($1::UUID[])";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| {
                let location = location_from_row(row);
                (location.id, location)
            })
            .collect())
    }
}

impl<C, IDs> Database<Select<By<HashMap<lookup::CategoryId, Category>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[lookup::CategoryId]>,
{
    type Ok = HashMap<lookup::CategoryId, Category>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<lookup::CategoryId, Category>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[lookup::CategoryId] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT id, name, slug, created_at \
            FROM categories \
            WHERE id = ANY($1::UUID[])";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let id = row.get("id");
                (
                    id,
                    Category {
                        id,
                        name: row.get("name"),
                        slug: row.get("slug"),
                        created_at: row.get("created_at"),
                    },
                )
            })
            .collect())
    }
}
