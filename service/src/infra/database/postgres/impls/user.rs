//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        database::{
            self,
            postgres::{Connection, LikePattern},
            Postgres,
        },
        Database,
    },
    read,
};

/// Maps a [`tokio_postgres::Row`] into a [`User`].
///
/// [`tokio_postgres::Row`]: tokio_postgres::Row
fn user_from_row(row: &tokio_postgres::Row) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        role: row.get("role"),
        is_active: row.get("is_active"),
        phone: row.get("phone"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Columns selected for a [`User`].
const USER_COLUMNS: &str = "\
    id, email, first_name, last_name, \
    role, is_active, phone, \
    created_at, updated_at";

impl<C> Database<Select<By<Option<User>, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: user::Id = by.into_inner();

        let sql = format!(
            "SELECT {USER_COLUMNS} \
             FROM users \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(user_from_row))
    }
}

impl<'e, C> Database<Select<By<Option<User>, &'e user::Email>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &'e user::Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let email: &user::Email = by.into_inner();

        let sql = format!(
            "SELECT {USER_COLUMNS} \
             FROM users \
             WHERE email = $1::VARCHAR \
             LIMIT 1",
        );
        self.query_opt(&sql, &[email])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(user_from_row))
    }
}

impl<C> Database<Select<By<read::user::AdminCount, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::user::AdminCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::user::AdminCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM users \
            WHERE role = $1::INT2";
        self.query_opt(SQL, &[&user::Role::Admin])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                let count =
                    row.expect("always exists").get::<_, i64>(0);
                usize::try_from(count).expect("non-negative count").into()
            })
    }
}

impl<C> Database<Select<By<read::user::list::Page, read::user::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::user::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::user::list::Page, read::user::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::user::list::Selector { arguments, filter } = by.into_inner();
        let read::user::list::Filter { search, role } = filter;

        let search = search.map(|s| LikePattern::contains(&s));

        // The page query and the count query share this very predicate set.
        let mut ps: Vec<&(dyn ToSql + Sync)> = Vec::new();
        let mut predicates = vec!["true".to_owned()];
        if let Some(p) = &search {
            ps.push(p);
            let i = ps.len();
            predicates.push(format!(
                "(first_name ILIKE ${i}::VARCHAR \
                  OR last_name ILIKE ${i}::VARCHAR \
                  OR email ILIKE ${i}::VARCHAR)",
            ));
        }
        if let Some(r) = &role {
            ps.push(r);
            predicates.push(format!("role = ${}::INT2", ps.len()));
        }
        let where_sql = predicates.join(" AND ");

        let count_sql =
            format!("SELECT COUNT(*)::INT8 FROM users WHERE {where_sql}");
        let total = self
            .query_opt(&count_sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .expect("always exists")
            .get::<_, i64>(0);
        let total = usize::try_from(total).expect("non-negative count");

        let limit = i64::try_from(arguments.limit).unwrap();
        let offset = i64::try_from(arguments.offset()).unwrap();
        ps.push(&limit);
        let limit_idx = ps.len();
        ps.push(&offset);
        let offset_idx = ps.len();

        let page_sql = format!(
            "SELECT {USER_COLUMNS} \
             FROM users \
             WHERE {where_sql} \
             ORDER BY created_at DESC \
             LIMIT ${limit_idx}::INT8 \
             OFFSET ${offset_idx}::INT8",
        );
        let users = self
            .query(&page_sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(user_from_row)
            .collect::<Vec<_>>();

        Ok(read::user::list::Page::new(arguments, users, total))
    }
}

impl<C> Database<Insert<User>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<User>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(user)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<User>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(user): Update<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let User {
            id,
            email,
            first_name,
            last_name,
            role,
            is_active,
            phone,
            created_at,
            updated_at,
        } = user;

        const SQL: &str = "\
            INSERT INTO users (\
                id, email, first_name, last_name, \
                role, is_active, phone, \
                created_at, updated_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::INT2, $6::BOOL, $7::VARCHAR, \
                $8::TIMESTAMPTZ, $9::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET email = EXCLUDED.email, \
                first_name = EXCLUDED.first_name, \
                last_name = EXCLUDED.last_name, \
                role = EXCLUDED.role, \
                is_active = EXCLUDED.is_active, \
                phone = EXCLUDED.phone, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &email,
                &first_name,
                &last_name,
                &role,
                &is_active,
                &phone,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<User, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<User, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: user::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM users \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
