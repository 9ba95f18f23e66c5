//! [`Contact`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Select, Update};
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{contact, property, Contact},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::contact::{list, Item, PropertySummary, Stats},
};

/// Columns selected for a [`Contact`].
const CONTACT_COLUMNS: &str = "\
    id, first_name, last_name, email, phone, \
    subject, message, property_id, \
    status, notes, \
    created_at, updated_at";

/// Maps a [`tokio_postgres::Row`] into a [`Contact`].
///
/// [`tokio_postgres::Row`]: tokio_postgres::Row
fn contact_from_row(row: &tokio_postgres::Row) -> Contact {
    Contact {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        phone: row.get("phone"),
        subject: row.get("subject"),
        message: row.get("message"),
        property_id: row.get("property_id"),
        status: row.get("status"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Option<Contact>, contact::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Contact>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Contact>, contact::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: contact::Id = by.into_inner();

        let sql = format!(
            "SELECT {CONTACT_COLUMNS} \
             FROM contacts \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(contact_from_row))
    }
}

impl<C>
    Database<
        Select<By<HashMap<property::Id, PropertySummary>, Vec<property::Id>>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = HashMap<property::Id, PropertySummary>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<HashMap<property::Id, PropertySummary>, Vec<property::Id>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT id, title, slug \
            FROM properties \
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
                    PropertySummary {
                        id,
                        title: row.get("title"),
                        slug: row.get("slug"),
                    },
                )
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<Item>, contact::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
            Select<By<Option<Contact>, contact::Id>>,
            Ok = Option<Contact>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<HashMap<property::Id, PropertySummary>, Vec<property::Id>>,
            >,
            Ok = HashMap<property::Id, PropertySummary>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<Item>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Item>, contact::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let contact: Option<Contact> = self
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::wrap!())?;
        let Some(contact) = contact else {
            return Ok(None);
        };

        let mut properties: HashMap<property::Id, PropertySummary> = self
            .execute(Select(By::new(
                contact.property_id.into_iter().collect::<Vec<_>>(),
            )))
            .await
            .map_err(tracerr::wrap!())?;

        let property =
            contact.property_id.and_then(|id| properties.remove(&id));
        Ok(Some(Item { contact, property }))
    }
}

impl<C> Database<Select<By<list::Page, list::Selector>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<property::Id, PropertySummary>, Vec<property::Id>>>,
        Ok = HashMap<property::Id, PropertySummary>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Selector { arguments, filter } = by.into_inner();
        let list::Filter { status } = filter;

        // The page query and the count query share this very predicate set.
        let mut ps: Vec<&(dyn ToSql + Sync)> = Vec::new();
        let mut predicates = vec!["true".to_owned()];
        if let Some(s) = &status {
            ps.push(s);
            predicates.push(format!("status = ${}::INT2", ps.len()));
        }
        let where_sql = predicates.join(" AND ");

        let count_sql =
            format!("SELECT COUNT(*)::INT8 FROM contacts WHERE {where_sql}");
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
            "SELECT {CONTACT_COLUMNS} \
             FROM contacts \
             WHERE {where_sql} \
             ORDER BY created_at DESC \
             LIMIT ${limit_idx}::INT8 \
             OFFSET ${offset_idx}::INT8",
        );
        let contacts = self
            .query(&page_sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(contact_from_row)
            .collect::<Vec<_>>();

        let property_ids = contacts
            .iter()
            .filter_map(|c| c.property_id)
            .collect::<Vec<_>>();
        let properties: HashMap<property::Id, PropertySummary> = self
            .execute(Select(By::new(property_ids)))
            .await
            .map_err(tracerr::wrap!())?;

        let items = contacts
            .into_iter()
            .map(|contact| Item {
                property: contact
                    .property_id
                    .and_then(|id| properties.get(&id).cloned()),
                contact,
            })
            .collect::<Vec<_>>();

        Ok(list::Page::new(arguments, items, total))
    }
}

impl<C> Database<Select<By<Stats, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Stats;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Stats, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT8 AS total, \
                   COUNT(*) FILTER (WHERE status = $1::INT2)::INT8 AS new, \
                   COUNT(*) FILTER (WHERE status = $2::INT2)::INT8 \
                       AS in_progress, \
                   COUNT(*) FILTER (WHERE status = $3::INT2)::INT8 \
                       AS completed, \
                   COUNT(*) FILTER (WHERE status = $4::INT2)::INT8 \
                       AS cancelled, \
                   COUNT(*) FILTER (\
                       WHERE created_at >= NOW() - INTERVAL '24 hours' \
                   )::INT8 AS recent_24h \
            FROM contacts";
        let row = self
            .query_opt(
                SQL,
                &[
                    &contact::Status::New,
                    &contact::Status::InProgress,
                    &contact::Status::Completed,
                    &contact::Status::Cancelled,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?
            .expect("always exists");

        let count = |name: &str| {
            usize::try_from(row.get::<_, i64>(name))
                .expect("non-negative count")
        };
        Ok(Stats {
            total: count("total"),
            new: count("new"),
            in_progress: count("in_progress"),
            completed: count("completed"),
            cancelled: count("cancelled"),
            recent_24h: count("recent_24h"),
        })
    }
}

impl<C> Database<Insert<Contact>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Contact>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(contact): Insert<Contact>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(contact))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Contact>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(contact): Update<Contact>,
    ) -> Result<Self::Ok, Self::Err> {
        let Contact {
            id,
            first_name,
            last_name,
            email,
            phone,
            subject,
            message,
            property_id,
            status,
            notes,
            created_at,
            updated_at,
        } = contact;

        const SQL: &str = "\
            INSERT INTO contacts (\
                id, first_name, last_name, email, phone, \
                subject, message, property_id, \
                status, notes, \
                created_at, updated_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, $5::VARCHAR, \
                $6::VARCHAR, $7::TEXT, $8::UUID, \
                $9::INT2, $10::TEXT, \
                $11::TIMESTAMPTZ, $12::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET status = EXCLUDED.status, \
                notes = EXCLUDED.notes, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &first_name,
                &last_name,
                &email,
                &phone,
                &subject,
                &message,
                &property_id,
                &status,
                &notes,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Contact, contact::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Contact, contact::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: contact::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM contacts \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
