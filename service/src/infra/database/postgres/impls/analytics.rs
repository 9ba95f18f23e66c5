//! Analytics [`Database`] implementations.

use std::collections::BTreeMap;

use common::{
    operations::{By, Select},
    DateTime,
};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use tracerr::Traced;

use crate::{
    domain::{contact, user},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::analytics::{
        time_series, ContactsReport, Overview, PropertiesReport, UsersReport,
        Window,
    },
};

use super::property::kind_from_db;

/// Converts a non-negative SQL count into a [`usize`].
fn count(value: i64) -> usize {
    usize::try_from(value).expect("non-negative count")
}

impl<C> Database<Select<By<Overview, Window>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Overview;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Overview, Window>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Window { start, .. } = by.into_inner();

        const PROPERTIES_SQL: &str = "\
            SELECT COUNT(*)::INT8 AS total, \
                   COUNT(*) FILTER (WHERE is_published)::INT8 AS active, \
                   COALESCE(SUM(views_count), 0)::INT8 AS views \
            FROM properties";
        let properties = self
            .query_opt(PROPERTIES_SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .expect("always exists");

        const USERS_SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM users";
        let total_users = self
            .query_opt(USERS_SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .expect("always exists")
            .get::<_, i64>(0);

        const CONTACTS_SQL: &str = "\
            SELECT COUNT(*)::INT8 AS total, \
                   COUNT(*) FILTER (WHERE created_at >= $1::TIMESTAMPTZ)::INT8 \
                       AS recent \
            FROM contacts";
        let contacts = self
            .query_opt(CONTACTS_SQL, &[&start])
            .await
            .map_err(tracerr::wrap!())?
            .expect("always exists");

        const BY_KIND_SQL: &str = "\
            SELECT property_type, COUNT(*)::INT8 \
            FROM properties \
            GROUP BY property_type";
        let properties_by_kind = self
            .query(BY_KIND_SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let raw = row.get::<_, String>("property_type");
                let kind = kind_from_db(&raw)
                    .map_or(raw, |k| k.to_string());
                (kind, count(row.get::<_, i64>(1)))
            })
            .collect::<BTreeMap<_, _>>();

        const BY_ROLE_SQL: &str = "\
            SELECT role, COUNT(*)::INT8 \
            FROM users \
            GROUP BY role";
        let users_by_role = self
            .query(BY_ROLE_SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let role = row.get::<_, user::Role>("role");
                (role.to_string(), count(row.get::<_, i64>(1)))
            })
            .collect::<BTreeMap<_, _>>();

        Ok(Overview {
            total_properties: count(properties.get::<_, i64>("total")),
            active_properties: count(properties.get::<_, i64>("active")),
            total_users: count(total_users),
            total_contacts: count(contacts.get::<_, i64>("total")),
            recent_contacts: count(contacts.get::<_, i64>("recent")),
            total_views: u64::try_from(properties.get::<_, i64>("views"))
                .expect("non-negative sum"),
            properties_by_kind,
            users_by_role,
        })
    }
}

impl<C> Database<Select<By<PropertiesReport, Window>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = PropertiesReport;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<PropertiesReport, Window>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Window { start, bucket } = by.into_inner();

        const SQL: &str = "\
            SELECT created_at, views_count, property_type, status, price \
            FROM properties \
            WHERE created_at >= $1::TIMESTAMPTZ";
        let rows = self
            .query(SQL, &[&start])
            .await
            .map_err(tracerr::wrap!())?;

        let mut moments = Vec::with_capacity(rows.len());
        let mut total_views: u64 = 0;
        let mut by_kind = BTreeMap::<String, usize>::new();
        let mut by_status = BTreeMap::<String, usize>::new();
        let mut prices_by_kind = BTreeMap::<String, (Decimal, usize)>::new();
        for row in &rows {
            moments.push(row.get::<_, DateTime>("created_at"));
            total_views += u64::try_from(row.get::<_, i32>("views_count"))
                .expect("non-negative counter");

            let raw = row.get::<_, String>("property_type");
            let kind = kind_from_db(&raw).map_or(raw, |k| k.to_string());
            *by_kind.entry(kind.clone()).or_default() += 1;

            let status =
                row.get::<_, crate::domain::property::Status>("status");
            *by_status.entry(status.to_string()).or_default() += 1;

            let price = row.get::<_, Decimal>("price");
            let (sum, n) = prices_by_kind.entry(kind).or_default();
            *sum += price;
            *n += 1;
        }

        let avg_price_by_kind = prices_by_kind
            .into_iter()
            .map(|(kind, (sum, n))| {
                let avg = (sum / Decimal::from(n)).round();
                (kind, avg.to_i64().expect("average fits"))
            })
            .collect();

        Ok(PropertiesReport {
            total_created: rows.len(),
            total_views,
            over_time: time_series(bucket, moments),
            by_kind,
            by_status,
            avg_price_by_kind,
        })
    }
}

impl<C> Database<Select<By<UsersReport, Window>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = UsersReport;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<UsersReport, Window>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Window { start, bucket } = by.into_inner();

        const SQL: &str = "\
            SELECT created_at, role \
            FROM users \
            WHERE created_at >= $1::TIMESTAMPTZ";
        let rows = self
            .query(SQL, &[&start])
            .await
            .map_err(tracerr::wrap!())?;

        let mut moments = Vec::with_capacity(rows.len());
        let mut by_role = BTreeMap::<String, usize>::new();
        for row in &rows {
            moments.push(row.get::<_, DateTime>("created_at"));
            let role = row.get::<_, user::Role>("role");
            *by_role.entry(role.to_string()).or_default() += 1;
        }

        Ok(UsersReport {
            total_created: rows.len(),
            over_time: time_series(bucket, moments),
            by_role,
        })
    }
}

impl<C> Database<Select<By<ContactsReport, Window>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ContactsReport;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<ContactsReport, Window>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Window { start, bucket } = by.into_inner();

        const SQL: &str = "\
            SELECT created_at, status \
            FROM contacts \
            WHERE created_at >= $1::TIMESTAMPTZ";
        let rows = self
            .query(SQL, &[&start])
            .await
            .map_err(tracerr::wrap!())?;

        let mut moments = Vec::with_capacity(rows.len());
        let mut by_status = BTreeMap::<String, usize>::new();
        for row in &rows {
            moments.push(row.get::<_, DateTime>("created_at"));
            let status = row.get::<_, contact::Status>("status");
            *by_status.entry(status.to_string()).or_default() += 1;
        }

        Ok(ContactsReport {
            total_created: rows.len(),
            over_time: time_series(bucket, moments),
            by_status,
        })
    }
}
