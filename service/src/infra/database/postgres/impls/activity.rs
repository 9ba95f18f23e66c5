//! Recent-activity [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{contact, property, user},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::activity::{Feed, Hue, Item, Limit, Source},
};

impl<C> Database<Select<By<Feed, Limit>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Feed;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Feed, Limit>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Limit(limit) = by.into_inner();

        let mut items = Vec::new();

        const PROPERTIES_SQL: &str = "\
            SELECT id, title, property_type, is_published, created_at \
            FROM properties \
            ORDER BY created_at DESC \
            LIMIT $1::INT8";
        let properties_limit = i64::try_from(limit.min(5)).unwrap();
        for row in self
            .query(PROPERTIES_SQL, &[&properties_limit])
            .await
            .map_err(tracerr::wrap!())?
        {
            let id = row.get::<_, property::Id>("id");
            let title = row.get::<_, property::Title>("title");
            let kind_raw = row.get::<_, String>("property_type");
            let is_published = row.get::<_, bool>("is_published");
            items.push(Item {
                id: format!("property-{id}"),
                source: Source::Property,
                title: "Nouvelle propriété ajoutée".to_owned(),
                description: format!("{kind_raw} - {title}"),
                occurred_at: row.get("created_at"),
                hue: if is_published {
                    Hue::Success
                } else {
                    Hue::Warning
                },
            });
        }

        const CONTACTS_SQL: &str = "\
            SELECT id, first_name, last_name, subject, status, created_at \
            FROM contacts \
            ORDER BY created_at DESC \
            LIMIT $1::INT8";
        let contacts_limit = i64::try_from(limit.min(5)).unwrap();
        for row in self
            .query(CONTACTS_SQL, &[&contacts_limit])
            .await
            .map_err(tracerr::wrap!())?
        {
            let id = row.get::<_, contact::Id>("id");
            let first_name = row.get::<_, String>("first_name");
            let last_name = row.get::<_, String>("last_name");
            let subject = row
                .get::<_, Option<String>>("subject")
                .unwrap_or_else(|| "Sans objet".to_owned());
            let status = row.get::<_, contact::Status>("status");
            let is_new = status == contact::Status::New;
            items.push(Item {
                id: format!("contact-{id}"),
                source: Source::Contact,
                title: if is_new {
                    "Nouveau message".to_owned()
                } else {
                    "Message traité".to_owned()
                },
                description: format!("{first_name} {last_name}: {subject}"),
                occurred_at: row.get("created_at"),
                hue: if is_new { Hue::Info } else { Hue::Success },
            });
        }

        const USERS_SQL: &str = "\
            SELECT id, first_name, last_name, created_at \
            FROM users \
            ORDER BY created_at DESC \
            LIMIT $1::INT8";
        let users_limit = i64::try_from(limit.min(3)).unwrap();
        for row in self
            .query(USERS_SQL, &[&users_limit])
            .await
            .map_err(tracerr::wrap!())?
        {
            let id = row.get::<_, user::Id>("id");
            let first_name =
                row.get::<_, Option<String>>("first_name").unwrap_or_default();
            let last_name =
                row.get::<_, Option<String>>("last_name").unwrap_or_default();
            items.push(Item {
                id: format!("user-{id}"),
                source: Source::User,
                title: "Nouvel utilisateur".to_owned(),
                description: format!(
                    "{first_name} {last_name} s'est inscrit",
                ),
                occurred_at: row.get("created_at"),
                hue: Hue::Success,
            });
        }

        // Newest first across all the sources.
        items.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

        Ok(Feed { items })
    }
}
