//! [`Property`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Money,
};
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{
        lookup, property, Category, Location, Property, PropertyFeature,
        PropertyImage,
    },
    infra::{
        database::{
            self,
            postgres::{Connection, LikePattern},
            Postgres,
        },
        Database,
    },
    read::property::{list, Featured, Listing},
};

/// Canonical-to-storage vocabulary of [`property::Kind`].
///
/// The storage layer speaks the localized vocabulary of the legacy schema;
/// this table is the single place the two vocabularies meet.
const KIND_VOCABULARY: [(property::Kind, &str); 5] = [
    (property::Kind::Apartment, "appartement"),
    (property::Kind::House, "maison"),
    (property::Kind::Land, "terrain"),
    (property::Kind::Commercial, "commerce"),
    (property::Kind::Office, "bureau"),
];

/// Returns the storage spelling of the provided [`property::Kind`].
pub(super) fn kind_to_db(kind: property::Kind) -> &'static str {
    KIND_VOCABULARY
        .iter()
        .find(|(k, _)| *k == kind)
        .expect("complete vocabulary")
        .1
}

/// Returns the [`property::Kind`] spelled in storage as `raw`, if any.
pub(super) fn kind_from_db(raw: &str) -> Option<property::Kind> {
    KIND_VOCABULARY
        .iter()
        .find(|(_, db)| *db == raw)
        .map(|(k, _)| *k)
}

impl<C, IDs> Database<Select<By<HashMap<property::Id, Property>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[property::Id]>,
{
    type Ok = HashMap<property::Id, Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<property::Id, Property>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[property::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = i32::try_from(ids.len()).unwrap();

        const SQL: &str = "\
            SELECT id, title, slug, description, \
                   price, currency, price_type, \
                   property_type, status, \
                   bedrooms, bathrooms, surface_area, land_size, \
                   address, location_id, category_id, agent_id, \
                   is_published, is_featured, views_count, \
                   created_at, updated_at \
            FROM properties \
            WHERE id IN (SELECT unnest($1::UUID[]) LIMIT $2::INT4) \
            LIMIT $2::INT4";
        Ok(self
            .query(SQL, &[&ids, &limit])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let id = row.get("id");
                let kind_raw = row.get::<_, String>("property_type");
                (
                    id,
                    Property {
                        id,
                        title: row.get("title"),
                        slug: row.get("slug"),
                        description: row.get("description"),
                        price: Money {
                            amount: row.get("price"),
                            currency: row.get("currency"),
                        },
                        price_type: row.get("price_type"),
                        kind: kind_from_db(&kind_raw)
                            .expect("known `property_type` vocabulary"),
                        status: row.get("status"),
                        bedrooms: row
                            .get::<_, Option<i32>>("bedrooms")
                            .map(u16::try_from)
                            .transpose()
                            .expect("`bedrooms` overflow"),
                        bathrooms: row
                            .get::<_, Option<i32>>("bathrooms")
                            .map(u16::try_from)
                            .transpose()
                            .expect("`bathrooms` overflow"),
                        surface_area: row.get("surface_area"),
                        land_size: row.get("land_size"),
                        address: row.get("address"),
                        location_id: row.get("location_id"),
                        category_id: row.get("category_id"),
                        agent_id: row.get("agent_id"),
                        is_published: row.get("is_published"),
                        is_featured: row.get("is_featured"),
                        views_count: u32::try_from(
                            row.get::<_, i32>("views_count"),
                        )
                        .expect("`views_count` overflow"),
                        created_at: row.get("created_at"),
                        updated_at: row.get("updated_at"),
                    },
                )
            })
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Listing>, Vec<property::Id>>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
            Select<By<HashMap<property::Id, Property>, Vec<property::Id>>>,
            Ok = HashMap<property::Id, Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<HashMap<property::Id, Vec<PropertyImage>>, Vec<property::Id>>,
            >,
            Ok = HashMap<property::Id, Vec<PropertyImage>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<
                    HashMap<lookup::LocationId, Location>,
                    Vec<lookup::LocationId>,
                >,
            >,
            Ok = HashMap<lookup::LocationId, Location>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<
                    HashMap<lookup::CategoryId, Category>,
                    Vec<lookup::CategoryId>,
                >,
            >,
            Ok = HashMap<lookup::CategoryId, Category>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, Vec<property::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();

        let mut properties: HashMap<property::Id, Property> = self
            .execute(Select(By::<HashMap<property::Id, Property>, _>::new(
                ids.clone(),
            )))
            .await
            .map_err(tracerr::wrap!())?;
        let mut images: HashMap<property::Id, Vec<PropertyImage>> = self
            .execute(Select(By::<HashMap<property::Id, Vec<PropertyImage>>, _>::new(
                ids.clone(),
            )))
            .await
            .map_err(tracerr::wrap!())?;

        let location_ids = properties
            .values()
            .filter_map(|p| p.location_id)
            .collect::<Vec<_>>();
        let locations: HashMap<lookup::LocationId, Location> = self
            .execute(Select(By::new(location_ids)))
            .await
            .map_err(tracerr::wrap!())?;

        let category_ids = properties
            .values()
            .filter_map(|p| p.category_id)
            .collect::<Vec<_>>();
        let categories: HashMap<lookup::CategoryId, Category> = self
            .execute(Select(By::new(category_ids)))
            .await
            .map_err(tracerr::wrap!())?;

        // Input order is the page order, so reassemble by it.
        Ok(ids
            .into_iter()
            .filter_map(|id| {
                let property = properties.remove(&id)?;
                Some(Listing {
                    location: property
                        .location_id
                        .and_then(|l| locations.get(&l).cloned()),
                    category: property
                        .category_id
                        .and_then(|c| categories.get(&c).cloned()),
                    images: images.remove(&id).unwrap_or_default(),
                    property,
                })
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<Listing>, property::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Vec<Listing>, Vec<property::Id>>>,
        Ok = Vec<Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new(vec![id])))
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .next())
    }
}

impl<C> Database<Select<By<Option<Listing>, property::Slug>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Option<Listing>, property::Id>>,
        Ok = Option<Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, property::Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let slug: property::Slug = by.into_inner();

        // Visiting a public page counts as a view.
        const SQL: &str = "\
            UPDATE properties \
            SET views_count = views_count + 1 \
            WHERE slug = $1::VARCHAR \
              AND is_published \
            RETURNING id";
        let Some(row) = self
            .query_opt(SQL, &[&slug])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        self.execute(Select(By::new(row.get("id"))))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<list::Page, list::Selector>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Vec<Listing>, Vec<property::Id>>>,
        Ok = Vec<Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Selector {
            arguments,
            filter,
            sort,
        } = by.into_inner();
        let list::Filter {
            search,
            kind,
            min_price,
            max_price,
            location_id,
            bedrooms,
            bathrooms,
        } = filter;

        let search = search.map(|s| LikePattern::contains(&s));
        let kind = kind.map(kind_to_db);
        let bedrooms = bedrooms.map(i32::from);
        let bathrooms = bathrooms.map(i32::from);

        // The page query and the count query share this very predicate set.
        let mut ps: Vec<&(dyn ToSql + Sync)> = Vec::new();
        let mut predicates = vec!["is_published".to_owned()];
        if let Some(p) = &search {
            ps.push(p);
            let i = ps.len();
            predicates.push(format!(
                "(title ILIKE ${i}::VARCHAR \
                  OR description ILIKE ${i}::VARCHAR \
                  OR address ILIKE ${i}::VARCHAR)",
            ));
        }
        if let Some(k) = &kind {
            ps.push(k);
            predicates.push(format!("property_type = ${}::VARCHAR", ps.len()));
        }
        if let Some(p) = &min_price {
            ps.push(p);
            predicates.push(format!("price >= ${}::NUMERIC", ps.len()));
        }
        if let Some(p) = &max_price {
            ps.push(p);
            predicates.push(format!("price <= ${}::NUMERIC", ps.len()));
        }
        if let Some(l) = &location_id {
            ps.push(l);
            predicates.push(format!("location_id = ${}::UUID", ps.len()));
        }
        if let Some(b) = &bedrooms {
            ps.push(b);
            predicates.push(format!("bedrooms = ${}::INT4", ps.len()));
        }
        if let Some(b) = &bathrooms {
            ps.push(b);
            predicates.push(format!("bathrooms = ${}::INT4", ps.len()));
        }
        let where_sql = predicates.join(" AND ");

        let count_sql =
            format!("SELECT COUNT(*)::INT8 FROM properties WHERE {where_sql}");
        let total = self
            .query_opt(&count_sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .expect("always exists")
            .get::<_, i64>(0);
        let total = usize::try_from(total).expect("non-negative count");

        let order = match sort {
            list::Sort::PriceAsc => "price ASC",
            list::Sort::PriceDesc => "price DESC",
            list::Sort::DateAsc => "created_at ASC",
            list::Sort::DateDesc => "created_at DESC",
        };
        let limit = i64::try_from(arguments.limit).unwrap();
        let offset = i64::try_from(arguments.offset()).unwrap();
        ps.push(&limit);
        let limit_idx = ps.len();
        ps.push(&offset);
        let offset_idx = ps.len();

        let page_sql = format!(
            "SELECT id \
             FROM properties \
             WHERE {where_sql} \
             ORDER BY {order} \
             LIMIT ${limit_idx}::INT8 \
             OFFSET ${offset_idx}::INT8",
        );
        let ids = self
            .query(&page_sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| row.get::<_, property::Id>("id"))
            .collect::<Vec<_>>();

        let listings = self
            .execute(Select(By::new(ids)))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(list::Page::new(arguments, listings, total))
    }
}

impl<C> Database<Select<By<Vec<Listing>, Featured>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Vec<Listing>, Vec<property::Id>>>,
        Ok = Vec<Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, Featured>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Featured { limit } = by.into_inner();
        let limit = i64::try_from(limit).unwrap();

        const SQL: &str = "\
            SELECT id \
            FROM properties \
            WHERE is_published \
              AND is_featured \
            ORDER BY created_at DESC \
            LIMIT $1::INT8";
        let mut ids = self
            .query(SQL, &[&limit])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| row.get::<_, property::Id>("id"))
            .collect::<Vec<_>>();

        if ids.is_empty() {
            tracing::debug!(
                "no featured properties, falling back to the recent ones",
            );

            const FALLBACK_SQL: &str = "\
                SELECT id \
                FROM properties \
                WHERE is_published \
                ORDER BY created_at DESC \
                LIMIT $1::INT8";
            ids = self
                .query(FALLBACK_SQL, &[&limit])
                .await
                .map_err(tracerr::wrap!())?
                .into_iter()
                .map(|row| row.get::<_, property::Id>("id"))
                .collect();
        }

        self.execute(Select(By::new(ids)))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Property>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Property>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(property))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Property>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let Property {
            id,
            title,
            slug,
            description,
            price,
            price_type,
            kind,
            status,
            bedrooms,
            bathrooms,
            surface_area,
            land_size,
            address,
            location_id,
            category_id,
            agent_id,
            is_published,
            is_featured,
            views_count,
            created_at,
            updated_at,
        } = property;

        let kind = kind_to_db(kind);
        let bedrooms = bedrooms.map(i32::from);
        let bathrooms = bathrooms.map(i32::from);
        let views_count =
            i32::try_from(views_count).expect("`views_count` overflow");

        const SQL: &str = "\
            INSERT INTO properties (\
                id, title, slug, description, \
                price, currency, price_type, \
                property_type, status, \
                bedrooms, bathrooms, surface_area, land_size, \
                address, location_id, category_id, agent_id, \
                is_published, is_featured, views_count, \
                created_at, updated_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::TEXT, \
                $5::NUMERIC, $6::INT2, $7::INT2, \
                $8::VARCHAR, $9::INT2, \
                $10::INT4, $11::INT4, $12::NUMERIC, $13::NUMERIC, \
                $14::VARCHAR, $15::UUID, $16::UUID, $17::UUID, \
                $18::BOOL, $19::BOOL, $20::INT4, \
                $21::TIMESTAMPTZ, $22::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET title = EXCLUDED.title, \
                slug = EXCLUDED.slug, \
                description = EXCLUDED.description, \
                price = EXCLUDED.price, \
                currency = EXCLUDED.currency, \
                price_type = EXCLUDED.price_type, \
                property_type = EXCLUDED.property_type, \
                status = EXCLUDED.status, \
                bedrooms = EXCLUDED.bedrooms, \
                bathrooms = EXCLUDED.bathrooms, \
                surface_area = EXCLUDED.surface_area, \
                land_size = EXCLUDED.land_size, \
                address = EXCLUDED.address, \
                location_id = EXCLUDED.location_id, \
                category_id = EXCLUDED.category_id, \
                agent_id = EXCLUDED.agent_id, \
                is_published = EXCLUDED.is_published, \
                is_featured = EXCLUDED.is_featured, \
                views_count = EXCLUDED.views_count, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &title,
                &slug,
                &description,
                &price.amount,
                &price.currency,
                &price_type,
                &kind,
                &status,
                &bedrooms,
                &bathrooms,
                &surface_area,
                &land_size,
                &address,
                &location_id,
                &category_id,
                &agent_id,
                &is_published,
                &is_featured,
                &views_count,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Property, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM properties \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C, IDs> Database<Select<By<HashMap<property::Id, Vec<PropertyImage>>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[property::Id]>,
{
    type Ok = HashMap<property::Id, Vec<PropertyImage>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<property::Id, Vec<PropertyImage>>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[property::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT property_id, url, alt_text, is_primary, sort_order \
            FROM property_images \
            WHERE property_id = ANY($1::UUID[]) \
            ORDER BY sort_order";
        let mut galleries = HashMap::<_, Vec<_>>::new();
        for row in self.query(SQL, &[&ids]).await.map_err(tracerr::wrap!())? {
            let image = PropertyImage {
                property_id: row.get("property_id"),
                url: row.get("url"),
                alt_text: row.get("alt_text"),
                is_primary: row.get("is_primary"),
                sort_order: row.get("sort_order"),
            };
            galleries.entry(image.property_id).or_default().push(image);
        }
        Ok(galleries)
    }
}

impl<C> Database<Insert<Vec<PropertyImage>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(images): Insert<Vec<PropertyImage>>,
    ) -> Result<Self::Ok, Self::Err> {
        if images.is_empty() {
            return Ok(());
        }

        let mut property_ids = Vec::with_capacity(images.len());
        let mut urls = Vec::with_capacity(images.len());
        let mut alt_texts = Vec::with_capacity(images.len());
        let mut primaries = Vec::with_capacity(images.len());
        let mut sort_orders = Vec::with_capacity(images.len());
        for image in images {
            property_ids.push(image.property_id);
            urls.push(image.url);
            alt_texts.push(image.alt_text);
            primaries.push(image.is_primary);
            sort_orders.push(image.sort_order);
        }

        const SQL: &str = "\
            INSERT INTO property_images (\
                property_id, url, alt_text, is_primary, sort_order \
            ) \
            SELECT * \
            FROM unnest(\
                $1::UUID[], $2::VARCHAR[], $3::VARCHAR[], \
                $4::BOOL[], $5::INT4[] \
            )";
        self.exec(
            SQL,
            &[&property_ids, &urls, &alt_texts, &primaries, &sort_orders],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Vec<PropertyImage>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Vec<PropertyImage>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM property_images \
            WHERE property_id = $1::UUID";
        self.exec(SQL, &[&property_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Insert<Vec<PropertyFeature>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(features): Insert<Vec<PropertyFeature>>,
    ) -> Result<Self::Ok, Self::Err> {
        if features.is_empty() {
            return Ok(());
        }

        let mut property_ids = Vec::with_capacity(features.len());
        let mut feature_ids = Vec::with_capacity(features.len());
        for feature in features {
            property_ids.push(feature.property_id);
            feature_ids.push(feature.feature_id);
        }

        const SQL: &str = "\
            INSERT INTO property_features (property_id, feature_id) \
            SELECT * \
            FROM unnest($1::UUID[], $2::UUID[])";
        self.exec(SQL, &[&property_ids, &feature_ids])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Vec<PropertyFeature>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Vec<PropertyFeature>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM property_features \
            WHERE property_id = $1::UUID";
        self.exec(SQL, &[&property_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::property::Kind;

    use super::{kind_from_db, kind_to_db};

    #[test]
    fn vocabulary_round_trips() {
        for kind in [
            Kind::Apartment,
            Kind::House,
            Kind::Land,
            Kind::Commercial,
            Kind::Office,
        ] {
            assert_eq!(kind_from_db(kind_to_db(kind)), Some(kind));
        }
    }

    #[test]
    fn storage_vocabulary_is_localized() {
        assert_eq!(kind_to_db(Kind::Apartment), "appartement");
        assert_eq!(kind_to_db(Kind::Office), "bureau");
        assert_eq!(kind_from_db("terrain"), Some(Kind::Land));
        assert_eq!(kind_from_db("apartment"), None);
    }
}
