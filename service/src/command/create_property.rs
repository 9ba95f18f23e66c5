//! [`Command`] for creating a new [`Property`].

use common::{
    operations::{Commit, Insert, Transact, Transacted},
    DateTime, Money,
};
use rust_decimal::Decimal;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::property::{Address, Title};
use crate::{
    domain::{
        lookup, property, user, Property, PropertyFeature, PropertyImage,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Property`].
///
/// The slug is derived from the title once, with no collision handling.
/// Images and features are attached within the same transaction.
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// [`Title`] of a new [`Property`].
    pub title: property::Title,

    /// Description of a new [`Property`].
    pub description: Option<String>,

    /// Price of a new [`Property`].
    pub price: Money,

    /// [`property::PriceType`] of a new [`Property`].
    pub price_type: property::PriceType,

    /// [`property::Kind`] of a new [`Property`].
    pub kind: property::Kind,

    /// [`property::Status`] of a new [`Property`].
    pub status: property::Status,

    /// Number of bedrooms in a new [`Property`].
    pub bedrooms: Option<u16>,

    /// Number of bathrooms in a new [`Property`].
    pub bathrooms: Option<u16>,

    /// Living surface of a new [`Property`] in square meters.
    pub surface_area: Option<Decimal>,

    /// Land size of a new [`Property`] in square meters.
    pub land_size: Option<Decimal>,

    /// [`Address`] of a new [`Property`].
    pub address: Option<property::Address>,

    /// Location of a new [`Property`].
    pub location_id: Option<lookup::LocationId>,

    /// Category of a new [`Property`].
    pub category_id: Option<lookup::CategoryId>,

    /// Agent responsible for a new [`Property`].
    pub agent_id: Option<user::Id>,

    /// Indicator whether a new [`Property`] is published right away.
    pub is_published: bool,

    /// Indicator whether a new [`Property`] is featured.
    pub is_featured: bool,

    /// Gallery of a new [`Property`].
    pub images: Vec<property::NewImage>,

    /// Features of a new [`Property`].
    pub features: Vec<lookup::FeatureId>,
}

impl<Db> Command<CreateProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Property>, Err = Traced<database::Error>>
        + Database<Insert<Vec<PropertyImage>>, Err = Traced<database::Error>>
        + Database<Insert<Vec<PropertyFeature>>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateProperty) -> Result<Self::Ok, Self::Err> {
        let CreateProperty {
            title,
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
            images,
            features,
        } = cmd;

        let slug = property::Slug::derive(&title);
        let now = DateTime::now();
        let property = Property {
            id: property::Id::new(),
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
            views_count: 0,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;

        tx.execute(Insert(property.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        if !images.is_empty() {
            let images = images
                .into_iter()
                .enumerate()
                .map(|(i, img)| img.into_image(property.id, i))
                .collect::<Vec<_>>();
            tx.execute(Insert(images))
                .await
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        if !features.is_empty() {
            let features = features
                .into_iter()
                .map(|feature_id| PropertyFeature {
                    property_id: property.id,
                    feature_id,
                })
                .collect::<Vec<_>>();
            tx.execute(Insert(features))
                .await
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(property)
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
pub type ExecutionError = database::Error;
