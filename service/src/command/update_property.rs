//! [`Command`] for updating an existing [`Property`].

use common::{
    operations::{By, Commit, Select, Transact, Transacted, Update},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::property::{Address, Title};
use crate::{
    domain::{lookup, property, user, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Property`].
///
/// Absent fields are left untouched. An updated title re-derives the slug.
#[derive(Clone, Debug)]
pub struct UpdateProperty {
    /// ID of the [`Property`] to update.
    pub id: property::Id,

    /// New [`Title`] of the [`Property`].
    pub title: Option<property::Title>,

    /// New description of the [`Property`].
    pub description: Option<String>,

    /// New price of the [`Property`].
    pub price: Option<Money>,

    /// New [`property::PriceType`] of the [`Property`].
    pub price_type: Option<property::PriceType>,

    /// New [`property::Kind`] of the [`Property`].
    pub kind: Option<property::Kind>,

    /// New [`property::Status`] of the [`Property`].
    pub status: Option<property::Status>,

    /// New number of bedrooms in the [`Property`].
    pub bedrooms: Option<u16>,

    /// New number of bathrooms in the [`Property`].
    pub bathrooms: Option<u16>,

    /// New living surface of the [`Property`] in square meters.
    pub surface_area: Option<Decimal>,

    /// New land size of the [`Property`] in square meters.
    pub land_size: Option<Decimal>,

    /// New [`Address`] of the [`Property`].
    pub address: Option<property::Address>,

    /// New location of the [`Property`].
    pub location_id: Option<lookup::LocationId>,

    /// New category of the [`Property`].
    pub category_id: Option<lookup::CategoryId>,

    /// New agent responsible for the [`Property`].
    pub agent_id: Option<user::Id>,

    /// New visibility of the [`Property`].
    pub is_published: Option<bool>,

    /// New featured flag of the [`Property`].
    pub is_featured: Option<bool>,
}

impl<Db> Command<UpdateProperty> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Update<Property>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateProperty) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProperty {
            id,
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
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut property = tx
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::NotExists))?;

        if let Some(title) = title {
            property.slug = property::Slug::derive(&title);
            property.title = title;
        }
        if let Some(description) = description {
            property.description = Some(description);
        }
        if let Some(price) = price {
            property.price = price;
        }
        if let Some(price_type) = price_type {
            property.price_type = price_type;
        }
        if let Some(kind) = kind {
            property.kind = kind;
        }
        if let Some(status) = status {
            property.status = status;
        }
        if let Some(bedrooms) = bedrooms {
            property.bedrooms = Some(bedrooms);
        }
        if let Some(bathrooms) = bathrooms {
            property.bathrooms = Some(bathrooms);
        }
        if let Some(surface_area) = surface_area {
            property.surface_area = Some(surface_area);
        }
        if let Some(land_size) = land_size {
            property.land_size = Some(land_size);
        }
        if let Some(address) = address {
            property.address = Some(address);
        }
        if let Some(location_id) = location_id {
            property.location_id = Some(location_id);
        }
        if let Some(category_id) = category_id {
            property.category_id = Some(category_id);
        }
        if let Some(agent_id) = agent_id {
            property.agent_id = Some(agent_id);
        }
        if let Some(is_published) = is_published {
            property.is_published = is_published;
        }
        if let Some(is_featured) = is_featured {
            property.is_featured = is_featured;
        }
        property.updated_at = DateTime::now().coerce();

        tx.execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(property)
    }
}

/// Error of [`UpdateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property` doesn't exist")]
    NotExists,
}
