//! Product repository functions.
//!
//! Pictures and size charts are persisted as JSON text columns. An unset
//! size chart or an empty picture list is stored as the empty string.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::entities::products;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::merge::{empty_str, empty_vec, none, zero_f64, zero_i32, FieldRule, Mergeable};

/// Body measurements for one size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sizing {
    #[serde(default)]
    pub chest: f64,
    #[serde(default)]
    pub waist: f64,
    #[serde(default)]
    pub hip: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub id: i64,
    pub item: String,
    pub price: f64,
    pub stock: i32,
    pub pictures: Vec<String>,
    pub xs: Option<Sizing>,
    pub s: Option<Sizing>,
    pub m: Option<Sizing>,
    pub l: Option<Sizing>,
    pub xl: Option<Sizing>,
    pub created_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

impl Mergeable for Product {
    fn not_found_kind() -> NotFoundKind {
        NotFoundKind::Product
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn merge_rules() -> Vec<FieldRule<Self>> {
        vec![
            crate::field_rule!(Product, item, empty_str),
            crate::field_rule!(Product, price, zero_f64),
            crate::field_rule!(Product, stock, zero_i32),
            crate::field_rule!(Product, pictures, empty_vec),
            crate::field_rule!(Product, xs, none),
            crate::field_rule!(Product, s, none),
            crate::field_rule!(Product, m, none),
            crate::field_rule!(Product, l, none),
            crate::field_rule!(Product, xl, none),
        ]
    }
}

fn encode_json<T: Serialize>(value: &T, is_empty: bool) -> Result<String, DomainError> {
    if is_empty {
        return Ok(String::new());
    }
    serde_json::to_string(value).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Json".into()),
            format!("failed to encode product field: {e}"),
        )
    })
}

fn decode_json<T: DeserializeOwned + Default>(raw: &str) -> Result<T, DomainError> {
    if raw.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(raw).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("stored product field is not valid JSON: {e}"),
        )
    })
}

fn encode_sizing(sizing: &Option<Sizing>) -> Result<String, DomainError> {
    encode_json(sizing, sizing.is_none())
}

struct EncodedColumns {
    pictures: String,
    xs: String,
    s: String,
    m: String,
    l: String,
    xl: String,
}

impl EncodedColumns {
    fn from_product(product: &Product) -> Result<Self, DomainError> {
        Ok(Self {
            pictures: encode_json(&product.pictures, product.pictures.is_empty())?,
            xs: encode_sizing(&product.xs)?,
            s: encode_sizing(&product.s)?,
            m: encode_sizing(&product.m)?,
            l: encode_sizing(&product.l)?,
            xl: encode_sizing(&product.xl)?,
        })
    }
}

impl TryFrom<products::Model> for Product {
    type Error = DomainError;

    fn try_from(model: products::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            item: model.item,
            price: model.price,
            stock: model.stock,
            pictures: decode_json(&model.pictures)?,
            xs: decode_json(&model.xs)?,
            s: decode_json(&model.s)?,
            m: decode_json(&model.m)?,
            l: decode_json(&model.l)?,
            xl: decode_json(&model.xl)?,
            created_at: Some(model.created_at),
            updated_at: Some(model.updated_at),
        })
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    product_id: i64,
) -> Result<Option<Product>, DomainError> {
    products::Entity::find_by_id(product_id)
        .one(conn)
        .await?
        .map(Product::try_from)
        .transpose()
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Product>, DomainError> {
    products::Entity::find()
        .order_by_asc(products::Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(Product::try_from)
        .collect()
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    product: Product,
) -> Result<Product, DomainError> {
    let now = OffsetDateTime::now_utc();
    let cols = EncodedColumns::from_product(&product)?;
    let active = products::ActiveModel {
        id: NotSet,
        item: Set(product.item),
        price: Set(product.price),
        stock: Set(product.stock),
        pictures: Set(cols.pictures),
        xs: Set(cols.xs),
        s: Set(cols.s),
        m: Set(cols.m),
        l: Set(cols.l),
        xl: Set(cols.xl),
        created_at: Set(now),
        updated_at: Set(now),
    };

    Product::try_from(active.insert(conn).await?)
}

pub async fn save<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    product: Product,
) -> Result<Product, DomainError> {
    let cols = EncodedColumns::from_product(&product)?;
    let active = products::ActiveModel {
        id: Set(product.id),
        item: Set(product.item),
        price: Set(product.price),
        stock: Set(product.stock),
        pictures: Set(cols.pictures),
        xs: Set(cols.xs),
        s: Set(cols.s),
        m: Set(cols.m),
        l: Set(cols.l),
        xl: Set(cols.xl),
        created_at: NotSet,
        updated_at: Set(OffsetDateTime::now_utc()),
    };

    Product::try_from(active.update(conn).await?)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    product_id: i64,
) -> Result<Product, DomainError> {
    let product = find_by_id(conn, product_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Product, "record not found"))?;
    products::Entity::delete_by_id(product_id).exec(conn).await?;
    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::{decode_json, encode_sizing, Sizing};
    use crate::errors::domain::{DomainError, InfraErrorKind};

    #[test]
    fn unset_sizing_is_stored_as_empty_string() {
        assert_eq!(encode_sizing(&None).unwrap(), "");
        let decoded: Option<Sizing> = decode_json("").unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn sizing_decodes_from_stored_json() {
        let decoded: Option<Sizing> = decode_json(r#"{"chest":90,"waist":70,"hip":95}"#).unwrap();
        assert_eq!(
            decoded,
            Some(Sizing {
                chest: 90.0,
                waist: 70.0,
                hip: 95.0
            })
        );
    }

    #[test]
    fn corrupt_json_is_reported() {
        let err = decode_json::<Vec<String>>("[not json").unwrap_err();
        assert!(matches!(
            err,
            DomainError::Infra(InfraErrorKind::DataCorruption, _)
        ));
    }
}
