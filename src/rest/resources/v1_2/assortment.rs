//! The assortment: products, services, bundles, variants and consignments in
//! one list.
//!
//! Rows are polymorphic; each row's `meta.type` selects the
//! [`AssortmentItem`] variant it deserializes into. A row with any other type
//! fails the whole page rather than being dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use moysklad_api::rest::RestResource;
//! use moysklad_api::rest::resources::{
//!     AssortmentGroupBy, AssortmentItem, AssortmentParameterBuilder,
//! };
//!
//! let mut query = AssortmentParameterBuilder::new();
//! query.filter(AssortmentItem::ARCHIVED)?.be(false)?;
//! query.group_by(AssortmentGroupBy::Variant);
//!
//! let page = AssortmentItem::all(&client, Some(&query)).await?;
//! for item in page.iter() {
//!     println!("{}: {}", item.entity_type(), item.name());
//! }
//! ```

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::query::{
    ApiParameterBuilder, Field, FieldDef, FieldMetadata, FilterOperator, QueryParameters,
    Queryable,
};
use crate::rest::{ReadOnlyResource, ResourceOperation, ResourcePath, RestResource};

use super::common::{date, EntityRef, EntityType, Meta};
use super::Product;

/// A service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// The unique identifier.
    #[serde(skip_serializing)]
    pub id: Option<Uuid>,
    /// Entity metadata.
    #[serde(skip_serializing)]
    pub meta: Option<Meta>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Identifier in an external system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_code: Option<String>,
    /// Whether the service is archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// When the service was last updated.
    #[serde(default, skip_serializing, with = "date::option")]
    pub updated: Option<NaiveDateTime>,
}

/// A bundle of products sold as one item.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// The unique identifier.
    #[serde(skip_serializing)]
    pub id: Option<Uuid>,
    /// Entity metadata.
    #[serde(skip_serializing)]
    pub meta: Option<Meta>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Article (SKU).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
    /// Whether the bundle is archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// Weight in kilograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// When the bundle was last updated.
    #[serde(default, skip_serializing, with = "date::option")]
    pub updated: Option<NaiveDateTime>,
}

/// One value of a variant's characteristic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Characteristic {
    /// Characteristic name, e.g. "Size".
    pub name: String,
    /// The value, e.g. "XL".
    pub value: String,
}

/// A variant (modification) of a product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// The unique identifier.
    #[serde(skip_serializing)]
    pub id: Option<Uuid>,
    /// Entity metadata.
    #[serde(skip_serializing)]
    pub meta: Option<Meta>,
    /// Display name, derived from the product and characteristics.
    #[serde(default)]
    pub name: String,
    /// Code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Whether the variant is archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// The product this is a variant of.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<EntityRef>,
    /// Characteristic values distinguishing the variant.
    #[serde(default)]
    pub characteristics: Vec<Characteristic>,
    /// Stock on hand.
    #[serde(skip_serializing)]
    pub stock: Option<f64>,
    /// When the variant was last updated.
    #[serde(default, skip_serializing, with = "date::option")]
    pub updated: Option<NaiveDateTime>,
}

/// A consignment (batch) of a product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Consignment {
    /// The unique identifier.
    #[serde(skip_serializing)]
    pub id: Option<Uuid>,
    /// Entity metadata.
    #[serde(skip_serializing)]
    pub meta: Option<Meta>,
    /// Display name, derived from the product and label.
    #[serde(default)]
    pub name: String,
    /// Batch label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// The product or variant the batch belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assortment: Option<EntityRef>,
    /// Stock on hand.
    #[serde(skip_serializing)]
    pub stock: Option<f64>,
    /// When the consignment was last updated.
    #[serde(default, skip_serializing, with = "date::option")]
    pub updated: Option<NaiveDateTime>,
}

/// One row of the assortment.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AssortmentItem {
    /// A product.
    Product(Product),
    /// A service.
    Service(Service),
    /// A bundle.
    Bundle(Bundle),
    /// A product variant.
    Variant(Variant),
    /// A consignment.
    Consignment(Consignment),
}

impl<'de> Deserialize<'de> for AssortmentItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let value = serde_json::Value::deserialize(deserializer)?;
        let entity_type = value
            .get("meta")
            .and_then(|meta| meta.get("type"))
            .cloned()
            .ok_or_else(|| D::Error::missing_field("meta.type"))?;
        let entity_type: EntityType = serde_json::from_value(entity_type).map_err(D::Error::custom)?;

        let item = match entity_type {
            EntityType::Product => serde_json::from_value(value).map(Self::Product),
            EntityType::Service => serde_json::from_value(value).map(Self::Service),
            EntityType::Bundle => serde_json::from_value(value).map(Self::Bundle),
            EntityType::Variant => serde_json::from_value(value).map(Self::Variant),
            EntityType::Consignment => serde_json::from_value(value).map(Self::Consignment),
            other => {
                return Err(D::Error::custom(format_args!(
                    "`{other}` is not an assortment type"
                )))
            }
        };
        item.map_err(D::Error::custom)
    }
}

impl AssortmentItem {
    /// `name`.
    pub const NAME: Field<Self, String> = Field::new(
        "name",
        FieldMetadata::new()
            .with_filter(FilterOperator::TEXT)
            .with_continue_constraint()
            .with_order(),
    );

    /// `code`; may be asserted empty.
    pub const CODE: Field<Self, Option<String>> = Field::new(
        "code",
        FieldMetadata::new()
            .with_filter(FilterOperator::TEXT)
            .with_null()
            .with_continue_constraint()
            .with_order(),
    );

    /// `article`; may be asserted empty.
    pub const ARTICLE: Field<Self, Option<String>> = Field::new(
        "article",
        FieldMetadata::new()
            .with_filter(FilterOperator::TEXT)
            .with_null()
            .with_continue_constraint()
            .with_order(),
    );

    /// `archived`.
    pub const ARCHIVED: Field<Self, bool> =
        Field::new("archived", FieldMetadata::new().with_filter(FilterOperator::EQUALITY));

    /// `updated`.
    pub const UPDATED: Field<Self, NaiveDateTime> = Field::new(
        "updated",
        FieldMetadata::new()
            .with_filter(FilterOperator::COMPARISON)
            .with_continue_constraint()
            .with_order(),
    );

    /// The row's entity type.
    #[must_use]
    pub const fn entity_type(&self) -> EntityType {
        match self {
            Self::Product(_) => EntityType::Product,
            Self::Service(_) => EntityType::Service,
            Self::Bundle(_) => EntityType::Bundle,
            Self::Variant(_) => EntityType::Variant,
            Self::Consignment(_) => EntityType::Consignment,
        }
    }

    /// The row's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Product(p) => &p.name,
            Self::Service(s) => &s.name,
            Self::Bundle(b) => &b.name,
            Self::Variant(v) => &v.name,
            Self::Consignment(c) => &c.name,
        }
    }

    /// The row's metadata.
    #[must_use]
    pub const fn meta(&self) -> Option<&Meta> {
        match self {
            Self::Product(p) => p.meta.as_ref(),
            Self::Service(s) => s.meta.as_ref(),
            Self::Bundle(b) => b.meta.as_ref(),
            Self::Variant(v) => v.meta.as_ref(),
            Self::Consignment(c) => c.meta.as_ref(),
        }
    }
}

impl Queryable for AssortmentItem {
    const FIELDS: &'static [FieldDef] = &[
        Self::NAME.def(),
        Self::CODE.def(),
        Self::ARTICLE.def(),
        Self::ARCHIVED.def(),
        Self::UPDATED.def(),
    ];
}

impl RestResource for AssortmentItem {
    type Query = AssortmentParameterBuilder;

    const NAME: &'static str = "Assortment";

    const PATHS: &'static [ResourcePath] =
        &[ResourcePath::new(ResourceOperation::All, &[], "entity/assortment")];

    fn get_id(&self) -> Option<Uuid> {
        match self {
            Self::Product(p) => p.id,
            Self::Service(s) => s.id,
            Self::Bundle(b) => b.id,
            Self::Variant(v) => v.id,
            Self::Consignment(c) => c.id,
        }
    }
}

impl ReadOnlyResource for AssortmentItem {}

/// How variants and consignments are grouped into assortment rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssortmentGroupBy {
    /// Only products, services and bundles.
    Product,
    /// Products with their variants.
    Variant,
    /// Every row including consignments.
    Consignment,
}

impl AssortmentGroupBy {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Variant => "variant",
            Self::Consignment => "consignment",
        }
    }
}

/// Query for the assortment: the base verbs plus `groupBy`.
#[derive(Debug, Clone, Default)]
pub struct AssortmentParameterBuilder {
    base: ApiParameterBuilder<AssortmentItem>,
    group_by: Option<AssortmentGroupBy>,
}

impl AssortmentParameterBuilder {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base: ApiParameterBuilder::new(),
            group_by: None,
        }
    }

    /// Sets the row grouping.
    pub fn group_by(&mut self, group_by: AssortmentGroupBy) -> &mut Self {
        self.group_by = Some(group_by);
        self
    }
}

impl Deref for AssortmentParameterBuilder {
    type Target = ApiParameterBuilder<AssortmentItem>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for AssortmentParameterBuilder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}

impl QueryParameters for AssortmentParameterBuilder {
    fn build(&self) -> HashMap<String, String> {
        let mut params = self.base.build();
        if let Some(group_by) = self.group_by {
            params.insert("groupBy".to_string(), group_by.as_str().to_string());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ValidationError;
    use serde_json::json;

    fn row(entity_type: &str, name: &str) -> serde_json::Value {
        json!({
            "meta": {
                "href": format!("https://api.moysklad.ru/api/remap/1.2/entity/{entity_type}/7944ef04-f831-11e5-7a69-971500188b19"),
                "type": entity_type
            },
            "id": "7944ef04-f831-11e5-7a69-971500188b19",
            "name": name
        })
    }

    #[test]
    fn test_rows_dispatch_on_meta_type() {
        let rows: Vec<AssortmentItem> = serde_json::from_value(json!([
            row("product", "Widget"),
            row("service", "Delivery"),
            row("bundle", "Starter kit"),
            row("variant", "Widget (XL)"),
            row("consignment", "Widget, batch 7"),
        ]))
        .unwrap();

        let types: Vec<EntityType> = rows.iter().map(AssortmentItem::entity_type).collect();
        assert_eq!(
            types,
            vec![
                EntityType::Product,
                EntityType::Service,
                EntityType::Bundle,
                EntityType::Variant,
                EntityType::Consignment,
            ]
        );
        assert_eq!(rows[1].name(), "Delivery");
        assert!(matches!(&rows[0], AssortmentItem::Product(p) if p.name == "Widget"));
    }

    #[test]
    fn test_variant_keeps_characteristics() {
        let mut value = row("variant", "Widget (XL)");
        value["characteristics"] = json!([{"name": "Size", "value": "XL"}]);
        value["stock"] = json!(4.0);

        let item: AssortmentItem = serde_json::from_value(value).unwrap();
        let AssortmentItem::Variant(variant) = item else {
            panic!("expected a variant");
        };
        assert_eq!(variant.characteristics[0].value, "XL");
        assert_eq!(variant.stock, Some(4.0));
    }

    #[test]
    fn test_non_assortment_type_is_an_error() {
        let result: Result<AssortmentItem, _> =
            serde_json::from_value(row("counterparty", "Acme LLC"));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let result: Result<AssortmentItem, _> = serde_json::from_value(row("spaceship", "?"));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_meta_is_an_error() {
        let result: Result<AssortmentItem, _> = serde_json::from_value(json!({"name": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_group_by_extends_base_parameters() {
        let mut query = AssortmentParameterBuilder::new();
        query
            .filter(AssortmentItem::ARCHIVED)
            .unwrap()
            .be(false)
            .unwrap();
        query.order_by(AssortmentItem::NAME).unwrap();
        query.group_by(AssortmentGroupBy::Consignment);

        let params = query.build();
        assert_eq!(params["filter"], "archived=false");
        assert_eq!(params["order"], "name,asc");
        assert_eq!(params["groupBy"], "consignment");
    }

    #[test]
    fn test_empty_assortment_query_has_no_parameters() {
        assert!(AssortmentParameterBuilder::new().build().is_empty());
    }

    #[test]
    fn test_assortment_is_read_only() {
        assert!(crate::rest::get_path(
            AssortmentItem::PATHS,
            ResourceOperation::Create,
            &[]
        )
        .is_none());
        let mut query = AssortmentParameterBuilder::new();
        assert!(matches!(
            query.limit(0),
            Err(ValidationError::LimitOutOfRange { .. })
        ));
    }
}
