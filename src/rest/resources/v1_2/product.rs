//! Product resource implementation.
//!
//! Products are the goods an account sells. The same type is used for the
//! `product` rows of the assortment report, which additionally carry stock
//! figures.
//!
//! # Example
//!
//! ```rust,ignore
//! use moysklad_api::query::ApiParameterBuilder;
//! use moysklad_api::rest::RestResource;
//! use moysklad_api::rest::resources::Product;
//!
//! // Products weighing between 1.5 and 3 kg, heaviest first
//! let mut query = ApiParameterBuilder::<Product>::new();
//! query
//!     .filter(Product::WEIGHT)?
//!     .be_greater_or_equal_to(1.5)?
//!     .be_less_or_equal_to(3.0)?;
//! query.order_by_descending(Product::WEIGHT)?;
//!
//! let page = Product::all(&client, Some(&query)).await?;
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::{
    ApiParameterBuilder, Field, FieldDef, FieldMetadata, FieldValue, FilterOperator, FilterValue,
    Queryable,
};
use crate::rest::{ResourceOperation, ResourcePath, RestResource};

use super::common::{date, EntityRef, Meta};

/// The labelling scheme a product is tracked under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductTrackingType {
    /// Not subject to labelling.
    #[default]
    NotTracked,
    /// Tobacco products.
    Tobacco,
    /// Footwear.
    Shoes,
    /// Light industry goods.
    LpClothes,
    /// Household linen.
    LpLinens,
    /// Perfumery.
    Perfumery,
    /// Dairy products.
    Milk,
    /// Packaged water.
    Water,
}

impl ProductTrackingType {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotTracked => "NOT_TRACKED",
            Self::Tobacco => "TOBACCO",
            Self::Shoes => "SHOES",
            Self::LpClothes => "LP_CLOTHES",
            Self::LpLinens => "LP_LINENS",
            Self::Perfumery => "PERFUMERY",
            Self::Milk => "MILK",
            Self::Water => "WATER",
        }
    }
}

impl FilterValue for ProductTrackingType {
    fn to_filter_value(&self) -> String {
        self.as_str().to_string()
    }
}

impl FieldValue for ProductTrackingType {
    type Value = Self;
}

/// A product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The unique identifier.
    #[serde(skip_serializing)]
    pub id: Option<Uuid>,

    /// Entity metadata.
    #[serde(skip_serializing)]
    pub meta: Option<Meta>,

    /// Display name. Required when creating.
    #[serde(default)]
    pub name: String,

    /// Code, unique within the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Identifier in an external system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_code: Option<String>,

    /// Article (SKU).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,

    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the product is archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    /// Weight in kilograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Volume in cubic metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,

    /// Full path of the product's group.
    #[serde(skip_serializing)]
    pub path_name: Option<String>,

    /// Labelling scheme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_type: Option<ProductTrackingType>,

    /// Preferred supplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<EntityRef>,

    /// Product group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_folder: Option<EntityRef>,

    /// Stock on hand (assortment rows only).
    #[serde(skip_serializing)]
    pub stock: Option<f64>,

    /// Reserved quantity (assortment rows only).
    #[serde(skip_serializing)]
    pub reserve: Option<f64>,

    /// Quantity in transit (assortment rows only).
    #[serde(skip_serializing)]
    pub in_transit: Option<f64>,

    /// Available quantity (assortment rows only).
    #[serde(skip_serializing)]
    pub quantity: Option<f64>,

    /// When the product was last updated.
    #[serde(default, skip_serializing, with = "date::option")]
    pub updated: Option<NaiveDateTime>,
}

impl Product {
    /// `id`.
    pub const ID: Field<Self, Uuid> = Field::new(
        "id",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_continue_constraint(),
    );

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

    /// `externalCode`.
    pub const EXTERNAL_CODE: Field<Self, String> = Field::new(
        "externalCode",
        FieldMetadata::new()
            .with_filter(FilterOperator::TEXT)
            .with_continue_constraint(),
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

    /// `description`; may be asserted empty.
    pub const DESCRIPTION: Field<Self, Option<String>> = Field::new(
        "description",
        FieldMetadata::new()
            .with_filter(FilterOperator::TEXT)
            .with_null(),
    );

    /// `archived`.
    pub const ARCHIVED: Field<Self, bool> =
        Field::new("archived", FieldMetadata::new().with_filter(FilterOperator::EQUALITY));

    /// `weight`; range assertions combine.
    pub const WEIGHT: Field<Self, f64> = Field::new(
        "weight",
        FieldMetadata::new()
            .with_filter(FilterOperator::COMPARISON)
            .with_continue_constraint()
            .with_order(),
    );

    /// `volume`; range assertions combine.
    pub const VOLUME: Field<Self, f64> = Field::new(
        "volume",
        FieldMetadata::new()
            .with_filter(FilterOperator::COMPARISON)
            .with_continue_constraint()
            .with_order(),
    );

    /// `pathName`.
    pub const PATH_NAME: Field<Self, Option<String>> = Field::new(
        "pathName",
        FieldMetadata::new()
            .with_filter(FilterOperator::TEXT)
            .with_null()
            .with_order(),
    );

    /// `trackingType`.
    pub const TRACKING_TYPE: Field<Self, ProductTrackingType> = Field::new(
        "trackingType",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_continue_constraint(),
    );

    /// `supplier`.
    pub const SUPPLIER: Field<Self, Option<Meta>> = Field::new(
        "supplier",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_null()
            .with_continue_constraint()
            .with_expand(),
    );

    /// `productFolder`.
    pub const PRODUCT_FOLDER: Field<Self, Meta> = Field::new(
        "productFolder",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_continue_constraint()
            .with_expand(),
    );

    /// `updated`.
    pub const UPDATED: Field<Self, NaiveDateTime> = Field::new(
        "updated",
        FieldMetadata::new()
            .with_filter(FilterOperator::COMPARISON)
            .with_continue_constraint()
            .with_order(),
    );
}

impl Queryable for Product {
    const FIELDS: &'static [FieldDef] = &[
        Self::ID.def(),
        Self::NAME.def(),
        Self::CODE.def(),
        Self::EXTERNAL_CODE.def(),
        Self::ARTICLE.def(),
        Self::DESCRIPTION.def(),
        Self::ARCHIVED.def(),
        Self::WEIGHT.def(),
        Self::VOLUME.def(),
        Self::PATH_NAME.def(),
        Self::TRACKING_TYPE.def(),
        Self::SUPPLIER.def(),
        Self::PRODUCT_FOLDER.def(),
        Self::UPDATED.def(),
    ];
}

impl RestResource for Product {
    type Query = ApiParameterBuilder<Self>;

    const NAME: &'static str = "Product";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "entity/product/{id}"),
        ResourcePath::new(ResourceOperation::All, &[], "entity/product"),
        ResourcePath::new(ResourceOperation::Create, &[], "entity/product"),
        ResourcePath::new(ResourceOperation::Update, &["id"], "entity/product/{id}"),
        ResourcePath::new(ResourceOperation::Delete, &["id"], "entity/product/{id}"),
    ];

    fn get_id(&self) -> Option<Uuid> {
        self.id
    }
}
