//! Customer order resource implementation.
//!
//! A customer order references its counterparty (`agent`), the account's
//! legal entity (`organization`) and optionally a warehouse and a status.
//! Positions live under the order and are listed separately through
//! [`CustomerOrderPosition`].
//!
//! # Example
//!
//! ```rust,ignore
//! use moysklad_api::query::ApiParameterBuilder;
//! use moysklad_api::rest::RestResource;
//! use moysklad_api::rest::resources::{CustomerOrder, CustomerOrderPosition};
//!
//! let mut query = ApiParameterBuilder::<CustomerOrder>::new();
//! query.filter(CustomerOrder::AGENT)?.be(agent_meta)?;
//! query.expand(CustomerOrder::POSITIONS.then(CustomerOrderPosition::ASSORTMENT))?;
//! query.order_by_descending(CustomerOrder::MOMENT)?;
//!
//! let orders = CustomerOrder::all(&client, Some(&query)).await?;
//! ```

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clients::RestClient;
use crate::query::{ApiParameterBuilder, Field, FieldDef, FieldMetadata, FilterOperator, Queryable};
use crate::rest::{
    build_path, fetch, get_path, ApiError, ApiResponse, EntityList, ReadOnlyResource,
    ResourceOperation, ResourcePath, RestResource,
};

use super::common::{date, EntityRef, Meta};

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrder {
    /// The unique identifier.
    #[serde(skip_serializing)]
    pub id: Option<Uuid>,

    /// Entity metadata.
    #[serde(skip_serializing)]
    pub meta: Option<Meta>,

    /// Document number; assigned by the service when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Document date.
    #[serde(
        default,
        with = "date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub moment: Option<NaiveDateTime>,

    /// Whether the order is posted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicable: Option<bool>,

    /// Total in kopecks.
    #[serde(skip_serializing)]
    pub sum: Option<f64>,

    /// The counterparty. Required when creating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<EntityRef>,

    /// The account's legal entity. Required when creating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<EntityRef>,

    /// Shipping warehouse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<EntityRef>,

    /// Document status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<EntityRef>,

    /// Positions sent along with a new order.
    ///
    /// Never populated from responses; use
    /// [`CustomerOrderPosition::all_with_parent`] to list them.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<CustomerOrderPosition>>,

    /// When the order was created.
    #[serde(default, skip_serializing, with = "date::option")]
    pub created: Option<NaiveDateTime>,

    /// When the order was last updated.
    #[serde(default, skip_serializing, with = "date::option")]
    pub updated: Option<NaiveDateTime>,
}

impl CustomerOrder {
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

    /// `description`; may be asserted empty.
    pub const DESCRIPTION: Field<Self, Option<String>> = Field::new(
        "description",
        FieldMetadata::new()
            .with_filter(FilterOperator::TEXT)
            .with_null(),
    );

    /// `moment`.
    pub const MOMENT: Field<Self, NaiveDateTime> = Field::new(
        "moment",
        FieldMetadata::new()
            .with_filter(FilterOperator::COMPARISON)
            .with_continue_constraint()
            .with_order(),
    );

    /// `applicable`.
    pub const APPLICABLE: Field<Self, bool> =
        Field::new("applicable", FieldMetadata::new().with_filter(FilterOperator::EQUALITY));

    /// `sum`.
    pub const SUM: Field<Self, f64> = Field::new(
        "sum",
        FieldMetadata::new()
            .with_filter(FilterOperator::COMPARISON)
            .with_continue_constraint()
            .with_order(),
    );

    /// `agent`.
    pub const AGENT: Field<Self, Meta> = Field::new(
        "agent",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_continue_constraint()
            .with_expand(),
    );

    /// `organization`.
    pub const ORGANIZATION: Field<Self, Meta> = Field::new(
        "organization",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_continue_constraint()
            .with_expand(),
    );

    /// `store`; may be asserted empty.
    pub const STORE: Field<Self, Option<Meta>> = Field::new(
        "store",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_null()
            .with_continue_constraint()
            .with_expand(),
    );

    /// `state`; may be asserted empty.
    pub const STATE: Field<Self, Option<Meta>> = Field::new(
        "state",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_null()
            .with_continue_constraint()
            .with_expand(),
    );

    /// `positions`; expand only, with nested expansion of its links.
    pub const POSITIONS: Field<Self, CustomerOrderPosition> =
        Field::new("positions", FieldMetadata::new().with_expand())
            .with_children(CustomerOrderPosition::FIELDS);

    /// `created`.
    pub const CREATED: Field<Self, NaiveDateTime> = Field::new(
        "created",
        FieldMetadata::new()
            .with_filter(FilterOperator::COMPARISON)
            .with_continue_constraint()
            .with_order(),
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

impl Queryable for CustomerOrder {
    const FIELDS: &'static [FieldDef] = &[
        Self::ID.def(),
        Self::NAME.def(),
        Self::DESCRIPTION.def(),
        Self::MOMENT.def(),
        Self::APPLICABLE.def(),
        Self::SUM.def(),
        Self::AGENT.def(),
        Self::ORGANIZATION.def(),
        Self::STORE.def(),
        Self::STATE.def(),
        Self::POSITIONS.def(),
        Self::CREATED.def(),
        Self::UPDATED.def(),
    ];
}

impl RestResource for CustomerOrder {
    type Query = ApiParameterBuilder<Self>;

    const NAME: &'static str = "CustomerOrder";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "entity/customerorder/{id}"),
        ResourcePath::new(ResourceOperation::All, &[], "entity/customerorder"),
        ResourcePath::new(ResourceOperation::Create, &[], "entity/customerorder"),
        ResourcePath::new(ResourceOperation::Update, &["id"], "entity/customerorder/{id}"),
        ResourcePath::new(ResourceOperation::Delete, &["id"], "entity/customerorder/{id}"),
    ];

    fn get_id(&self) -> Option<Uuid> {
        self.id
    }
}

/// A position (line item) of a customer order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrderPosition {
    /// The unique identifier.
    #[serde(skip_serializing)]
    pub id: Option<Uuid>,

    /// Entity metadata.
    #[serde(skip_serializing)]
    pub meta: Option<Meta>,

    /// Ordered quantity.
    #[serde(default)]
    pub quantity: f64,

    /// Unit price in kopecks.
    #[serde(default)]
    pub price: f64,

    /// Discount in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,

    /// VAT rate in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat: Option<i32>,

    /// The ordered product, service, bundle, variant or consignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assortment: Option<EntityRef>,

    /// Reserved quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve: Option<f64>,
}

impl CustomerOrderPosition {
    /// `quantity`.
    pub const QUANTITY: Field<Self, f64> =
        Field::new("quantity", FieldMetadata::new().with_order());

    /// `assortment`; expand only.
    pub const ASSORTMENT: Field<Self, Meta> =
        Field::new("assortment", FieldMetadata::new().with_expand());

    /// Finds one position of the order `order_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the order or the position doesn't
    /// exist.
    pub async fn find_in_order(
        client: &RestClient,
        order_id: Uuid,
        id: Uuid,
        query: Option<&ApiParameterBuilder<Self>>,
    ) -> Result<ApiResponse<Self>, ApiError> {
        let order_id = order_id.to_string();
        let id = id.to_string();
        let mut ids: HashMap<&str, &str> = HashMap::new();
        ids.insert("order_id", &order_id);
        ids.insert("id", &id);

        let available: Vec<&str> = ids.keys().copied().collect();
        let path = get_path(Self::PATHS, ResourceOperation::Find, &available).ok_or(
            ApiError::PathResolutionFailed {
                resource: Self::NAME,
                operation: ResourceOperation::Find.as_str(),
            },
        )?;
        fetch(client, &build_path(path.template, &ids), query, Self::NAME, Some(&id)).await
    }

    /// Lists the positions of the order `order_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the order doesn't exist.
    pub async fn all_in_order(
        client: &RestClient,
        order_id: Uuid,
        query: Option<&ApiParameterBuilder<Self>>,
    ) -> Result<ApiResponse<EntityList<Self>>, ApiError> {
        Self::all_with_parent(client, "order_id", order_id, query).await
    }
}

impl Queryable for CustomerOrderPosition {
    const FIELDS: &'static [FieldDef] = &[Self::QUANTITY.def(), Self::ASSORTMENT.def()];
}

impl RestResource for CustomerOrderPosition {
    type Query = ApiParameterBuilder<Self>;

    const NAME: &'static str = "CustomerOrderPosition";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            ResourceOperation::Find,
            &["order_id", "id"],
            "entity/customerorder/{order_id}/positions/{id}",
        ),
        ResourcePath::new(
            ResourceOperation::All,
            &["order_id"],
            "entity/customerorder/{order_id}/positions",
        ),
    ];

    fn get_id(&self) -> Option<Uuid> {
        self.id
    }
}

impl ReadOnlyResource for CustomerOrderPosition {}
