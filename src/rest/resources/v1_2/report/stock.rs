//! Stock reports.
//!
//! [`StockReport`] is the extended report (`report/stock/all`): one paged row
//! per assortment item with stock figures and prices. [`CurrentStock`] is the
//! compact report (`report/stock/all/current`): an unpaged array of
//! `(assortment, store, figure)` rows for fast synchronisation.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clients::RestClient;
use crate::query::{
    ApiParameterBuilder, Field, FieldDef, FieldMetadata, FilterOperator, QueryParameters,
    Queryable, FILTER_DATE_TIME_FORMAT,
};
use crate::rest::{fetch, ApiError, ApiResponse, EntityList};

use super::super::common::Meta;
use super::super::AssortmentGroupBy;

const STOCK_REPORT_PATH: &str = "report/stock/all";
const CURRENT_STOCK_PATH: &str = "report/stock/all/current";

/// The product group of a stock report row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockFolder {
    /// URL of the group.
    pub href: String,
    /// Group name.
    pub name: String,
    /// Full path of the group.
    #[serde(default)]
    pub path_name: Option<String>,
}

/// One row of the extended stock report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    /// Metadata of the product, variant or consignment.
    pub meta: Meta,
    /// Name of the item.
    pub name: String,
    /// Code of the item.
    #[serde(default)]
    pub code: Option<String>,
    /// Article of the item.
    #[serde(default)]
    pub article: Option<String>,
    /// External code of the item.
    #[serde(default)]
    pub external_code: Option<String>,
    /// Stock on hand.
    #[serde(default)]
    pub stock: f64,
    /// Quantity in transit.
    #[serde(default)]
    pub in_transit: f64,
    /// Reserved quantity.
    #[serde(default)]
    pub reserve: f64,
    /// Available quantity (`stock - reserve + inTransit`).
    #[serde(default)]
    pub quantity: f64,
    /// Cost price in kopecks.
    #[serde(default)]
    pub price: f64,
    /// Sale price in kopecks.
    #[serde(default)]
    pub sale_price: f64,
    /// Days the stock has been on hand.
    #[serde(default)]
    pub stock_days: f64,
    /// Product group.
    #[serde(default)]
    pub folder: Option<StockFolder>,
}

impl StockReport {
    /// `store`; filters the figures to one or more warehouses.
    pub const STORE: Field<Self, Meta> = Field::new(
        "store",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_continue_constraint(),
    );

    /// `product`.
    pub const PRODUCT: Field<Self, Meta> = Field::new(
        "product",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_continue_constraint(),
    );

    /// `productFolder`.
    pub const PRODUCT_FOLDER: Field<Self, Meta> = Field::new(
        "productFolder",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_continue_constraint(),
    );

    /// `moment`; the report is computed as of this point in time.
    pub const MOMENT: Field<Self, NaiveDateTime> =
        Field::new("moment", FieldMetadata::new().with_filter(&[FilterOperator::Equal]));

    /// `name`.
    pub const NAME: Field<Self, String> = Field::new("name", FieldMetadata::new().with_order());

    /// `stock`.
    pub const STOCK: Field<Self, f64> = Field::new("stock", FieldMetadata::new().with_order());

    /// `quantity`.
    pub const QUANTITY: Field<Self, f64> =
        Field::new("quantity", FieldMetadata::new().with_order());

    /// Fetches one page of the report.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the service rejects the
    /// query.
    pub async fn all(
        client: &RestClient,
        query: Option<&StockReportParameterBuilder>,
    ) -> Result<ApiResponse<EntityList<Self>>, ApiError> {
        fetch(client, STOCK_REPORT_PATH, query, "StockReport", None).await
    }
}

impl Queryable for StockReport {
    const FIELDS: &'static [FieldDef] = &[
        Self::STORE.def(),
        Self::PRODUCT.def(),
        Self::PRODUCT_FOLDER.def(),
        Self::MOMENT.def(),
        Self::NAME.def(),
        Self::STOCK.def(),
        Self::QUANTITY.def(),
    ];
}

/// Which rows the extended stock report includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockMode {
    /// Every item.
    #[default]
    All,
    /// Items with positive stock.
    PositiveOnly,
    /// Items with negative stock.
    NegativeOnly,
    /// Items with zero stock.
    Empty,
    /// Items with non-zero stock.
    NonEmpty,
    /// Items below their minimum balance.
    UnderMinimum,
}

impl StockMode {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::PositiveOnly => "positiveOnly",
            Self::NegativeOnly => "negativeOnly",
            Self::Empty => "empty",
            Self::NonEmpty => "nonEmpty",
            Self::UnderMinimum => "underMinimum",
        }
    }
}

/// Query for the extended stock report.
///
/// `stockMode` is a term of the service's `filter` value, so it is appended
/// after the field assertions.
///
/// ```rust
/// use moysklad_api::query::QueryParameters;
/// use moysklad_api::rest::resources::{StockMode, StockReport, StockReportParameterBuilder};
///
/// let mut query = StockReportParameterBuilder::new();
/// query.order_by_descending(StockReport::STOCK).unwrap();
/// query.stock_mode(StockMode::PositiveOnly);
///
/// let params = query.build();
/// assert_eq!(params["filter"], "stockMode=positiveOnly");
/// assert_eq!(params["order"], "stock,desc");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StockReportParameterBuilder {
    base: ApiParameterBuilder<StockReport>,
    group_by: Option<AssortmentGroupBy>,
    stock_mode: Option<StockMode>,
}

impl StockReportParameterBuilder {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base: ApiParameterBuilder::new(),
            group_by: None,
            stock_mode: None,
        }
    }

    /// Sets the row grouping.
    pub fn group_by(&mut self, group_by: AssortmentGroupBy) -> &mut Self {
        self.group_by = Some(group_by);
        self
    }

    /// Restricts the rows by stock level.
    pub fn stock_mode(&mut self, stock_mode: StockMode) -> &mut Self {
        self.stock_mode = Some(stock_mode);
        self
    }
}

impl Deref for StockReportParameterBuilder {
    type Target = ApiParameterBuilder<StockReport>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for StockReportParameterBuilder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}

impl QueryParameters for StockReportParameterBuilder {
    fn build(&self) -> HashMap<String, String> {
        let mut params = self.base.build();
        if let Some(group_by) = self.group_by {
            params.insert("groupBy".to_string(), group_by.as_str().to_string());
        }
        if let Some(stock_mode) = self.stock_mode {
            let term = format!("stockMode={}", stock_mode.as_str());
            params
                .entry("filter".to_string())
                .and_modify(|filter| {
                    filter.push(';');
                    filter.push_str(&term);
                })
                .or_insert(term);
        }
        params
    }
}

/// One row of the compact stock report.
///
/// Only the figure selected by [`CurrentStockType`] is present; `stock` when
/// none was requested.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStock {
    /// ID of the product, variant or consignment.
    pub assortment_id: Uuid,
    /// ID of the warehouse; absent when the report spans all warehouses.
    #[serde(default)]
    pub store_id: Option<Uuid>,
    /// Stock on hand.
    #[serde(default)]
    pub stock: Option<f64>,
    /// Stock not reserved.
    #[serde(default)]
    pub free_stock: Option<f64>,
    /// Available quantity.
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Reserved quantity.
    #[serde(default)]
    pub reserve: Option<f64>,
    /// Quantity in transit.
    #[serde(default)]
    pub in_transit: Option<f64>,
}

impl CurrentStock {
    /// `assortmentId`.
    pub const ASSORTMENT_ID: Field<Self, Uuid> = Field::new(
        "assortmentId",
        FieldMetadata::new()
            .with_filter(&[FilterOperator::Equal])
            .with_continue_constraint(),
    );

    /// `storeId`.
    pub const STORE_ID: Field<Self, Uuid> = Field::new(
        "storeId",
        FieldMetadata::new()
            .with_filter(&[FilterOperator::Equal])
            .with_continue_constraint(),
    );

    /// Fetches the report.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the service rejects the
    /// query.
    pub async fn all(
        client: &RestClient,
        query: Option<&CurrentStockParameterBuilder>,
    ) -> Result<ApiResponse<Vec<Self>>, ApiError> {
        fetch(client, CURRENT_STOCK_PATH, query, "CurrentStock", None).await
    }
}

impl Queryable for CurrentStock {
    const FIELDS: &'static [FieldDef] = &[Self::ASSORTMENT_ID.def(), Self::STORE_ID.def()];
}

/// The figure reported by [`CurrentStock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrentStockType {
    /// Stock on hand.
    #[default]
    Stock,
    /// Stock not reserved.
    FreeStock,
    /// Available quantity.
    Quantity,
    /// Reserved quantity.
    Reserve,
    /// Quantity in transit.
    InTransit,
}

impl CurrentStockType {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::FreeStock => "freeStock",
            Self::Quantity => "quantity",
            Self::Reserve => "reserve",
            Self::InTransit => "inTransit",
        }
    }
}

/// Query for the compact stock report.
///
/// ```rust
/// use chrono::NaiveDate;
/// use moysklad_api::query::QueryParameters;
/// use moysklad_api::rest::resources::{CurrentStockParameterBuilder, CurrentStockType};
///
/// let since = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let mut query = CurrentStockParameterBuilder::new();
/// query
///     .changed_since(since)
///     .include_zero_lines(true)
///     .stock_type(CurrentStockType::FreeStock);
///
/// let params = query.build();
/// assert_eq!(params["changedSince"], "2024-06-01 00:00:00");
/// assert_eq!(params["include"], "zeroLines");
/// assert_eq!(params["stockType"], "freeStock");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CurrentStockParameterBuilder {
    base: ApiParameterBuilder<CurrentStock>,
    changed_since: Option<NaiveDateTime>,
    include_zero_lines: bool,
    stock_type: Option<CurrentStockType>,
}

impl CurrentStockParameterBuilder {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base: ApiParameterBuilder::new(),
            changed_since: None,
            include_zero_lines: false,
            stock_type: None,
        }
    }

    /// Reports only rows whose figures changed after `moment`.
    pub fn changed_since(&mut self, moment: NaiveDateTime) -> &mut Self {
        self.changed_since = Some(moment);
        self
    }

    /// Includes rows whose figure is zero.
    pub fn include_zero_lines(&mut self, include: bool) -> &mut Self {
        self.include_zero_lines = include;
        self
    }

    /// Selects the reported figure.
    pub fn stock_type(&mut self, stock_type: CurrentStockType) -> &mut Self {
        self.stock_type = Some(stock_type);
        self
    }
}

impl Deref for CurrentStockParameterBuilder {
    type Target = ApiParameterBuilder<CurrentStock>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for CurrentStockParameterBuilder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}

impl QueryParameters for CurrentStockParameterBuilder {
    fn build(&self) -> HashMap<String, String> {
        let mut params = self.base.build();
        if let Some(moment) = self.changed_since {
            params.insert(
                "changedSince".to_string(),
                moment.format(FILTER_DATE_TIME_FORMAT).to_string(),
            );
        }
        if self.include_zero_lines {
            params.insert("include".to_string(), "zeroLines".to_string());
        }
        if let Some(stock_type) = self.stock_type {
            params.insert("stockType".to_string(), stock_type.as_str().to_string());
        }
        params
    }
}
