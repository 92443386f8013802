//! Resources of JSON API 1.2.
//!
//! # Entities
//!
//! - [`Counterparty`]: customers and suppliers, with nested [`KzDetails`]
//! - [`Product`]: goods
//! - [`CustomerOrder`] and its [`CustomerOrderPosition`]s
//! - [`Employee`]
//!
//! # Lists and reports
//!
//! - [`AssortmentItem`]: products, services, bundles, variants and
//!   consignments in one polymorphic list
//! - [`StockReport`] and [`CurrentStock`]
//!
//! Every entity declares its queryable fields as associated constants
//! (`Counterparty::NAME`, `Product::WEIGHT`, ...) for use with
//! [`ApiParameterBuilder`](crate::query::ApiParameterBuilder).

pub mod common;
mod assortment;
mod counterparty;
mod customer_order;
mod employee;
mod product;
mod report;

pub use assortment::{
    AssortmentGroupBy, AssortmentItem, AssortmentParameterBuilder, Bundle, Characteristic,
    Consignment, Service, Variant,
};
pub use counterparty::{CompanyType, Counterparty, KzDetails};
pub use customer_order::{CustomerOrder, CustomerOrderPosition};
pub use employee::Employee;
pub use product::{Product, ProductTrackingType};

// Reports
pub use report::{
    CurrentStock, CurrentStockParameterBuilder, CurrentStockType, StockFolder, StockMode,
    StockReport, StockReportParameterBuilder,
};
