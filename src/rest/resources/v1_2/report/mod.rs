//! Reports.
//!
//! Reports are computed views rather than entities: they are only read, and
//! each has its own query builder extending
//! [`ApiParameterBuilder`](crate::query::ApiParameterBuilder) with the
//! report's parameters.

mod stock;

pub use stock::{
    CurrentStock, CurrentStockParameterBuilder, CurrentStockType, StockFolder, StockMode,
    StockReport, StockReportParameterBuilder,
};
