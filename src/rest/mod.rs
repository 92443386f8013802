//! Resource infrastructure for the MoySklad JSON API.
//!
//! - **[`RestResource`] trait**: CRUD operations over typed entities
//! - **[`ReadOnlyResource`] marker trait**: resources that only support reads
//! - **[`ApiResponse<T>`]**: a Deref-based wrapper carrying rate limit and request ID
//! - **[`EntityList<T>`]**: one page of a collection (`meta` + `rows`)
//! - **Path building**: multiple paths per resource for nested entities
//! - **[`ApiError`]**: translation of non-2xx responses
//!
//! # Example
//!
//! ```rust,ignore
//! use moysklad_api::{Credentials, MoySkladConfig, RestClient};
//! use moysklad_api::query::ApiParameterBuilder;
//! use moysklad_api::rest::RestResource;
//! use moysklad_api::rest::resources::Counterparty;
//!
//! let config = MoySkladConfig::builder()
//!     .credentials(Credentials::token("token")?)
//!     .build()?;
//! let client = RestClient::new(&config)?;
//!
//! let mut query = ApiParameterBuilder::<Counterparty>::new();
//! query.filter(Counterparty::NAME)?.contains("Acme")?;
//! query.order_by(Counterparty::NAME)?;
//!
//! let page = Counterparty::all(&client, Some(&query)).await?;
//! for counterparty in page.iter() {
//!     println!("{}", counterparty.name);
//! }
//!
//! let mut counterparty = page.rows[0].clone();
//! counterparty.description = Some("Key account".to_string());
//! let saved = counterparty.save(&client).await?;  // PUT
//! saved.delete(&client).await?;
//! ```

mod errors;
mod path;
mod resource;
mod response;

pub mod resources;

pub(crate) use resource::fetch;

pub use errors::{ApiError, ApiErrorDetail};
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::{ReadOnlyResource, RestResource};
pub use response::{ApiResponse, EntityList, ListMeta};
