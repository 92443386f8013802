//! Entity metadata and references.
//!
//! Every entity carries a `meta` block whose `type` names the entity kind
//! and whose `href` is its canonical URL. References between entities are
//! `{"meta": {...}}` objects; an expanded reference additionally carries the
//! fields of the referenced entity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::{FieldValue, FilterValue};

/// The `type` discriminator of the entity kinds this crate models.
///
/// [`Meta`] keeps the raw discriminator so references to other kinds still
/// decode; [`Meta::kind`] maps it onto this enum. Deserializing an
/// `EntityType` directly fails for unlisted discriminators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// A counterparty.
    Counterparty,
    /// A product.
    Product,
    /// A service.
    Service,
    /// A bundle of products.
    Bundle,
    /// A product variant (modification).
    Variant,
    /// A consignment (batch) of a product.
    Consignment,
    /// A customer order.
    #[serde(rename = "customerorder")]
    CustomerOrder,
    /// A position of a customer order.
    #[serde(rename = "customerorderposition")]
    CustomerOrderPosition,
    /// An employee.
    Employee,
    /// A legal entity of the account.
    Organization,
    /// A warehouse.
    Store,
    /// A department.
    Group,
    /// A product group.
    #[serde(rename = "productfolder")]
    ProductFolder,
    /// A unit of measure.
    Uom,
    /// A currency.
    Currency,
    /// A document status.
    State,
    /// A country.
    Country,
    /// A sales channel.
    #[serde(rename = "saleschannel")]
    SalesChannel,
}

impl EntityType {
    /// Every modelled entity kind.
    pub const ALL: &'static [Self] = &[
        Self::Counterparty,
        Self::Product,
        Self::Service,
        Self::Bundle,
        Self::Variant,
        Self::Consignment,
        Self::CustomerOrder,
        Self::CustomerOrderPosition,
        Self::Employee,
        Self::Organization,
        Self::Store,
        Self::Group,
        Self::ProductFolder,
        Self::Uom,
        Self::Currency,
        Self::State,
        Self::Country,
        Self::SalesChannel,
    ];

    /// Maps a `meta.type` discriminator onto a modelled kind.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == name)
    }

    /// Returns the wire name used in `meta.type` and entity paths.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Counterparty => "counterparty",
            Self::Product => "product",
            Self::Service => "service",
            Self::Bundle => "bundle",
            Self::Variant => "variant",
            Self::Consignment => "consignment",
            Self::CustomerOrder => "customerorder",
            Self::CustomerOrderPosition => "customerorderposition",
            Self::Employee => "employee",
            Self::Organization => "organization",
            Self::Store => "store",
            Self::Group => "group",
            Self::ProductFolder => "productfolder",
            Self::Uom => "uom",
            Self::Currency => "currency",
            Self::State => "state",
            Self::Country => "country",
            Self::SalesChannel => "saleschannel",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `meta` block of an entity.
///
/// # Example
///
/// ```rust
/// use moysklad_api::rest::resources::common::{EntityType, Meta};
/// use uuid::Uuid;
///
/// let id = Uuid::parse_str("7944ef04-f831-11e5-7a69-971500188b19").unwrap();
/// let meta = Meta::entity("https://api.moysklad.ru/api/remap/1.2", EntityType::Store, id);
/// assert_eq!(
///     meta.href,
///     "https://api.moysklad.ru/api/remap/1.2/entity/store/7944ef04-f831-11e5-7a69-971500188b19"
/// );
/// assert_eq!(meta.id(), Some(id));
/// assert_eq!(meta.kind(), Some(EntityType::Store));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Canonical URL of the entity.
    pub href: String,
    /// The entity kind as sent by the service, e.g. `product` or `contract`.
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Media type of `href`.
    #[serde(default = "default_media_type")]
    pub media_type: String,
    /// URL of the entity kind's metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_href: Option<String>,
    /// URL of the entity in the web interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid_href: Option<String>,
}

fn default_media_type() -> String {
    "application/json".to_string()
}

impl Meta {
    /// Creates a meta block for an entity under `root` (`{base_url}/{version}`).
    #[must_use]
    pub fn entity(root: &str, entity_type: EntityType, id: Uuid) -> Self {
        Self {
            href: format!("{}/entity/{entity_type}/{id}", root.trim_end_matches('/')),
            entity_type: entity_type.as_str().to_string(),
            media_type: default_media_type(),
            metadata_href: None,
            uuid_href: None,
        }
    }

    /// Returns the entity kind, `None` for kinds this crate does not model.
    #[must_use]
    pub fn kind(&self) -> Option<EntityType> {
        EntityType::from_wire(&self.entity_type)
    }

    /// Returns the entity ID encoded as the last segment of `href`.
    #[must_use]
    pub fn id(&self) -> Option<Uuid> {
        let path = self.href.split(&['?', '#'][..]).next()?;
        path.rsplit('/').next().and_then(|s| Uuid::parse_str(s).ok())
    }
}

impl FilterValue for Meta {
    fn to_filter_value(&self) -> String {
        self.href.clone()
    }
}

impl FieldValue for Meta {
    type Value = Self;
}

/// A reference to another entity.
///
/// When the reference is expanded, the remaining fields of the referenced
/// entity are kept in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Metadata of the referenced entity.
    pub meta: Meta,
    /// Fields of an expanded reference.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl EntityRef {
    /// Returns `true` if the reference was expanded.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Returns the referenced entity's name, if expanded.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(serde_json::Value::as_str)
    }
}

impl From<Meta> for EntityRef {
    fn from(meta: Meta) -> Self {
        Self {
            meta,
            fields: serde_json::Map::new(),
        }
    }
}
