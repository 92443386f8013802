//! Counterparty resource implementation.
//!
//! Counterparties are the customers and suppliers of an account. A
//! counterparty carries the composite `kzDetails` block of Kazakhstan
//! requisites, whose sub-fields can be filtered as `kzDetails.oked` while the
//! block itself cannot.
//!
//! # Example
//!
//! ```rust,ignore
//! use moysklad_api::query::ApiParameterBuilder;
//! use moysklad_api::rest::RestResource;
//! use moysklad_api::rest::resources::{CompanyType, Counterparty, KzDetails};
//!
//! let mut query = ApiParameterBuilder::<Counterparty>::new();
//! query.filter(Counterparty::COMPANY_TYPE)?.be(CompanyType::Legal)?;
//! query.filter(Counterparty::KZ_DETAILS.then(KzDetails::OKED))?.be("62010")?;
//! query.expand(Counterparty::OWNER)?;
//!
//! let page = Counterparty::all(&client, Some(&query)).await?;
//!
//! let counterparty = Counterparty {
//!     name: "Acme LLC".to_string(),
//!     company_type: Some(CompanyType::Legal),
//!     ..Default::default()
//! };
//! let saved = counterparty.save(&client).await?;
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

/// The legal form of a counterparty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompanyType {
    /// A legal entity.
    #[default]
    Legal,
    /// A sole proprietor.
    Entrepreneur,
    /// A private person.
    Individual,
}

impl CompanyType {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Legal => "legal",
            Self::Entrepreneur => "entrepreneur",
            Self::Individual => "individual",
        }
    }
}

impl FilterValue for CompanyType {
    fn to_filter_value(&self) -> String {
        self.as_str().to_string()
    }
}

impl FieldValue for CompanyType {
    type Value = Self;
}

/// Kazakhstan requisites of a counterparty.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KzDetails {
    /// General classifier of economic activities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oked: Option<String>,

    /// Beneficiary code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kbe: Option<String>,

    /// Business identification number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<String>,
}

impl KzDetails {
    /// `kzDetails.oked`.
    pub const OKED: Field<Self, String> = Field::new(
        "oked",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_continue_constraint(),
    );

    /// `kzDetails.kbe`.
    pub const KBE: Field<Self, String> =
        Field::new("kbe", FieldMetadata::new().with_filter(FilterOperator::EQUALITY));

    /// `kzDetails.bin`.
    pub const BIN: Field<Self, String> =
        Field::new("bin", FieldMetadata::new().with_filter(FilterOperator::TEXT));
}

impl Queryable for KzDetails {
    const FIELDS: &'static [FieldDef] = &[Self::OKED.def(), Self::KBE.def(), Self::BIN.def()];
}

/// A counterparty (customer or supplier).
///
/// # Fields
///
/// Read-only fields (`id`, `meta`, `account_id`, `created`, `updated`) are
/// skipped when saving.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Counterparty {
    /// The unique identifier.
    #[serde(skip_serializing)]
    pub id: Option<Uuid>,

    /// Entity metadata.
    #[serde(skip_serializing)]
    pub meta: Option<Meta>,

    /// The account the counterparty belongs to.
    #[serde(skip_serializing)]
    pub account_id: Option<Uuid>,

    /// Display name. Required when creating.
    #[serde(default)]
    pub name: String,

    /// Code, unique within the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Identifier in an external system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_code: Option<String>,

    /// Free-form comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Taxpayer identification number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,

    /// Legal form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_type: Option<CompanyType>,

    /// Whether the counterparty is archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    /// Group tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Kazakhstan requisites.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kz_details: Option<KzDetails>,

    /// Responsible employee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<EntityRef>,

    /// When the counterparty was created.
    #[serde(default, skip_serializing, with = "date::option")]
    pub created: Option<NaiveDateTime>,

    /// When the counterparty was last updated.
    #[serde(default, skip_serializing, with = "date::option")]
    pub updated: Option<NaiveDateTime>,
}

impl Counterparty {
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

    /// `email`; may be asserted empty.
    pub const EMAIL: Field<Self, Option<String>> = Field::new(
        "email",
        FieldMetadata::new()
            .with_filter(FilterOperator::TEXT)
            .with_null()
            .with_continue_constraint(),
    );

    /// `phone`; may be asserted empty.
    pub const PHONE: Field<Self, Option<String>> = Field::new(
        "phone",
        FieldMetadata::new()
            .with_filter(FilterOperator::TEXT)
            .with_null(),
    );

    /// `inn`; may be asserted empty.
    pub const INN: Field<Self, Option<String>> = Field::new(
        "inn",
        FieldMetadata::new()
            .with_filter(FilterOperator::TEXT)
            .with_null()
            .with_continue_constraint(),
    );

    /// `companyType`.
    pub const COMPANY_TYPE: Field<Self, CompanyType> = Field::new(
        "companyType",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_continue_constraint(),
    );

    /// `archived`.
    pub const ARCHIVED: Field<Self, bool> =
        Field::new("archived", FieldMetadata::new().with_filter(FilterOperator::EQUALITY));

    /// `tags`; each `=` matches one tag.
    pub const TAGS: Field<Self, Option<String>> = Field::new(
        "tags",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_null()
            .with_continue_constraint(),
    );

    /// `kzDetails`; only its sub-fields can be filtered.
    pub const KZ_DETAILS: Field<Self, KzDetails> = Field::new(
        "kzDetails",
        FieldMetadata::new()
            .with_filter(&[])
            .with_nesting(false),
    )
    .with_children(KzDetails::FIELDS);

    /// `owner`, the responsible employee.
    pub const OWNER: Field<Self, Meta> = Field::new(
        "owner",
        FieldMetadata::new()
            .with_filter(FilterOperator::EQUALITY)
            .with_continue_constraint()
            .with_expand(),
    );

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

impl Queryable for Counterparty {
    const FIELDS: &'static [FieldDef] = &[
        Self::ID.def(),
        Self::NAME.def(),
        Self::CODE.def(),
        Self::EXTERNAL_CODE.def(),
        Self::DESCRIPTION.def(),
        Self::EMAIL.def(),
        Self::PHONE.def(),
        Self::INN.def(),
        Self::COMPANY_TYPE.def(),
        Self::ARCHIVED.def(),
        Self::TAGS.def(),
        Self::KZ_DETAILS.def(),
        Self::OWNER.def(),
        Self::CREATED.def(),
        Self::UPDATED.def(),
    ];
}

impl RestResource for Counterparty {
    type Query = ApiParameterBuilder<Self>;

    const NAME: &'static str = "Counterparty";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "entity/counterparty/{id}"),
        ResourcePath::new(ResourceOperation::All, &[], "entity/counterparty"),
        ResourcePath::new(ResourceOperation::Create, &[], "entity/counterparty"),
        ResourcePath::new(ResourceOperation::Update, &["id"], "entity/counterparty/{id}"),
        ResourcePath::new(ResourceOperation::Delete, &["id"], "entity/counterparty/{id}"),
    ];

    fn get_id(&self) -> Option<Uuid> {
        self.id
    }
}
