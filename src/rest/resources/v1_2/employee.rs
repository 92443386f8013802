//! Employee resource implementation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::{ApiParameterBuilder, Field, FieldDef, FieldMetadata, FilterOperator, Queryable};
use crate::rest::{ResourceOperation, ResourcePath, RestResource};

use super::common::{date, Meta};

/// An employee of the account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// The unique identifier.
    #[serde(skip_serializing)]
    pub id: Option<Uuid>,

    /// Entity metadata.
    #[serde(skip_serializing)]
    pub meta: Option<Meta>,

    /// Full name as displayed; derived from the name parts.
    #[serde(skip_serializing)]
    pub name: Option<String>,

    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Middle name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,

    /// Last name. Required when creating.
    #[serde(default)]
    pub last_name: String,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Login (`login@account`).
    #[serde(skip_serializing)]
    pub uid: Option<String>,

    /// Whether the employee is archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    /// When the employee was last updated.
    #[serde(default, skip_serializing, with = "date::option")]
    pub updated: Option<NaiveDateTime>,
}

impl Employee {
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

    /// `lastName`.
    pub const LAST_NAME: Field<Self, String> = Field::new(
        "lastName",
        FieldMetadata::new()
            .with_filter(FilterOperator::TEXT)
            .with_continue_constraint()
            .with_order(),
    );

    /// `email`; may be asserted empty.
    pub const EMAIL: Field<Self, Option<String>> = Field::new(
        "email",
        FieldMetadata::new()
            .with_filter(FilterOperator::TEXT)
            .with_null()
            .with_continue_constraint(),
    );

    /// `uid`.
    pub const UID: Field<Self, String> = Field::new(
        "uid",
        FieldMetadata::new()
            .with_filter(FilterOperator::TEXT)
            .with_continue_constraint(),
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
}

impl Queryable for Employee {
    const FIELDS: &'static [FieldDef] = &[
        Self::ID.def(),
        Self::NAME.def(),
        Self::LAST_NAME.def(),
        Self::EMAIL.def(),
        Self::UID.def(),
        Self::ARCHIVED.def(),
        Self::UPDATED.def(),
    ];
}

impl RestResource for Employee {
    type Query = ApiParameterBuilder<Self>;

    const NAME: &'static str = "Employee";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "entity/employee/{id}"),
        ResourcePath::new(ResourceOperation::All, &[], "entity/employee"),
        ResourcePath::new(ResourceOperation::Create, &[], "entity/employee"),
        ResourcePath::new(ResourceOperation::Update, &["id"], "entity/employee/{id}"),
        ResourcePath::new(ResourceOperation::Delete, &["id"], "entity/employee/{id}"),
    ];

    fn get_id(&self) -> Option<Uuid> {
        self.id
    }
}
