//! Declarative field metadata and typed field selectors.
//!
//! Each queryable entity declares its fields as [`Field`] constants and lists
//! them in a [`Queryable::FIELDS`] registration table. A [`Field`] ties the
//! wire name of a field and its [`FieldMetadata`] to the entity type and the
//! value type, so a query can only address fields of the entity it is built
//! for and only with assertions valid for the field's value domain.
//!
//! # Example
//!
//! ```rust
//! use moysklad_api::query::{Field, FieldDef, FieldMetadata, FilterOperator, Queryable};
//!
//! struct Details;
//! struct Company;
//!
//! impl Details {
//!     const CODE: Field<Self, String> =
//!         Field::new("code", FieldMetadata::new().with_filter(FilterOperator::EQUALITY));
//! }
//!
//! impl Queryable for Details {
//!     const FIELDS: &'static [FieldDef] = &[Self::CODE.def()];
//! }
//!
//! impl Company {
//!     const DETAILS: Field<Self, Details> = Field::new(
//!         "details",
//!         FieldMetadata::new().with_filter(&[]).with_nesting(false),
//!     )
//!     .with_children(Details::FIELDS);
//! }
//!
//! let selector = Company::DETAILS.then(Details::CODE);
//! let resolved = selector.resolve(moysklad_api::query::FieldUsage::Filter).unwrap();
//! assert_eq!(resolved.path(), "details.code");
//! ```

use std::marker::PhantomData;

use crate::query::{FieldUsage, FilterOperator, ValidationError};

/// Rules attached to a single field.
///
/// Built with `const` builder methods so metadata can live in constants:
///
/// ```rust
/// use moysklad_api::query::{FieldMetadata, FilterOperator};
///
/// const NAME: FieldMetadata = FieldMetadata::new()
///     .with_filter(FilterOperator::TEXT)
///     .with_continue_constraint()
///     .with_order();
///
/// assert!(NAME.filterable);
/// assert!(NAME.orderable);
/// assert!(!NAME.allow_null);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldMetadata {
    /// Whether the field may appear in `filter` at all.
    pub filterable: bool,
    /// Operators accepted on the field. Empty means every operator.
    pub allowed_operators: &'static [FilterOperator],
    /// Whether an empty value may be asserted.
    pub allow_null: bool,
    /// Whether more than one assertion may target the field.
    pub allow_continue_constraint: bool,
    /// Whether sub-fields of this composite field may be addressed.
    pub allow_nesting: bool,
    /// Whether this composite field may be filtered without naming a sub-field.
    pub allow_filter_by_root_nesting_member: bool,
    /// Whether the field may appear in `order`.
    pub orderable: bool,
    /// Whether the field may appear in `expand`.
    pub expandable: bool,
}

impl FieldMetadata {
    /// Metadata with every capability switched off.
    pub const NONE: Self = Self {
        filterable: false,
        allowed_operators: &[],
        allow_null: false,
        allow_continue_constraint: false,
        allow_nesting: false,
        allow_filter_by_root_nesting_member: false,
        orderable: false,
        expandable: false,
    };

    /// Creates metadata with every capability switched off.
    #[must_use]
    pub const fn new() -> Self {
        Self::NONE
    }

    /// Makes the field filterable with the given operators.
    #[must_use]
    pub const fn with_filter(mut self, operators: &'static [FilterOperator]) -> Self {
        self.filterable = true;
        self.allowed_operators = operators;
        self
    }

    /// Allows empty values to be asserted.
    #[must_use]
    pub const fn with_null(mut self) -> Self {
        self.allow_null = true;
        self
    }

    /// Allows more than one assertion on the field.
    #[must_use]
    pub const fn with_continue_constraint(mut self) -> Self {
        self.allow_continue_constraint = true;
        self
    }

    /// Allows sub-fields to be addressed.
    ///
    /// `filter_by_root` controls whether the composite field itself may
    /// still be filtered directly.
    #[must_use]
    pub const fn with_nesting(mut self, filter_by_root: bool) -> Self {
        self.allow_nesting = true;
        self.allow_filter_by_root_nesting_member = filter_by_root;
        self
    }

    /// Makes the field orderable.
    #[must_use]
    pub const fn with_order(mut self) -> Self {
        self.orderable = true;
        self
    }

    /// Makes the field expandable.
    #[must_use]
    pub const fn with_expand(mut self) -> Self {
        self.expandable = true;
        self
    }

    /// Returns whether the field carries metadata for `usage`.
    #[must_use]
    pub const fn supports(&self, usage: FieldUsage) -> bool {
        match usage {
            FieldUsage::Filter => self.filterable,
            FieldUsage::Order => self.orderable,
            FieldUsage::Expand => self.expandable,
        }
    }

    /// Returns whether `operator` is accepted on the field.
    #[must_use]
    pub fn supports_operator(&self, operator: FilterOperator) -> bool {
        self.allowed_operators.is_empty() || self.allowed_operators.contains(&operator)
    }
}

impl Default for FieldMetadata {
    fn default() -> Self {
        Self::NONE
    }
}

/// A declared field: its wire name, metadata and (for composite fields) sub-fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDef {
    /// The wire name of the field.
    pub name: &'static str,
    /// The rules attached to the field.
    pub metadata: FieldMetadata,
    /// Declared sub-fields, empty for scalar fields.
    pub children: &'static [FieldDef],
}

impl FieldDef {
    /// Creates a scalar field declaration.
    #[must_use]
    pub const fn new(name: &'static str, metadata: FieldMetadata) -> Self {
        Self {
            name,
            metadata,
            children: &[],
        }
    }

    /// Attaches sub-field declarations.
    #[must_use]
    pub const fn with_children(mut self, children: &'static [Self]) -> Self {
        self.children = children;
        self
    }

    /// Finds a declared sub-field by wire name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&'static Self> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// A field of entity `E` holding values of type `V`.
///
/// `V` selects the assertion verbs available when the field is filtered
/// (see [`Assertion`](crate::query::Assertion)). For composite fields `V` is
/// the sub-entity type, which lets [`Field::then`] address its fields; for
/// collections it is the element type.
pub struct Field<E, V> {
    def: FieldDef,
    _marker: PhantomData<fn() -> (E, V)>,
}

impl<E, V> Clone for Field<E, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, V> Copy for Field<E, V> {}

impl<E, V> std::fmt::Debug for Field<E, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Field").field(&self.def.name).finish()
    }
}

impl<E, V> Field<E, V> {
    /// Declares a field.
    #[must_use]
    pub const fn new(name: &'static str, metadata: FieldMetadata) -> Self {
        Self {
            def: FieldDef::new(name, metadata),
            _marker: PhantomData,
        }
    }

    /// Attaches sub-field declarations (usually `V::FIELDS`).
    #[must_use]
    pub const fn with_children(mut self, children: &'static [FieldDef]) -> Self {
        self.def = self.def.with_children(children);
        self
    }

    /// Returns the untyped declaration, for [`Queryable::FIELDS`] tables.
    #[must_use]
    pub const fn def(&self) -> FieldDef {
        self.def
    }

    /// Returns the wire name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.def.name
    }

    /// Returns the metadata.
    #[must_use]
    pub const fn metadata(&self) -> FieldMetadata {
        self.def.metadata
    }

    /// Addresses the sub-field `inner` of this composite field.
    #[must_use]
    pub const fn then<W>(self, inner: Field<V, W>) -> FieldSelector<E, W> {
        FieldSelector {
            outer: Some(self.def),
            leaf: inner.def,
            _marker: PhantomData,
        }
    }
}

/// A reference to a field of `E`, either direct or one level nested.
pub struct FieldSelector<E, V> {
    outer: Option<FieldDef>,
    leaf: FieldDef,
    _marker: PhantomData<fn() -> (E, V)>,
}

impl<E, V> Clone for FieldSelector<E, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, V> Copy for FieldSelector<E, V> {}

impl<E, V> std::fmt::Debug for FieldSelector<E, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSelector")
            .field("outer", &self.outer.map(|d| d.name))
            .field("leaf", &self.leaf.name)
            .finish()
    }
}

impl<E, V> From<Field<E, V>> for FieldSelector<E, V> {
    fn from(field: Field<E, V>) -> Self {
        Self {
            outer: None,
            leaf: field.def,
            _marker: PhantomData,
        }
    }
}

impl<E, V> FieldSelector<E, V> {
    pub(crate) const fn from_defs(outer: Option<FieldDef>, leaf: FieldDef) -> Self {
        Self {
            outer,
            leaf,
            _marker: PhantomData,
        }
    }

    /// Resolves the wire path and metadata for `usage`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the leaf field carries no metadata for
    /// `usage`, when the outer field does not allow nesting, or when a
    /// composite field is filtered directly without
    /// `allow_filter_by_root_nesting_member`.
    pub fn resolve(&self, usage: FieldUsage) -> Result<ResolvedField, ValidationError> {
        resolve(self.outer.as_ref(), &self.leaf, usage)
    }
}

/// A field path resolved for one usage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedField {
    path: String,
    metadata: FieldMetadata,
}

impl ResolvedField {
    /// The dotted wire path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The metadata of the leaf field.
    #[must_use]
    pub const fn metadata(&self) -> &FieldMetadata {
        &self.metadata
    }
}

fn resolve(
    outer: Option<&FieldDef>,
    leaf: &FieldDef,
    usage: FieldUsage,
) -> Result<ResolvedField, ValidationError> {
    let Some(outer) = outer else {
        if !leaf.metadata.supports(usage) {
            return Err(ValidationError::UnsupportedUsage {
                field: leaf.name.to_string(),
                usage,
            });
        }
        if usage == FieldUsage::Filter
            && leaf.metadata.allow_nesting
            && !leaf.metadata.allow_filter_by_root_nesting_member
        {
            return Err(ValidationError::RootNestingMember {
                field: leaf.name.to_string(),
            });
        }
        return Ok(ResolvedField {
            path: leaf.name.to_string(),
            metadata: leaf.metadata,
        });
    };

    // Expansion follows expandable links; filter and order need nesting.
    let reachable = match usage {
        FieldUsage::Expand => outer.metadata.expandable,
        FieldUsage::Filter | FieldUsage::Order => outer.metadata.allow_nesting,
    };
    if !reachable {
        return Err(ValidationError::NestingNotAllowed {
            outer: outer.name.to_string(),
            inner: leaf.name.to_string(),
        });
    }

    let path = format!("{}.{}", outer.name, leaf.name);
    if !leaf.metadata.supports(usage) {
        return Err(ValidationError::UnsupportedUsage { field: path, usage });
    }

    Ok(ResolvedField {
        path,
        metadata: leaf.metadata,
    })
}

/// An entity whose fields can be addressed by a query.
///
/// `FIELDS` is the registration table consulted by the by-name overloads of
/// [`ApiParameterBuilder`](crate::query::ApiParameterBuilder). It is built at
/// compile time and never changes.
pub trait Queryable {
    /// The declared fields of the entity.
    const FIELDS: &'static [FieldDef];

    /// Looks up a field by its wire path (`name` or `outer.inner`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyFieldName`] for an empty path,
    /// [`ValidationError::NestingTooDeep`] for more than two segments and
    /// [`ValidationError::UnknownField`] when a segment is not declared.
    fn field_by_name<V>(path: &str) -> Result<FieldSelector<Self, V>, ValidationError>
    where
        Self: Sized,
    {
        let (outer, leaf) = lookup(Self::FIELDS, path)?;
        Ok(FieldSelector::from_defs(outer, leaf))
    }
}

fn lookup(
    fields: &'static [FieldDef],
    path: &str,
) -> Result<(Option<FieldDef>, FieldDef), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::EmptyFieldName);
    }

    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ValidationError::EmptyFieldName);
    }

    let find = |name: &str| {
        fields
            .iter()
            .find(|f| f.name == name)
            .copied()
            .ok_or_else(|| ValidationError::UnknownField {
                field: name.to_string(),
            })
    };

    match segments.as_slice() {
        [name] => Ok((None, find(*name)?)),
        [outer, inner] => {
            let outer = find(*outer)?;
            let leaf = outer
                .child(inner)
                .copied()
                .ok_or_else(|| ValidationError::UnknownField {
                    field: path.to_string(),
                })?;
            Ok((Some(outer), leaf))
        }
        _ => Err(ValidationError::NestingTooDeep {
            path: path.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Details;
    struct Company;

    impl Details {
        const CODE: Field<Self, String> = Field::new(
            "code",
            FieldMetadata::new().with_filter(FilterOperator::EQUALITY),
        );
        const NOTE: Field<Self, String> = Field::new("note", FieldMetadata::new());
    }

    impl Queryable for Details {
        const FIELDS: &'static [FieldDef] = &[Self::CODE.def(), Self::NOTE.def()];
    }

    impl Company {
        const NAME: Field<Self, String> = Field::new(
            "name",
            FieldMetadata::new()
                .with_filter(FilterOperator::TEXT)
                .with_order(),
        );
        const DETAILS: Field<Self, Details> =
            Field::new("details", FieldMetadata::new().with_filter(&[]).with_nesting(false))
                .with_children(Details::FIELDS);
        const OPEN_DETAILS: Field<Self, Details> =
            Field::new("openDetails", FieldMetadata::new().with_filter(&[]).with_nesting(true))
                .with_children(Details::FIELDS);
        const FLAT: Field<Self, Details> =
            Field::new("flat", FieldMetadata::new().with_filter(&[]).with_expand())
                .with_children(Details::FIELDS);
    }

    impl Queryable for Company {
        const FIELDS: &'static [FieldDef] = &[
            Self::NAME.def(),
            Self::DETAILS.def(),
            Self::OPEN_DETAILS.def(),
            Self::FLAT.def(),
        ];
    }

    #[test]
    fn test_direct_field_resolves_to_its_wire_name() {
        let selector: FieldSelector<Company, String> = Company::NAME.into();
        let resolved = selector.resolve(FieldUsage::Filter).unwrap();
        assert_eq!(resolved.path(), "name");
        assert!(resolved.metadata().orderable);
    }

    #[test]
    fn test_missing_metadata_fails_for_usage() {
        let selector: FieldSelector<Company, String> = Company::NAME.into();
        let result = selector.resolve(FieldUsage::Expand);
        assert!(matches!(
            result,
            Err(ValidationError::UnsupportedUsage { usage: FieldUsage::Expand, .. })
        ));
    }

    #[test]
    fn test_root_nesting_member_cannot_be_filtered_directly() {
        let selector: FieldSelector<Company, Details> = Company::DETAILS.into();
        let result = selector.resolve(FieldUsage::Filter);
        assert!(matches!(result, Err(ValidationError::RootNestingMember { field }) if field == "details"));
    }

    #[test]
    fn test_root_nesting_member_allowed_when_declared() {
        let selector: FieldSelector<Company, Details> = Company::OPEN_DETAILS.into();
        assert!(selector.resolve(FieldUsage::Filter).is_ok());
    }

    #[test]
    fn test_nested_sub_field_resolves_dotted_path() {
        let resolved = Company::DETAILS
            .then(Details::CODE)
            .resolve(FieldUsage::Filter)
            .unwrap();
        assert_eq!(resolved.path(), "details.code");
    }

    #[test]
    fn test_nested_access_requires_nesting_on_outer_field() {
        let result = Company::FLAT.then(Details::CODE).resolve(FieldUsage::Filter);
        assert!(matches!(
            result,
            Err(ValidationError::NestingNotAllowed { outer, inner }) if outer == "flat" && inner == "code"
        ));
    }

    #[test]
    fn test_nested_sub_field_without_metadata_fails() {
        let result = Company::DETAILS.then(Details::NOTE).resolve(FieldUsage::Filter);
        assert!(matches!(
            result,
            Err(ValidationError::UnsupportedUsage { field, .. }) if field == "details.note"
        ));
    }

    #[test]
    fn test_lookup_by_name() {
        let selector = Company::field_by_name::<String>("details.code").unwrap();
        assert_eq!(
            selector.resolve(FieldUsage::Filter).unwrap().path(),
            "details.code"
        );

        assert!(matches!(
            Company::field_by_name::<String>(""),
            Err(ValidationError::EmptyFieldName)
        ));
        assert!(matches!(
            Company::field_by_name::<String>("missing"),
            Err(ValidationError::UnknownField { .. })
        ));
        assert!(matches!(
            Company::field_by_name::<String>("details.missing"),
            Err(ValidationError::UnknownField { field }) if field == "details.missing"
        ));
        assert!(matches!(
            Company::field_by_name::<String>("a.b.c"),
            Err(ValidationError::NestingTooDeep { .. })
        ));
    }

    #[test]
    fn test_lookup_matches_names_exactly() {
        assert!(matches!(
            Company::field_by_name::<String>(" name "),
            Err(ValidationError::UnknownField { field }) if field == " name "
        ));
        assert!(matches!(
            Company::field_by_name::<String>("   "),
            Err(ValidationError::UnknownField { .. })
        ));
        assert!(matches!(
            Company::field_by_name::<String>("details. code"),
            Err(ValidationError::UnknownField { field }) if field == "details. code"
        ));
        assert!(matches!(
            Company::field_by_name::<String>("details."),
            Err(ValidationError::EmptyFieldName)
        ));
    }

    #[test]
    fn test_empty_operator_set_accepts_every_operator() {
        let meta = FieldMetadata::new().with_filter(&[]);
        for op in FilterOperator::ALL {
            assert!(meta.supports_operator(*op));
        }

        let meta = FieldMetadata::new().with_filter(FilterOperator::EQUALITY);
        assert!(meta.supports_operator(FilterOperator::Equal));
        assert!(!meta.supports_operator(FilterOperator::GreaterThan));
    }
}
