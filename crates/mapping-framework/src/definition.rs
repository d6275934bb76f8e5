//! # Mapping Definitions
//!
//! [`MappingDefinition`] is the builder that accumulates field mappings for one
//! `(Source, Destination)` pair and compiles them into a
//! [`CompiledMapping`].
//!
//! ## Resolution Order
//!
//! 1. **Explicit mappings** ([`map_property`](MappingDefinition::map_property))
//!    claim destination fields first.
//! 2. **Automapping** ([`automap_remaining`](MappingDefinition::automap_remaining))
//!    pairs the still-unmapped destination fields with source fields whose
//!    [normalized](crate::naming::normalize) names match.
//! 3. **Type gating**: a name match only becomes a mapping when the source field's
//!    type is assignable to the destination field's type.
//!
//! An explicit mapping therefore always wins over an automatic one for the same
//! destination field.
//!
//! ## Completeness
//!
//! Partial mappings are legal: unmapped destination fields keep whatever the
//! factory produced. Call [`require_all_mapped`](MappingDefinition::require_all_mapped)
//! after the last mapping call to insist on total coverage.
//!
//! ## Example
//!
//! ```rust
//! use mapping_framework::{mappable, select, MappingDefinition};
//!
//! mappable! {
//!     #[derive(Debug, Clone, Default)]
//!     #[allow(non_snake_case)]
//!     pub struct Account { pub Owner: String, pub Balance: i64, pub Entries: Vec<i64> }
//! }
//!
//! mappable! {
//!     #[derive(Debug, Clone, Default, PartialEq)]
//!     pub struct AccountDto { pub owner: String, pub _balance: i64, pub entry_count: usize }
//! }
//!
//! # fn main() -> Result<(), mapping_framework::MappingError> {
//! let mapping = MappingDefinition::<Account, AccountDto>::new()
//!     .map_property(select!(d => d.entry_count), |a: &Account| a.Entries.len())?
//!     .automap_remaining()
//!     .require_all_mapped()?
//!     .build_default();
//!
//! let account = Account { Owner: "ada".into(), Balance: 120, Entries: vec![100, 20] };
//! let dto = mapping.map(&account);
//! assert_eq!(dto, AccountDto { owner: "ada".into(), _balance: 120, entry_count: 2 });
//! # Ok(())
//! # }
//! ```

use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, error, warn};

use crate::accessor::Accessor;
use crate::compiled::{CompiledMapping, FieldAction};
use crate::error::{MappingError, Result};
use crate::field::{FieldDescriptor, FieldType, Mappable};
use crate::naming::{normalize, short_type_name};

/// Builder for a [`CompiledMapping`] from `S` to `D`.
///
/// Every step consumes the builder and hands it back, so a failing step drops
/// the partially built definition along with it.
pub struct MappingDefinition<S: Mappable, D: Mappable> {
    mapped: IndexMap<&'static str, FieldAction<S, D>>,
}

impl<S: Mappable, D: Mappable> MappingDefinition<S, D> {
    /// Starts an empty definition.
    pub fn new() -> Self {
        Self {
            mapped: IndexMap::new(),
        }
    }

    /// Maps the destination field named by `selector` to the value returned by
    /// `getter`.
    ///
    /// # Errors
    ///
    /// - [`MappingError::UnsupportedAccessorExpression`] if `selector` is not a
    ///   direct field read or a single conversion wrapping one.
    /// - [`MappingError::DuplicateMapping`] if the field is already mapped.
    /// - [`MappingError::UnknownDestinationField`] if `D` has no such field.
    /// - [`MappingError::IncompatibleFieldTypes`] if `V` is not the field's type.
    pub fn map_property<V, F>(mut self, selector: impl Into<Accessor>, getter: F) -> Result<Self>
    where
        V: 'static,
        F: Fn(&S) -> V + Send + Sync + 'static,
    {
        let selector = selector.into();
        let name = selector.member_name()?;

        if self.mapped.contains_key(name) {
            return Err(MappingError::DuplicateMapping { field: name.into() });
        }

        let destination = D::field(name).ok_or_else(|| MappingError::UnknownDestinationField {
            field: name.into(),
            destination: short_type_name::<D>().into(),
        })?;

        let value_type = FieldType::of::<V>();
        if !destination.ty().accepts(&value_type) {
            return Err(MappingError::IncompatibleFieldTypes {
                source_field: selector.to_string(),
                source_type: value_type.name().into(),
                destination_field: name.into(),
                destination_type: destination.ty().name().into(),
            });
        }

        debug!(
            source = short_type_name::<S>(),
            destination = short_type_name::<D>(),
            field = name,
            "Mapped explicitly"
        );

        let assign = move |source: &S, target: &mut D| {
            if destination.write(target, Box::new(getter(source))).is_err() {
                // Unreachable: checked against the field type above.
                error!(field = destination.name(), "Field type mismatch");
            }
        };
        self.mapped.insert(
            name,
            FieldAction::Custom {
                destination,
                assign: Box::new(assign),
            },
        );
        Ok(self)
    }

    /// Maps every still-unmapped destination field to the first source field
    /// with the same normalized name and an assignable type.
    ///
    /// Destination fields whose name matches are all unassignable are skipped and
    /// left unmapped. Fields without any name match are left unmapped as well.
    pub fn automap_remaining(mut self) -> Self {
        for (source, destination) in self.automap() {
            warn!(
                source_field = source.name(),
                source_type = source.ty().name(),
                destination_field = destination.name(),
                destination_type = destination.ty().name(),
                "Skipping unassignable name match"
            );
        }
        self
    }

    /// Like [`automap_remaining`](Self::automap_remaining), but a destination
    /// field whose name matches only unassignable source fields is an error.
    ///
    /// Fields without any name match are still left unmapped; use
    /// [`require_all_mapped`](Self::require_all_mapped) to reject those.
    ///
    /// # Errors
    ///
    /// [`MappingError::IncompatibleFieldTypes`] for the first such destination
    /// field, naming its first matching source field.
    pub fn automap_remaining_strict(mut self) -> Result<Self> {
        match self.automap().into_iter().next() {
            Some((source, destination)) => Err(MappingError::IncompatibleFieldTypes {
                source_field: source.name().into(),
                source_type: source.ty().name().into(),
                destination_field: destination.name().into(),
                destination_type: destination.ty().name().into(),
            }),
            None => Ok(self),
        }
    }

    /// Copies into each unmapped destination field from its first assignable
    /// name match, in destination declaration order.
    ///
    /// Returns the destination fields that had name matches but no assignable
    /// one, each paired with its first match.
    fn automap(&mut self) -> Vec<(FieldDescriptor<S>, FieldDescriptor<D>)> {
        let sources = S::fields();
        let mut rejected = Vec::new();

        for destination in D::fields() {
            if self.mapped.contains_key(destination.name()) {
                continue;
            }

            let key = normalize(destination.name());
            let mut matches = sources.iter().filter(|source| normalize(source.name()) == key);
            let Some(first) = matches.next().copied() else {
                continue;
            };

            let assignable = std::iter::once(first)
                .chain(matches.copied())
                .find(|source| destination.ty().accepts(&source.ty()));
            let Some(source) = assignable else {
                rejected.push((first, destination));
                continue;
            };

            debug!(
                source_field = source.name(),
                destination_field = destination.name(),
                "Automapped"
            );
            self.mapped.insert(
                destination.name(),
                FieldAction::Copy {
                    source,
                    destination,
                },
            );
        }

        rejected
    }

    /// Fails if any destination field has no mapping.
    ///
    /// # Errors
    ///
    /// [`MappingError::UnmappedFields`] listing every unmapped field in
    /// declaration order.
    pub fn require_all_mapped(self) -> Result<Self> {
        let unmapped = self.unmapped_fields();
        if unmapped.is_empty() {
            return Ok(self);
        }
        Err(MappingError::UnmappedFields {
            fields: unmapped.into_iter().map(String::from).collect(),
        })
    }

    pub fn is_mapped(&self, field: &str) -> bool {
        self.mapped.contains_key(field)
    }

    /// Mapped destination fields, in the order their mappings were added.
    pub fn mapped_fields(&self) -> Vec<&'static str> {
        self.mapped.keys().copied().collect()
    }

    /// Destination fields without a mapping, in declaration order.
    pub fn unmapped_fields(&self) -> Vec<&'static str> {
        D::field_names()
            .into_iter()
            .filter(|name| !self.mapped.contains_key(*name))
            .collect()
    }

    /// Compiles the definition, creating destination instances with `factory`.
    pub fn build<F>(self, factory: F) -> CompiledMapping<S, D>
    where
        F: Fn() -> D + Send + Sync + 'static,
    {
        let actions: Vec<_> = self.mapped.into_values().collect();
        debug!(
            source = short_type_name::<S>(),
            destination = short_type_name::<D>(),
            fields = actions.len(),
            "Compiled mapping"
        );
        CompiledMapping::new(
            short_type_name::<S>(),
            short_type_name::<D>(),
            actions,
            Box::new(factory),
        )
    }

    /// Compiles the definition using `D::default()` as the factory.
    pub fn build_default(self) -> CompiledMapping<S, D>
    where
        D: Default,
    {
        self.build(D::default)
    }

    /// Compiles the definition, constructing each destination from `C::default()`.
    pub fn build_from<C>(self) -> CompiledMapping<S, D>
    where
        C: Default + Into<D> + 'static,
    {
        self.build(|| C::default().into())
    }
}

impl<S: Mappable, D: Mappable> Default for MappingDefinition<S, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Mappable, D: Mappable> fmt::Debug for MappingDefinition<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingDefinition")
            .field("source", &short_type_name::<S>())
            .field("destination", &short_type_name::<D>())
            .field("mapped", &self.mapped_fields())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select;

    crate::mappable! {
        #[derive(Debug, Clone, Default, PartialEq)]
        #[allow(non_snake_case)]
        struct Person {
            Name: String,
            Age: i32,
            Nickname: Option<String>,
        }
    }

    crate::mappable! {
        #[derive(Debug, Clone, Default, PartialEq)]
        struct PersonDto {
            name: String,
            _age: i32,
            nickname: String,
            greeting: String,
        }
    }

    fn person() -> Person {
        Person {
            Name: "ada".into(),
            Age: 36,
            Nickname: Some("countess".into()),
        }
    }

    #[test]
    fn test_new_definition_is_empty() {
        let definition = MappingDefinition::<Person, PersonDto>::new();
        assert!(definition.mapped_fields().is_empty());
        assert_eq!(definition.unmapped_fields(), ["name", "_age", "nickname", "greeting"]);
    }

    #[test]
    fn test_duplicate_explicit_mapping_fails() {
        let err = MappingDefinition::<Person, PersonDto>::new()
            .map_property(select!(d => d.greeting), |p: &Person| p.Name.clone())
            .unwrap()
            .map_property(select!(d => d.greeting), |_: &Person| String::new())
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::DuplicateMapping {
                field: "greeting".into()
            }
        );
    }

    #[test]
    fn test_unknown_destination_field_fails() {
        let err = MappingDefinition::<Person, PersonDto>::new()
            .map_property(select!(d => d.title), |p: &Person| p.Name.clone())
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::UnknownDestinationField {
                field: "title".into(),
                destination: "PersonDto".into(),
            }
        );
    }

    #[test]
    fn test_unsupported_selector_fails_before_lookup() {
        let err = MappingDefinition::<Person, PersonDto>::new()
            .map_property(select!(d => d.name.len()), |p: &Person| p.Name.len())
            .unwrap_err();
        assert!(matches!(err, MappingError::UnsupportedAccessorExpression { .. }));
    }

    #[test]
    fn test_converted_selector_is_accepted() {
        let definition = MappingDefinition::<Person, PersonDto>::new()
            .map_property(select!(d => d._age as i64), |p: &Person| p.Age * 2)
            .unwrap();
        assert!(definition.is_mapped("_age"));
    }

    #[test]
    fn test_getter_type_must_match_destination() {
        let err = MappingDefinition::<Person, PersonDto>::new()
            .map_property(select!(d => d._age), |p: &Person| p.Age as i64)
            .unwrap_err();
        assert!(matches!(
            err,
            MappingError::IncompatibleFieldTypes { ref destination_field, .. } if destination_field == "_age"
        ));
    }

    #[test]
    fn test_automap_matches_normalized_names() {
        let definition = MappingDefinition::<Person, PersonDto>::new().automap_remaining();
        assert_eq!(definition.mapped_fields(), ["name", "_age"]);
        assert_eq!(definition.unmapped_fields(), ["nickname", "greeting"]);
    }

    #[test]
    fn test_explicit_mapping_wins_over_automap() {
        let mapping = MappingDefinition::<Person, PersonDto>::new()
            .map_property(select!(d => d.name), |p: &Person| p.Name.to_uppercase())
            .unwrap()
            .automap_remaining()
            .build_default();

        let dto = mapping.map(&person());
        assert_eq!(dto.name, "ADA");
        assert_eq!(dto._age, 36);
    }

    #[test]
    fn test_lenient_automap_skips_unassignable_match() {
        let mapping = MappingDefinition::<Person, PersonDto>::new()
            .automap_remaining()
            .build_default();

        let dto = mapping.map(&person());
        assert_eq!(dto.nickname, String::new());
    }

    #[test]
    fn test_strict_automap_rejects_unassignable_match() {
        let err = MappingDefinition::<Person, PersonDto>::new()
            .automap_remaining_strict()
            .unwrap_err();
        assert!(matches!(
            err,
            MappingError::IncompatibleFieldTypes { ref source_field, ref destination_field, .. }
                if source_field == "Nickname" && destination_field == "nickname"
        ));
    }

    #[test]
    fn test_strict_automap_leaves_name_mismatches_to_require_all() {
        let err = MappingDefinition::<Person, PersonDto>::new()
            .map_property(select!(d => d.nickname), |p: &Person| {
                p.Nickname.clone().unwrap_or_default()
            })
            .unwrap()
            .automap_remaining_strict()
            .unwrap()
            .require_all_mapped()
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::UnmappedFields {
                fields: vec!["greeting".into()]
            }
        );
    }

    #[test]
    fn test_require_all_mapped_lists_every_unmapped_field() {
        let err = MappingDefinition::<Person, PersonDto>::new()
            .require_all_mapped()
            .unwrap_err();
        assert_eq!(err.to_string(), "Unmapped fields: name, _age, nickname, greeting");
    }

    #[test]
    fn test_require_all_mapped_is_noop_when_complete() {
        let definition = MappingDefinition::<Person, PersonDto>::new()
            .map_property(select!(d => d.nickname), |p: &Person| {
                p.Nickname.clone().unwrap_or_default()
            })
            .unwrap()
            .map_property(select!(d => d.greeting), |p: &Person| format!("hi {}", p.Name))
            .unwrap()
            .automap_remaining()
            .require_all_mapped()
            .unwrap();
        assert_eq!(definition.mapped_fields(), ["nickname", "greeting", "name", "_age"]);
    }

    crate::mappable! {
        #[derive(Debug, Clone, Default, PartialEq)]
        #[allow(non_snake_case)]
        struct Legacy {
            Age: String,
            _age: i32,
        }
    }

    crate::mappable! {
        #[derive(Debug, Clone, Default, PartialEq)]
        struct AgeDto {
            age: i32,
        }
    }

    crate::mappable! {
        #[derive(Debug, Clone, Default, PartialEq)]
        struct MirroredAgeDto {
            age: i32,
            _age: i32,
        }
    }

    #[test]
    fn test_one_source_field_feeds_every_matching_destination() {
        let mapping = MappingDefinition::<Person, MirroredAgeDto>::new()
            .automap_remaining()
            .require_all_mapped()
            .unwrap()
            .build_default();

        let dto = mapping.map(&person());
        assert_eq!(dto, MirroredAgeDto { age: 36, _age: 36 });
    }

    #[test]
    fn test_automap_takes_first_assignable_match() {
        let legacy = Legacy {
            Age: "thirty".into(),
            _age: 30,
        };

        let lenient = MappingDefinition::<Legacy, AgeDto>::new()
            .automap_remaining()
            .build_default();
        assert_eq!(lenient.map(&legacy).age, 30);

        let strict = MappingDefinition::<Legacy, AgeDto>::new()
            .automap_remaining_strict()
            .unwrap()
            .build_default();
        assert_eq!(strict.map(&legacy).age, 30);
        assert_eq!(
            strict.plan().fields[0].origin,
            crate::FieldOrigin::Automapped { source: "_age" }
        );
    }

    #[test]
    fn test_build_from_concrete_type() {
        struct Greeter;

        impl Default for Greeter {
            fn default() -> Self {
                Greeter
            }
        }

        impl From<Greeter> for PersonDto {
            fn from(_: Greeter) -> Self {
                PersonDto {
                    greeting: "hello".into(),
                    ..PersonDto::default()
                }
            }
        }

        let mapping = MappingDefinition::<Person, PersonDto>::new()
            .automap_remaining()
            .build_from::<Greeter>();
        let dto = mapping.map(&person());
        assert_eq!(dto.greeting, "hello");
        assert_eq!(dto.name, "ada");
    }
}
