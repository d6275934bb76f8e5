//! # Mapping Framework
//!
//! This crate builds reusable, type-safe mappings between two structured types,
//! typically a domain model and the DTO that goes over the wire. You declare the
//! handful of fields that need real logic, let the framework pair the rest by
//! name, and optionally insist that nothing was left out.
//!
//! ## Why a Builder?
//!
//! Hand-written `impl From<User> for UserDto` blocks are fine for two types and
//! painful for forty. Most fields in a DTO are straight copies that only differ in
//! naming convention (`Name` vs `name`, `Age` vs `_age`). The interesting ones
//! (sums, formatted strings, flattened values) are few.
//!
//! A [`MappingDefinition`] captures exactly that split:
//!
//! 1. **Explicit** field mappings for the interesting fields
//! 2. **Automatic** name matching for everything else
//! 3. An optional **completeness check** so a new DTO field can't silently stay empty
//!
//! The result is a [`CompiledMapping`]: an immutable list of field actions plus a
//! destination factory, cheap to apply and safe to share across threads.
//!
//! ## Core Abstractions
//!
//! ### [`Mappable`] - Field Metadata
//!
//! Mappings are resolved from field *names and types*, never from values. The
//! [`mappable!`] macro declares a struct and generates its field descriptor table:
//!
//! ```rust
//! use mapping_framework::{mappable, select, MappingDefinition, MappingError};
//!
//! mappable! {
//!     #[derive(Debug, Clone, Default)]
//!     #[allow(non_snake_case)]
//!     pub struct Stat { pub Stat: f64 }
//! }
//!
//! mappable! {
//!     #[derive(Debug, Clone, Default)]
//!     #[allow(non_snake_case)]
//!     pub struct Model {
//!         pub Age: i32,
//!         pub Name: String,
//!         pub Structs: Vec<Stat>,
//!     }
//! }
//!
//! mappable! {
//!     #[derive(Debug, Clone, Default)]
//!     pub struct ModelDto {
//!         pub name: String,
//!         pub _age: i32,
//!         pub structs: Vec<Stat>,
//!         pub sum_of_structs: f64,
//!     }
//! }
//!
//! fn main() -> Result<(), MappingError> {
//!     // 1. Configure once, at startup
//!     let mapping = MappingDefinition::<Model, ModelDto>::new()
//!         .map_property(select!(d => d.sum_of_structs), |m: &Model| {
//!             m.Structs.iter().map(|s| s.Stat).sum::<f64>()
//!         })?
//!         .automap_remaining()
//!         .require_all_mapped()?
//!         .build_default();
//!
//!     // 2. Apply as often as you like
//!     let model = Model {
//!         Age: 23,
//!         Name: "daw".into(),
//!         Structs: vec![Stat { Stat: 2.5 }, Stat { Stat: 5.0 }],
//!     };
//!     let dto = mapping.map(&model);
//!     assert_eq!(dto._age, 23);
//!     assert_eq!(dto.sum_of_structs, 7.5);
//!     Ok(())
//! }
//! ```
//!
//! ### [`MappingDefinition`] - The Builder
//!
//! - [`map_property`](MappingDefinition::map_property) - explicit field mapping
//! - [`automap_remaining`](MappingDefinition::automap_remaining) - match the rest by
//!   [normalized](naming::normalize) name (one leading underscore stripped, lowercased)
//! - [`require_all_mapped`](MappingDefinition::require_all_mapped) - completeness check
//! - [`build`](MappingDefinition::build) / [`build_default`](MappingDefinition::build_default) /
//!   [`build_from`](MappingDefinition::build_from) - compile
//!
//! ### [`CompiledMapping`] - The Applier
//!
//! - [`map`](CompiledMapping::map) - one source, one fresh destination
//! - [`map_many`](CompiledMapping::map_many) - lazy, in-order mapping of a sequence
//! - [`map_many_opt`](CompiledMapping::map_many_opt) - absent input maps to nothing
//!
//! ### [`MappingRegistry`] - Dispatch by Type Pair
//!
//! A read-only table of compiled mappings keyed by `(Source, Destination)`,
//! populated at startup through [`MappingProfile`]s.
//!
//! ## Errors
//!
//! Every [`MappingError`] is raised while *building* a mapping. Applying a
//! compiled mapping cannot fail. Treat build errors like a bad config file:
//! fail fast at startup.
//!
//! ## Concurrency Model
//!
//! - [`MappingDefinition`] is moved through the fluent chain by value (single owner)
//! - [`CompiledMapping`] and [`MappingRegistry`] are immutable and `Send + Sync`
//! - No locks, no caching, no shared mutable state between calls
//!
//! ## Observability
//!
//! Field resolution and registry wiring are logged with `tracing`. See the
//! [`tracing`](crate::tracing) module for levels and an example session.

pub mod accessor;
pub mod compiled;
pub mod definition;
pub mod error;
pub mod field;
pub mod naming;
pub mod registry;
pub mod tracing;

// Re-export core types for convenience
pub use accessor::Accessor;
pub use compiled::{CompiledMapping, FieldOrigin, FieldPlan, MapMany, MappingPlan};
pub use definition::MappingDefinition;
pub use error::{MappingError, Result};
pub use field::{FieldDescriptor, FieldType, Getter, Mappable, Setter};
pub use registry::{MappingProfile, MappingRegistry};
