//! # Mapping Registry
//!
//! A lookup table of compiled mappings keyed by their `(Source, Destination)`
//! type pair. It lets application code call `registry.map::<User, UserDto>(&user)`
//! without carrying every [`CompiledMapping`] around by hand.
//!
//! The registry is populated once at startup, either by calling
//! [`register`](MappingRegistry::register) directly or by handing it a
//! [`MappingProfile`] that registers a related group of mappings. After that it
//! is a read-only table: clone it (cheap, every entry is an `Arc`) or share it
//! behind an `Arc` across tasks.
//!
//! Looking up a pair that was never registered is not an error. `map` and
//! `map_many` return `None` and leave the policy to the caller.

use std::any::{Any, TypeId};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::compiled::{CompiledMapping, MapMany};
use crate::error::Result;
use crate::naming::short_type_name;

type PairKey = (TypeId, TypeId);

/// A group of mappings registered together, e.g. all DTO mappings of one module.
pub trait MappingProfile {
    /// Builds this profile's mappings and registers them.
    fn configure(&self, registry: &mut MappingRegistry) -> Result<()>;
}

/// Compiled mappings keyed by `(Source, Destination)` type pair.
#[derive(Clone, Default)]
pub struct MappingRegistry {
    mappings: HashMap<PairKey, Arc<dyn Any + Send + Sync>>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry populated by `profile`.
    #[tracing::instrument(level = "debug", skip_all, fields(profile = short_type_name::<P>()))]
    pub fn from_profile<P: MappingProfile + ?Sized>(profile: &P) -> Result<Self> {
        let mut registry = Self::new();
        registry.add_profile(profile)?;
        Ok(registry)
    }

    /// Registers every mapping of `profile`.
    pub fn add_profile<P: MappingProfile + ?Sized>(&mut self, profile: &P) -> Result<&mut Self> {
        profile.configure(self)?;
        Ok(self)
    }

    /// Registers `mapping` for the `(S, D)` pair.
    ///
    /// Returns the mapping previously registered for the same pair, if any.
    pub fn register<S, D>(&mut self, mapping: CompiledMapping<S, D>) -> Option<Arc<CompiledMapping<S, D>>>
    where
        S: 'static,
        D: 'static,
    {
        let fields = mapping.len();
        let erased: Arc<dyn Any + Send + Sync> = Arc::new(mapping);
        let previous = self.mappings.insert(Self::key::<S, D>(), erased);

        if previous.is_some() {
            warn!(
                source = short_type_name::<S>(),
                destination = short_type_name::<D>(),
                "Replaced existing mapping"
            );
        }
        info!(
            source = short_type_name::<S>(),
            destination = short_type_name::<D>(),
            fields,
            size = self.mappings.len(),
            "Registered mapping"
        );

        previous.and_then(|previous| previous.downcast::<CompiledMapping<S, D>>().ok())
    }

    /// Shared handle to the mapping for `(S, D)`.
    pub fn get<S: 'static, D: 'static>(&self) -> Option<Arc<CompiledMapping<S, D>>> {
        self.mappings
            .get(&Self::key::<S, D>())
            .cloned()?
            .downcast::<CompiledMapping<S, D>>()
            .ok()
    }

    pub fn contains<S: 'static, D: 'static>(&self) -> bool {
        self.mappings.contains_key(&Self::key::<S, D>())
    }

    /// Maps `source` with the registered `(S, D)` mapping, `None` if there is none.
    pub fn map<S: 'static, D: 'static>(&self, source: &S) -> Option<D> {
        Some(self.lookup::<S, D>()?.map(source))
    }

    /// Lazily maps `sources` with the registered `(S, D)` mapping, `None` if
    /// there is none.
    pub fn map_many<S, D, I>(&self, sources: I) -> Option<MapMany<'_, S, D, I::IntoIter>>
    where
        S: 'static,
        D: 'static,
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        Some(self.lookup::<S, D>()?.map_many(sources))
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    fn lookup<S: 'static, D: 'static>(&self) -> Option<&CompiledMapping<S, D>> {
        let entry = self.mappings.get(&Self::key::<S, D>())?;
        (**entry).downcast_ref::<CompiledMapping<S, D>>()
    }

    fn key<S: 'static, D: 'static>() -> PairKey {
        (TypeId::of::<S>(), TypeId::of::<D>())
    }
}

impl fmt::Debug for MappingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingRegistry")
            .field("mappings", &self.mappings.len())
            .finish()
    }
}
