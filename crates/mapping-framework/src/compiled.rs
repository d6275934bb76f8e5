//! # Compiled Mappings
//!
//! A [`CompiledMapping`] is the frozen output of a
//! [`MappingDefinition`](crate::MappingDefinition). It holds:
//!
//! - an ordered list of field actions (explicit mappings first, then automapped ones)
//! - a factory producing a fresh, empty destination instance
//!
//! Applying it is a tiny interpreter loop: allocate, run every action, return.
//! Nothing is validated here. By the time a mapping is compiled, every action
//! has already been checked against the field metadata of both types.
//!
//! ## Sharing
//!
//! A compiled mapping has no interior mutability and its actions are plain
//! function pointers or `Send + Sync` closures, so it is `Send + Sync` for any
//! `S` and `D`. Wrap it in an `Arc` and use it from as many threads or tasks as
//! you like; every call allocates an independent destination.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;
use tracing::error;

use crate::field::FieldDescriptor;

/// Boxed assignment used by explicit mappings.
pub(crate) type Assign<S, D> = Box<dyn Fn(&S, &mut D) + Send + Sync>;

/// Boxed destination factory.
pub(crate) type Factory<D> = Box<dyn Fn() -> D + Send + Sync>;

/// One field-assignment step.
pub(crate) enum FieldAction<S, D> {
    /// Read a source field by name, write the destination field by name.
    Copy {
        source: FieldDescriptor<S>,
        destination: FieldDescriptor<D>,
    },
    /// Write the result of a user-supplied getter.
    Custom {
        destination: FieldDescriptor<D>,
        assign: Assign<S, D>,
    },
}

impl<S, D> FieldAction<S, D> {
    pub(crate) fn destination(&self) -> &FieldDescriptor<D> {
        match self {
            FieldAction::Copy { destination, .. } | FieldAction::Custom { destination, .. } => {
                destination
            }
        }
    }

    fn origin(&self) -> FieldOrigin {
        match self {
            FieldAction::Copy { source, .. } => FieldOrigin::Automapped {
                source: source.name(),
            },
            FieldAction::Custom { .. } => FieldOrigin::Explicit,
        }
    }

    fn apply(&self, source: &S, target: &mut D) {
        match self {
            FieldAction::Copy {
                source: from,
                destination,
            } => {
                if destination.write(target, from.read(source)).is_err() {
                    // Unreachable: field types were matched when the mapping was built.
                    error!(
                        source_field = from.name(),
                        destination_field = destination.name(),
                        "Field type mismatch"
                    );
                }
            }
            FieldAction::Custom { assign, .. } => assign(source, target),
        }
    }
}

/// Where a destination field's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldOrigin {
    /// Declared with `map_property`.
    Explicit,
    /// Matched by name during automapping.
    Automapped { source: &'static str },
}

/// One entry of a [`MappingPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldPlan {
    pub destination: &'static str,
    #[serde(flatten)]
    pub origin: FieldOrigin,
}

/// Serializable description of a compiled mapping, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingPlan {
    pub source: &'static str,
    pub destination: &'static str,
    pub fields: Vec<FieldPlan>,
}

/// An immutable, repeatedly invocable mapping from `S` to `D`.
pub struct CompiledMapping<S, D> {
    source_name: &'static str,
    destination_name: &'static str,
    actions: Vec<FieldAction<S, D>>,
    factory: Factory<D>,
}

impl<S, D> CompiledMapping<S, D> {
    pub(crate) fn new(
        source_name: &'static str,
        destination_name: &'static str,
        actions: Vec<FieldAction<S, D>>,
        factory: Factory<D>,
    ) -> Self {
        Self {
            source_name,
            destination_name,
            actions,
            factory,
        }
    }

    /// Maps one source instance to a fresh destination instance.
    pub fn map(&self, source: &S) -> D {
        let mut destination = (self.factory)();
        for action in &self.actions {
            action.apply(source, &mut destination);
        }
        destination
    }

    /// Lazily maps every element of `sources`, in order.
    ///
    /// Accepts owned values or references. The returned iterator consumes
    /// `sources` as it goes and cannot be restarted.
    pub fn map_many<I>(&self, sources: I) -> MapMany<'_, S, D, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        self.map_many_opt(Some(sources))
    }

    /// Like [`map_many`](Self::map_many), but an absent input yields an empty
    /// sequence instead of failing.
    pub fn map_many_opt<I>(&self, sources: Option<I>) -> MapMany<'_, S, D, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        MapMany {
            mapping: self,
            sources: sources.map(IntoIterator::into_iter),
        }
    }

    /// Describes which destination fields are mapped and how.
    pub fn plan(&self) -> MappingPlan {
        MappingPlan {
            source: self.source_name,
            destination: self.destination_name,
            fields: self
                .actions
                .iter()
                .map(|action| FieldPlan {
                    destination: action.destination().name(),
                    origin: action.origin(),
                })
                .collect(),
        }
    }

    /// Number of field actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<S, D> fmt::Debug for CompiledMapping<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledMapping")
            .field("source", &self.source_name)
            .field("destination", &self.destination_name)
            .field(
                "fields",
                &self
                    .actions
                    .iter()
                    .map(|action| action.destination().name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Lazy iterator returned by [`CompiledMapping::map_many`].
pub struct MapMany<'a, S, D, I> {
    mapping: &'a CompiledMapping<S, D>,
    sources: Option<I>,
}

impl<S, D, I> Iterator for MapMany<'_, S, D, I>
where
    I: Iterator,
    I::Item: Borrow<S>,
{
    type Item = D;

    fn next(&mut self) -> Option<D> {
        let source = self.sources.as_mut()?.next()?;
        Some(self.mapping.map(source.borrow()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.sources {
            Some(sources) => sources.size_hint(),
            None => (0, Some(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    crate::mappable! {
        #[derive(Debug, Clone, Default, PartialEq)]
        struct Reading {
            sensor: String,
            value: f64,
        }
    }

    crate::mappable! {
        #[derive(Debug, Clone, Default, PartialEq)]
        struct ReadingDto {
            sensor: String,
            value: f64,
            label: String,
        }
    }

    fn sample_mapping() -> CompiledMapping<Reading, ReadingDto> {
        let copy = |name: &str| FieldAction::Copy {
            source: <Reading as crate::Mappable>::field(name).unwrap(),
            destination: <ReadingDto as crate::Mappable>::field(name).unwrap(),
        };
        let label: FieldAction<Reading, ReadingDto> = FieldAction::Custom {
            destination: <ReadingDto as crate::Mappable>::field("label").unwrap(),
            assign: Box::new(|source: &Reading, target: &mut ReadingDto| {
                target.label = format!("{}={}", source.sensor, source.value);
            }),
        };
        CompiledMapping::new(
            "Reading",
            "ReadingDto",
            vec![label, copy("sensor"), copy("value")],
            Box::new(ReadingDto::default),
        )
    }

    fn reading(sensor: &str, value: f64) -> Reading {
        Reading {
            sensor: sensor.into(),
            value,
        }
    }

    #[test]
    fn test_map_applies_every_action() {
        let mapping = sample_mapping();
        let dto = mapping.map(&reading("t1", 21.5));
        assert_eq!(
            dto,
            ReadingDto {
                sensor: "t1".into(),
                value: 21.5,
                label: "t1=21.5".into(),
            }
        );
    }

    #[test]
    fn test_map_does_not_touch_source() {
        let mapping = sample_mapping();
        let source = reading("t1", 1.0);
        let _ = mapping.map(&source);
        assert_eq!(source, reading("t1", 1.0));
    }

    #[test]
    fn test_map_many_preserves_order_and_accepts_refs() {
        let mapping = sample_mapping();
        let sources = vec![reading("a", 1.0), reading("b", 2.0), reading("c", 3.0)];

        let sensors: Vec<String> = mapping.map_many(&sources).map(|dto| dto.sensor).collect();
        assert_eq!(sensors, ["a", "b", "c"]);

        let owned: Vec<ReadingDto> = mapping.map_many(sources).collect();
        assert_eq!(owned.len(), 3);
    }

    #[test]
    fn test_plan_serializes_origin_inline() {
        let json = serde_json::to_value(sample_mapping().plan()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "source": "Reading",
                "destination": "ReadingDto",
                "fields": [
                    { "destination": "label", "kind": "explicit" },
                    { "destination": "sensor", "kind": "automapped", "source": "sensor" },
                    { "destination": "value", "kind": "automapped", "source": "value" },
                ],
            })
        );
    }

    #[test]
    fn test_map_many_is_lazy() {
        let mapping = sample_mapping();
        let pulled = Rc::new(Cell::new(0));
        let counter = pulled.clone();
        let sources = (0..5).map(move |i| {
            counter.set(counter.get() + 1);
            reading("s", i as f64)
        });

        let mut results = mapping.map_many(sources);
        assert_eq!(pulled.get(), 0);

        let first = results.next().unwrap();
        assert_eq!(first.value, 0.0);
        assert_eq!(pulled.get(), 1);
    }

    #[test]
    fn test_map_many_of_absent_input_is_empty() {
        let mapping = sample_mapping();
        let mut results = mapping.map_many_opt(None::<Vec<Reading>>);
        assert_eq!(results.size_hint(), (0, Some(0)));
        assert!(results.next().is_none());
    }

    #[test]
    fn test_plan_lists_actions_in_order() {
        let plan = sample_mapping().plan();
        assert_eq!(plan.source, "Reading");
        assert_eq!(
            plan.fields,
            [
                FieldPlan {
                    destination: "label",
                    origin: FieldOrigin::Explicit,
                },
                FieldPlan {
                    destination: "sensor",
                    origin: FieldOrigin::Automapped { source: "sensor" },
                },
                FieldPlan {
                    destination: "value",
                    origin: FieldOrigin::Automapped { source: "value" },
                },
            ]
        );
    }

    #[test]
    fn test_compiled_mapping_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompiledMapping<Reading, ReadingDto>>();
        assert_send_sync::<CompiledMapping<Rc<u8>, Rc<u8>>>();
    }
}
