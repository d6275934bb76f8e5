//! # Field Descriptors
//!
//! A mapping is resolved purely from field *metadata*: names and declared types.
//! No values are inspected while a mapping is being built.
//!
//! Every type that takes part in a mapping implements [`Mappable`], which hands
//! out one [`FieldDescriptor`] per field in declaration order. A descriptor
//! carries the field name, its [`FieldType`] tag, and a pair of type-erased
//! get/set functions that the compiled mapping calls at application time.
//!
//! You rarely implement [`Mappable`] by hand. The [`mappable!`](crate::mappable)
//! macro declares the struct and generates the descriptor table in one go:
//!
//! ```rust
//! use mapping_framework::{mappable, Mappable};
//!
//! mappable! {
//!     #[derive(Debug, Clone, Default)]
//!     pub struct UserDto {
//!         pub name: String,
//!         pub _age: i32,
//!     }
//! }
//!
//! let names: Vec<_> = UserDto::fields().iter().map(|f| f.name()).collect();
//! assert_eq!(names, ["name", "_age"]);
//! ```

use std::any::{Any, TypeId};
use std::fmt;

use crate::naming;

/// Type-erased field reader. Returns a clone of the field value.
pub type Getter<T> = fn(&T) -> Box<dyn Any>;

/// Type-erased field writer. Hands the value back if it has the wrong type.
pub type Setter<T> = fn(&mut T, Box<dyn Any>) -> Result<(), Box<dyn Any>>;

/// Declared type of a field.
#[derive(Clone, Copy)]
pub struct FieldType {
    id: TypeId,
    name: &'static str,
}

impl FieldType {
    pub fn of<V: 'static>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: naming::short_type_name::<V>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether a value of type `other` can be written into a field of this type.
    ///
    /// Rust has no subtyping between value types, so this is type identity.
    pub fn accepts(&self, other: &FieldType) -> bool {
        self.id == other.id
    }
}

impl PartialEq for FieldType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FieldType {}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Metadata and accessors for one field of `T`.
pub struct FieldDescriptor<T> {
    name: &'static str,
    ty: FieldType,
    get: Getter<T>,
    set: Setter<T>,
}

impl<T> FieldDescriptor<T> {
    /// Creates a descriptor for a field whose declared type is `V`.
    ///
    /// `get` and `set` must agree with `V`; the [`mappable!`](crate::mappable)
    /// macro guarantees this.
    pub fn new<V: 'static>(name: &'static str, get: Getter<T>, set: Setter<T>) -> Self {
        Self {
            name,
            ty: FieldType::of::<V>(),
            get,
            set,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> FieldType {
        self.ty
    }

    /// Reads a clone of the field value.
    pub fn read(&self, instance: &T) -> Box<dyn Any> {
        (self.get)(instance)
    }

    /// Writes `value` into the field.
    pub fn write(&self, instance: &mut T, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        (self.set)(instance, value)
    }

    /// Reads the field as a concrete type, `None` if `V` is not the field type.
    pub fn read_as<V: 'static>(&self, instance: &T) -> Option<V> {
        self.read(instance).downcast::<V>().ok().map(|value| *value)
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldDescriptor<T> {}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish()
    }
}

/// A structured type whose fields can take part in a mapping.
pub trait Mappable: Sized + 'static {
    /// All exposed fields, in declaration order.
    fn fields() -> Vec<FieldDescriptor<Self>>;

    /// Looks up a field by its exact name.
    fn field(name: &str) -> Option<FieldDescriptor<Self>> {
        Self::fields().into_iter().find(|field| field.name() == name)
    }

    fn field_names() -> Vec<&'static str> {
        Self::fields().iter().map(FieldDescriptor::name).collect()
    }
}

/// Declares a struct and implements [`Mappable`] for it.
///
/// Every field type must be `Clone + 'static`. Attributes on the struct and its
/// fields are passed through, so `#[derive(...)]` and `#[serde(...)]` work as usual.
///
/// The `impl` form generates only the descriptor table for a struct declared
/// elsewhere in the crate:
///
/// ```rust
/// use mapping_framework::{mappable, Mappable};
///
/// #[derive(Default)]
/// pub struct Point { pub x: f64, pub y: f64 }
///
/// mappable!(impl Point { x: f64, y: f64 });
///
/// assert_eq!(Point::field_names(), ["x", "y"]);
/// ```
#[macro_export]
macro_rules! mappable {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field : $ty ),*
        }

        $crate::mappable!(impl $name { $( $field : $ty ),* });
    };

    (impl $name:ident { $( $field:ident : $ty:ty ),* $(,)? }) => {
        impl $crate::Mappable for $name {
            fn fields() -> ::std::vec::Vec<$crate::FieldDescriptor<Self>> {
                ::std::vec![
                    $(
                        $crate::FieldDescriptor::new::<$ty>(
                            ::std::stringify!($field),
                            |it: &Self| -> ::std::boxed::Box<dyn ::std::any::Any> {
                                ::std::boxed::Box::new(::std::clone::Clone::clone(&it.$field))
                            },
                            |it: &mut Self, value: ::std::boxed::Box<dyn ::std::any::Any>|
                                -> ::std::result::Result<(), ::std::boxed::Box<dyn ::std::any::Any>>
                            {
                                it.$field = *value.downcast::<$ty>()?;
                                ::std::result::Result::Ok(())
                            },
                        )
                    ),*
                ]
            }
        }
    };
}
