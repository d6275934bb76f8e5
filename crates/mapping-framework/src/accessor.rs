//! # Destination Selectors
//!
//! An explicit mapping names its destination field with a *selector*: a small
//! expression tree describing how the field is read. Only two shapes identify a
//! single field:
//!
//! - a direct member read, `d.name`
//! - exactly one conversion wrapping a member read, `d.count as i64`
//!
//! Anything else (nested paths, method calls, arbitrary expressions) is rejected
//! with [`MappingError::UnsupportedAccessorExpression`] when the selector is
//! resolved.
//!
//! Selectors are normally written with the [`select!`](crate::select) macro,
//! which records the *shape* of the expression without evaluating it:
//!
//! ```rust
//! use mapping_framework::{select, Accessor};
//!
//! assert_eq!(select!(d => d.name), Accessor::Member("name"));
//! assert!(select!(d => d.items.len()).member_name().is_err());
//! ```

use std::fmt;

use crate::error::{MappingError, Result};

/// Shape of a field selector expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// `d.name`
    Member(&'static str),
    /// `<operand> as <target>`
    Convert {
        target: &'static str,
        operand: Box<Accessor>,
    },
    /// `d.a.b`
    Chain(Vec<&'static str>),
    /// `d.a.len()`
    Call {
        path: Vec<&'static str>,
        args: &'static str,
    },
    /// Any other expression, kept as source text.
    Opaque(&'static str),
}

impl Accessor {
    pub fn member(name: &'static str) -> Self {
        Accessor::Member(name)
    }

    pub fn convert(target: &'static str, operand: Accessor) -> Self {
        Accessor::Convert {
            target,
            operand: Box::new(operand),
        }
    }

    /// Resolves the selector to the single field it reads.
    pub fn member_name(&self) -> Result<&'static str> {
        match self {
            Accessor::Member(name) => Ok(*name),
            Accessor::Convert { operand, .. } => match operand.as_ref() {
                Accessor::Member(name) => Ok(*name),
                _ => Err(self.unsupported()),
            },
            _ => Err(self.unsupported()),
        }
    }

    fn unsupported(&self) -> MappingError {
        MappingError::UnsupportedAccessorExpression {
            expression: self.to_string(),
        }
    }
}

impl From<&'static str> for Accessor {
    fn from(name: &'static str) -> Self {
        Accessor::Member(name)
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Member(name) => write!(f, ".{name}"),
            Accessor::Convert { target, operand } => write!(f, "({operand} as {target})"),
            Accessor::Chain(path) => write!(f, ".{}", path.join(".")),
            Accessor::Call { path, args } => write!(f, ".{}{args}", path.join(".")),
            Accessor::Opaque(text) => f.write_str(text),
        }
    }
}

/// Captures the shape of a selector closure-like expression as an [`Accessor`].
///
/// ```rust
/// use mapping_framework::{select, Accessor};
///
/// assert_eq!(select!(d => d._age), Accessor::Member("_age"));
/// assert_eq!(
///     select!(d => d._age as i64),
///     Accessor::convert("i64", Accessor::Member("_age")),
/// );
/// assert_eq!(select!(d => d.owner.name), Accessor::Chain(vec!["owner", "name"]));
/// ```
///
/// The receiver of the path must be the parameter named on the left of `=>`:
///
/// ```compile_fail
/// use mapping_framework::select;
///
/// let selector = select!(d => x.name);
/// ```
#[macro_export]
macro_rules! select {
    (@receiver $param:ident, $recv:ident) => {
        let _ = |$param: $crate::accessor::Receiver| -> $crate::accessor::Receiver { $recv };
    };
    ($param:ident => $recv:ident . $field:ident) => {{
        $crate::select!(@receiver $param, $recv);
        $crate::Accessor::Member(::std::stringify!($field))
    }};
    ($param:ident => $recv:ident . $field:ident as $target:ty) => {{
        $crate::select!(@receiver $param, $recv);
        $crate::Accessor::convert(
            ::std::stringify!($target),
            $crate::Accessor::Member(::std::stringify!($field)),
        )
    }};
    ($param:ident => $recv:ident $( . $seg:ident )+ as $target:ty) => {{
        $crate::select!(@receiver $param, $recv);
        $crate::Accessor::convert(
            ::std::stringify!($target),
            $crate::Accessor::Chain(::std::vec![$( ::std::stringify!($seg) ),+]),
        )
    }};
    ($param:ident => $recv:ident $( . $seg:ident )+) => {{
        $crate::select!(@receiver $param, $recv);
        $crate::Accessor::Chain(::std::vec![$( ::std::stringify!($seg) ),+])
    }};
    ($param:ident => $recv:ident $( . $seg:ident )+ ( $($args:tt)* )) => {{
        $crate::select!(@receiver $param, $recv);
        $crate::Accessor::Call {
            path: ::std::vec![$( ::std::stringify!($seg) ),+],
            args: ::std::stringify!(( $($args)* )),
        }
    }};
    ($param:ident => $($expr:tt)+) => {
        $crate::Accessor::Opaque(::std::stringify!($($expr)+))
    };
}

/// Stand-in type for the parameter of a [`select!`](crate::select) expression.
///
/// Binding the parameter to this type makes a receiver that is not the
/// parameter fail to compile.
#[doc(hidden)]
#[derive(Debug, Clone, Copy)]
pub struct Receiver;
