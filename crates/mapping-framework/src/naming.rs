//! # Field Name Normalization
//!
//! Paired types rarely agree on naming conventions. A domain model may expose
//! `Age` while the wire shape uses a backing-field style `_age`. Automatic
//! matching compares *normalized* names instead of raw ones.
//!
//! Normalization is deliberately small: strip **one** leading underscore, then
//! lowercase. It does not translate between `snake_case` and `camelCase`.

/// Returns the canonical form used for automatic name matching.
///
/// ```
/// use mapping_framework::naming::normalize;
///
/// assert_eq!(normalize("Age"), "age");
/// assert_eq!(normalize("_age"), "age");
/// assert_eq!(normalize("__age"), "_age");
/// ```
pub fn normalize(name: &str) -> String {
    name.strip_prefix('_').unwrap_or(name).to_lowercase()
}

/// Short display name for a type (e.g. `OrderDto` instead of `my_app::dto::OrderDto`).
///
/// Generic arguments are kept so `Vec<i32>` still reads as `Vec<i32>`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    shorten(std::any::type_name::<T>())
}

pub(crate) fn shorten(full: &'static str) -> &'static str {
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
