//! # Mapping Sample Library
//!
//! A small storefront that exports its domain models as wire DTOs. It exposes
//! the modules used by the demo binary so they can be integration tested.
//!
//! - **[model]**: domain types (`Customer`, `Product`, `Order`), the mapping sources
//! - **[dto]**: wire types (`CustomerDto`, `ProductDto`, `OrderDto`), the mapping destinations
//! - **[profile]**: [`StorefrontProfile`](profile::StorefrontProfile), every mapping in one place
//! - **[service]**: [`ExportService`](service::ExportService), the API the rest of the app calls

pub mod dto;
pub mod error;
pub mod model;
pub mod profile;
pub mod service;
