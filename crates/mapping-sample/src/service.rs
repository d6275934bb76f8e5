//! # Export Service
//!
//! Application code does not talk to the [`MappingRegistry`] directly. The
//! [`ExportService`] wraps it with domain-specific methods and turns a missing
//! mapping into a typed [`SampleError`].
//!
//! The service is cheap to clone (one `Arc`) and can be moved into as many
//! tasks as needed.

use std::sync::Arc;

use mapping_framework::naming::short_type_name;
use mapping_framework::MappingRegistry;
use tracing::{debug, instrument};

use crate::dto::{CustomerDto, OrderDto, ProductDto};
use crate::error::SampleError;
use crate::model::{Customer, Order, Product};
use crate::profile::StorefrontProfile;

/// Domain-to-wire conversions backed by a shared registry.
#[derive(Debug, Clone)]
pub struct ExportService {
    registry: Arc<MappingRegistry>,
}

impl ExportService {
    /// Builds the registry from [`StorefrontProfile`].
    pub fn new() -> Result<Self, SampleError> {
        let registry = MappingRegistry::from_profile(&StorefrontProfile)?;
        Ok(Self::with_registry(registry))
    }

    pub fn with_registry(registry: MappingRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    #[instrument(skip_all, fields(customer_id = customer.id))]
    pub fn export_customer(&self, customer: &Customer) -> Result<CustomerDto, SampleError> {
        debug!(?customer, "export_customer called");
        self.registry
            .map(customer)
            .ok_or_else(missing::<Customer, CustomerDto>)
    }

    #[instrument(skip_all, fields(product_id = product.id))]
    pub fn export_product(&self, product: &Product) -> Result<ProductDto, SampleError> {
        self.registry
            .map(product)
            .ok_or_else(missing::<Product, ProductDto>)
    }

    /// Exports a batch of orders, preserving their order.
    #[instrument(skip_all, fields(count = orders.len()))]
    pub fn export_orders(&self, orders: &[Order]) -> Result<Vec<OrderDto>, SampleError> {
        let exported = self
            .registry
            .map_many::<Order, OrderDto, _>(orders)
            .ok_or_else(missing::<Order, OrderDto>)?;
        Ok(exported.collect())
    }

    /// Exports a customer's order history, or nothing if `customer` is absent.
    pub fn export_history(&self, customer: Option<&Customer>) -> Result<Vec<OrderDto>, SampleError> {
        let mapping = self
            .registry
            .get::<Order, OrderDto>()
            .ok_or_else(missing::<Order, OrderDto>)?;
        Ok(mapping
            .map_many_opt(customer.map(|c| c.orders.iter()))
            .collect())
    }
}

fn missing<S, D>() -> SampleError {
    SampleError::MissingMapping {
        source_type: short_type_name::<S>(),
        destination_type: short_type_name::<D>(),
    }
}
