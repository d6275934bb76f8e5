//! # Storefront Mapping Profile
//!
//! All domain -> DTO mappings of the sample, registered in one place at startup.
//!
//! Each mapping follows the same recipe:
//!
//! 1. explicit `map_property` calls for derived values (counts, totals, prices)
//! 2. `automap_remaining` for the fields that only differ in naming
//! 3. `require_all_mapped` so a new DTO field fails startup instead of shipping empty

use mapping_framework::{
    select, CompiledMapping, MappingDefinition, MappingProfile, MappingRegistry, Result,
};

use crate::dto::{CustomerDto, OrderDto, ProductDto};
use crate::model::{Customer, Order, Product};

/// Registers every storefront mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct StorefrontProfile;

impl StorefrontProfile {
    pub fn customer() -> Result<CompiledMapping<Customer, CustomerDto>> {
        Ok(MappingDefinition::<Customer, CustomerDto>::new()
            .map_property(select!(d => d.order_count), |c: &Customer| c.orders.len())?
            .automap_remaining()
            .require_all_mapped()?
            .build_default())
    }

    pub fn product() -> Result<CompiledMapping<Product, ProductDto>> {
        Ok(MappingDefinition::<Product, ProductDto>::new()
            .map_property(select!(d => d.price), |p: &Product| p.price_cents as f64 / 100.0)?
            .map_property(select!(d => d.in_stock), |p: &Product| p.stock > 0)?
            .automap_remaining_strict()?
            .require_all_mapped()?
            .build_default())
    }

    pub fn order() -> Result<CompiledMapping<Order, OrderDto>> {
        Ok(MappingDefinition::<Order, OrderDto>::new()
            .map_property(select!(d => d.line_count), |o: &Order| o.lines.len())?
            .map_property(select!(d => d.total_cents), Order::total_cents)?
            .automap_remaining_strict()?
            .require_all_mapped()?
            .build_default())
    }
}

impl MappingProfile for StorefrontProfile {
    fn configure(&self, registry: &mut MappingRegistry) -> Result<()> {
        registry.register(Self::customer()?);
        registry.register(Self::product()?);
        registry.register(Self::order()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderLine;

    #[test]
    fn test_profile_registers_every_pair() {
        let registry = MappingRegistry::from_profile(&StorefrontProfile).unwrap();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains::<Customer, CustomerDto>());
        assert!(registry.contains::<Product, ProductDto>());
        assert!(registry.contains::<Order, OrderDto>());
    }

    #[test]
    fn test_customer_email_is_matched_to_backing_field() {
        let mapping = StorefrontProfile::customer().unwrap();
        let customer = Customer::new(1, "Alice", "alice@example.com")
            .with_orders(vec![Order::new(10, 1, vec![])]);

        let dto = mapping.map(&customer);
        assert_eq!(dto._email, "alice@example.com");
        assert_eq!(dto.order_count, 1);
    }

    #[test]
    fn test_product_price_is_converted_from_cents() {
        let dto = StorefrontProfile::product()
            .unwrap()
            .map(&Product::new(7, "Widget", 2550, 0));
        assert_eq!(dto.price, 25.5);
        assert!(!dto.in_stock);
    }

    #[test]
    fn test_order_total_uses_line_totals() {
        let order = Order::new(3, 1, vec![OrderLine::new(7, 2, 250), OrderLine::new(8, 1, 1000)])
            .with_note("gift wrap");
        let dto = StorefrontProfile::order().unwrap().map(&order);

        assert_eq!(dto.line_count, 2);
        assert_eq!(dto.total_cents, 1500);
        assert_eq!(dto.note.as_deref(), Some("gift wrap"));
    }
}
