//! # Mapping Sample
//!
//! Demonstrates the full lifecycle of the mapping framework:
//!
//! 1. Setting up tracing.
//! 2. Building every mapping once through [`StorefrontProfile`](mapping_sample::profile::StorefrontProfile).
//! 3. Exporting customers concurrently from several tasks that share one registry.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p mapping-sample
//! ```

use mapping_framework::tracing::setup_tracing;
use mapping_sample::error::SampleError;
use mapping_sample::model::{Customer, Order, OrderLine, Product};
use mapping_sample::service::ExportService;
use tracing::{error, info, Instrument};

fn seed_customers() -> Vec<Customer> {
    vec![
        Customer::new(1, "Alice", "alice@example.com").with_orders(vec![
            Order::new(100, 1, vec![OrderLine::new(1, 2, 1250)]),
            Order::new(101, 1, vec![OrderLine::new(2, 1, 999), OrderLine::new(1, 1, 1250)])
                .with_note("leave at the door"),
        ]),
        Customer::new(2, "Bob", "bob@example.com"),
        Customer::new(3, "Carol", "carol@example.com")
            .with_orders(vec![Order::new(102, 3, vec![OrderLine::new(3, 10, 45)])]),
    ]
}

#[tokio::main]
async fn main() -> Result<(), SampleError> {
    setup_tracing();

    info!("Starting export sample");

    // Mapping errors surface here, at startup
    let service = ExportService::new()?;

    let catalog = [
        Product::new(1, "Widget", 1250, 40),
        Product::new(2, "Gadget", 999, 0),
        Product::new(3, "Sprocket", 45, 1200),
    ];
    for product in &catalog {
        let dto = service.export_product(product)?;
        info!(id = dto.id, name = %dto.name, price = dto.price, in_stock = dto.in_stock, "Product exported");
    }

    let mut handles = vec![];
    for customer in seed_customers() {
        let service = service.clone();
        let span = tracing::info_span!("customer_export", customer_id = customer.id);
        handles.push(tokio::spawn(
            async move {
                let dto = service.export_customer(&customer)?;
                let history = service.export_history(Some(&customer))?;
                info!(name = %dto.name, orders = dto.order_count, "Customer exported");
                for order in &history {
                    info!(order_id = order.id, total_cents = order.total_cents, note = ?order.note, "Order exported");
                }
                Ok::<_, SampleError>(history.len())
            }
            .instrument(span),
        ));
    }

    let mut exported_orders = 0;
    for handle in handles {
        match handle.await {
            Ok(Ok(count)) => exported_orders += count,
            Ok(Err(e)) => error!(error = %e, "Export failed"),
            Err(e) => error!(error = %e, "Export task panicked"),
        }
    }

    info!(exported_orders, "Sample completed successfully");
    Ok(())
}
