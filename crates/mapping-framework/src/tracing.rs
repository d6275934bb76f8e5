//! # Observability & Tracing
//!
//! Mapping construction reports what it resolves through `tracing`:
//!
//! - **debug**: every explicit and automatic field mapping, and each compiled mapping
//! - **warn**: name matches skipped because the types are not assignable, and
//!   registry entries that replace an earlier mapping
//! - **info**: every mapping added to a [`MappingRegistry`](crate::MappingRegistry)
//!
//! Type names are logged in their short form (`UserDto`, not `my_app::dto::UserDto`)
//! as `source` / `destination` fields.
//!
//! ```bash
//! # Registry wiring only
//! RUST_LOG=info cargo run -p mapping-sample
//!
//! # Every resolved field
//! RUST_LOG=mapping_framework=debug cargo run -p mapping-sample
//! ```
//!
//! With `RUST_LOG=debug` the startup of the sample reads:
//!
//! ```text
//! DEBUG Mapped explicitly source="Customer" destination="CustomerDto" field="order_count"
//! DEBUG Automapped source_field="id" destination_field="id"
//! DEBUG Automapped source_field="name" destination_field="name"
//! DEBUG Automapped source_field="email" destination_field="_email"
//! DEBUG Compiled mapping source="Customer" destination="CustomerDto" fields=4
//! INFO Registered mapping source="Customer" destination="CustomerDto" fields=4 size=1
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
