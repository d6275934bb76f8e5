use mapping_framework::mappable;

mappable! {
    /// A product in the catalog. Prices are kept in cents.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Product {
        pub id: u64,
        pub name: String,
        pub price_cents: u64,
        pub stock: u32,
    }
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, price_cents: u64, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price_cents,
            stock,
        }
    }
}
