use mapping_framework::mappable;

/// One line of an order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderLine {
    pub product_id: u64,
    pub quantity: u32,
    pub unit_price_cents: u64,
}

impl OrderLine {
    pub fn new(product_id: u64, quantity: u32, unit_price_cents: u64) -> Self {
        Self {
            product_id,
            quantity,
            unit_price_cents,
        }
    }

    pub fn total_cents(&self) -> u64 {
        self.unit_price_cents * u64::from(self.quantity)
    }
}

mappable! {
    /// An order placed by a customer.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Order {
        pub id: u64,
        pub customer_id: u64,
        pub lines: Vec<OrderLine>,
        pub note: Option<String>,
    }
}

impl Order {
    pub fn new(id: u64, customer_id: u64, lines: Vec<OrderLine>) -> Self {
        Self {
            id,
            customer_id,
            lines,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn total_cents(&self) -> u64 {
        self.lines.iter().map(OrderLine::total_cents).sum()
    }
}
