use mapping_framework::mappable;

use super::Order;

mappable! {
    /// A registered customer, as stored by the shop.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Customer {
        pub id: u64,
        pub name: String,
        pub email: String,
        pub orders: Vec<Order>,
    }
}

impl Customer {
    /// Creates a customer without order history.
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            orders: Vec::new(),
        }
    }

    pub fn with_orders(mut self, orders: Vec<Order>) -> Self {
        self.orders = orders;
        self
    }
}
