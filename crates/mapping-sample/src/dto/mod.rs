//! Wire-facing DTOs. These are the *destination* side of every mapping.
//!
//! Field names follow the wire format rather than the domain: a backing-style
//! `_email` is matched to the domain `email` by normalization, then renamed
//! back for serialization.

use mapping_framework::mappable;
use serde::{Deserialize, Serialize};

mappable! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct CustomerDto {
        pub id: u64,
        pub name: String,
        #[serde(rename = "email")]
        pub _email: String,
        pub order_count: usize,
    }
}

mappable! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct ProductDto {
        pub id: u64,
        pub name: String,
        pub price: f64,
        pub in_stock: bool,
    }
}

mappable! {
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct OrderDto {
        pub id: u64,
        pub customer_id: u64,
        pub line_count: usize,
        pub total_cents: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub note: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_customer_email_uses_wire_name() {
        let dto = CustomerDto {
            id: 1,
            name: "Alice".into(),
            _email: "alice@example.com".into(),
            order_count: 2,
        };

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            value,
            json!({ "id": 1, "name": "Alice", "email": "alice@example.com", "order_count": 2 })
        );
        assert_eq!(serde_json::from_value::<CustomerDto>(value).unwrap(), dto);
    }

    #[test]
    fn test_order_without_note_omits_the_key() {
        let mut dto = OrderDto {
            id: 100,
            customer_id: 1,
            line_count: 1,
            total_cents: 2500,
            note: None,
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert!(value.get("note").is_none());

        dto.note = Some("leave at the door".into());
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["note"], "leave at the door");
    }
}
