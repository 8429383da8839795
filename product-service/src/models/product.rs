use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supplier details embedded in a product document; never stored on its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Supplier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A product as stored in the `products` collection and returned over HTTP.
///
/// The MongoDB `_id` is left to the driver and ignored on read; `id` is the
/// service-assigned identifier every lookup uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    #[serde(rename = "prodname", default)]
    pub product_name: String,
    #[serde(rename = "prodprice", default)]
    pub unit_price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<Supplier>,
}

impl Product {
    pub fn new(product_name: String, unit_price: String, supplier: Option<Supplier>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_name,
            unit_price,
            supplier,
        }
    }
}
