use serde::{Deserialize, Serialize};

/// A single catalog entry.
///
/// Immutable once fetched: the collection is replaced wholesale on reload
/// and individual products are only ever removed, never edited in place.
/// `price` stays a pre-formatted display string ("$2"); nothing in the
/// listing does arithmetic on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier from the remote source. Absent in static-seed
    /// mode, where the name serves as the key instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub category: String,
    pub name: String,
    pub price: String,
    pub stocked: bool,
}

impl Product {
    pub fn new(
        id: Option<i64>,
        category: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        stocked: bool,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            name: name.into(),
            price: price.into(),
            stocked,
        }
    }

    /// Stable key for delete/lookup: the id when the source provided one,
    /// otherwise the name.
    pub fn key(&self) -> ProductKey {
        match self.id {
            Some(id) => ProductKey::Id(id),
            None => ProductKey::Name(self.name.clone()),
        }
    }
}

/// Key used to address a product in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKey {
    Id(i64),
    Name(String),
}

impl From<i64> for ProductKey {
    fn from(id: i64) -> Self {
        ProductKey::Id(id)
    }
}

impl From<&str> for ProductKey {
    fn from(name: &str) -> Self {
        ProductKey::Name(name.to_string())
    }
}

/// The canonical six-product collection from the tutorial data set.
/// Grouped contiguously by category, as the filter engine requires.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new(Some(1), "Fruits", "Apple", "$1", true),
        Product::new(Some(2), "Fruits", "Dragonfruit", "$1", true),
        Product::new(Some(3), "Fruits", "Passionfruit", "$2", false),
        Product::new(Some(4), "Vegetables", "Spinach", "$2", true),
        Product::new(Some(5), "Vegetables", "Pumpkin", "$4", false),
        Product::new(Some(6), "Vegetables", "Peas", "$1", true),
    ]
}
