use tracing::debug;

use crate::product::{Product, ProductKey};

/// Owns the current in-memory product collection.
///
/// The collection is replaced wholesale by `load` and shrunk one entry at
/// a time by `delete`. Insertion order is preserved untouched - the filter
/// engine relies on the source order for category grouping.
#[derive(Debug, Default, Clone)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Replace the held collection wholesale.
    pub fn load(&mut self, products: Vec<Product>) {
        debug!(count = products.len(), "store loaded");
        self.products = products;
    }

    /// Remove the single product with the matching key. Returns whether a
    /// product was removed; a missing key is an idempotent no-op.
    pub fn delete(&mut self, key: &ProductKey) -> bool {
        let before = self.products.len();
        self.products.retain(|product| product.key() != *key);
        let removed = self.products.len() < before;
        if removed {
            debug!(?key, "product deleted");
        }
        removed
    }

    pub fn get(&self, key: &ProductKey) -> Option<&Product> {
        self.products.iter().find(|product| product.key() == *key)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
