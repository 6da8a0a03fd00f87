//! Cart store.
//!
//! An ordered list of line items, loaded once and rewritten in full after
//! every mutation. Duplicates are allowed; there is no quantity field.

use tracing::{debug, info, warn};

use pashle_core::{CurrencyCode, Price};

use crate::error::add_breadcrumb;
use crate::models::LineItem;
use crate::storage::{StorageError, StoragePort, read_json_list, write_json};

/// In-memory cart mirrored to storage.
pub struct CartStore<'a> {
    storage: &'a dyn StoragePort,
    key: &'a str,
    currency: CurrencyCode,
    items: Vec<LineItem>,
}

impl<'a> CartStore<'a> {
    /// Load the cart stored under `key`. Missing or malformed data loads
    /// as an empty cart; unreadable entries in an otherwise valid list are
    /// skipped.
    #[must_use]
    pub fn load(storage: &'a dyn StoragePort, key: &'a str, currency: CurrencyCode) -> Self {
        let items: Vec<LineItem> = read_json_list(storage, key);
        debug!(key, count = items.len(), "cart loaded");
        Self {
            storage,
            key,
            currency,
            items,
        }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency used for formatting.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Append an item and persist the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be written. The item is
    /// then dropped again so memory matches storage.
    pub fn add(&mut self, item: LineItem) -> Result<(), StorageError> {
        let price = item.price.to_string();
        add_breadcrumb(
            "cart",
            "Added item to cart",
            Some(&[("name", item.name.as_str()), ("price", price.as_str())]),
        );
        info!(name = %item.name, price = %item.price, "cart add");
        self.items.push(item);
        if let Err(e) = self.persist() {
            self.items.pop();
            warn!(error = %e, "cart add not saved");
            return Err(e);
        }
        Ok(())
    }

    /// Append an item built from product-card text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be written.
    pub fn add_displayed(
        &mut self,
        name: &str,
        price_text: &str,
        image: &str,
    ) -> Result<(), StorageError> {
        self.add(LineItem::from_display(name, price_text, image, self.currency))
    }

    /// Remove the item at `index` and persist the cart.
    ///
    /// An out-of-range index changes nothing and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be written. The item is
    /// then put back at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<Option<LineItem>, StorageError> {
        if index >= self.items.len() {
            debug!(index, len = self.items.len(), "cart remove out of range");
            return Ok(None);
        }
        let removed = self.items.remove(index);
        info!(index, name = %removed.name, "cart remove");
        if let Err(e) = self.persist() {
            warn!(index, error = %e, "cart remove not saved");
            self.items.insert(index, removed);
            return Err(e);
        }
        Ok(Some(removed))
    }

    /// Sum of all line item prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(|item| item.price).sum()
    }

    /// Total formatted for display, e.g. `₹1,25,000`.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        self.total().display(self.currency)
    }

    fn persist(&self) -> Result<(), StorageError> {
        write_json(self.storage, self.key, &self.items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::storage::failing::FailingStorage;

    const KEY: &str = "pashleCart";

    fn item(name: &str, price: u64) -> LineItem {
        LineItem::new(name, Price::new(price), format!("{name}.jpg"), CurrencyCode::INR)
    }

    #[test]
    fn test_total_sums_prices() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(&storage, KEY, CurrencyCode::INR);
        for (name, price) in [("a", 100), ("b", 250), ("c", 0)] {
            cart.add(item(name, price)).unwrap();
        }
        assert_eq!(cart.total(), Price::new(350));
        assert_eq!(cart.formatted_total(), "₹350");
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let storage = MemoryStorage::new();
        let cart = CartStore::load(&storage, KEY, CurrencyCode::INR);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_add_then_remove_front_until_empty() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(&storage, KEY, CurrencyCode::INR);
        for (name, price) in [("a", 10), ("b", 20), ("c", 30)] {
            cart.add(item(name, price)).unwrap();
        }

        assert_eq!(cart.remove_at(0).unwrap().unwrap().name, "a");
        assert_eq!(cart.items()[0].name, "b");
        cart.remove_at(0).unwrap();
        cart.remove_at(0).unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(storage.get(KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(&storage, KEY, CurrencyCode::INR);
        cart.add(item("a", 10)).unwrap();
        let before = storage.get(KEY).unwrap();

        assert_eq!(cart.remove_at(1).unwrap(), None);
        assert_eq!(cart.remove_at(usize::MAX).unwrap(), None);
        assert_eq!(cart.len(), 1);
        assert_eq!(storage.get(KEY).unwrap(), before);
    }

    #[test]
    fn test_duplicates_allowed() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(&storage, KEY, CurrencyCode::INR);
        cart.add(item("tote", 499)).unwrap();
        cart.add(item("tote", 499)).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Price::new(998));
    }

    #[test]
    fn test_persists_across_loads() {
        let storage = MemoryStorage::new();
        {
            let mut cart = CartStore::load(&storage, KEY, CurrencyCode::INR);
            cart.add(item("a", 10)).unwrap();
            cart.add(item("b", 20)).unwrap();
        }

        let cart = CartStore::load(&storage, KEY, CurrencyCode::INR);
        let names: Vec<&str> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_corrupt_cart_loads_empty() {
        for raw in ["{", r#"{"name":"x"}"#, r#"[{"name":"x","price":"ten"}]"#] {
            let storage = MemoryStorage::with_entries([(KEY, raw)]);
            let cart = CartStore::load(&storage, KEY, CurrencyCode::INR);
            assert!(cart.is_empty(), "raw = {raw}");
        }
    }

    #[test]
    fn test_add_displayed_parses_card_text() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(&storage, KEY, CurrencyCode::INR);
        cart.add_displayed("Linen Kurta", "₹1,299", "kurta.jpg").unwrap();
        cart.add_displayed("", "call us", "x.jpg").unwrap();

        let items = cart.items();
        assert_eq!(items[0].price, Price::new(1299));
        assert_eq!(items[0].price_formatted, "₹1,299");
        assert_eq!(items[1].name, "Product");
        assert_eq!(items[1].price, Price::ZERO);
        assert_eq!(cart.formatted_total(), "₹1,299");
    }

    #[test]
    fn test_fractional_prices_load() {
        let raw = r#"[
            {"name":"a","price":12.5,"img":"a.jpg","priceFormatted":"₹12.5"},
            {"name":"b","price":100,"img":"b.jpg","priceFormatted":"₹100"},
            {"name":"c","price":"ten","img":"c.jpg","priceFormatted":"₹ten"}
        ]"#;
        let storage = MemoryStorage::with_entries([(KEY, raw)]);
        let cart = CartStore::load(&storage, KEY, CurrencyCode::INR);

        let names: Vec<&str> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(cart.total(), Price::new(113));
    }

    #[test]
    fn test_failed_add_leaves_cart_unchanged() {
        let storage = FailingStorage::new([KEY]);
        let seeded = r#"[{"name":"a","price":10,"img":"a.jpg","priceFormatted":"₹10"}]"#;
        storage.seed(KEY, seeded);
        let mut cart = CartStore::load(&storage, KEY, CurrencyCode::INR);

        let err = cart.add(item("b", 20)).unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Price::new(10));
        assert_eq!(storage.get(KEY).unwrap().as_deref(), Some(seeded));
    }

    #[test]
    fn test_failed_add_to_empty_cart_writes_nothing() {
        let storage = FailingStorage::new([KEY]);
        let mut cart = CartStore::load(&storage, KEY, CurrencyCode::INR);

        assert!(cart.add_displayed("Tote", "₹499", "tote.jpg").is_err());
        assert!(cart.is_empty());
        assert_eq!(storage.get(KEY).unwrap(), None);
    }

    #[test]
    fn test_failed_remove_puts_item_back() {
        let storage = FailingStorage::new([KEY]);
        let seeded = r#"[
            {"name":"a","price":10,"img":"a.jpg","priceFormatted":"₹10"},
            {"name":"b","price":20,"img":"b.jpg","priceFormatted":"₹20"},
            {"name":"c","price":30,"img":"c.jpg","priceFormatted":"₹30"}
        ]"#;
        storage.seed(KEY, seeded);
        let mut cart = CartStore::load(&storage, KEY, CurrencyCode::INR);

        let err = cart.remove_at(1).unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        let names: Vec<&str> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(cart.total(), Price::new(60));
        assert_eq!(storage.get(KEY).unwrap().as_deref(), Some(seeded));
    }
}
