//! Cart line items.

use serde::{Deserialize, Serialize};

use pashle_core::{CurrencyCode, Price};

/// Name used when a product card has no title.
const FALLBACK_PRODUCT_NAME: &str = "Product";

/// One product entry in the cart, with its price snapshot at add time.
///
/// Persisted as `{ name, price, img, priceFormatted }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name.
    pub name: String,
    /// Price in whole currency units.
    pub price: Price,
    /// Image reference (URL or relative path).
    #[serde(rename = "img")]
    pub image: String,
    /// Price as it was displayed when the item was added.
    #[serde(rename = "priceFormatted")]
    pub price_formatted: String,
}

impl LineItem {
    /// Create a line item from catalog data, formatting the price.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            image: image.into(),
            price_formatted: price.display(currency),
        }
    }

    /// Create a line item from the text shown on a product card.
    ///
    /// The price is parsed with [`Price::from_display`] (zero on failure).
    /// A blank name falls back to `"Product"`; the displayed price text is
    /// kept verbatim, or `₹<price>` when it is blank.
    #[must_use]
    pub fn from_display(
        name: &str,
        price_text: &str,
        image: &str,
        currency: CurrencyCode,
    ) -> Self {
        let name = match name.trim() {
            "" => FALLBACK_PRODUCT_NAME,
            trimmed => trimmed,
        };
        let price = Price::from_display(price_text);
        let price_formatted = match price_text.trim() {
            "" => format!("{}{price}", currency.symbol()),
            trimmed => trimmed.to_owned(),
        };

        Self {
            name: name.to_owned(),
            price,
            image: image.to_owned(),
            price_formatted,
        }
    }
}
