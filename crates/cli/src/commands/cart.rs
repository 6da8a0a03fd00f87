//! Cart commands.

use tracing::info;

use pashle_core::Price;
use pashle_storefront::error::AppError;
use pashle_storefront::models::LineItem;
use pashle_storefront::state::AppState;

/// List items with their index, then the total.
pub fn list(state: &AppState) {
    let cart = state.cart();
    if cart.is_empty() {
        info!("Your cart is empty");
        return;
    }
    for (index, item) in cart.items().iter().enumerate() {
        info!("[{index}] {} - {}", item.name, item.price_formatted);
    }
    info!("Total: {} ({} items)", cart.formatted_total(), cart.len());
}

/// Add a catalog item.
pub fn add(state: &AppState, name: &str, price: u64, image: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Product name is required.".to_string()));
    }
    let mut cart = state.cart();
    let item = LineItem::new(name.trim(), Price::new(price), image, cart.currency());
    cart.add(item)?;
    info!("Added {name} to cart. Total: {}", cart.formatted_total());
    Ok(())
}

/// Add an item from product-card text.
pub fn add_displayed(
    state: &AppState,
    name: &str,
    price_text: &str,
    image: &str,
) -> Result<(), AppError> {
    let mut cart = state.cart();
    cart.add_displayed(name, price_text, image)?;
    info!("Added to cart. Total: {}", cart.formatted_total());
    Ok(())
}

/// Remove the item at `index`.
pub fn remove(state: &AppState, index: usize) -> Result<(), AppError> {
    let mut cart = state.cart();
    match cart.remove_at(index)? {
        Some(item) => info!("Removed {}. Total: {}", item.name, cart.formatted_total()),
        None => info!("No item at index {index}; cart unchanged"),
    }
    Ok(())
}
