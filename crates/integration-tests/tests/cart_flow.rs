//! Cart flows against file storage.

#![allow(clippy::unwrap_used)]

use pashle_core::{CurrencyCode, Price};
use pashle_integration_tests::TestProfile;
use pashle_storefront::models::LineItem;
use pashle_storefront::services::PasswordScheme;
use serde_json::{Value, json};

fn item(name: &str, price: u64) -> LineItem {
    LineItem::new(name, Price::new(price), format!("img/{name}.jpg"), CurrencyCode::INR)
}

#[test]
fn test_cart_survives_restart_in_order() {
    let profile = TestProfile::new();

    {
        let state = profile.open(PasswordScheme::Sha256).unwrap();
        let mut cart = state.cart();
        cart.add(item("kurta", 1299)).unwrap();
        cart.add(item("tote", 499)).unwrap();
        cart.add(item("kurta", 1299)).unwrap();
    }

    let state = profile.open(PasswordScheme::Sha256).unwrap();
    let cart = state.cart();
    let names: Vec<&str> = cart.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["kurta", "tote", "kurta"]);
    assert_eq!(cart.total(), Price::new(3097));
    assert_eq!(cart.formatted_total(), "₹3,097");
}

#[test]
fn test_stored_cart_document_shape() {
    let profile = TestProfile::new();
    let state = profile.open(PasswordScheme::Sha256).unwrap();
    state.cart().add(item("tote", 120_000)).unwrap();

    let raw = std::fs::read_to_string(profile.document("pashleCart")).unwrap();
    let stored: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        stored,
        json!([{
            "name": "tote",
            "price": 120_000,
            "img": "img/tote.jpg",
            "priceFormatted": "₹1,20,000"
        }])
    );
}

#[test]
fn test_drain_cart_from_front() {
    let profile = TestProfile::new();
    let state = profile.open(PasswordScheme::Sha256).unwrap();
    let mut cart = state.cart();
    for (name, price) in [("a", 100), ("b", 250), ("c", 0)] {
        cart.add(item(name, price)).unwrap();
    }
    assert_eq!(cart.total(), Price::new(350));

    while !cart.is_empty() {
        cart.remove_at(0).unwrap().unwrap();
    }
    assert_eq!(cart.total(), Price::ZERO);

    let reopened = profile.open(PasswordScheme::Sha256).unwrap();
    assert!(reopened.cart().is_empty());
}

#[test]
fn test_out_of_range_remove_leaves_document_untouched() {
    let profile = TestProfile::new();
    let state = profile.open(PasswordScheme::Sha256).unwrap();
    let mut cart = state.cart();
    cart.add(item("a", 10)).unwrap();
    let before = std::fs::read_to_string(profile.document("pashleCart")).unwrap();

    assert!(cart.remove_at(5).unwrap().is_none());

    let after = std::fs::read_to_string(profile.document("pashleCart")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_damaged_cart_loads_empty_and_recovers() {
    let profile = TestProfile::new();
    let state = profile.open(PasswordScheme::Sha256).unwrap();
    std::fs::write(profile.document("pashleCart"), "[{\"name\":").unwrap();

    let mut cart = state.cart();
    assert!(cart.is_empty());
    cart.add(item("a", 10)).unwrap();

    assert_eq!(state.cart().len(), 1);
}

#[test]
fn test_damaged_session_reads_as_logged_out() {
    let profile = TestProfile::new();
    let state = profile.open(PasswordScheme::Sha256).unwrap();
    std::fs::write(profile.document("pashleAuth"), "\"just a string\"").unwrap();

    assert!(state.session().get().is_none());
    assert!(state.session().greeting().is_none());
}

#[test]
fn test_browser_cart_with_fractional_price_loads() {
    let profile = TestProfile::new();
    let state = profile.open(PasswordScheme::Sha256).unwrap();
    std::fs::write(
        profile.document("pashleCart"),
        r#"[{"name":"scarf","price":12.5,"img":"s.jpg","priceFormatted":"₹12.5"},
            {"name":"tote","price":499,"img":"t.jpg","priceFormatted":"₹499"}]"#,
    )
    .unwrap();

    let cart = state.cart();
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total(), Price::new(512));
}
