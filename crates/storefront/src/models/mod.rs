//! Domain models for the storefront.
//!
//! - [`user`] - Registered account records
//! - [`session`] - The logged-in identity
//! - [`cart`] - Cart line items
//! - [`carousel`] - Testimonial carousel position

pub mod carousel;
pub mod cart;
pub mod session;
pub mod user;

pub use carousel::Carousel;
pub use cart::LineItem;
pub use session::Identity;
pub use user::User;
