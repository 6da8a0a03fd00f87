//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Registration and login against the local user list
//! - `session` - The single active identity
//! - `cart` - Ordered cart line items and totals
//!
//! None of the services depend on each other's storage; they share only the
//! [`StoragePort`](crate::storage::StoragePort). The credential store writes
//! the session through [`SessionState`] after a successful register or login.

pub mod auth;
pub mod cart;
pub mod session;

pub use auth::{AuthError, CredentialStore, PasswordScheme, Registration, ValidationError};
pub use cart::CartStore;
pub use session::SessionState;
