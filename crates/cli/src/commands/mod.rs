//! CLI command implementations.

pub mod account;
pub mod carousel;
pub mod cart;
