//! Pashle Core - Shared domain types.
//!
//! This crate provides the types used across the Pashle components:
//! - `storefront` - Credential, session and cart stores over a key-value profile
//! - `cli` - Command-line front-end for the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Normalized emails and whole-unit prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
