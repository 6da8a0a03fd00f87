//! Pashle Storefront library.
//!
//! Local account, session and cart persistence for the Pashle storefront.
//! Every store works against an injected [`storage::StoragePort`], so the
//! same code runs over an in-memory map in tests and a directory of JSON
//! documents in the CLI.
//!
//! # Modules
//!
//! - [`storage`] - Key-value storage port and its implementations
//! - [`services`] - Credential store, session state and cart store
//! - [`models`] - Persisted records and carousel state
//! - [`state`] - Shared application state wiring config to storage

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
