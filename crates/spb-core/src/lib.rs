//! Core domain + application logic for the Steam presence tracker bot.
//!
//! This crate is intentionally framework-agnostic. Telegram / Steam Web API
//! live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod status;
pub mod tracker;
pub mod validate;

pub use errors::{Error, Result};
