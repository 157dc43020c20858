//! Terravest Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the Terravest investment
//! platform: the investment terms engine, the authorization gate, and the
//! plan, investment and user services. It is database-agnostic and defines
//! traits that are implemented by the `storage-sqlite` crate.

pub mod auth;
pub mod constants;
pub mod errors;
pub mod events;
pub mod investments;
pub mod plans;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
