//! SQLite storage implementation for Terravest.
//!
//! This crate is the only place where Diesel is used. It implements the
//! repository traits defined in `terravest-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Embedded Diesel migrations
//! - Repository implementations for users, plans and investments
//! - Database row types (with Diesel derives)
//!
//! ```text
//!   server (axum)
//!        │
//!        ▼
//!   core (domain, traits)
//!        ▲
//!        │ implements
//!   storage-sqlite (this crate) ──► SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

pub mod investments;
pub mod plans;
pub mod users;

pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};
pub use errors::{IntoCore, StorageError};

pub use investments::InvestmentRepository;
pub use plans::PlanRepository;
pub use users::UserRepository;

pub use terravest_core::errors::{DatabaseError, Error, Result};
