//! Authorization gate - caller identity, roles and the single guard every
//! protected operation goes through.

mod auth_model;
mod gate;


pub use auth_model::{AccessError, Identity, Requirement, Role};
pub use gate::{authorize, ensure_owner_or_admin};
