//! # Milonga Identity
//!
//! Identity descriptors and role tiers for the Milonga platform.
//!
//! This crate defines *who* an authorization check is about: the
//! [`Identity`] descriptor the session subsystem produces (member id,
//! role fields, additive tags) and the [`RoleTier`] hierarchy that
//! policy compilation selects a tier from.
//!
//! It deliberately does **not** authenticate, load, or store anything;
//! it is the shared vocabulary between the session layer and the
//! `milonga-policy` compiler. A guest is represented by the absence of
//! an `Identity`.

pub mod roles;
pub mod user;

// Re-export main types for convenience
pub use roles::RoleTier;
pub use user::{Identity, UserId};
