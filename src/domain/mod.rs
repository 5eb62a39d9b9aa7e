//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, name parsing, errors)
//! - `analysis` - Pure AHP computation (matrices, weights, consistency)

pub mod analysis;
pub mod foundation;
