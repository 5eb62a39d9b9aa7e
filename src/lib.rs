//! AHP Calculator - Analytic Hierarchy Process priority weights
//!
//! This crate turns pairwise comparison matrices (one over alternatives per
//! criterion, one over the criteria) into normalized priority weights and a
//! final ranked score per alternative.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
