//! Error surface for the propdesk crates.
//!
//! Pure data types with no HTTP framework dependency unless the `axum`
//! feature is enabled:
//! - RFC 9457 Problem Details (`Problem`)
//! - Static error catalog (`ErrDef` and its constants)
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{APPLICATION_PROBLEM_JSON, Problem};
