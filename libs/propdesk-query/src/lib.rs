//! List-query inputs for propdesk resources: schema-validated sort paths,
//! the ordering handed to the store, and normalized pagination.
//!
//! ```
//! use std::sync::Arc;
//! use propdesk_query::{OrderClauseBuilder, SortDir, SortPathValidator};
//! use propdesk_schema::{ModelSchema, ScalarType, SchemaRegistry};
//!
//! let schema = Arc::new(
//!     SchemaRegistry::builder()
//!         .model(
//!             ModelSchema::builder("Contracts")
//!                 .scalar("id", ScalarType::String)
//!                 .scalar("title", ScalarType::String)
//!                 .build()?,
//!         )
//!         .build()?,
//! );
//!
//! let spec = SortPathValidator::new(schema.clone())
//!     .validate("Contracts", "title", 2)?
//!     .with_direction(SortDir::Desc);
//! let order = OrderClauseBuilder::new(schema).build(&spec);
//! assert_eq!(order.to_string(), "title desc, id desc");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod error;
pub mod order;
pub mod page;
pub mod pagination;
pub mod params;
pub mod problem_mapping;
pub mod sort;

pub use error::QueryError;
pub use order::{OrderClause, OrderClauseBuilder, OrderEntry, TIEBREAKER_FIELD};
pub use page::{Page, PageInfo};
pub use pagination::{PaginationLimits, PaginationRequest};
pub use params::ListParams;
pub use sort::{DEFAULT_MAX_NESTED_SORT_LEVEL, SortDir, SortPathValidator, SortSpec};
