//! Runtime description of the application's data model.
//!
//! The registry answers three questions for the query layer: does a model
//! exist, what kind is a given field, and may the store order by it.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod cell;
mod document;
pub mod error;
pub mod field;
pub mod model;
pub mod problem_mapping;
pub mod registry;

pub use cell::SchemaCell;
pub use error::SchemaError;
pub use field::{FieldDescriptor, FieldKind, ScalarType};
pub use model::{ModelSchema, ModelSchemaBuilder};
pub use registry::{SchemaRegistry, SchemaRegistryBuilder};
