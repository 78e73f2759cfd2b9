//! Request composition for propdesk list queries.
//!
//! Ties the schema, query and security crates together: layered
//! configuration, logging setup, a [`QueryPlanner`] that turns an ability and
//! raw list parameters into a [`QueryPlan`], and the [`QueryExecutor`] seam
//! that runs it.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod memory;
pub mod planner;
pub mod problem_mapping;
pub mod service;

pub use config::{ConfigError, ENV_PREFIX, PropdeskConfig, QueryConfig};
pub use error::CoreError;
pub use executor::{ExecutorError, QueryExecutor, execute_page};
pub use logging::{LogFormat, LoggingConfig, init_logging};
pub use memory::MemoryExecutor;
pub use planner::{QueryPlan, QueryPlanner, ResourceDescriptor, resources};
pub use service::ListService;
