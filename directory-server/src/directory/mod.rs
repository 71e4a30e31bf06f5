//! Employee directory
//!
//! - [`query`] - listing parameter validation and translation
//! - [`service`] - the operations behind the GraphQL schema

pub mod query;
pub mod service;

pub use query::{EmployeeQuery, ListingConfig, PageRequest, SearchFilter, SortDirection, SortField, SortSpec};
pub use service::DirectoryService;
