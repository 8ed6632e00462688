//! Mapping suggestion service boundary.
//!
//! The service receives the header row and a few sample rows of an upload
//! and proposes a column-to-field mapping, the target field catalog, and
//! caveats. The engine only depends on the [`MappingService`] trait;
//! [`HttpMappingService`] is the authenticated HTTP implementation.

mod client;
mod error;
mod types;

pub use client::{HttpMappingService, MappingService};
pub use error::{Result, ServiceError};
pub use types::{DEFAULT_SAMPLE_ROWS, MappingRequest, MappingResponse};
