//! Data model for importing a studio roster from a third-party CSV export.
//!
//! # Module Organization
//!
//! - [`table`]: The raw table produced by tokenizing an uploaded file
//! - [`field`]: Target field catalog entries and their semantic tags
//! - [`mapping`]: Column-to-target-field assignments
//! - [`draft`]: The import draft handed to the commit step, and its summary

pub mod draft;
pub mod field;
pub mod mapping;
pub mod table;

pub use draft::{ImportDraft, SourceSoftware, StartChoice, Summary};
pub use field::{FieldSemantic, TargetField};
pub use mapping::{ColumnMapping, HUMAN_CONFIDENCE};
pub use table::RawTable;
