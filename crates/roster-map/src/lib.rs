//! Mapping reconciliation for roster imports.
//!
//! Owns the column-to-target-field assignments for one import session and
//! enforces the two rules a draft must satisfy before it can be confirmed:
//! a target field is claimed by at most one column (enforced on edits), and
//! every required target field is claimed by some column.

mod confidence;
mod error;
mod reconciler;
mod summary;

pub use confidence::{ConfidenceLevel, ConfidenceThreshold, DEFAULT_REVIEW_THRESHOLD};
pub use error::{MappingError, Result};
pub use reconciler::{DuplicateTarget, MappingProgress, MappingReconciler};
pub use summary::project_summary;
