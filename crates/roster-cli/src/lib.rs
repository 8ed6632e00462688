//! CLI library components for the roster import tool.

pub mod import;
pub mod logging;
pub mod sink;
pub mod timeout;
