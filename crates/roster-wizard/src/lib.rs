//! Roster import wizard.
//!
//! The wizard walks a user through four phases:
//!
//! - **Selection**: import from another tool, start fresh, or decide later
//! - **Upload**: pick a CSV export; it is tokenized and sent for a mapping suggestion
//! - **Mapping**: review and correct the suggested column-to-field mapping
//! - **Ready**: the confirmed draft and its summary, handed to the caller on continue
//!
//! All state lives in one [`WizardState`] value and every transition goes
//! through the pure [`update`] function. [`Wizard`] drives it: it runs the
//! mapping request an upload asks for and hands the final draft to a
//! [`DraftSink`].

mod config;
mod driver;
mod error;
mod event;
mod sink;
mod state;
mod update;

pub use config::{ConfigError, ImportConfig, ServiceConfig, SourceOption, default_config_path};
pub use driver::Wizard;
pub use error::WizardError;
pub use event::{Effect, Transition, WizardEvent, WizardExit};
pub use sink::{DraftSink, MemorySink};
pub use state::{ErrorKind, PendingError, Phase, Session, WizardState};
pub use update::update;
