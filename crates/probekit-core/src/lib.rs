//! # ProbeKit Core
//!
//! Core types shared by every ProbeKit crate:
//! - the error taxonomy used by command processors and the pipeline
//! - the localized help catalog processors use to describe themselves

pub mod error;
pub mod help;

pub use error::{CommandProcessingError, Error, PipelineError, Result};
pub use help::{HelpCatalog, Language, TOOL_CHANGE_HELP_KEY};
