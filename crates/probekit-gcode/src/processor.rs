//! Command processor contract

use probekit_core::CommandProcessingError;
use std::sync::Arc;

use super::GcodeState;

/// Trait for G-Code command processors
///
/// A processor takes one command line together with the current machine
/// state and returns the lines that should replace it downstream. Processors
/// are applied in a pipeline; their outputs are concatenated in order.
///
/// # Examples
/// - Tool change expansion (`T5M6` -> park, pause, probe)
pub trait CommandProcessor: Send + Sync {
    /// Get the name/identifier of this processor
    fn name(&self) -> &str;

    /// Get a human-readable, localized description of this processor
    fn help(&self) -> &str;

    /// Process a single G-Code command
    ///
    /// # Arguments
    /// * `command` - The raw command line, comments included
    /// * `state` - Current machine state (read-only)
    ///
    /// # Returns
    /// The replacement lines, in execution order. Most processors return the
    /// command unchanged; expanders return several lines. Return an empty
    /// vector to drop the command.
    fn process(
        &self,
        command: &str,
        state: &GcodeState,
    ) -> Result<Vec<String>, CommandProcessingError>;

    /// Check if this processor is enabled
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Arc-wrapped processor for thread-safe sharing
pub type ProcessorHandle = Arc<dyn CommandProcessor>;
