//! G-Code processor pipeline

use probekit_core::PipelineError;

use super::{CommentStripper, GcodeCommentStripper, GcodeState, ProcessorHandle};

/// G-Code command processor pipeline
///
/// Manages a sequence of command processors that are applied to G-Code commands
/// in order. Each processor can pass the command through, drop it, or expand
/// it into multiple commands; the outputs of one processor are fed, in order,
/// to the next.
///
/// # Example
/// ```ignore
/// let mut pipeline = ProcessorPipeline::new();
/// pipeline.register(Arc::new(ToolChangeProcessor::new(0.0, 0.0, 10.0, "G53G0X0Y0", "G38.2Z-5F10")));
///
/// let commands = pipeline.process_commands(&input_lines, &mut state)?;
/// ```
#[derive(Default)]
pub struct ProcessorPipeline {
    processors: Vec<ProcessorHandle>,
}

impl ProcessorPipeline {
    /// Create a new empty processor pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processor in the pipeline
    ///
    /// Processors are applied in the order they are registered.
    pub fn register(&mut self, processor: ProcessorHandle) -> &mut Self {
        self.processors.push(processor);
        self
    }

    /// Register multiple processors at once
    pub fn register_all(&mut self, processors: Vec<ProcessorHandle>) -> &mut Self {
        self.processors.extend(processors);
        self
    }

    /// Get the number of registered processors
    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    /// Get a reference to a processor by name
    pub fn get_processor_by_name(&self, name: &str) -> Result<&ProcessorHandle, PipelineError> {
        self.processors
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| PipelineError::UnknownProcessor {
                name: name.to_string(),
            })
    }

    /// List all registered processors as (name, help, enabled)
    pub fn list_processors(&self) -> Vec<(&str, &str, bool)> {
        self.processors
            .iter()
            .map(|p| (p.name(), p.help(), p.is_enabled()))
            .collect()
    }

    /// Process a single command through the entire pipeline
    ///
    /// Returns the commands to send downstream, in order.
    pub fn process_command(
        &self,
        command: &str,
        state: &GcodeState,
    ) -> Result<Vec<String>, PipelineError> {
        let mut current_commands = vec![command.to_string()];

        for processor in &self.processors {
            if !processor.is_enabled() {
                continue;
            }

            let mut next_commands = Vec::with_capacity(current_commands.len());

            for cmd in current_commands {
                match processor.process(&cmd, state) {
                    Ok(processed) => next_commands.extend(processed),
                    Err(e) => {
                        tracing::warn!(
                            "Processor '{}' failed on command '{}': {}",
                            processor.name(),
                            cmd,
                            e
                        );
                        return Err(PipelineError::Processor {
                            name: processor.name().to_string(),
                            command: cmd,
                            source: e,
                        });
                    }
                }
            }

            current_commands = next_commands;

            // Nothing left for later processors to see
            if current_commands.is_empty() {
                break;
            }
        }

        Ok(current_commands)
    }

    /// Process a batch of commands through the pipeline
    ///
    /// # Arguments
    /// * `commands` - The raw command lines to process
    /// * `state` - Machine state, updated after every emitted command; the
    ///   tool number follows the `T` word of each input line
    ///
    /// # Returns
    /// All emitted commands, in order
    pub fn process_commands<S: AsRef<str>>(
        &self,
        commands: &[S],
        state: &mut GcodeState,
    ) -> Result<Vec<String>, PipelineError> {
        let mut results = Vec::with_capacity(commands.len());

        for command in commands {
            let command = command.as_ref();
            let processed = self.process_command(command, state)?;

            for cmd in processed {
                Self::update_state(&cmd, state);
                results.push(cmd);
            }
            Self::track_tool(command, state);
        }

        Ok(results)
    }

    /// Update machine state from an emitted command
    ///
    /// Emitted lines that cannot be stripped are left out of state tracking
    /// rather than failing the batch; they already passed every processor.
    fn update_state(command: &str, state: &mut GcodeState) {
        match GcodeCommentStripper::new().strip(command) {
            Ok(stripped) => state.apply(&stripped),
            Err(e) => tracing::debug!("Not tracking state for '{}': {}", command, e),
        }
    }

    /// Record the tool selected by an input line
    fn track_tool(command: &str, state: &mut GcodeState) {
        match GcodeCommentStripper::new().strip(command) {
            Ok(stripped) => state.record_tool(&stripped),
            Err(e) => tracing::debug!("Not tracking tool for '{}': {}", command, e),
        }
    }

    /// Clear all processors from the pipeline
    pub fn clear(&mut self) {
        self.processors.clear();
    }
}
