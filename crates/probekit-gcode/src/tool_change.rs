//! Tool change processor
//!
//! Moves to a park location on a tool change, waits for the operator to swap
//! the tool, then moves to the probe and runs the tool measurement.
//!
//! A line such as `T5M6` (comments allowed) is replaced by:
//!
//! 1. rapid to park Z (`G53G0Z..`)
//! 2. rapid to park X/Y (`G53G0X..Y..`)
//! 3. pause (`M0`) for the tool swap
//! 4. the configured probe move
//! 5. pause (`M0`) before measuring
//! 6. the configured probe action
//! 7. rapid back to park Z
//!
//! The tool number itself does not change the sequence.

use probekit_core::{CommandProcessingError, HelpCatalog, Language, TOOL_CHANGE_HELP_KEY};
use std::fmt;
use std::sync::Arc;

use super::{
    format_coordinate, CommandProcessor, CommentStripper, GcodeCommentStripper, GcodeState,
    ToolChangeMatcher,
};

/// Program pause, giving the operator time to act
const PAUSE_COMMAND: &str = "M0";

/// Number of commands a tool change expands into
pub const EXPANSION_LEN: usize = 7;

/// The fixed commands emitted for a tool change
///
/// Built once from the park coordinates and probe commands; the move strings
/// are formatted at construction and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolChangeSequence {
    park_z: String,
    park_xy: String,
    pause: String,
    probe_move: String,
    probe_action: String,
}

impl ToolChangeSequence {
    /// Create a sequence from machine (G53) park coordinates and probe commands
    pub fn new(
        park_x: f64,
        park_y: f64,
        park_z: f64,
        probe_move: impl Into<String>,
        probe_action: impl Into<String>,
    ) -> Self {
        Self {
            park_z: format!("G53G0Z{}", format_coordinate(park_z)),
            park_xy: format!(
                "G53G0X{}Y{}",
                format_coordinate(park_x),
                format_coordinate(park_y)
            ),
            pause: PAUSE_COMMAND.to_string(),
            probe_move: probe_move.into(),
            probe_action: probe_action.into(),
        }
    }

    /// Rapid move to park height
    pub fn park_z(&self) -> &str {
        &self.park_z
    }

    /// Rapid move to the park X/Y position
    pub fn park_xy(&self) -> &str {
        &self.park_xy
    }

    /// Pause command
    pub fn pause(&self) -> &str {
        &self.pause
    }

    /// Move to the probe location
    pub fn probe_move(&self) -> &str {
        &self.probe_move
    }

    /// Run the measurement
    pub fn probe_action(&self) -> &str {
        &self.probe_action
    }

    /// The commands replacing a tool change, in execution order
    pub fn expand(&self) -> [String; EXPANSION_LEN] {
        [
            self.park_z.clone(),
            self.park_xy.clone(),
            self.pause.clone(),
            self.probe_move.clone(),
            self.pause.clone(),
            self.probe_action.clone(),
            self.park_z.clone(),
        ]
    }
}

/// Result of running one command through the tool change processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolChangeOutput {
    /// Not a tool change; the original line, untouched
    PassThrough(String),
    /// A tool change, replaced by the full sequence
    Expansion([String; EXPANSION_LEN]),
}

impl ToolChangeOutput {
    /// Check whether the command was expanded
    pub fn is_expansion(&self) -> bool {
        matches!(self, Self::Expansion(_))
    }

    /// The emitted commands, in order
    pub fn commands(&self) -> &[String] {
        match self {
            Self::PassThrough(command) => std::slice::from_ref(command),
            Self::Expansion(commands) => commands.as_slice(),
        }
    }

    /// Consume into the emitted commands
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::PassThrough(command) => vec![command],
            Self::Expansion(commands) => commands.into(),
        }
    }
}

/// Replaces tool change directives with a park / pause / probe sequence
#[derive(Clone)]
pub struct ToolChangeProcessor {
    sequence: ToolChangeSequence,
    matcher: ToolChangeMatcher,
    stripper: Arc<dyn CommentStripper>,
    language: Language,
    enabled: bool,
}

impl ToolChangeProcessor {
    /// Create a processor from machine park coordinates and probe commands
    pub fn new(
        park_x: f64,
        park_y: f64,
        park_z: f64,
        probe_move: impl Into<String>,
        probe_action: impl Into<String>,
    ) -> Self {
        Self::from_sequence(ToolChangeSequence::new(
            park_x,
            park_y,
            park_z,
            probe_move,
            probe_action,
        ))
    }

    /// Create a processor around an existing sequence
    pub fn from_sequence(sequence: ToolChangeSequence) -> Self {
        Self {
            sequence,
            matcher: ToolChangeMatcher::new(),
            stripper: Arc::new(GcodeCommentStripper::new()),
            language: Language::default(),
            enabled: true,
        }
    }

    /// Use a different comment stripper
    pub fn with_stripper(mut self, stripper: Arc<dyn CommentStripper>) -> Self {
        self.stripper = stripper;
        self
    }

    /// Set the language of the help text
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Enable or disable the processor within a pipeline
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// The sequence emitted for a tool change
    pub fn sequence(&self) -> &ToolChangeSequence {
        &self.sequence
    }

    /// Run one raw command line through the processor
    ///
    /// Fails only when the comment stripper rejects the line.
    pub fn apply(&self, command: &str) -> Result<ToolChangeOutput, CommandProcessingError> {
        let stripped = self.stripper.strip(command)?;

        if !self.matcher.matches(&stripped) {
            return Ok(ToolChangeOutput::PassThrough(command.to_string()));
        }

        tracing::debug!(
            tool = ?self.matcher.tool_number(&stripped),
            "Expanding tool change '{}'",
            stripped
        );
        Ok(ToolChangeOutput::Expansion(self.sequence.expand()))
    }
}

impl fmt::Debug for ToolChangeProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolChangeProcessor")
            .field("sequence", &self.sequence)
            .field("language", &self.language)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl CommandProcessor for ToolChangeProcessor {
    fn name(&self) -> &str {
        "tool_change"
    }

    fn help(&self) -> &str {
        HelpCatalog::global().get(self.language, TOOL_CHANGE_HELP_KEY)
    }

    fn process(
        &self,
        command: &str,
        _state: &GcodeState,
    ) -> Result<Vec<String>, CommandProcessingError> {
        self.apply(command).map(ToolChangeOutput::into_vec)
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor() -> ToolChangeProcessor {
        ToolChangeProcessor::new(0.0, 0.0, 10.0, "G53G0X0Y0", "G38.2Z-5F10")
    }

    #[test]
    fn test_sequence_formats_coordinates() {
        let sequence = ToolChangeSequence::new(-250.5, 3.0, 12.5, "P1", "P2");
        assert_eq!(sequence.park_z(), "G53G0Z12.50");
        assert_eq!(sequence.park_xy(), "G53G0X-250.50Y3.00");
        assert_eq!(sequence.pause(), "M0");
        assert_eq!(sequence.probe_move(), "P1");
        assert_eq!(sequence.probe_action(), "P2");
    }

    #[test]
    fn test_sequence_renders_non_finite_coordinates() {
        let sequence =
            ToolChangeSequence::new(f64::NEG_INFINITY, f64::NAN, f64::INFINITY, "P", "A");
        assert_eq!(sequence.park_z(), "G53G0ZInfinity");
        assert_eq!(sequence.park_xy(), "G53G0X-InfinityYNaN");
    }

    #[test]
    fn test_expands_tool_change() {
        let output = processor().apply("T3M6").unwrap();
        assert!(output.is_expansion());
        assert_eq!(
            output.commands(),
            [
                "G53G0Z10.00",
                "G53G0X0.00Y0.00",
                "M0",
                "G53G0X0Y0",
                "M0",
                "G38.2Z-5F10",
                "G53G0Z10.00",
            ]
        );
    }

    #[test]
    fn test_passes_through_other_commands() {
        let output = processor().apply("G1X10Y10F500").unwrap();
        assert_eq!(
            output,
            ToolChangeOutput::PassThrough("G1X10Y10F500".to_string())
        );
        assert_eq!(output.into_vec(), vec!["G1X10Y10F500".to_string()]);
    }

    #[test]
    fn test_pass_through_keeps_comment() {
        let output = processor().apply("G0X1 ; T5M6").unwrap();
        assert_eq!(output.commands(), ["G0X1 ; T5M6"]);
    }

    #[test]
    fn test_directive_after_embedded_carriage_return_passes_through() {
        let output = processor().apply("G0\rT5M6").unwrap();
        assert_eq!(output, ToolChangeOutput::PassThrough("G0\rT5M6".to_string()));
    }

    #[test]
    fn test_tool_number_does_not_change_expansion() {
        let p = processor();
        assert_eq!(p.apply("T1M6").unwrap(), p.apply("T99M6").unwrap());
    }

    #[test]
    fn test_process_ignores_state() {
        let p = processor();
        let mut state = GcodeState::new();
        let a = p.process("T5M6", &state).unwrap();
        state.apply("G91 T8");
        let b = p.process("T5M6", &state).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), EXPANSION_LEN);
    }

    #[test]
    fn test_stripper_error_propagates() {
        let err = processor().apply("T5M6 (unclosed").unwrap_err();
        assert_eq!(err, CommandProcessingError::UnterminatedComment { column: 5 });
    }

    #[test]
    fn test_help_is_localized() {
        let en = processor();
        let de = processor().with_language(Language::De);
        assert_eq!(en.name(), "tool_change");
        assert_ne!(en.help(), de.help());
        assert_ne!(en.help(), TOOL_CHANGE_HELP_KEY);
    }
}
