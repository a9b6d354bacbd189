//! # ProbeKit
//!
//! A G-code stream processor for manual tool changes with tool-length probing.
//!
//! ## Architecture
//!
//! ProbeKit is organized as a workspace with multiple crates:
//!
//! 1. **probekit-core** - Error types and localized help text
//! 2. **probekit-gcode** - Machine state, comment stripping, processors, pipeline
//! 3. **probekit-settings** - Configuration files and pipeline construction
//! 4. **probekit** - Command-line binary that streams G-code through the pipeline

pub mod cli;

use std::io::{BufRead, Write};

pub use probekit_core::{CommandProcessingError, Error, Language, PipelineError, Result};
pub use probekit_gcode::{
    CommandProcessor, GcodeState, ProcessorPipeline, ToolChangeOutput, ToolChangeProcessor,
    ToolChangeSequence,
};
pub use probekit_settings::{Config, ToolChangeSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Counters for one processed stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Lines read from the input
    pub lines_read: usize,
    /// Commands written to the output
    pub commands_written: usize,
}

/// Run every line of `reader` through `pipeline`, writing one command per line
///
/// Machine state starts from defaults and follows the emitted commands.
/// Processing stops at the first failing line.
pub fn process_stream<R: BufRead, W: Write>(
    pipeline: &ProcessorPipeline,
    reader: R,
    mut writer: W,
) -> Result<StreamStats> {
    let mut state = GcodeState::new();
    let mut stats = StreamStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        stats.lines_read += 1;

        let commands = pipeline
            .process_commands(&[line], &mut state)
            .inspect_err(|e| tracing::error!("Line {}: {}", index + 1, e))?;

        for command in &commands {
            writeln!(writer, "{}", command)?;
        }
        stats.commands_written += commands.len();
    }

    writer.flush()?;
    tracing::debug!(
        "Processed {} lines into {} commands",
        stats.lines_read,
        stats.commands_written
    );
    Ok(stats)
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, keeping stdout free for G-code
/// - RUST_LOG environment variable support
/// - `warn` by default, `debug` when `verbose` is set
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(config: &Config, input: &str) -> (String, StreamStats) {
        let pipeline = config.build_pipeline();
        let mut output = Vec::new();
        let stats = process_stream(&pipeline, Cursor::new(input), &mut output).unwrap();
        (String::from_utf8(output).unwrap(), stats)
    }

    fn reference_config() -> Config {
        let mut config = Config::new();
        config.tool_change.z = 10.0;
        config.tool_change.probe_move_command = "G53G0X0Y0".to_string();
        config.tool_change.probe_action_command = "G38.2Z-5F10".to_string();
        config
    }

    #[test]
    fn test_stream_expands_tool_changes() {
        let input = "G21 G90\r\nT3M6 ; 3mm flat\r\nG1X10Y10F500\r\n";
        let (output, stats) = run(&reference_config(), input);

        assert_eq!(
            output,
            "G21 G90\n\
             G53G0Z10.00\n\
             G53G0X0.00Y0.00\n\
             M0\n\
             G53G0X0Y0\n\
             M0\n\
             G38.2Z-5F10\n\
             G53G0Z10.00\n\
             G1X10Y10F500\n"
        );
        assert_eq!(
            stats,
            StreamStats {
                lines_read: 3,
                commands_written: 9
            }
        );
    }

    #[test]
    fn test_stream_keeps_comments_on_pass_through() {
        let input = "(header)\nG0X1 ; T5M6\n";
        let (output, _) = run(&reference_config(), input);
        assert_eq!(output, "(header)\nG0X1 ; T5M6\n");
    }

    #[test]
    fn test_stream_disabled_tool_change() {
        let mut config = reference_config();
        config.tool_change.enabled = false;

        let (output, stats) = run(&config, "T1M6\n");
        assert_eq!(output, "T1M6\n");
        assert_eq!(stats.commands_written, 1);
    }

    #[test]
    fn test_stream_stops_on_malformed_comment() {
        let pipeline = reference_config().build_pipeline();
        let mut output = Vec::new();

        let err = process_stream(
            &pipeline,
            Cursor::new("G0X1\nT1M6 (unclosed\nG0X2\n"),
            &mut output,
        )
        .unwrap_err();

        assert!(err.is_processing_error());
        assert_eq!(String::from_utf8(output).unwrap(), "G0X1\n");
    }
}
