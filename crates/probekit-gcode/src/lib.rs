//! # ProbeKit G-Code
//!
//! Command processing for ProbeKit.
//!
//! This crate provides:
//! - Machine state snapshots handed to every processor
//! - Comment stripping
//! - The `CommandProcessor` trait and the `ProcessorPipeline` that chains them
//! - The tool change processor, which turns `T#M6` into a park / pause / probe
//!   sequence

pub mod comment;
pub mod format;
pub mod matcher;
pub mod pipeline;
pub mod processor;
pub mod state;
pub mod tool_change;

pub use comment::{CommentStripper, GcodeCommentStripper};
pub use format::format_coordinate;
pub use matcher::ToolChangeMatcher;
pub use pipeline::ProcessorPipeline;
pub use processor::{CommandProcessor, ProcessorHandle};
pub use state::GcodeState;
pub use tool_change::{ToolChangeOutput, ToolChangeProcessor, ToolChangeSequence};
