//! FrameStudio Editor - Frame orchestration and editor shell
//!
//! Implements the non-visual half of the editor:
//! - The frame orchestrator keeping surfaces and segments consistent
//! - Tool selection and its effect on the active surface
//! - Debounced autosave
//! - Editor configuration

pub mod autosave;
pub mod config;
pub mod orchestrator;
pub mod shell;
pub mod tool;

pub use autosave::{Autosave, EditorDocument, FileSink, FrameState, SaveRequest, SaveSink};
pub use config::EditorConfig;
pub use orchestrator::FrameOrchestrator;
pub use shell::EditorShell;
pub use tool::ActiveTool;
