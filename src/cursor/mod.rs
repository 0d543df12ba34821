//! Core Cursor IDE operations

pub mod id_format;
pub mod id_gen;
pub mod process;
pub mod reset;
pub mod storage;

// Re-exports for library consumers
pub use id_format::{classify, FormatDescriptor, LetterCase};
pub use id_gen::{generate, regenerate};
pub use process::{ProcessControl, ProcessScan, SystemProcesses};
pub use reset::{reset_ids, ResetReport};
pub use storage::{ConfigStore, TelemetryField, TelemetryIds};
