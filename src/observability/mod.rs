//! Structured logging to a rotating JSON log file.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → registry → EnvFilter → fmt layer (JSON) → FileWriter → kinoteka.log
//! ```
//!
//! # Features
//!
//! - **File-Based**: events go to `kinoteka.log` in the data directory, keeping
//!   stdout free for session snapshots
//! - **Automatic Rotation**: files rotate at 10MB with 3-backup retention
//! - **Span Context**: each line carries the current span (e.g. `handle_event`)
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: subscriber setup ([`init_tracing`])
//! - `file_writer`: rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
