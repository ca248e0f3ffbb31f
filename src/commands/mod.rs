//! Application command handlers for voxtwin.
//!
//! This module organizes command handling into separate submodules, each responsible for a specific
//! application command.
//!
//! # Commands
//! - `demo`: Interactive studio demo with animated waveforms (default)
//! - `config`: Open configuration file in user's preferred editor
//! - `logs`: Display recent log entries

pub mod config;
pub mod demo;
pub mod logs;

pub use config::handle_config;
pub use demo::handle_demo;
pub use logs::handle_logs;
