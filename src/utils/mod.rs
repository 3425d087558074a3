//! Shared utilities for ontoctl
//!
//! Contains configuration management, file logging, and debug tracing.

pub mod config;
pub mod debug;
pub mod logger;
