//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the runtime:
//! - Math types and operations
//! - Time management
//! - Logging utilities

pub mod logging;
pub mod math;
pub mod time;
