//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: the vRA REST client,
//! state file access, configuration loading and the real-time poll pause.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod client;
pub mod config;
pub mod pause;
pub mod state;
