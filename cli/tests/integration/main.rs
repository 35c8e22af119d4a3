//! Integration tests for the vra7 CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.

mod cli_tests;
mod state_commands;
