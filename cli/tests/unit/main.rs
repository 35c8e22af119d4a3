//! Unit tests for the vra7 CLI
//!
//! These tests use fake gateways and run fast without network access.

mod architecture;
mod lifecycle;
