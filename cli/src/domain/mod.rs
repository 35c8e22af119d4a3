//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod action;
pub mod config;
pub mod error;
pub mod machine;
pub mod merge;
pub mod request;

pub use action::{MachineAction, ResolvedAction, resolve_action};
pub use config::{ConnectionConfig, PollPolicy};
pub use error::{ConfigError, ProvisionError};
pub use machine::{MachineConfig, MachineState, validate_machine_name};
pub use merge::{apply_overrides, container_keys, inject_catalog_configuration, merge_field};
pub use request::{ProvisionRequest, RequestStatus};
