//! Application services for the machine lifecycle: create, read, delete and
//! power-off.
//!
//! Each module imports only from `crate::domain` and
//! `crate::application::ports`.

pub mod provision;
pub mod status;
pub mod teardown;


pub use provision::{create, resolve_catalog, wait_for_completion};
pub use status::read;
pub use teardown::{DeleteOutcome, delete, power_off};
