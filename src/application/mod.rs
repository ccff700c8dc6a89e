//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `CompileUseCase` - Load the workspace and compile profiles
//! - `SwitchUseCase` - Move a project to another deployer

pub mod compile;
pub mod switch;

pub use compile::CompileUseCase;
pub use switch::{SwitchError, SwitchOptions, SwitchOutcome, SwitchReport, SwitchUseCase};
