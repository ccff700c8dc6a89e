//! Switch Module
//!
//! Migrates a project from one deployer to another.
//!
//! ## Structure
//!
//! - `options` - Request type (`SwitchOptions`)
//! - `result` - Outcome types (`SwitchOutcome`, `SwitchReport`)
//! - `error` - Phase-annotated failures (`SwitchError`)
//! - `use_case` - Phase orchestration (`SwitchUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use keel::application::switch::{SwitchOptions, SwitchUseCase};
//!
//! let use_case = SwitchUseCase::new(repo, fs, manifests, workflows);
//! let outcome = use_case.execute(&SwitchOptions::new("api", "cloudrun"))?;
//! ```

mod error;
mod options;
mod result;
mod use_case;

pub use error::SwitchError;
pub use options::SwitchOptions;
pub use result::{SwitchOutcome, SwitchReport};
pub use use_case::{seed_configurations, SwitchUseCase, RETIRED_PREFIX, STAGING_PREFIX};
