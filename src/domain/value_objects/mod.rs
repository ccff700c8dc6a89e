//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod chart_ref;
mod deployer;
mod option_value;
mod platform;

pub use chart_ref::{ChartDefaults, ChartRef};
pub use deployer::Deployer;
pub use option_value::{flatten_options, merge_options, string_option, OptionMap, OptionValue};
pub use platform::Platform;
