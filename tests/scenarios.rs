//! Scenario tests for Keel.
//!
//! Scenarios drive the `keel` binary through complete user workflows.
//!
//! Run with: cargo test --test scenarios

mod common;

#[path = "scenarios/compile_workspace.rs"]
mod compile_workspace;

#[path = "scenarios/switch_deployer.rs"]
mod switch_deployer;
