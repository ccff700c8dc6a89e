//! Domain Layer
//!
//! The core of keel: the workspace model, the value resolver and the
//! profile compilers.
//!
//! ## Structure
//!
//! - `entities/` - Workspace model and compiled profiles
//! - `value_objects/` - Option values, platforms, deployers, chart references
//! - `services/` - Resolver and compilers
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No direct I/O** - File access goes through the `FileSystem` port
//! 2. **Pure Functions** - Compilers are stateless and testable
//! 3. **Ports & Adapters** - Persistence, generation and prompts are trait-defined

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
