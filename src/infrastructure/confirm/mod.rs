//! Deletion Confirmers
//!
//! Terminal-backed implementation of the DeletionConfirmer port.

mod terminal;

pub use terminal::{confirmer_for, TerminalConfirmer};
