//! Actions: what a participant does on its turn.
//!
//! - [`Action`]: a named behavior
//! - [`ActionRegistry`]: ordered, name-unique storage with uniform picking
//!
//! The built-in pack registers `attack`, `passive` and `passive-death`;
//! extensions add their own during setup.

mod action;
mod registry;

pub use action::{Action, ActionFn};
pub use registry::ActionRegistry;
