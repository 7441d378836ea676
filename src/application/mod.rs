//! Application layer orchestrating a wizard session.
//!
//! This module defines the `AutoPayWizard` controller, which owns the draft,
//! drives step navigation and writes the finished configuration through the
//! injected storage ports.

pub mod script;
pub mod wizard;
