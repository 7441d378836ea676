//! Adapters between the wizard and the outside world.

pub mod csv;
