//! Decision providers for non-player actors.

pub mod ai;
