//! Turn orchestration and AI for the delve simulation.
//!
//! This crate sits on top of `delve-core` and drives whole game turns: the
//! player's phase, the AI phase, and the turn end that advances continuous
//! activities. Consumers embed [`TurnRunner`] and hand it a [`delve_core::World`]
//! each call.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the turn runner
//! - [`api`] exposes the error types downstream clients interact with
//! - [`providers`] holds the AI decision loop (vision, state machine, planner)
//! - [`oracle`] bundles loaded content into a [`delve_core::GameEnv`]
pub mod api;
pub mod oracle;
pub mod providers;
pub mod runtime;

pub use api::{Result, RuntimeError};
pub use oracle::ContentOracles;
pub use providers::ai::{
    ActionPlanner, AiContext, AiOutcome, AiProcessor, AiTurnReport, SkipReason, StopReason,
    Transition, can_see_target, update_state,
};
pub use runtime::{TurnRunner, TurnSummary};
