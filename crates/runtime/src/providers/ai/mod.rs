//! Roaming AI for non-player actors.
//!
//! Each AI turn runs the same pipeline per actor:
//!
//! 1. **Context**: gather position, AP pool, roaming state and the player's
//!    location into an [`AiContext`]; anything missing skips the actor
//! 2. **Vision**: [`can_see_target`] compares the distance to the player with
//!    the configured view distance
//! 3. **State machine**: [`update_state`] moves the actor between Waiting,
//!    Driving and Chasing using the global turn number
//! 4. **Planning**: [`ActionPlanner`] turns the sub-state into an
//!    [`delve_core::ActionRequest`], which [`AiProcessor`] executes through the
//!    Action API while the actor can afford it
//!
//! All randomness comes from the `rand::Rng` passed in, so a seeded generator
//! replays the same decisions.

pub mod context;
pub mod planner;
pub mod processor;
pub mod state_machine;
pub mod vision;

pub use context::{AiContext, SkipReason};
pub use planner::ActionPlanner;
pub use processor::{AiOutcome, AiProcessor, AiTurnReport, StopReason};
pub use state_machine::{Transition, update_state};
pub use vision::can_see_target;
