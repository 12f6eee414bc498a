//! Deterministic activity rules shared by the runtime and offline tools.
//!
//! `delve-core` defines the state an actor lives in, the activities it can
//! pursue, and the scheduling that advances them turn by turn. Every request
//! flows through [`action::ActionApi`], which sizes the activity from the
//! actor's AP and hands it to [`engine::ActivityManager`]. Behaviors reach the
//! world only through the explicit [`World`] context, so nothing here touches
//! global state or performs I/O.
pub mod action;
pub mod activity;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    ActionApi, ActionApiError, ActionOutcome, ActionParams, ActionRequest, ActionResult,
};
pub use activity::{
    Activity, ActivityBehavior, ActivityError, ActivityInfo, ActivityKind, ActivityState,
    Behavior, TransitionError, calculate_required_turns,
};
pub use config::{AiConfig, GameConfig, VisionConfig};
pub use engine::{
    ActivityManager, ActivitySummary, ActivityTick, LifecyclePhase, ManagerError, PhaseError,
    TickOutcome, TurnReport,
};
pub use env::{
    ActivityOracle, GameEnv, ItemDefinition, ItemKind, ItemOracle, MessageLog, NarrationSink,
    OracleError, PcgRng, Recipe, World,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    ActorState, ApLedger, ApPool, Direction, EntitiesState, EntityId, Faction, GameState,
    InventoryState, ItemHandle, ItemState, Position, PropFlags, PropKind, PropState, RecipeId,
    ResourceMeter, RoamingState, RoamingSubState, StateError, TurnLedger, TurnPhase, WorldMap,
};
