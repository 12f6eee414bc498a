//! Distance-based sight check.

use delve_core::{EntityId, GameState, Position, VisionConfig};

/// Whether `observer` can see `target`.
///
/// Sight is the straight-line tile distance compared against the configured
/// view distance; walls and props do not occlude. Missing entities are never
/// visible.
pub fn can_see_target(
    state: &GameState,
    observer: EntityId,
    target: EntityId,
    vision: &VisionConfig,
) -> bool {
    let (Some(observer), Some(target)) = (
        state.entities.actor(observer),
        state.entities.actor(target),
    ) else {
        return false;
    };
    within_view(observer.position, target.position, vision)
}

/// Position-level form of [`can_see_target`].
pub fn within_view(from: Position, to: Position, vision: &VisionConfig) -> bool {
    from.euclidean_distance(to) <= vision.view_distance_tiles()
}
