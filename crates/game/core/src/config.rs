/// Game configuration constants and tunable parameters.
///
/// Capacity limits are compile-time constants; everything else can be
/// overridden from a TOML file through the content loaders.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// AP assumed for actors that declare no pool when computing activity durations.
    pub default_actor_ap: u32,
    /// Move-points granted to the player at the start of each player phase.
    pub player_moves_per_turn: u32,
    /// Chebyshev radius scanned for hostiles before and during Rest (1 = 3x3 area).
    pub rest_enemy_radius: u32,
    /// HP restored per completed Rest turn.
    pub rest_heal_per_turn: u32,
    pub vision: VisionConfig,
    pub ai: AiConfig,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of actors (player + NPCs).
    pub const MAX_ACTORS: usize = 129;
    pub const MAX_PROPS: usize = 256;
    pub const MAX_WORLD_ITEMS: usize = 512;
    pub const MAX_INVENTORY_SLOTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ACTOR_AP: u32 = 100;
    pub const DEFAULT_PLAYER_MOVES: u32 = 100;
    pub const DEFAULT_REST_ENEMY_RADIUS: u32 = 1;
    pub const DEFAULT_REST_HEAL_PER_TURN: u32 = 1;

    pub fn new() -> Self {
        Self {
            default_actor_ap: Self::DEFAULT_ACTOR_AP,
            player_moves_per_turn: Self::DEFAULT_PLAYER_MOVES,
            rest_enemy_radius: Self::DEFAULT_REST_ENEMY_RADIUS,
            rest_heal_per_turn: Self::DEFAULT_REST_HEAL_PER_TURN,
            vision: VisionConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// View distance used by the AI line-of-sight check.
///
/// The distance is authored in pixels and converted to tiles at lookup time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisionConfig {
    pub view_distance_px: f32,
    pub tile_size_px: f32,
}

impl VisionConfig {
    pub const fn new(view_distance_px: f32, tile_size_px: f32) -> Self {
        Self {
            view_distance_px,
            tile_size_px,
        }
    }

    /// View distance in tiles. A non-positive tile size yields zero (blind).
    pub fn view_distance_tiles(&self) -> f32 {
        if self.tile_size_px <= 0.0 {
            return 0.0;
        }
        self.view_distance_px / self.tile_size_px
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self::new(160.0, 32.0)
    }
}

/// Tunables for the AI decision loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    /// Runaway-loop cap on actions one AI actor may take per turn.
    pub max_actions_per_turn: u32,
    /// Chance (0-100) that a driving actor idles instead of stepping.
    pub drive_wait_percent: u32,
    /// Blind updates a chasing actor tolerates before giving up.
    pub chase_grace_turns: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            max_actions_per_turn: 10,
            drive_wait_percent: 30,
            chase_grace_turns: 3,
        }
    }
}
