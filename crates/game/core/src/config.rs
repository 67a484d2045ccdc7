/// Game configuration constants and tunable parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Fixed timestep for the physics phase, in seconds.
    pub fixed_dt: f32,
    /// How long the dodge speed boost lasts, in seconds.
    pub dodge_window: f32,
    /// Speed multiplier applied while dodging.
    pub dodge_multiplier: f32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum distinct item stacks a player can carry.
    pub const MAX_INVENTORY_SLOTS: usize = 9;
    /// Slots rendered in the shop screen, for each of the two columns.
    pub const MAX_SHOP_SLOTS: usize = 9;
    /// Maximum quests a player can hold at once.
    pub const MAX_QUESTS: usize = 16;
    /// Maximum distinct targets a single attack instance can record.
    pub const MAX_HITS_PER_ATTACK: usize = 32;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FIXED_DT: f32 = 0.02;
    pub const DEFAULT_DODGE_WINDOW: f32 = 0.25;
    pub const DEFAULT_DODGE_MULTIPLIER: f32 = 2.0;

    pub fn new() -> Self {
        Self {
            fixed_dt: Self::DEFAULT_FIXED_DT,
            dodge_window: Self::DEFAULT_DODGE_WINDOW,
            dodge_multiplier: Self::DEFAULT_DODGE_MULTIPLIER,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
