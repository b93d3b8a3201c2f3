//! SkyBound - a 2D platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `settings`: Player preferences and accessibility options
//! - `highscores`: Run-record leaderboard
//!
//! Rendering, audio, and input polling are external collaborators: the
//! simulation consumes an abstract [`sim::TickInput`] and exposes its full
//! state for a presentation layer to read each tick.

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{AccessibilityOptions, Settings};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Downward acceleration, pixels/s²
    pub const GRAVITY: f32 = 780.0;

    /// Player defaults - position is the top-left corner of the box
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_SPEED: f32 = 180.0;
    pub const PLAYER_JUMP_STRENGTH: f32 = 320.0;
    pub const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 352.0);

    /// Lives at the start of a fresh run
    pub const LIVES_START: u8 = 3;
    /// Lives cap (level-clear healing never exceeds this)
    pub const LIVES_MAX: u8 = 5;
    /// Post-damage grace period, seconds
    pub const INVINCIBILITY_DURATION: f32 = 1.0;

    /// Coin defaults
    pub const COIN_RADIUS: f32 = 12.0;
    /// Base score for a collected coin
    pub const COIN_SCORE: u32 = 10;
    /// Extra points per consecutive coin beyond the first
    pub const COMBO_BONUS_STEP: u32 = 5;
    /// Seconds after a collection during which the next one still chains
    pub const COMBO_WINDOW: f32 = 3.0;

    /// How long an achievement notification stays readable, seconds
    pub const ACHIEVEMENT_NOTIFICATION_SECS: f32 = 3.0;
}
