//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (weather draws)
//! - No rendering, audio, or platform dependencies
//! - No I/O; every tick is a plain in-memory state transformation

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;
pub mod weather;

pub use collision::{ContactFace, resolve_player_platforms};
pub use rect::Rect;
pub use state::{
    Achievement, AchievementState, Coin, Enemy, GamePhase, GameState, Platform, Player, TimeTrial,
};
pub use tick::{TickInput, apply_player_input, collect_coins, integrate_player, tick};
pub use weather::{WeatherKind, WeatherState};
