//! Weather simulation
//!
//! Produces the environmental force vector injected into player
//! integration. Only the simulation side lives here - rain drops,
//! lightning flashes, and palette shifts are presentation concerns.
//!
//! All randomness is drawn from a `Pcg32` re-seeded per draw from the run
//! seed and a draw counter, so the state stays plainly serializable and
//! the whole sequence is reproducible from the seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// How long a weather kind lasts before changing, seconds
const CHANGE_INTERVAL_MIN: f32 = 12.0;
const CHANGE_INTERVAL_MAX: f32 = 20.0;

/// How often the wind target re-randomizes, seconds
const WIND_RETARGET_MIN: f32 = 2.0;
const WIND_RETARGET_MAX: f32 = 4.0;

/// Exponential easing rate of the current wind toward its target, 1/s
const WIND_EASE_RATE: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeatherKind {
    #[default]
    Clear,
    Rain,
    Windy,
    Storm,
}

impl WeatherKind {
    pub fn label(&self) -> &'static str {
        match self {
            WeatherKind::Clear => "Clear",
            WeatherKind::Rain => "Rain",
            WeatherKind::Windy => "Windy",
            WeatherKind::Storm => "Storm",
        }
    }

    /// Fallback rule when the random pick lands on the current kind:
    /// advance along a fixed cycle so a change always changes something.
    pub fn successor(self) -> Self {
        match self {
            WeatherKind::Clear => WeatherKind::Windy,
            WeatherKind::Windy => WeatherKind::Rain,
            WeatherKind::Rain => WeatherKind::Storm,
            WeatherKind::Storm => WeatherKind::Clear,
        }
    }

    /// Baseline wind magnitude, pixels/s²
    fn base_wind(self) -> f32 {
        match self {
            WeatherKind::Clear => 0.0,
            WeatherKind::Rain => 20.0,
            WeatherKind::Windy => 90.0,
            WeatherKind::Storm => 150.0,
        }
    }

    /// How far the wind target may wander from the baseline
    fn wind_variance(self) -> f32 {
        match self {
            WeatherKind::Clear => 0.0,
            WeatherKind::Rain => 15.0,
            WeatherKind::Windy => 40.0,
            WeatherKind::Storm => 80.0,
        }
    }

    /// Downward force component (driving rain pushes the player down)
    fn downdraft(self) -> f32 {
        match self {
            WeatherKind::Clear => 0.0,
            WeatherKind::Rain => 30.0,
            WeatherKind::Windy => 0.0,
            WeatherKind::Storm => 50.0,
        }
    }

    fn from_index(index: u8) -> Self {
        match index {
            0 => WeatherKind::Clear,
            1 => WeatherKind::Rain,
            2 => WeatherKind::Windy,
            _ => WeatherKind::Storm,
        }
    }
}

/// Weather state: the current kind plus the wind it produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherState {
    pub current: WeatherKind,
    /// Seconds until the next kind transition
    pub time_until_change: f32,
    /// Wind currently applied, pixels/s² (signed; positive blows right)
    pub wind_current: f32,
    pub wind_target: f32,
    /// Seconds until the wind target re-randomizes
    pub wind_change_timer: f32,
    /// Signed direction the wind blows for the current kind
    wind_sign: f32,
    seed: u64,
    draws: u32,
}

impl WeatherState {
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            current: WeatherKind::Clear,
            time_until_change: 0.0,
            wind_current: 0.0,
            wind_target: 0.0,
            wind_change_timer: 0.0,
            wind_sign: 1.0,
            seed,
            draws: 0,
        };
        let mut rng = state.draw_rng();
        state.time_until_change = rng.random_range(CHANGE_INTERVAL_MIN..CHANGE_INTERVAL_MAX);
        state.wind_change_timer = rng.random_range(WIND_RETARGET_MIN..WIND_RETARGET_MAX);
        state
    }

    /// One Pcg32 per draw, seeded from the run seed and a counter
    fn draw_rng(&mut self) -> Pcg32 {
        let stream = (self.draws as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        self.draws += 1;
        Pcg32::seed_from_u64(self.seed.wrapping_add(stream))
    }

    /// Advance the weather by dt and return the force to inject into
    /// player integration this tick.
    pub fn step(&mut self, dt: f32) -> Vec2 {
        self.time_until_change -= dt;
        if self.time_until_change <= 0.0 {
            self.transition();
        }

        self.wind_change_timer -= dt;
        if self.wind_change_timer <= 0.0 {
            self.retarget_wind();
        }

        // Ease the applied wind toward its target
        let blend = (WIND_EASE_RATE * dt).min(1.0);
        self.wind_current += (self.wind_target - self.wind_current) * blend;

        self.force()
    }

    /// The environmental force for the current wind and kind
    pub fn force(&self) -> Vec2 {
        Vec2::new(self.wind_current, self.current.downdraft())
    }

    /// Switch to the given kind and reset the wind toward its baseline
    pub fn set(&mut self, kind: WeatherKind) {
        if kind != self.current {
            log::info!("weather: {} -> {}", self.current.label(), kind.label());
        }
        self.current = kind;
        self.wind_target = self.wind_sign * kind.base_wind();
    }

    fn transition(&mut self) {
        let mut rng = self.draw_rng();

        // Uniform pick over all kinds; an explicit successor rule covers
        // the pick-equals-current case so a change always changes kind.
        let candidate = WeatherKind::from_index(rng.random_range(0..4u8));
        let next = if candidate == self.current {
            self.current.successor()
        } else {
            candidate
        };

        self.wind_sign = if rng.random_range(0..2u8) == 0 { 1.0 } else { -1.0 };
        self.set(next);
        self.time_until_change = rng.random_range(CHANGE_INTERVAL_MIN..CHANGE_INTERVAL_MAX);
    }

    fn retarget_wind(&mut self) {
        let mut rng = self.draw_rng();
        let base = self.current.base_wind();
        let variance = self.current.wind_variance();

        self.wind_target = if variance > 0.0 {
            self.wind_sign * (base + rng.random_range(-variance..variance))
        } else {
            self.wind_sign * base
        };
        self.wind_change_timer = rng.random_range(WIND_RETARGET_MIN..WIND_RETARGET_MAX);
    }
}
