//! Game state and core simulation types
//!
//! Every field that must survive a tick lives here, and all of it is
//! serializable so a shell can snapshot or persist a session wholesale.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::weather::WeatherState;
use crate::consts::*;
use crate::settings::AccessibilityOptions;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start intent
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation frozen, state intact
    Paused,
    /// Run ended; restart or return to menu
    GameOver,
}

/// The player character
///
/// `previous_position` always holds the pre-integration position of the
/// immediately preceding tick; the collision resolver uses it to decide
/// which side of a platform was hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the player's box
    pub position: Vec2,
    pub velocity: Vec2,
    pub previous_position: Vec2,
    pub width: f32,
    pub height: f32,
    /// Resting on top of a platform, eligible to jump
    pub grounded: bool,
    pub lives: u8,
    pub score: u32,
    /// Horizontal run speed, pixels/s
    pub speed: f32,
    /// Initial upward speed of a jump, pixels/s
    pub jump_strength: f32,
    /// Post-damage grace period remaining, seconds
    pub invincibility_timer: f32,
    /// Consecutive coins collected within the combo window
    pub combo_count: u32,
    /// Seconds left before the current combo expires
    pub combo_timer: f32,
    /// Highest combo reached this run
    pub best_combo: u32,
    /// Coins collected across the whole run
    pub total_coins_collected: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            previous_position: Vec2::ZERO,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            grounded: false,
            lives: LIVES_START,
            score: 0,
            speed: PLAYER_SPEED,
            jump_strength: PLAYER_JUMP_STRENGTH,
            invincibility_timer: 0.0,
            combo_count: 0,
            combo_timer: 0.0,
            best_combo: 0,
            total_coins_collected: 0,
        }
    }
}

impl Player {
    /// Current collision box
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Collision box at the previous tick's position
    #[inline]
    pub fn previous_bounds(&self) -> Rect {
        Rect::new(
            self.previous_position.x,
            self.previous_position.y,
            self.width,
            self.height,
        )
    }

    /// Place the player at a spawn point, clearing motion and per-level
    /// timers. Score, lives, and run totals are untouched.
    pub fn respawn(&mut self, spawn: Vec2) {
        self.position = spawn;
        self.previous_position = spawn;
        self.velocity = Vec2::ZERO;
        self.grounded = false;
        self.invincibility_timer = 0.0;
        self.combo_count = 0;
        self.combo_timer = 0.0;
    }
}

/// A platform - a solid rectangle, optionally oscillating between two
/// endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub bounds: Rect,
    pub start_position: Vec2,
    pub end_position: Vec2,
    /// One-way traversal period, seconds; <= 0 means stationary
    pub travel_time: f32,
    /// Accumulated elapsed time, wraps over a full round trip
    pub timer: f32,
    pub moving: bool,
}

impl Platform {
    pub fn stationary(bounds: Rect) -> Self {
        Self {
            bounds,
            start_position: bounds.position(),
            end_position: bounds.position(),
            travel_time: 0.0,
            timer: 0.0,
            moving: false,
        }
    }

    /// Platform ping-ponging between its initial position and `end` over
    /// `travel_time` seconds each way
    pub fn oscillating(bounds: Rect, end: Vec2, travel_time: f32) -> Self {
        Self {
            bounds,
            start_position: bounds.position(),
            end_position: end,
            travel_time,
            timer: 0.0,
            moving: true,
        }
    }

    /// Advance the oscillation by dt. Triangle-wave ping-pong: the
    /// normalized phase runs 0 -> 1 -> 0 over one round trip, so the
    /// position always lies on the segment between the endpoints and
    /// returns exactly to the start at every even multiple of
    /// `travel_time`.
    pub fn advance(&mut self, dt: f32) {
        if !self.moving || self.travel_time <= 0.0 {
            return;
        }

        self.timer += dt;
        let cycle = self.timer.rem_euclid(self.travel_time * 2.0);
        let mut t = cycle / self.travel_time;
        if t > 1.0 {
            t = 2.0 - t;
        }

        let pos = self.start_position + (self.end_position - self.start_position) * t;
        self.bounds.x = pos.x;
        self.bounds.y = pos.y;
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub bounds: Rect,
    /// Patrol speed, pixels/s
    pub speed: f32,
    /// Leftmost x the bounds may reach
    pub left_limit: f32,
    /// Rightmost x the bounds' right edge may reach
    pub right_limit: f32,
    pub damage: u8,
    /// +1.0 or -1.0
    pub direction: f32,
}

impl Enemy {
    /// Move one step of reflective patrol, clamped to the limits
    pub fn patrol(&mut self, dt: f32) {
        self.bounds.x += self.speed * self.direction * dt;

        if self.bounds.x < self.left_limit {
            self.bounds.x = self.left_limit;
            self.direction = 1.0;
        } else if self.bounds.right() > self.right_limit {
            self.bounds.x = self.right_limit - self.bounds.width;
            self.direction = -1.0;
        }
    }
}

/// A collectible coin. `collected` flips false -> true at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    /// Center of the coin
    pub position: Vec2,
    pub radius: f32,
    pub collected: bool,
}

impl Coin {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            radius: COIN_RADIUS,
            collected: false,
        }
    }

    /// Square pickup box, side 2 x radius, centered on the coin
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, Vec2::splat(self.radius * 2.0))
    }
}

/// The unlockable achievements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Achievement {
    FirstCoin,
    TenCoins,
    ComboFive,
    TimeTrialBest,
}

impl Achievement {
    pub fn label(&self) -> &'static str {
        match self {
            Achievement::FirstCoin => "First Coin!",
            Achievement::TenCoins => "Coin Collector",
            Achievement::ComboFive => "Combo x5!",
            Achievement::TimeTrialBest => "New Best Time!",
        }
    }
}

/// Unlock flags plus the notification the HUD is currently showing.
/// Unlocks are one-way and survive level resets for the whole session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementState {
    pub first_coin: bool,
    pub ten_coins: bool,
    pub combo_five: bool,
    pub time_trial_best: bool,
    pub last_unlocked: Option<Achievement>,
    /// Seconds the notification stays up
    pub notification_timer: f32,
}

impl AchievementState {
    fn flag_mut(&mut self, achievement: Achievement) -> &mut bool {
        match achievement {
            Achievement::FirstCoin => &mut self.first_coin,
            Achievement::TenCoins => &mut self.ten_coins,
            Achievement::ComboFive => &mut self.combo_five,
            Achievement::TimeTrialBest => &mut self.time_trial_best,
        }
    }

    /// Unlock an achievement if it isn't already. At most one unlock per
    /// achievement per session.
    pub fn unlock(&mut self, achievement: Achievement) {
        let flag = self.flag_mut(achievement);
        if *flag {
            return;
        }
        *flag = true;
        self.last_unlocked = Some(achievement);
        self.notification_timer = ACHIEVEMENT_NOTIFICATION_SECS;
        log::info!("achievement unlocked: {}", achievement.label());
    }

    /// Decay the notification timer
    pub fn tick(&mut self, dt: f32) {
        self.notification_timer = (self.notification_timer - dt).max(0.0);
    }
}

/// Time-trial bookkeeping: level clear times compared against a best
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeTrial {
    /// Whether the feature is enabled at all
    pub mode: bool,
    /// Whether a timed attempt is currently running
    pub active: bool,
    /// Seconds since the current level started
    pub timer: f32,
    pub best: f32,
    pub has_best: bool,
}

impl TimeTrial {
    /// Flip the mode, discarding any in-progress attempt
    pub fn toggle(&mut self) {
        self.mode = !self.mode;
        self.timer = 0.0;
        self.active = false;
    }

    /// Start timing a fresh level attempt
    pub fn restart(&mut self) {
        self.timer = 0.0;
        self.active = self.mode;
    }

    /// Accumulate time while an attempt runs
    pub fn update(&mut self, dt: f32) {
        if !self.mode {
            self.active = false;
            return;
        }
        self.active = true;
        self.timer += dt;
    }

    /// Record a level clear. Returns true if this set a new best time.
    pub fn finish_level(&mut self) -> bool {
        if !self.mode {
            return false;
        }
        if !self.has_best || self.timer < self.best {
            self.best = self.timer;
            self.has_best = true;
            return true;
        }
        false
    }
}

/// Complete game state (deterministic, serializable)
///
/// Exclusively owns the player and every entity collection; the public
/// fields are the snapshot a presentation layer reads each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility (drives weather draws)
    pub seed: u64,
    pub phase: GamePhase,
    /// Current level, 1-based
    pub level: u32,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    /// Downward acceleration, pixels/s²
    pub gravity: f32,
    pub accessibility: AccessibilityOptions,
    pub achievements: AchievementState,
    pub time_trial: TimeTrial,
    pub weather: WeatherState,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new session at the menu, with the first level laid out
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Menu,
            level: 1,
            player: Player::default(),
            platforms: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
            gravity: GRAVITY,
            accessibility: AccessibilityOptions::default(),
            achievements: AchievementState::default(),
            time_trial: TimeTrial::default(),
            weather: WeatherState::new(seed),
            time_ticks: 0,
        };
        state.reset_level();
        state
    }

    /// True iff every coin has been collected
    pub fn level_complete(&self) -> bool {
        self.coins.iter().all(|coin| coin.collected)
    }

    /// Clear and repopulate the level from the fixed layout and respawn
    /// the player. A fresh run (level <= 1) also resets score, lives,
    /// run totals, and the time-trial best.
    pub fn reset_level(&mut self) {
        self.platforms.clear();
        self.enemies.clear();
        self.coins.clear();

        if self.level <= 1 {
            self.level = 1;
            self.player.score = 0;
            self.player.lives = LIVES_START;
            self.player.total_coins_collected = 0;
            self.player.best_combo = 0;
            self.time_trial.best = 0.0;
            self.time_trial.has_best = false;
        }

        let ground_height = 64.0;
        self.platforms.push(Platform::stationary(Rect::new(
            -400.0,
            400.0,
            1200.0,
            ground_height,
        )));
        self.platforms
            .push(Platform::stationary(Rect::new(150.0, 320.0, 160.0, 24.0)));
        self.platforms.push(Platform::oscillating(
            Rect::new(380.0, 260.0, 160.0, 24.0),
            Vec2::new(500.0, 260.0),
            2.5,
        ));
        self.platforms.push(Platform::oscillating(
            Rect::new(640.0, 180.0, 180.0, 24.0),
            Vec2::new(820.0, 200.0),
            3.0,
        ));

        self.enemies.push(Enemy {
            bounds: Rect::new(220.0, 364.0, 32.0, 32.0),
            speed: 50.0,
            left_limit: 150.0,
            right_limit: 310.0,
            damage: 1,
            direction: 1.0,
        });
        self.enemies.push(Enemy {
            bounds: Rect::new(420.0, 214.0, 32.0, 32.0),
            speed: 70.0,
            left_limit: 380.0,
            right_limit: 520.0,
            damage: 1,
            direction: -1.0,
        });

        self.coins.push(Coin::new(Vec2::new(180.0, 290.0)));
        self.coins.push(Coin::new(Vec2::new(420.0, 230.0)));
        self.coins.push(Coin::new(Vec2::new(700.0, 150.0)));

        self.player.respawn(PLAYER_SPAWN);
        self.time_trial.restart();

        log::info!(
            "level {} reset: {} platforms, {} enemies, {} coins",
            self.level,
            self.platforms.len(),
            self.enemies.len(),
            self.coins.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_platform_returns_to_start_at_even_multiples() {
        let start = Rect::new(100.0, 200.0, 160.0, 24.0);
        let mut platform = Platform::oscillating(start, Vec2::new(300.0, 200.0), 2.0);

        // Drive the timer exactly to 2 * travel_time
        platform.advance(4.0);
        assert_eq!(platform.bounds.x, 100.0);
        assert_eq!(platform.bounds.y, 200.0);

        platform.advance(4.0);
        assert_eq!(platform.bounds.x, 100.0);
    }

    #[test]
    fn test_platform_reaches_endpoint_at_travel_time() {
        let start = Rect::new(0.0, 0.0, 100.0, 20.0);
        let mut platform = Platform::oscillating(start, Vec2::new(200.0, 40.0), 3.0);

        platform.advance(3.0);
        assert!((platform.bounds.x - 200.0).abs() < 1e-4);
        assert!((platform.bounds.y - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_stationary_platform_never_moves() {
        let bounds = Rect::new(10.0, 20.0, 100.0, 20.0);
        let mut platform = Platform::stationary(bounds);
        for _ in 0..100 {
            platform.advance(0.25);
        }
        assert_eq!(platform.bounds, bounds);
    }

    #[test]
    fn test_enemy_patrol_reverses_at_limits() {
        let mut enemy = Enemy {
            bounds: Rect::new(195.0, 0.0, 32.0, 32.0),
            speed: 100.0,
            left_limit: 100.0,
            right_limit: 232.0,
            damage: 1,
            direction: 1.0,
        };

        // One second to the right overshoots the right limit
        enemy.patrol(1.0);
        assert_eq!(enemy.bounds.right(), 232.0);
        assert_eq!(enemy.direction, -1.0);

        // Two seconds back overshoots the left limit
        enemy.patrol(2.0);
        assert_eq!(enemy.bounds.x, 100.0);
        assert_eq!(enemy.direction, 1.0);
    }

    #[test]
    fn test_achievement_unlocks_once() {
        let mut achievements = AchievementState::default();

        achievements.unlock(Achievement::FirstCoin);
        assert!(achievements.first_coin);
        assert_eq!(achievements.last_unlocked, Some(Achievement::FirstCoin));
        assert!(achievements.notification_timer > 0.0);

        // Let the notification lapse, then unlock again: nothing changes
        achievements.tick(10.0);
        achievements.unlock(Achievement::FirstCoin);
        assert_eq!(achievements.notification_timer, 0.0);
    }

    #[test]
    fn test_time_trial_best() {
        let mut trial = TimeTrial::default();
        trial.mode = true;

        trial.restart();
        trial.timer = 12.34;
        assert!(trial.finish_level());
        assert!(trial.has_best);
        assert_eq!(trial.best, 12.34);

        // A slower clear does not replace the best
        trial.restart();
        trial.timer = 20.0;
        assert!(!trial.finish_level());
        assert_eq!(trial.best, 12.34);

        // A faster one does
        trial.restart();
        trial.timer = 10.0;
        assert!(trial.finish_level());
        assert_eq!(trial.best, 10.0);
    }

    #[test]
    fn test_fresh_run_reset_clears_run_totals() {
        let mut state = GameState::new(7);
        state.player.score = 500;
        state.player.best_combo = 6;
        state.player.total_coins_collected = 14;
        state.player.lives = 1;
        state.time_trial.best = 9.0;
        state.time_trial.has_best = true;

        state.level = 1;
        state.reset_level();

        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.lives, LIVES_START);
        assert_eq!(state.player.best_combo, 0);
        assert_eq!(state.player.total_coins_collected, 0);
        assert!(!state.time_trial.has_best);
    }

    #[test]
    fn test_later_level_reset_keeps_run_totals() {
        let mut state = GameState::new(7);
        state.level = 3;
        state.player.score = 500;
        state.player.best_combo = 6;

        state.reset_level();

        assert_eq!(state.player.score, 500);
        assert_eq!(state.player.best_combo, 6);
        assert_eq!(state.level, 3);
    }

    proptest! {
        /// The oscillation never leaves the closed segment between the
        /// endpoints, no matter how the timer is stepped.
        #[test]
        fn platform_stays_on_segment(
            travel_time in 0.1f32..10.0,
            steps in proptest::collection::vec(0.001f32..0.5, 1..200),
        ) {
            let start = Vec2::new(-50.0, 120.0);
            let end = Vec2::new(250.0, 80.0);
            let mut platform = Platform::oscillating(
                Rect::new(start.x, start.y, 100.0, 20.0),
                end,
                travel_time,
            );

            for dt in steps {
                platform.advance(dt);
                let min_x = start.x.min(end.x);
                let max_x = start.x.max(end.x);
                let min_y = start.y.min(end.y);
                let max_y = start.y.max(end.y);
                prop_assert!(platform.bounds.x >= min_x - 1e-3);
                prop_assert!(platform.bounds.x <= max_x + 1e-3);
                prop_assert!(platform.bounds.y >= min_y - 1e-3);
                prop_assert!(platform.bounds.y <= max_y + 1e-3);
            }
        }
    }
}
