//! Fixed timestep simulation tick
//!
//! The gameplay state machine and the per-tick update pipeline. Everything
//! here is pure state transformation: one call advances the world by
//! exactly one fixed step.

use glam::Vec2;

use super::collision::resolve_player_platforms;
use super::state::{Achievement, Coin, Enemy, GamePhase, GameState, Player};
use crate::consts::*;

/// Input intents for a single tick (abstract - the shell maps devices to
/// these)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement intents
    pub move_left: bool,
    pub move_right: bool,
    /// Edge-triggered intents
    pub jump_pressed: bool,
    pub pause_pressed: bool,
    pub restart_pressed: bool,
    pub confirm_pressed: bool,
    /// Accessibility / feature toggles, consumed only by the state machine
    pub toggle_high_contrast: bool,
    pub toggle_large_hud: bool,
    pub cycle_bindings: bool,
    pub toggle_time_trial: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    handle_toggles(state, input);

    match state.phase {
        GamePhase::Menu => {
            if input.confirm_pressed || input.jump_pressed {
                state.phase = GamePhase::Playing;
                state.reset_level();
                log::info!("starting level {}", state.level);
            }
        }

        GamePhase::Playing => {
            if input.pause_pressed {
                state.phase = GamePhase::Paused;
                return;
            }

            state.time_ticks += 1;

            for platform in &mut state.platforms {
                platform.advance(dt);
            }

            apply_player_input(&mut state.player, input);
            let env_force = state.weather.step(dt);
            integrate_player(&mut state.player, state.gravity, env_force, dt);
            resolve_player_platforms(&mut state.player, &state.platforms);

            update_enemies(&mut state.enemies, &mut state.player, dt);
            let coins_collected = collect_coins(&mut state.coins, &mut state.player);

            // Combo expires when its window runs out without a collection
            if state.player.combo_timer <= 0.0 {
                state.player.combo_count = 0;
            }

            let completed = state.level_complete();
            state.time_trial.update(dt);
            let new_best_time = completed && state.time_trial.finish_level();

            update_achievements(state, coins_collected, new_best_time, dt);

            if completed {
                state.level += 1;
                state.player.lives = (state.player.lives + 1).min(LIVES_MAX);
                log::info!("level cleared, advancing to level {}", state.level);
                state.reset_level();
            }

            if state.player.lives == 0 {
                state.phase = GamePhase::GameOver;
                log::info!("game over at level {} with score {}", state.level, state.player.score);
            }
        }

        GamePhase::Paused => {
            if input.pause_pressed {
                state.phase = GamePhase::Playing;
            }
        }

        GamePhase::GameOver => {
            if input.restart_pressed {
                state.level = 1;
                state.reset_level();
                state.phase = GamePhase::Playing;
            } else if input.confirm_pressed {
                // Returning to the menu ends the run
                state.level = 1;
                state.phase = GamePhase::Menu;
            }
        }
    }
}

/// Flip accessibility and feature flags. Runs in every phase; nothing here
/// touches physics.
fn handle_toggles(state: &mut GameState, input: &TickInput) {
    if input.toggle_high_contrast {
        state.accessibility.high_contrast = !state.accessibility.high_contrast;
    }
    if input.toggle_large_hud {
        state.accessibility.large_hud = !state.accessibility.large_hud;
    }
    if input.cycle_bindings {
        state.accessibility.alternative_bindings = !state.accessibility.alternative_bindings;
    }
    if input.toggle_time_trial {
        state.time_trial.toggle();
    }
}

/// Map held/edge intents onto the player's velocity. Left and right are
/// applied independently, so holding both nets to zero.
pub fn apply_player_input(player: &mut Player, input: &TickInput) {
    player.velocity.x = 0.0;

    if input.move_left {
        player.velocity.x -= player.speed;
    }
    if input.move_right {
        player.velocity.x += player.speed;
    }

    if player.grounded && input.jump_pressed {
        player.velocity.y = -player.jump_strength;
        player.grounded = false;
    }
}

/// Integrate player motion by one step. `env_force` is an acceleration
/// injected by an environmental collaborator (wind/rain); pass
/// `Vec2::ZERO` when none applies.
pub fn integrate_player(player: &mut Player, gravity: f32, env_force: Vec2, dt: f32) {
    player.previous_position = player.position;
    player.velocity.y += gravity * dt;
    player.velocity += env_force * dt;
    player.position += player.velocity * dt;

    player.invincibility_timer = (player.invincibility_timer - dt).max(0.0);
    player.combo_timer = (player.combo_timer - dt).max(0.0);
}

/// Patrol every enemy and apply contact damage.
///
/// Damage knocks the player back to its last pre-integration position and
/// zeroes all motion - a return-to-last-safe-spot policy, not a bounce.
pub fn update_enemies(enemies: &mut [Enemy], player: &mut Player, dt: f32) {
    for enemy in enemies.iter_mut() {
        enemy.patrol(dt);

        if player.invincibility_timer <= 0.0 && enemy.bounds.overlaps(&player.bounds()) {
            player.lives = player.lives.saturating_sub(enemy.damage);
            player.invincibility_timer = INVINCIBILITY_DURATION;
            player.position = player.previous_position;
            player.velocity = Vec2::ZERO;
            player.combo_count = 0;
            player.combo_timer = 0.0;
            log::debug!("enemy contact: {} lives left", player.lives);
        }
    }
}

/// Collect every uncollected coin overlapping the player, scoring each
/// with the combo bonus. Returns the number collected this tick.
pub fn collect_coins(coins: &mut [Coin], player: &mut Player) -> u32 {
    let mut collected = 0;

    for coin in coins.iter_mut() {
        if coin.collected || !coin.bounds().overlaps(&player.bounds()) {
            continue;
        }

        coin.collected = true;
        player.combo_count += 1;
        player.combo_timer = COMBO_WINDOW;
        player.best_combo = player.best_combo.max(player.combo_count);
        player.total_coins_collected += 1;

        let combo_bonus = if player.combo_count > 1 {
            (player.combo_count - 1) * COMBO_BONUS_STEP
        } else {
            0
        };
        player.score += COIN_SCORE + combo_bonus;
        collected += 1;
    }

    collected
}

/// Check unlock conditions. Each achievement unlocks at most once per
/// session; unlocks survive level resets.
fn update_achievements(state: &mut GameState, coins_collected: u32, new_best_time: bool, dt: f32) {
    state.achievements.tick(dt);

    if coins_collected > 0 {
        if state.player.total_coins_collected >= 1 {
            state.achievements.unlock(Achievement::FirstCoin);
        }
        if state.player.total_coins_collected >= 10 {
            state.achievements.unlock(Achievement::TenCoins);
        }
    }

    if state.player.combo_count >= 5 {
        state.achievements.unlock(Achievement::ComboFive);
    }

    if new_best_time {
        state.achievements.unlock(Achievement::TimeTrialBest);
    }
}
