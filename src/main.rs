//! SkyBound entry point
//!
//! Headless demo driver: runs the fixed-timestep loop against synthetic
//! frame deltas with a scripted input bot, then reports the run. A real
//! shell would replace the bot with device polling and read the game
//! state for rendering each frame.

use std::path::Path;

use skybound::consts::{MAX_SUBSTEPS, SIM_DT};
use skybound::sim::{GamePhase, GameState, TickInput, tick};
use skybound::{HighScores, Settings};

/// Synthetic frame delta (60 FPS presentation driving a 120 Hz sim)
const FRAME_DT: f32 = 1.0 / 60.0;
/// How long the demo plays, in frames
const DEMO_FRAMES: u32 = 60 * 120;

const SETTINGS_PATH: &str = "skybound_settings.json";
const SCORES_PATH: &str = "skybound_scores.json";

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2024);
    log::info!("starting demo run with seed {seed}");

    let settings = Settings::load_from(Path::new(SETTINGS_PATH));
    let mut state = GameState::new(seed);
    state.accessibility = settings.accessibility;
    state.time_trial.mode = settings.time_trial_mode;

    let mut accumulator = 0.0f32;
    let mut input = TickInput::default();

    for _ in 0..DEMO_FRAMES {
        script_input(&state, &mut input);

        accumulator += FRAME_DT;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot intents once consumed
            input.jump_pressed = false;
            input.pause_pressed = false;
            input.restart_pressed = false;
            input.confirm_pressed = false;
            input.toggle_time_trial = false;
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    report_run(&state);
}

/// A minimal bot: start from the menu, then chase the nearest uncollected
/// coin, jumping when it sits above the player.
fn script_input(state: &GameState, input: &mut TickInput) {
    input.move_left = false;
    input.move_right = false;

    match state.phase {
        GamePhase::Menu => {
            input.confirm_pressed = true;
        }
        GamePhase::Playing => {
            let player = &state.player;
            let center_x = player.position.x + player.width / 2.0;

            let target = state
                .coins
                .iter()
                .filter(|coin| !coin.collected)
                .min_by(|a, b| {
                    let da = (a.position.x - center_x).abs();
                    let db = (b.position.x - center_x).abs();
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                });

            if let Some(coin) = target {
                if coin.position.x < center_x - 4.0 {
                    input.move_left = true;
                } else if coin.position.x > center_x + 4.0 {
                    input.move_right = true;
                }
                if player.grounded && coin.position.y < player.position.y {
                    input.jump_pressed = true;
                }
            }
        }
        GamePhase::Paused | GamePhase::GameOver => {}
    }
}

fn report_run(state: &GameState) {
    let player = &state.player;
    println!("--- demo run finished ---");
    println!("phase:        {:?}", state.phase);
    println!("level:        {}", state.level);
    println!("score:        {}", player.score);
    println!("lives:        {}", player.lives);
    println!("coins:        {}", player.total_coins_collected);
    println!("best combo:   x{}", player.best_combo);
    println!("weather:      {}", state.weather.current.label());
    if state.time_trial.has_best {
        println!("best time:    {:.2}s", state.time_trial.best);
    }

    let mut scores = HighScores::load_from(Path::new(SCORES_PATH));
    if let Some(rank) = scores.add_score(player.score, state.level, player.best_combo) {
        println!("high score!   rank #{rank}");
        scores.save_to(Path::new(SCORES_PATH));
    }
}
