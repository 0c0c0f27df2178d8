//! AsteraX headless demo
//!
//! Loads `asterax.toml` (or defaults), then flies the ship through a short
//! scripted session on a fixed timestep and logs what happens.

use asterax::{AsteraX, GameConfig};
use asterax_engine::foundation::logging;
use asterax_engine::prelude::*;

const CONFIG_PATH: &str = "asterax.toml";
const TIMESTEP: f32 = 1.0 / 60.0;
const DEMO_FRAMES: u64 = 60 * 30;
/// Frames between shots
const FIRE_INTERVAL: u64 = 20;

/// Feeds scripted input to the session in place of a player
struct Autopilot {
    game: AsteraX,
}

impl Autopilot {
    fn script_input(engine: &mut Engine) {
        let frame = engine.frame_count();
        #[allow(clippy::cast_precision_loss)]
        let phase = frame as f32 * TIMESTEP * 0.5;

        engine.input.set_axis(Axis::Horizontal, phase.cos());
        engine.input.set_axis(Axis::Vertical, phase.sin());

        // Sweep the cursor around the screen edge so shots go everywhere
        let x = 640.0 + 600.0 * (phase * 3.0).cos();
        let y = 360.0 + 340.0 * (phase * 3.0).sin();
        engine.input.handle_cursor_move(x, y);
        engine.input.handle_button(Button::Fire1, frame % FIRE_INTERVAL == 0);
    }
}

impl Application for Autopilot {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        Application::initialize(&mut self.game, engine)
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        Self::script_input(engine);
        self.game.update(engine, delta_time)
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        self.game.cleanup(engine);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level("info");
    log::info!("Starting AsteraX...");

    let config = GameConfig::load_or_default(CONFIG_PATH)?;
    let game = AsteraX::new(config)?;
    let mut app = Autopilot { game };

    let engine_config = EngineConfig::new()
        .with_fixed_timestep(TIMESTEP)
        .with_max_frames(DEMO_FRAMES);
    Engine::run(engine_config, &mut app)?;

    let stats = app.game.stats();
    log::info!(
        "AsteraX demo finished: score {}, {} asteroid(s) destroyed, {} respawn(s), {} game over(s)",
        app.game.score(),
        stats.asteroids_destroyed,
        stats.respawns_started,
        stats.game_overs
    );
    Ok(())
}
