//! HUD and scene loading seams
//!
//! The host owns the actual widgets and scenes. The game only pushes text
//! and visibility changes through `Hud` and asks for reloads through
//! `SceneLoader`.

/// UI layer the game writes to
pub trait Hud {
    /// Score readout
    fn set_score_text(&mut self, text: &str);

    /// Remaining jumps readout
    fn set_jumps_text(&mut self, text: &str);

    /// Text on the game-over overlay
    fn set_info_text(&mut self, text: &str);

    /// Show or hide the game-over overlay
    fn set_game_over_visible(&mut self, visible: bool);
}

/// Scene/level loader provided by the host
pub trait SceneLoader {
    /// Load the scene with the given build index
    fn load_scene(&mut self, index: usize);
}

/// Formats the score readout
pub fn score_text(score: u64) -> String {
    format!("Score: {score}")
}

/// Formats the jumps readout
pub fn jumps_text(jumps: u32) -> String {
    format!("Jumps: {jumps}")
}

/// HUD that writes every change to the log
#[derive(Debug, Default)]
pub struct LogHud;

impl Hud for LogHud {
    fn set_score_text(&mut self, text: &str) {
        log::info!("[hud] {text}");
    }

    fn set_jumps_text(&mut self, text: &str) {
        log::info!("[hud] {text}");
    }

    fn set_info_text(&mut self, text: &str) {
        log::info!("[hud:game-over] {text}");
    }

    fn set_game_over_visible(&mut self, visible: bool) {
        log::info!("[hud] game over overlay {}", if visible { "shown" } else { "hidden" });
    }
}

/// Scene loader that only logs the request
#[derive(Debug, Default)]
pub struct LogSceneLoader {
    loads: usize,
}

impl LogSceneLoader {
    /// Number of loads requested so far
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl SceneLoader for LogSceneLoader {
    fn load_scene(&mut self, index: usize) {
        self.loads += 1;
        log::info!("Loading scene {index}");
    }
}
