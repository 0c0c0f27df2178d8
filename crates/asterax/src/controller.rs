//! Game state controller
//!
//! Score, the asteroid registry and the level/game-over state. One
//! controller lives inside each `AsteraX` session and is rebuilt when the
//! scene reloads.

use asterax_engine::foundation::math::Vec3;
use asterax_engine::physics::PlayArea;
use asterax_engine::scheduler::{Scheduler, TaskId};
use rand::Rng;

use crate::asteroids::AsteroidField;
use crate::components::AsteroidId;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::GameTask;
use crate::game_state::{GameState, GameStateMask};
use crate::hud::{self, Hud};

/// Placement tries for an initial asteroid before settling for the last sample
const MAX_PLACEMENT_TRIES: u32 = 100;

/// States in which the game-over overlay is shown
const GAME_OVER_OVERLAY_STATES: GameStateMask = GameStateMask::GAME_OVER;

/// Score, asteroid registry and game state
#[derive(Debug, Default)]
pub struct GameController {
    state: GameState,
    score: u64,
    asteroids: Vec<AsteroidId>,
    reload_task: Option<TaskId>,
}

impl GameController {
    /// Fresh controller in the main menu with no score
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the menu states into the level and reset the HUD
    pub fn start_level(&mut self, hud: &mut dyn Hud) -> Result<(), GameError> {
        self.state.transition_to(GameState::PreLevel)?;
        self.state.transition_to(GameState::Level)?;
        hud.set_game_over_visible(GAME_OVER_OVERLAY_STATES.is_active_in(self.state));
        hud.set_score_text(&hud::score_text(self.score));
        Ok(())
    }

    /// Current state
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Whether the game has ended
    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Current score
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Add points and refresh the score readout
    ///
    /// Ignored once the game is over; returns the score afterwards.
    pub fn add_score(&mut self, points: u32, hud: &mut dyn Hud) -> u64 {
        if self.is_game_over() {
            log::debug!("Ignoring {points} points after game over");
            return self.score;
        }
        self.score += u64::from(points);
        log::debug!("Score +{points} = {}", self.score);
        hud.set_score_text(&hud::score_text(self.score));
        self.score
    }

    /// Add an asteroid to the registry; returns `false` if it was already there
    pub fn register_asteroid(&mut self, id: AsteroidId) -> bool {
        if self.asteroids.contains(&id) {
            return false;
        }
        self.asteroids.push(id);
        true
    }

    /// Drop an asteroid from the registry; returns `false` if it was not there
    pub fn remove_asteroid(&mut self, id: AsteroidId) -> bool {
        match self.asteroids.iter().position(|&registered| registered == id) {
            Some(index) => {
                self.asteroids.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether `id` is registered
    pub fn is_registered(&self, id: AsteroidId) -> bool {
        self.asteroids.contains(&id)
    }

    /// Registered asteroids in registration order
    pub fn asteroids(&self) -> &[AsteroidId] {
        &self.asteroids
    }

    /// Spawn `count` parent asteroids away from the ship and register them
    /// along with their fragments
    ///
    /// Returns the ids of the parents.
    pub fn spawn_initial_asteroids<R: Rng>(
        &mut self,
        count: u32,
        field: &mut AsteroidField,
        ship_position: Vec3,
        config: &GameConfig,
        rng: &mut R,
    ) -> Vec<AsteroidId> {
        let mut parents = Vec::with_capacity(count as usize);
        for index in 0..count {
            let position = placement_away_from(
                ship_position,
                config.gameplay.min_asteroid_distance_from_ship,
                &config.bounds,
                rng,
            );
            let created =
                field.spawn_parent(position, config.asteroids.initial_size, &config.asteroids, rng);
            log::debug!(
                "Asteroid_{index:02} spawned at {:?} with {} fragment(s)",
                position,
                created.len() - 1
            );
            parents.push(created[0]);
            for id in created {
                self.register_asteroid(id);
            }
        }
        log::info!(
            "Spawned {} parent asteroid(s), {} registered",
            parents.len(),
            self.asteroids.len()
        );
        parents
    }

    /// Switch to game over, show the overlay and schedule the scene reload
    ///
    /// Only the first call does anything; later calls return `false`.
    pub fn end_game(
        &mut self,
        now: f64,
        reload_delay: f64,
        scheduler: &mut Scheduler<GameTask>,
        hud: &mut dyn Hud,
    ) -> Result<bool, GameError> {
        if self.is_game_over() {
            return Ok(false);
        }
        self.state.transition_to(GameState::GameOver)?;

        log::info!("GAME OVER - final score {}", self.score);
        hud.set_game_over_visible(GAME_OVER_OVERLAY_STATES.is_active_in(self.state));
        hud.set_info_text(&hud::score_text(self.score));
        self.reload_task = Some(scheduler.schedule(now, reload_delay, GameTask::ReloadScene));
        Ok(true)
    }

    /// Pending reload timer, if the game is over
    pub fn reload_task(&self) -> Option<TaskId> {
        self.reload_task
    }
}

fn placement_away_from<R: Rng>(
    ship_position: Vec3,
    min_distance: f32,
    bounds: &PlayArea,
    rng: &mut R,
) -> Vec3 {
    let mut position = Vec3::zeros();
    for _ in 0..MAX_PLACEMENT_TRIES {
        position = bounds.point_at(rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0));
        if (position - ship_position).magnitude() >= min_distance {
            return position;
        }
    }
    log::warn!("Could not place asteroid {min_distance} away from the ship, using {:?}", position);
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct RecordingHud {
        score: Vec<String>,
        info: Vec<String>,
        overlay: Vec<bool>,
    }

    impl Hud for RecordingHud {
        fn set_score_text(&mut self, text: &str) {
            self.score.push(text.to_string());
        }
        fn set_jumps_text(&mut self, _text: &str) {}
        fn set_info_text(&mut self, text: &str) {
            self.info.push(text.to_string());
        }
        fn set_game_over_visible(&mut self, visible: bool) {
            self.overlay.push(visible);
        }
    }

    fn level_controller(hud: &mut RecordingHud) -> GameController {
        let mut controller = GameController::new();
        controller.start_level(hud).unwrap();
        controller
    }

    #[test]
    fn test_start_level_enters_level() {
        let mut hud = RecordingHud::default();
        let controller = level_controller(&mut hud);
        assert_eq!(controller.state(), GameState::Level);
        assert_eq!(hud.overlay, vec![false]);
        assert_eq!(hud.score, vec!["Score: 0"]);
    }

    #[test]
    fn test_add_score_is_monotonic() {
        let mut hud = RecordingHud::default();
        let mut controller = level_controller(&mut hud);

        for points in [0, 100, 400, 200, 0, 1] {
            let before = controller.score();
            let after = controller.add_score(points, &mut hud);
            assert_eq!(after, before + u64::from(points));
        }
        assert_eq!(controller.score(), 701);
        assert_eq!(hud.score.last().unwrap(), "Score: 701");
    }

    #[test]
    fn test_registry_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = AsteroidField::new();
        let config = GameConfig::default();
        let id = field.spawn_parent(Vec3::zeros(), 1, &config.asteroids, &mut rng)[0];
        let mut controller = GameController::new();

        assert!(controller.register_asteroid(id));
        assert!(!controller.register_asteroid(id));
        assert_eq!(controller.asteroids(), &[id]);

        assert!(controller.remove_asteroid(id));
        assert!(!controller.remove_asteroid(id));
        assert!(!controller.is_registered(id));
    }

    #[test]
    fn test_initial_asteroids_keep_their_distance() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut field = AsteroidField::new();
        let config = GameConfig::default();
        let mut controller = GameController::new();

        let parents =
            controller.spawn_initial_asteroids(3, &mut field, Vec3::zeros(), &config, &mut rng);

        assert_eq!(parents.len(), 3);
        // Size 3 parents carry 2 + 4 fragments each
        assert_eq!(controller.asteroids().len(), 21);
        for id in parents {
            let asteroid = field.get(id).unwrap();
            assert!(asteroid.is_top_level());
            let distance = asteroid.position.magnitude();
            assert!(distance >= config.gameplay.min_asteroid_distance_from_ship);
        }
    }

    #[test]
    fn test_end_game_is_one_shot() {
        let mut hud = RecordingHud::default();
        let mut controller = level_controller(&mut hud);
        let mut scheduler = Scheduler::new();
        controller.add_score(300, &mut hud);

        assert!(controller.end_game(1.0, 4.0, &mut scheduler, &mut hud).unwrap());
        assert!(!controller.end_game(2.0, 4.0, &mut scheduler, &mut hud).unwrap());

        assert!(controller.is_game_over());
        assert_eq!(scheduler.len(), 1);
        let reload = controller.reload_task().unwrap();
        assert_eq!(scheduler.due_time(reload), Some(5.0));
        assert_eq!(hud.overlay, vec![false, true]);
        assert_eq!(hud.info, vec!["Score: 300"]);
    }

    #[test]
    fn test_score_frozen_after_game_over() {
        let mut hud = RecordingHud::default();
        let mut controller = level_controller(&mut hud);
        let mut scheduler = Scheduler::new();
        controller.add_score(100, &mut hud);
        controller.end_game(0.0, 4.0, &mut scheduler, &mut hud).unwrap();

        assert_eq!(controller.add_score(500, &mut hud), 100);
        assert_eq!(controller.score(), 100);
    }

    #[test]
    fn test_end_game_outside_level_is_rejected() {
        let mut hud = RecordingHud::default();
        let mut controller = GameController::new();
        let mut scheduler = Scheduler::new();

        let err = controller.end_game(0.0, 4.0, &mut scheduler, &mut hud).unwrap_err();
        assert!(matches!(err, GameError::InvalidTransition { .. }));
        assert!(scheduler.is_empty());
    }
}
