//! Game session
//!
//! `AsteraX` is the one owner of all game state: controller, ship, asteroid
//! field, bullets and the timer queue. The host drives it with
//! `initialize()` once and `tick(dt, input)` every frame (or through the
//! engine's `Application` trait), and reports contacts with `on_collision`.

use asterax_engine::camera::Camera2d;
use asterax_engine::foundation::math::Vec3;
use asterax_engine::input::{Axis, Button, InputManager};
use asterax_engine::physics::BoundingSphere;
use asterax_engine::scheduler::Scheduler;
use asterax_engine::{AppError, Application, Engine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use slotmap::SlotMap;

use crate::asteroids::{AsteroidField, Destroyed};
use crate::components::{AsteroidId, AsteroidMotion, Bullet, BulletId};
use crate::config::GameConfig;
use crate::controller::GameController;
use crate::error::GameError;
use crate::game_state::{GameState, GameStateMask};
use crate::hud::{Hud, LogHud, LogSceneLoader, SceneLoader};
use crate::player::{JumpLoss, PlayerShip};
use crate::respawn::{self, RespawnSearch};

/// Scene index reloaded after game over
const START_SCENE: usize = 0;

/// States in which the ship takes steering and fire input
const SHIP_CONTROL_STATES: GameStateMask = GameStateMask::LEVEL;

/// Deferred work queued on the session scheduler
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameTask {
    /// Bring the ship back at a point chosen when the jump was lost
    CompleteRespawn {
        /// Where the ship reappears
        point: Vec3,
    },
    /// Reload the start scene after game over
    ReloadScene,
}

/// Contact reported by the host's physics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// The ship touched an asteroid
    ShipHitAsteroid(AsteroidId),
    /// A bullet touched an asteroid
    BulletHitAsteroid {
        /// The bullet
        bullet: BulletId,
        /// The asteroid
        asteroid: AsteroidId,
    },
}

/// What `consume_jump` led to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpOutcome {
    /// The ship was parked and will come back at `search.point`
    Respawning(RespawnSearch),
    /// That was the last jump
    GameOver,
    /// Nothing happened (the game is already over)
    Ignored,
}

/// Counters for flows the session has run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Respawn sequences started
    pub respawns_started: u32,
    /// Respawn sequences that put the ship back
    pub respawns_completed: u32,
    /// Transitions into game over
    pub game_overs: u32,
    /// Scene reloads performed
    pub scene_reloads: u32,
    /// Asteroids destroyed
    pub asteroids_destroyed: u32,
}

/// The game session
pub struct AsteraX {
    config: GameConfig,
    controller: GameController,
    ship: PlayerShip,
    field: AsteroidField,
    bullets: SlotMap<BulletId, Bullet>,
    scheduler: Scheduler<GameTask>,
    hud: Box<dyn Hud>,
    scene: Box<dyn SceneLoader>,
    camera: Camera2d,
    rng: StdRng,
    time: f64,
    initialized: bool,
    stats: SessionStats,
}

impl AsteraX {
    /// Create a session from a validated configuration
    ///
    /// Uses a logging HUD and scene loader and an entropy-seeded RNG until
    /// replaced with the `with_*` builders.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let ship = PlayerShip::new(&config.gameplay);
        let camera = Camera2d::new(1280.0, 720.0, config.bounds);
        Ok(Self {
            config,
            controller: GameController::new(),
            ship,
            field: AsteroidField::new(),
            bullets: SlotMap::with_key(),
            scheduler: Scheduler::new(),
            hud: Box::new(LogHud),
            scene: Box::new(LogSceneLoader::default()),
            camera,
            rng: StdRng::from_entropy(),
            time: 0.0,
            initialized: false,
            stats: SessionStats::default(),
        })
    }

    /// Use `hud` for score, jumps and the game-over overlay
    pub fn with_hud(mut self, hud: Box<dyn Hud>) -> Self {
        self.hud = hud;
        self
    }

    /// Use `scene` for the post-game-over reload
    pub fn with_scene_loader(mut self, scene: Box<dyn SceneLoader>) -> Self {
        self.scene = scene;
        self
    }

    /// Seed the session RNG
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Use `camera` to turn the cursor into an aim point
    pub fn with_camera(mut self, camera: Camera2d) -> Self {
        self.camera = camera;
        self
    }

    /// Enter the level, reset the HUD and spawn the initial asteroids
    ///
    /// A session initializes exactly once; a second call is an error.
    pub fn initialize(&mut self) -> Result<(), GameError> {
        if self.initialized {
            log::error!("AsteraX initialized twice");
            return Err(GameError::AlreadyInitialized);
        }
        self.start_level()?;
        self.initialized = true;
        log::info!("AsteraX started with {} jump(s)", self.ship.jumps());
        Ok(())
    }

    fn start_level(&mut self) -> Result<(), GameError> {
        self.controller.start_level(self.hud.as_mut())?;
        self.ship.announce(self.hud.as_mut());
        self.spawn_asteroids(self.config.gameplay.initial_asteroid_count);
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), GameError> {
        if self.initialized {
            Ok(())
        } else {
            Err(GameError::NotInitialized)
        }
    }

    /// Advance the session by `delta_time` seconds
    ///
    /// Runs due timers, applies input, moves bodies and resolves contacts
    /// found by the stand-in overlap test.
    /// Negative or non-finite steps count as zero.
    pub fn tick(&mut self, delta_time: f32, input: &InputManager) -> Result<(), GameError> {
        self.ensure_initialized()?;
        let delta_time = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };
        self.time += f64::from(delta_time);
        self.run_due_tasks()?;

        if SHIP_CONTROL_STATES.is_active_in(self.controller.state()) {
            self.ship.steer(input.axis(Axis::Horizontal), input.axis(Axis::Vertical));
            if input.button_down(Button::Fire1) {
                let aim = self.camera.screen_to_world(input.cursor(), self.ship.position.z);
                self.fire(aim)?;
            }
        }

        self.advance_bodies(delta_time);
        for event in self.detect_collisions() {
            self.on_collision(event)?;
        }
        Ok(())
    }

    fn run_due_tasks(&mut self) -> Result<(), GameError> {
        for task in self.scheduler.drain_due(self.time) {
            match task {
                GameTask::CompleteRespawn { point } => {
                    self.ship.finish_respawn(point);
                    self.stats.respawns_completed += 1;
                }
                GameTask::ReloadScene => {
                    self.reload_scene()?;
                    // Anything else due belonged to the old scene
                    break;
                }
            }
        }
        Ok(())
    }

    fn reload_scene(&mut self) -> Result<(), GameError> {
        log::info!("Reloading scene {START_SCENE}");
        self.scene.load_scene(START_SCENE);
        self.stats.scene_reloads += 1;

        self.scheduler.clear();
        self.field.clear();
        self.bullets.clear();
        self.controller = GameController::new();
        self.ship = PlayerShip::new(&self.config.gameplay);
        self.start_level()
    }

    fn advance_bodies(&mut self, delta_time: f32) {
        let bounds = self.config.bounds;
        self.ship.advance(delta_time, &bounds);
        self.field.advance(delta_time, &bounds);
        self.bullets.retain(|_, bullet| bullet.advance(delta_time, &bounds));
    }

    fn detect_collisions(&self) -> Vec<CollisionEvent> {
        let radius_per_size = self.config.asteroids.radius_per_size;
        let mut events = Vec::new();

        if self.ship.in_play() {
            let ship = self.ship.bounds();
            if let Some((id, _)) = self
                .field
                .iter()
                .find(|(_, asteroid)| asteroid.bounds(radius_per_size).intersects(&ship))
            {
                events.push(CollisionEvent::ShipHitAsteroid(id));
            }
        }

        for (bullet_id, bullet) in &self.bullets {
            let point = BoundingSphere::new(bullet.position, 0.0);
            if let Some((asteroid_id, _)) = self
                .field
                .iter()
                .find(|(_, asteroid)| asteroid.bounds(radius_per_size).intersects(&point))
            {
                events.push(CollisionEvent::BulletHitAsteroid {
                    bullet: bullet_id,
                    asteroid: asteroid_id,
                });
            }
        }
        events
    }

    /// Handle a contact reported by the host
    ///
    /// Contacts with asteroids that are already gone are ignored, so a host
    /// may report several contacts with the same compound asteroid in one
    /// frame.
    pub fn on_collision(&mut self, event: CollisionEvent) -> Result<(), GameError> {
        self.ensure_initialized()?;
        match event {
            CollisionEvent::ShipHitAsteroid(asteroid) => {
                if !self.ship.in_play() || !self.field.contains(asteroid) {
                    return Ok(());
                }
                self.destroy_asteroid(asteroid)?;
                self.consume_jump()?;
            }
            CollisionEvent::BulletHitAsteroid { bullet, asteroid } => {
                if !self.field.contains(asteroid) || self.bullets.remove(bullet).is_none() {
                    return Ok(());
                }
                let destroyed = self.destroy_asteroid(asteroid)?;
                let points = self.config.asteroids.points_for(destroyed.size);
                self.add_score(points)?;
            }
        }
        Ok(())
    }

    fn destroy_asteroid(&mut self, id: AsteroidId) -> Result<Destroyed, GameError> {
        let destroyed = self.field.destroy(id, &self.config.asteroids, &mut self.rng)?;
        self.controller.remove_asteroid(destroyed.id);
        self.stats.asteroids_destroyed += 1;
        log::debug!(
            "Asteroid of size {} destroyed, {} fragment(s) released",
            destroyed.size,
            destroyed.released.len()
        );
        if self.field.is_empty() {
            log::info!("Asteroid field cleared");
        }
        Ok(destroyed)
    }

    /// Spawn a bullet from the ship toward `aim`
    ///
    /// `Ok(None)` when the ship cannot fire or `aim` is the ship's own position.
    pub fn fire(&mut self, aim: Vec3) -> Result<Option<BulletId>, GameError> {
        self.ensure_initialized()?;
        Ok(self
            .ship
            .fire(aim, &self.config.gameplay)
            .map(|bullet| self.bullets.insert(bullet)))
    }

    /// Lose one jump
    ///
    /// With jumps left, the ship is parked, a respawn point is chosen now and
    /// the ship reappears there after `respawn_delay`. A respawn that was
    /// still pending is cancelled first. On the last jump the game ends.
    pub fn consume_jump(&mut self) -> Result<JumpOutcome, GameError> {
        self.ensure_initialized()?;
        if self.controller.is_game_over() {
            return Ok(JumpOutcome::Ignored);
        }
        match self.ship.lose_jump(self.hud.as_mut()) {
            JumpLoss::Ignored => Ok(JumpOutcome::Ignored),
            JumpLoss::Exhausted => {
                self.end_game()?;
                Ok(JumpOutcome::GameOver)
            }
            JumpLoss::Remaining(_) => Ok(JumpOutcome::Respawning(self.respawn())),
        }
    }

    fn respawn(&mut self) -> RespawnSearch {
        self.ship.park();
        let search = self.find_respawn_point();

        let delay = f64::from(self.config.gameplay.respawn_delay);
        let task = self
            .scheduler
            .schedule(self.time, delay, GameTask::CompleteRespawn { point: search.point });
        if let Some(previous) = self.ship.await_respawn(task) {
            self.scheduler.cancel(previous);
            log::debug!("Replaced pending respawn");
        }
        self.stats.respawns_started += 1;
        search
    }

    /// Motion of every registered top-level asteroid
    pub fn top_level_asteroids(&self) -> Vec<AsteroidMotion> {
        self.controller
            .asteroids()
            .iter()
            .filter_map(|&id| self.field.top_level_motion(id))
            .collect()
    }

    /// Run the respawn point search against the current asteroids
    pub fn find_respawn_point(&mut self) -> RespawnSearch {
        let asteroids = self.top_level_asteroids();
        respawn::find_safe_respawn_point(
            &asteroids,
            &self.config.bounds,
            &self.config.respawn,
            &mut self.rng,
        )
    }

    /// End the game: take the ship out, show the overlay, schedule the reload
    ///
    /// Returns `false` if the game was already over. Outside a level the
    /// transition is rejected and the ship is left as it was.
    pub fn end_game(&mut self) -> Result<bool, GameError> {
        self.ensure_initialized()?;
        let from = self.controller.state();
        if from == GameState::GameOver {
            return Ok(false);
        }
        if !from.can_transition_to(GameState::GameOver) {
            return Err(GameError::InvalidTransition { from, to: GameState::GameOver });
        }
        if let Some(pending) = self.ship.deactivate() {
            self.scheduler.cancel(pending);
        }
        let delay = f64::from(self.config.gameplay.game_over_reload_delay);
        let ended = self
            .controller
            .end_game(self.time, delay, &mut self.scheduler, self.hud.as_mut())?;
        if ended {
            self.stats.game_overs += 1;
        }
        Ok(ended)
    }

    /// Add points to the score; returns the score afterwards
    pub fn add_score(&mut self, points: u32) -> Result<u64, GameError> {
        self.ensure_initialized()?;
        Ok(self.controller.add_score(points, self.hud.as_mut()))
    }

    /// Spawn `count` more parent asteroids away from the ship
    pub fn spawn_initial_asteroids(&mut self, count: u32) -> Result<Vec<AsteroidId>, GameError> {
        self.ensure_initialized()?;
        Ok(self.spawn_asteroids(count))
    }

    fn spawn_asteroids(&mut self, count: u32) -> Vec<AsteroidId> {
        self.controller.spawn_initial_asteroids(
            count,
            &mut self.field,
            self.ship.position,
            &self.config,
            &mut self.rng,
        )
    }

    /// Add an asteroid to the registry
    pub fn register_asteroid(&mut self, id: AsteroidId) -> Result<bool, GameError> {
        self.ensure_initialized()?;
        Ok(self.controller.register_asteroid(id))
    }

    /// Remove an asteroid from the registry
    pub fn remove_asteroid(&mut self, id: AsteroidId) -> Result<bool, GameError> {
        self.ensure_initialized()?;
        Ok(self.controller.remove_asteroid(id))
    }

    /// Current score
    pub fn score(&self) -> u64 {
        self.controller.score()
    }

    /// Current game state
    pub fn state(&self) -> GameState {
        self.controller.state()
    }

    /// The player ship
    pub fn ship(&self) -> &PlayerShip {
        &self.ship
    }

    /// The asteroid field
    pub fn field(&self) -> &AsteroidField {
        &self.field
    }

    /// Mutable asteroid field, for hosts that sync positions from their physics
    pub fn field_mut(&mut self) -> &mut AsteroidField {
        &mut self.field
    }

    /// The controller
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Live bullets
    pub fn bullets(&self) -> impl Iterator<Item = (BulletId, &Bullet)> {
        self.bullets.iter()
    }

    /// Pending timers
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Session time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Flow counters
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Active configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

impl Application for AsteraX {
    fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        Self::initialize(self).map_err(AppError::from)
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        self.tick(delta_time, &engine.input).map_err(AppError::from)
    }

    fn cleanup(&mut self, _engine: &mut Engine) {
        log::info!(
            "Session ended after {:.1}s: score {}, state {:?}, {:?}",
            self.time,
            self.score(),
            self.state(),
            self.stats
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameplayConfig;
    use crate::player::parked_position;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Readouts {
        score: Vec<String>,
        jumps: Vec<String>,
        info: Vec<String>,
        overlay: Vec<bool>,
        loads: Vec<usize>,
    }

    #[derive(Clone, Default)]
    struct SharedHud(Rc<RefCell<Readouts>>);

    impl Hud for SharedHud {
        fn set_score_text(&mut self, text: &str) {
            self.0.borrow_mut().score.push(text.to_string());
        }
        fn set_jumps_text(&mut self, text: &str) {
            self.0.borrow_mut().jumps.push(text.to_string());
        }
        fn set_info_text(&mut self, text: &str) {
            self.0.borrow_mut().info.push(text.to_string());
        }
        fn set_game_over_visible(&mut self, visible: bool) {
            self.0.borrow_mut().overlay.push(visible);
        }
    }

    impl SceneLoader for SharedHud {
        fn load_scene(&mut self, index: usize) {
            self.0.borrow_mut().loads.push(index);
        }
    }

    fn quiet_config(asteroids: u32) -> GameConfig {
        GameConfig {
            gameplay: GameplayConfig {
                initial_asteroid_count: asteroids,
                ..GameplayConfig::default()
            },
            ..GameConfig::default()
        }
    }

    fn session(asteroids: u32) -> (AsteraX, SharedHud) {
        let hud = SharedHud::default();
        let mut game = AsteraX::new(quiet_config(asteroids))
            .unwrap()
            .with_hud(Box::new(hud.clone()))
            .with_scene_loader(Box::new(hud.clone()))
            .with_seed(42);
        game.initialize().unwrap();
        (game, hud)
    }

    #[test]
    fn test_initialize_enters_level_once() {
        let (mut game, hud) = session(3);
        assert_eq!(game.state(), GameState::Level);
        assert_eq!(game.controller().asteroids().len(), 21);
        assert_eq!(game.top_level_asteroids().len(), 3);
        assert_eq!(hud.0.borrow().jumps, vec!["Jumps: 3"]);

        assert!(matches!(game.initialize(), Err(GameError::AlreadyInitialized)));
        assert_eq!(game.controller().asteroids().len(), 21);
    }

    #[test]
    fn test_tick_before_initialize_fails() {
        let mut game = AsteraX::new(GameConfig::default()).unwrap();
        let input = InputManager::new();
        assert!(matches!(game.tick(0.1, &input), Err(GameError::NotInitialized)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = GameConfig::default();
        config.respawn.spawn_area_fraction = 2.0;
        assert!(matches!(AsteraX::new(config), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_consume_jump_parks_and_schedules_respawn() {
        let (mut game, _hud) = session(0);

        let outcome = game.consume_jump().unwrap();
        let JumpOutcome::Respawning(search) = outcome else {
            panic!("expected a respawn, got {outcome:?}");
        };
        assert!(search.safe);
        assert_eq!(game.ship().position, parked_position());
        assert!(!game.ship().wrap.enabled);
        assert_eq!(game.pending_tasks(), 1);

        let input = InputManager::new();
        game.tick(1.0, &input).unwrap();
        assert!(game.ship().is_respawning());

        game.tick(1.0, &input).unwrap();
        assert!(!game.ship().is_respawning());
        assert!(game.ship().wrap.enabled);
        assert_eq!(game.ship().position, search.point);
        assert_eq!(game.stats().respawns_completed, 1);
    }

    #[test]
    fn test_second_hit_replaces_pending_respawn() {
        let config = GameConfig {
            gameplay: GameplayConfig {
                max_jumps: 5,
                initial_asteroid_count: 0,
                ..GameplayConfig::default()
            },
            ..GameConfig::default()
        };
        let mut game = AsteraX::new(config).unwrap().with_seed(5);
        game.initialize().unwrap();

        game.consume_jump().unwrap();
        let JumpOutcome::Respawning(second) = game.consume_jump().unwrap() else {
            panic!("expected a respawn");
        };
        assert_eq!(game.pending_tasks(), 1);

        let input = InputManager::new();
        game.tick(2.5, &input).unwrap();
        assert_eq!(game.ship().position, second.point);
        assert_eq!(game.stats().respawns_started, 2);
        assert_eq!(game.stats().respawns_completed, 1);
    }

    #[test]
    fn test_last_jump_ends_game_and_cancels_respawn() {
        let (mut game, hud) = session(0);
        game.add_score(250).unwrap();

        assert!(matches!(game.consume_jump().unwrap(), JumpOutcome::Respawning(_)));
        assert!(matches!(game.consume_jump().unwrap(), JumpOutcome::Respawning(_)));
        assert_eq!(game.consume_jump().unwrap(), JumpOutcome::GameOver);
        assert_eq!(game.consume_jump().unwrap(), JumpOutcome::Ignored);

        assert_eq!(game.state(), GameState::GameOver);
        assert!(!game.ship().is_active());
        // Only the reload is left
        assert_eq!(game.pending_tasks(), 1);
        assert_eq!(hud.0.borrow().info, vec!["Score: 250"]);
        assert_eq!(hud.0.borrow().jumps, vec!["Jumps: 3", "Jumps: 2", "Jumps: 1", "Jumps: 0"]);

        assert_eq!(game.add_score(100).unwrap(), 250);
        assert!(!game.end_game().unwrap());
    }

    #[test]
    fn test_reload_restarts_session() {
        let (mut game, hud) = session(2);
        for _ in 0..3 {
            game.consume_jump().unwrap();
        }
        let input = InputManager::new();

        game.tick(3.9, &input).unwrap();
        assert_eq!(game.state(), GameState::GameOver);
        assert!(hud.0.borrow().loads.is_empty());

        game.tick(0.2, &input).unwrap();
        assert_eq!(hud.0.borrow().loads, vec![0]);
        assert_eq!(game.state(), GameState::Level);
        assert_eq!(game.score(), 0);
        assert_eq!(game.ship().jumps(), 3);
        assert!(game.ship().in_play());
        assert_eq!(game.top_level_asteroids().len(), 2);
        assert_eq!(game.stats().scene_reloads, 1);
    }

    #[test]
    fn test_bullet_hit_scores_and_releases_fragments() {
        let (mut game, hud) = session(1);
        let root = game.controller().asteroids()[0];
        let fragment = game.field().get(root).unwrap().children[0];
        let bullet = game.fire(Vec3::new(1.0, 0.0, 0.0)).unwrap().unwrap();

        // Hitting a fragment destroys the compound it belongs to
        let hit = CollisionEvent::BulletHitAsteroid { bullet, asteroid: fragment };
        game.on_collision(hit).unwrap();

        assert_eq!(game.score(), 100);
        assert_eq!(hud.0.borrow().score.last().unwrap(), "Score: 100");
        assert!(!game.controller().is_registered(root));
        assert!(game.field().get(fragment).unwrap().is_top_level());
        assert_eq!(game.top_level_asteroids().len(), 2);
        assert_eq!(game.bullets().count(), 0);

        // The bullet is spent
        let hit = CollisionEvent::BulletHitAsteroid { bullet, asteroid: fragment };
        game.on_collision(hit).unwrap();
        assert_eq!(game.score(), 100);
    }

    #[test]
    fn test_ship_hit_costs_a_jump_without_points() {
        let (mut game, _hud) = session(1);
        let root = game.controller().asteroids()[0];

        game.on_collision(CollisionEvent::ShipHitAsteroid(root)).unwrap();
        assert_eq!(game.ship().jumps(), 2);
        assert_eq!(game.score(), 0);
        assert!(game.ship().is_respawning());

        // Parked ships do not collide
        let other = game.top_level_asteroids().len();
        let fragment = game.controller().asteroids()[0];
        game.on_collision(CollisionEvent::ShipHitAsteroid(fragment)).unwrap();
        assert_eq!(game.ship().jumps(), 2);
        assert_eq!(game.top_level_asteroids().len(), other);
    }

    #[test]
    fn test_fire_button_spawns_bullet_toward_cursor() {
        let (mut game, _hud) = session(0);
        let mut input = InputManager::new();
        // Right edge, vertical middle of the default 1280x720 viewport
        input.handle_cursor_move(1280.0, 360.0);
        input.handle_button(Button::Fire1, true);

        game.tick(0.0, &input).unwrap();

        let bullets: Vec<_> = game.bullets().collect();
        assert_eq!(bullets.len(), 1);
        assert!(bullets[0].1.velocity.x > 0.0);
        assert!(bullets[0].1.velocity.y.abs() < 1e-3);
    }

    #[test]
    fn test_operations_before_initialize_leave_session_untouched() {
        let mut game = AsteraX::new(quiet_config(0)).unwrap().with_seed(8);

        assert!(matches!(game.end_game(), Err(GameError::NotInitialized)));
        assert!(matches!(game.consume_jump(), Err(GameError::NotInitialized)));
        assert!(matches!(game.add_score(500), Err(GameError::NotInitialized)));
        assert!(matches!(game.fire(Vec3::x()), Err(GameError::NotInitialized)));
        assert!(matches!(game.spawn_initial_asteroids(2), Err(GameError::NotInitialized)));
        assert!(game.ship().is_active());
        assert_eq!(game.pending_tasks(), 0);

        game.initialize().unwrap();
        assert_eq!(game.state(), GameState::Level);
        assert_eq!(game.score(), 0);
        assert_eq!(game.ship().jumps(), 3);
        assert!(game.field().is_empty());
    }

    #[test]
    fn test_game_still_ends_on_last_jump_after_early_end_game() {
        let mut game = AsteraX::new(quiet_config(0)).unwrap().with_seed(9);
        assert!(game.end_game().is_err());
        game.initialize().unwrap();

        let outcomes: Vec<_> = (0..3).map(|_| game.consume_jump().unwrap()).collect();
        assert_eq!(outcomes[2], JumpOutcome::GameOver);
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn test_rejected_end_game_keeps_ship_in_play() {
        let (mut game, hud) = session(0);
        // Force the controller out of the level without touching the ship
        game.controller = GameController::new();

        let err = game.end_game().unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidTransition { from: GameState::MainMenu, to: GameState::GameOver }
        ));
        assert!(game.ship().in_play());
        assert_eq!(game.pending_tasks(), 0);
        assert_eq!(hud.0.borrow().overlay, vec![false]);
    }

    #[test]
    fn test_bad_delta_time_does_not_rewind_bodies() {
        let (mut game, _hud) = session(0);
        let bullet = game.fire(Vec3::new(0.0, 1.0, 0.0)).unwrap().unwrap();
        let input = InputManager::new();

        game.tick(-1.0, &input).unwrap();
        game.tick(f32::NAN, &input).unwrap();

        let (_, after) = game.bullets().find(|(id, _)| *id == bullet).unwrap();
        assert_eq!(after.position, Vec3::zeros());
        assert_eq!(after.lifetime, game.config().gameplay.bullet_lifetime);
        assert_eq!(game.time(), 0.0);
    }
}
