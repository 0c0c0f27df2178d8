//! Asteroid field
//!
//! Owns every asteroid body. A parent of size `n > 1` carries smaller
//! fragments attached at fixed offsets; they ride along with it until the
//! parent is destroyed, at which point they break loose as top-level
//! asteroids of their own.

use asterax_engine::foundation::math::Vec3;
use asterax_engine::physics::{self, PlayArea};
use rand::Rng;
use slotmap::SlotMap;

use crate::components::{Asteroid, AsteroidId, AsteroidMotion};
use crate::config::AsteroidsConfig;
use crate::error::GameError;

/// Result of destroying an asteroid
#[derive(Debug, Clone, PartialEq)]
pub struct Destroyed {
    /// The asteroid that was removed (the top-level ancestor of the one hit)
    pub id: AsteroidId,
    /// Its size, for scoring
    pub size: u32,
    /// Where it was
    pub position: Vec3,
    /// Fragments that broke loose and are now top-level
    pub released: Vec<AsteroidId>,
}

/// Storage for all asteroids in the level
#[derive(Debug, Default)]
pub struct AsteroidField {
    asteroids: SlotMap<AsteroidId, Asteroid>,
}

impl AsteroidField {
    /// Create an empty field
    pub fn new() -> Self {
        Self {
            asteroids: SlotMap::with_key(),
        }
    }

    /// Spawn a top-level asteroid of `size` at `position` with a random launch
    /// velocity, plus its attached fragments
    ///
    /// Returns every id created, the parent first.
    pub fn spawn_parent<R: Rng>(
        &mut self,
        position: Vec3,
        size: u32,
        config: &AsteroidsConfig,
        rng: &mut R,
    ) -> Vec<AsteroidId> {
        let velocity = random_launch_velocity(config, rng);
        let root = self.asteroids.insert(Asteroid::new(position, velocity, size.max(1)));

        let mut created = vec![root];
        self.attach_fragments(root, config, rng, &mut created);
        created
    }

    fn attach_fragments<R: Rng>(
        &mut self,
        parent_id: AsteroidId,
        config: &AsteroidsConfig,
        rng: &mut R,
        created: &mut Vec<AsteroidId>,
    ) {
        let Some(parent) = self.asteroids.get(parent_id) else {
            return;
        };
        if parent.size <= 1 {
            return;
        }
        let (parent_position, parent_velocity, parent_size) =
            (parent.position, parent.velocity, parent.size);

        for _ in 0..config.children_per_split {
            #[allow(clippy::cast_precision_loss)]
            let spread = parent_size as f32 * config.radius_per_size * 0.5;
            let offset = random_planar_direction(rng) * spread;
            let mut child =
                Asteroid::new(parent_position + offset, parent_velocity, parent_size - 1);
            child.parent = Some(parent_id);
            child.offset = offset;

            let child_id = self.asteroids.insert(child);
            if let Some(parent) = self.asteroids.get_mut(parent_id) {
                parent.children.push(child_id);
            }
            created.push(child_id);
            self.attach_fragments(child_id, config, rng, created);
        }
    }

    /// Look up an asteroid
    pub fn get(&self, id: AsteroidId) -> Option<&Asteroid> {
        self.asteroids.get(id)
    }

    /// Whether `id` refers to a live asteroid
    pub fn contains(&self, id: AsteroidId) -> bool {
        self.asteroids.contains_key(id)
    }

    /// Number of live asteroids, fragments included
    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    /// Whether the field is empty
    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    /// Iterate every asteroid
    pub fn iter(&self) -> impl Iterator<Item = (AsteroidId, &Asteroid)> {
        self.asteroids.iter()
    }

    /// Ids of asteroids not attached to a parent
    pub fn top_level_ids(&self) -> Vec<AsteroidId> {
        self.asteroids
            .iter()
            .filter(|(_, asteroid)| asteroid.is_top_level())
            .map(|(id, _)| id)
            .collect()
    }

    /// Motion snapshot of `id` if it is live and top-level
    pub fn top_level_motion(&self, id: AsteroidId) -> Option<AsteroidMotion> {
        self.asteroids
            .get(id)
            .filter(|asteroid| asteroid.is_top_level())
            .map(|asteroid| AsteroidMotion::new(asteroid.position, asteroid.velocity))
    }

    /// Walk up the parent chain to the top-level ancestor
    pub fn root_of(&self, id: AsteroidId) -> Option<AsteroidId> {
        let mut current = id;
        loop {
            match self.asteroids.get(current)?.parent {
                Some(parent) => current = parent,
                None => return Some(current),
            }
        }
    }

    /// Overwrite position and velocity from the host's physics
    pub fn set_motion(
        &mut self,
        id: AsteroidId,
        position: Vec3,
        velocity: Vec3,
    ) -> Result<(), GameError> {
        let asteroid = self.asteroids.get_mut(id).ok_or(GameError::UnknownAsteroid)?;
        asteroid.position = position;
        asteroid.velocity = velocity;
        Ok(())
    }

    /// Destroy the top-level asteroid that `id` belongs to
    ///
    /// Its direct fragments become top-level with fresh launch velocities.
    pub fn destroy<R: Rng>(
        &mut self,
        id: AsteroidId,
        config: &AsteroidsConfig,
        rng: &mut R,
    ) -> Result<Destroyed, GameError> {
        let root = self.root_of(id).ok_or(GameError::UnknownAsteroid)?;
        let removed = self.asteroids.remove(root).ok_or(GameError::UnknownAsteroid)?;

        for &child_id in &removed.children {
            if let Some(child) = self.asteroids.get_mut(child_id) {
                child.parent = None;
                child.offset = Vec3::zeros();
                child.velocity = random_launch_velocity(config, rng);
            }
        }

        Ok(Destroyed {
            id: root,
            size: removed.size,
            position: removed.position,
            released: removed.children,
        })
    }

    /// Move every asteroid one step: top-level bodies drift and wrap,
    /// fragments follow their parents
    pub fn advance(&mut self, delta_time: f32, bounds: &PlayArea) {
        let roots = self.top_level_ids();
        for root in roots {
            if let Some(asteroid) = self.asteroids.get_mut(root) {
                let moved = physics::integrate(asteroid.position, asteroid.velocity, delta_time);
                asteroid.position = bounds.wrap(moved);
            }
            self.carry_fragments(root);
        }
    }

    fn carry_fragments(&mut self, parent_id: AsteroidId) {
        let Some(parent) = self.asteroids.get(parent_id) else {
            return;
        };
        let (position, velocity, children) =
            (parent.position, parent.velocity, parent.children.clone());

        for child_id in children {
            if let Some(child) = self.asteroids.get_mut(child_id) {
                child.position = position + child.offset;
                child.velocity = velocity;
            }
            self.carry_fragments(child_id);
        }
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.asteroids.clear();
    }
}

/// Random direction in the XY plane times a speed from the configured range
pub fn random_launch_velocity<R: Rng>(config: &AsteroidsConfig, rng: &mut R) -> Vec3 {
    let speed = if config.max_velocity > config.min_velocity {
        rng.gen_range(config.min_velocity..=config.max_velocity)
    } else {
        config.min_velocity
    };
    random_planar_direction(rng) * speed
}

fn random_planar_direction<R: Rng>(rng: &mut R) -> Vec3 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    Vec3::new(angle.cos(), angle.sin(), 0.0)
}
