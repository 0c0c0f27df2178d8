//! Respawn point prediction
//!
//! Picks a place to put the ship back after it loses a jump. Each candidate
//! is checked against every top-level asteroid's current trajectory: the
//! ship is treated as stationary at the candidate, and the asteroid as
//! moving in a straight line with its current velocity.
//!
//! For relative position `p` (asteroid minus candidate) and relative velocity
//! `v`, the time of closest approach is `t = (p . v) / -|v|^2` and the
//! separation at that time is estimated as `|p| - |v| * t`. A candidate is
//! unsafe when that separation is under `min_separation` and `t` falls in
//! `0..=prediction_horizon`. A receding asteroid has `t < 0` and never
//! counts.

use asterax_engine::foundation::math::{Vec3, EPSILON_SQUARED};
use asterax_engine::physics::PlayArea;
use rand::Rng;

use crate::components::AsteroidMotion;
use crate::config::RespawnConfig;

/// Closest approach of one asteroid to a candidate point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approach {
    /// Time until closest approach; negative when the asteroid is receding
    pub time: f32,
    /// Estimated separation at that time
    pub min_separation: f32,
}

/// Outcome of a respawn point search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespawnSearch {
    /// Chosen point
    pub point: Vec3,
    /// Candidates tried, including the chosen one
    pub attempts: u32,
    /// `false` when attempts ran out and `point` is only the last candidate
    pub safe: bool,
}

/// Closest approach of an asteroid to a stationary point
///
/// Returns `None` when the relative speed is effectively zero; such an
/// asteroid never gets any closer.
pub fn closest_approach(relative_position: Vec3, relative_velocity: Vec3) -> Option<Approach> {
    let speed_squared = relative_velocity.magnitude_squared();
    if speed_squared < EPSILON_SQUARED {
        return None;
    }

    let time = relative_position.dot(&relative_velocity) / -speed_squared;
    let min_separation = relative_position.magnitude() - speed_squared.sqrt() * time;
    Some(Approach { time, min_separation })
}

/// Whether a single asteroid threatens a ship standing at `candidate`
pub fn threatens(candidate: Vec3, asteroid: &AsteroidMotion, config: &RespawnConfig) -> bool {
    closest_approach(asteroid.position - candidate, asteroid.velocity).is_some_and(|approach| {
        approach.min_separation < config.min_separation
            && approach.time >= 0.0
            && approach.time <= config.prediction_horizon
    })
}

/// Whether any asteroid threatens a ship standing at `candidate`
///
/// `asteroids` should hold top-level asteroids only; fragments move with
/// their parent and are covered by it.
pub fn is_unsafe(candidate: Vec3, asteroids: &[AsteroidMotion], config: &RespawnConfig) -> bool {
    asteroids.iter().any(|asteroid| threatens(candidate, asteroid, config))
}

/// Random candidate inside the central `spawn_area_fraction` of `bounds`
pub fn random_candidate<R: Rng>(bounds: &PlayArea, config: &RespawnConfig, rng: &mut R) -> Vec3 {
    let area = bounds.scaled(config.spawn_area_fraction);
    area.point_at(rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0))
}

/// Search for a respawn point no asteroid is about to hit
///
/// Tries at most `max_attempts` candidates (at least one). When every
/// candidate is unsafe the last one is returned with `safe == false`; the
/// caller takes the risk rather than the search looping forever.
pub fn find_safe_respawn_point<R: Rng>(
    asteroids: &[AsteroidMotion],
    bounds: &PlayArea,
    config: &RespawnConfig,
    rng: &mut R,
) -> RespawnSearch {
    let max_attempts = config.max_attempts.max(1);
    let mut point = Vec3::zeros();

    for attempt in 1..=max_attempts {
        point = random_candidate(bounds, config, rng);
        if !is_unsafe(point, asteroids, config) {
            log::debug!("Respawn point {:?} accepted after {} attempt(s)", point, attempt);
            return RespawnSearch { point, attempts: attempt, safe: true };
        }
        log::trace!("Respawn candidate {:?} rejected", point);
    }

    log::warn!(
        "No safe respawn point found in {} attempts, using {:?}",
        max_attempts,
        point
    );
    RespawnSearch { point, attempts: max_attempts, safe: false }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use asterax_engine::foundation::math::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> RespawnConfig {
        RespawnConfig::default()
    }

    #[test]
    fn test_head_on_approach() {
        // 5 units away, closing at 5 units/s: closest at t = 1
        let approach =
            closest_approach(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(approach.time, 1.0);
        assert_relative_eq!(approach.min_separation, 0.0);
    }

    #[test]
    fn test_receding_asteroid_has_negative_time() {
        let approach =
            closest_approach(Vec3::new(5.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0)).unwrap();
        assert!(approach.time < 0.0);

        let receding = AsteroidMotion::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0));
        assert!(!threatens(Vec3::zeros(), &receding, &config()));
    }

    #[test]
    fn test_stationary_asteroid_is_never_a_threat() {
        assert!(closest_approach(Vec3::new(0.1, 0.0, 0.0), Vec3::zeros()).is_none());

        // Even sitting right on the candidate
        let parked = AsteroidMotion::new(Vec3::new(1.0, 2.0, 0.0), Vec3::new(1e-6, 0.0, 0.0));
        assert!(!is_unsafe(Vec3::new(1.0, 2.0, 0.0), &[parked], &config()));
    }

    #[test]
    fn test_direct_hit_within_horizon_is_unsafe() {
        // Passes 0.1 units from the candidate at t = 1
        let candidate = Vec3::new(2.0, 3.0, 0.0);
        let asteroid =
            AsteroidMotion::new(candidate + Vec3::new(-4.0, 0.1, 0.0), Vec3::new(4.0, 0.0, 0.0));
        assert!(is_unsafe(candidate, &[asteroid], &config()));
    }

    #[test]
    fn test_hit_beyond_horizon_is_ignored() {
        // Closest approach at t = 10
        let asteroid = AsteroidMotion::new(Vec3::new(-10.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(!is_unsafe(Vec3::zeros(), &[asteroid], &config()));
    }

    #[test]
    fn test_wide_miss_is_safe() {
        // Crossing path far off to the side
        let asteroid = AsteroidMotion::new(Vec3::new(-3.0, 3.0, 0.0), Vec3::new(3.0, 0.0, 0.0));
        assert!(!is_unsafe(Vec3::zeros(), &[asteroid], &config()));
    }

    #[test]
    fn test_predicate_is_deterministic_and_translation_invariant() {
        let asteroids = [
            AsteroidMotion::new(Vec3::new(-4.0, 0.05, 0.0), Vec3::new(4.0, 0.0, 0.0)),
            AsteroidMotion::new(Vec3::new(6.0, 6.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            AsteroidMotion::new(Vec3::new(0.0, -8.0, 0.0), Vec3::new(0.0, 2.0, 0.0)),
        ];
        let candidates = [Vec3::zeros(), Vec3::new(3.0, -2.0, 0.0), Vec3::new(-5.0, 5.0, 0.0)];
        let shifts = [Vec3::new(10.0, -7.0, 0.0), Vec3::new(-3.5, 2.25, 1.0)];

        for candidate in candidates {
            let verdict = is_unsafe(candidate, &asteroids, &config());
            assert_eq!(verdict, is_unsafe(candidate, &asteroids, &config()));

            for shift in shifts {
                let moved: Vec<AsteroidMotion> = asteroids
                    .iter()
                    .map(|a| AsteroidMotion::new(a.position + shift, a.velocity))
                    .collect();
                assert_eq!(verdict, is_unsafe(candidate + shift, &moved, &config()));
            }
        }
        assert!(is_unsafe(Vec3::zeros(), &asteroids, &config()));
    }

    #[test]
    fn test_search_with_no_asteroids_accepts_first_candidate() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = PlayArea::centered(10.0, 10.0);
        let search = find_safe_respawn_point(&[], &bounds, &config(), &mut rng);

        assert!(search.safe);
        assert_eq!(search.attempts, 1);
        assert!(bounds.scaled(0.8).contains(search.point));
    }

    #[test]
    fn test_search_never_accepts_an_unsafe_point() {
        let bounds = PlayArea::centered(10.0, 10.0);
        // A wall of asteroids sweeping down on the left half of the area
        let asteroids: Vec<AsteroidMotion> = (0..40)
            .map(|i| {
                let x = -8.0 + i as f32 * 0.2;
                AsteroidMotion::new(Vec3::new(x, 9.0, 0.0), Vec3::new(0.0, -6.0, 0.0))
            })
            .collect();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let search = find_safe_respawn_point(&asteroids, &bounds, &config(), &mut rng);
            if search.safe {
                assert!(!is_unsafe(search.point, &asteroids, &config()));
            } else {
                assert_eq!(search.attempts, config().max_attempts);
            }
        }
    }

    #[test]
    fn test_search_terminates_when_everything_is_unsafe() {
        // Bounds collapse to one point, with an asteroid sitting on it and moving
        let bounds = PlayArea::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0));
        let asteroid = AsteroidMotion::new(Vec3::new(1.0, 1.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        let mut rng = StdRng::seed_from_u64(11);

        let search = find_safe_respawn_point(&[asteroid], &bounds, &config(), &mut rng);

        assert!(!search.safe);
        assert_eq!(search.attempts, 20);
        assert_relative_eq!(search.point, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_zero_attempts_still_returns_a_point() {
        let bounds = PlayArea::centered(5.0, 5.0);
        let config = RespawnConfig { max_attempts: 0, ..RespawnConfig::default() };
        let mut rng = StdRng::seed_from_u64(3);

        let search = find_safe_respawn_point(&[], &bounds, &config, &mut rng);
        assert_eq!(search.attempts, 1);
        assert!(search.safe);
    }
}
