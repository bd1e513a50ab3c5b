//! Random ground placement for scenery and billboards.
//!
//! Positions are drawn independently and uniformly over a square centered on
//! the origin. There is no separation between placed items: two trees, or a
//! tree and a billboard, may overlap. Only the optional exclusion disc around
//! the origin is kept clear.

use glam::Vec2;
use rand::prelude::*;

/// Redraws allowed per item before an excluded position is accepted anyway.
const MAX_EXCLUSION_REDRAWS: usize = 32;

/// Draw `count` ground positions as `(x, z)` pairs.
///
/// Each coordinate is uniform in `[-spread, spread)`. Positions closer than
/// `excluded_radius` to the origin are redrawn, up to a fixed number of
/// attempts, so an exclusion disc that covers the whole square cannot stall.
pub fn place<R: Rng + ?Sized>(rng: &mut R, count: usize, excluded_radius: f32, spread: f32) -> Vec<Vec2> {
    let spread = spread.abs();
    let excluded_sq = excluded_radius.max(0.0).powi(2);
    (0..count)
        .map(|_| {
            let mut p = draw(rng, spread);
            for _ in 0..MAX_EXCLUSION_REDRAWS {
                if p.length_squared() >= excluded_sq {
                    break;
                }
                p = draw(rng, spread);
            }
            p
        })
        .collect()
}

fn draw<R: Rng + ?Sized>(rng: &mut R, spread: f32) -> Vec2 {
    Vec2::new(
        (rng.gen::<f32>() - 0.5) * 2.0 * spread,
        (rng.gen::<f32>() - 0.5) * 2.0 * spread,
    )
}

/// Owns the random source for a session's placements.
#[derive(Debug)]
pub struct PlacementGenerator {
    rng: StdRng,
}

impl PlacementGenerator {
    /// Deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is given, otherwise from OS entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => {
                let seed = rand::thread_rng().gen();
                log::debug!("placement seed {}", seed);
                Self::seeded(seed)
            }
        }
    }

    /// See [`place`].
    pub fn place(&mut self, count: usize, excluded_radius: f32, spread: f32) -> Vec<Vec2> {
        place(&mut self.rng, count, excluded_radius, spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_positions() {
        let a = PlacementGenerator::seeded(42).place(30, 0.0, 40.0);
        let b = PlacementGenerator::seeded(42).place(30, 0.0, 40.0);
        assert_eq!(a.len(), 30);
        assert_eq!(a, b);
    }

    #[test]
    fn positions_stay_inside_square() {
        let points = PlacementGenerator::seeded(7).place(500, 0.0, 40.0);
        assert!(points.iter().all(|p| p.x.abs() <= 40.0 && p.y.abs() <= 40.0));
    }

    #[test]
    fn exclusion_disc_is_kept_clear() {
        let points = PlacementGenerator::seeded(3).place(500, 12.0, 40.0);
        assert!(points.iter().all(|p| p.length() >= 12.0));
    }

    #[test]
    fn impossible_exclusion_still_terminates() {
        let points = PlacementGenerator::seeded(3).place(10, 1000.0, 5.0);
        assert_eq!(points.len(), 10);
    }

    #[test]
    fn zero_count_and_zero_spread() {
        let mut generator = PlacementGenerator::seeded(1);
        assert!(generator.place(0, 0.0, 40.0).is_empty());
        assert!(generator.place(3, 0.0, 0.0).iter().all(|p| *p == Vec2::ZERO));
    }
}
