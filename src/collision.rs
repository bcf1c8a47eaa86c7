//! Stone-vs-bird hit testing.

use crate::entities::{Bird, BirdKind, Projectile};

/// Circular collision boundary of a bird.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

/// Regular birds are a 50×40 sprite; power-up birds an 80×80 badge.
pub fn footprint(bird: &Bird) -> Footprint {
    match bird.kind {
        BirdKind::Regular => Footprint {
            cx: bird.x + 25.0,
            cy: bird.y + 20.0,
            radius: 28.0,
        },
        BirdKind::PowerUp(_) => Footprint {
            cx: bird.x + 40.0,
            cy: bird.y + 40.0,
            radius: 40.0,
        },
    }
}

pub fn check(projectile: &Projectile, bird: &Bird) -> bool {
    let fp = footprint(bird);
    let distance = (projectile.x - fp.cx).hypot(projectile.y - fp.cy);
    distance < fp.radius
}

/// A resolved hit, as indices into the slices given to [`resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub projectile: usize,
    pub bird: usize,
}

/// Pair stones with birds for this tick.
///
/// Stones are walked in order and each takes the first bird it overlaps, so a
/// stone downs at most one bird and ties go to list order, not distance. A
/// bird taken by an earlier stone is no longer available.
pub fn resolve(projectiles: &[Projectile], birds: &[Bird]) -> Vec<Hit> {
    let mut taken = vec![false; birds.len()];
    let mut hits = Vec::new();

    for (pi, projectile) in projectiles.iter().enumerate() {
        for (bi, bird) in birds.iter().enumerate() {
            if !taken[bi] && check(projectile, bird) {
                taken[bi] = true;
                hits.push(Hit {
                    projectile: pi,
                    bird: bi,
                });
                break;
            }
        }
    }

    hits
}
