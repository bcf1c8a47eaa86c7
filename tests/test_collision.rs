use pigeons::collision::*;
use pigeons::config::GRAVITY;
use pigeons::entities::*;

fn stone_at(x: f64, y: f64) -> Projectile {
    let mut p = Projectile::launch((0.0, 0.0), 45, 50, GRAVITY, 1.0);
    p.x = x;
    p.y = y;
    p
}

fn regular(x: f64, y: f64) -> Bird {
    Bird::new(x, y, 3.0, BirdKind::Regular)
}

fn carrier(x: f64, y: f64) -> Bird {
    Bird::new(x, y, 3.0, BirdKind::PowerUp(PowerUpKind::DoublePoints))
}

#[test]
fn footprint_depends_on_kind() {
    assert_eq!(
        footprint(&regular(100.0, 200.0)),
        Footprint {
            cx: 125.0,
            cy: 220.0,
            radius: 28.0
        }
    );
    assert_eq!(
        footprint(&carrier(100.0, 200.0)),
        Footprint {
            cx: 140.0,
            cy: 240.0,
            radius: 40.0
        }
    );
}

#[test]
fn check_hits_inside_radius() {
    let bird = regular(100.0, 200.0);
    assert!(check(&stone_at(125.0, 220.0), &bird));
    assert!(check(&stone_at(125.0 + 27.9, 220.0), &bird));
}

#[test]
fn check_misses_on_or_past_radius() {
    let bird = regular(100.0, 200.0);
    assert!(!check(&stone_at(125.0 + 28.0, 220.0), &bird));
    assert!(!check(&stone_at(125.0 + 20.0, 220.0 + 20.0), &bird));
}

#[test]
fn power_up_birds_are_easier_to_hit() {
    // 35 units from the footprint centre of each kind
    let regular_bird = regular(100.0, 200.0);
    let carrier_bird = carrier(100.0, 200.0);
    assert!(!check(&stone_at(125.0 + 35.0, 220.0), &regular_bird));
    assert!(check(&stone_at(140.0 + 35.0, 240.0), &carrier_bird));
}

#[test]
fn resolve_pairs_each_stone_with_first_overlapping_bird() {
    let birds = vec![regular(100.0, 200.0), regular(100.0, 200.0)];
    let stones = vec![stone_at(125.0, 220.0), stone_at(126.0, 221.0)];
    let hits = resolve(&stones, &birds);
    assert_eq!(
        hits,
        vec![
            Hit {
                projectile: 0,
                bird: 0
            },
            Hit {
                projectile: 1,
                bird: 1
            },
        ]
    );
}

#[test]
fn resolve_uses_list_order_not_distance() {
    // The stone sits right on bird 1 but also overlaps bird 0.
    let birds = vec![regular(110.0, 200.0), regular(100.0, 200.0)];
    let stones = vec![stone_at(125.0, 220.0)];
    let hits = resolve(&stones, &birds);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].bird, 0);
}

#[test]
fn resolve_bird_cannot_be_hit_twice() {
    let birds = vec![regular(100.0, 200.0)];
    let stones = vec![stone_at(125.0, 220.0), stone_at(125.0, 220.0)];
    let hits = resolve(&stones, &birds);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].projectile, 0);
}

#[test]
fn resolve_empty_when_nothing_overlaps() {
    let birds = vec![regular(900.0, 100.0)];
    let stones = vec![stone_at(200.0, 600.0)];
    assert!(resolve(&stones, &birds).is_empty());
    assert!(resolve(&[], &birds).is_empty());
    assert!(resolve(&stones, &[]).is_empty());
}
