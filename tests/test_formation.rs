use space_defense::config::FirePolicy;
use space_defense::entities::Alien;
use space_defense::formation::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn alien_at(x: i32, direction: i32) -> Alien {
    Alien::new(x, 50, 0, u64::MAX).with_direction(direction)
}

// ── Grid spawn ────────────────────────────────────────────────────────────────

#[test]
fn spawn_grid_is_four_by_five() {
    let formation = Formation::default();
    let aliens = formation.spawn_grid(0, &FirePolicy::default(), &mut seeded_rng());
    assert_eq!(aliens.len(), 20);
    assert_eq!((aliens[0].x, aliens[0].y), (50, 50));
    assert_eq!((aliens[4].x, aliens[4].y), (450, 50));
    assert_eq!((aliens[5].x, aliens[5].y), (50, 100));
    assert_eq!((aliens[19].x, aliens[19].y), (450, 200));
    assert!(aliens.iter().all(|a| a.direction == 1));
}

#[test]
fn spawn_grid_samples_delays_from_policy() {
    let policy = FirePolicy {
        min_delay_ms: 2000,
        max_delay_ms: 4000,
        cooldown_ticks: 100,
    };
    let aliens = Formation::default().spawn_grid(0, &policy, &mut seeded_rng());
    assert!(aliens
        .iter()
        .all(|a| (2000..=4000).contains(&a.fire_delay_ms())));
}

// ── Edge detection ────────────────────────────────────────────────────────────

#[test]
fn left_edge_counts_only_when_moving_left() {
    assert!(Formation::at_edge(&alien_at(0, -1)));
    assert!(Formation::at_edge(&alien_at(-1, -1)));
    assert!(!Formation::at_edge(&alien_at(1, -1)));
    assert!(!Formation::at_edge(&alien_at(0, 1)));
}

#[test]
fn right_edge_counts_only_when_moving_right() {
    assert!(Formation::at_edge(&alien_at(770, 1)));
    assert!(Formation::at_edge(&alien_at(771, 1)));
    assert!(!Formation::at_edge(&alien_at(769, 1)));
    assert!(!Formation::at_edge(&alien_at(770, -1)));
}

// ── Descend ───────────────────────────────────────────────────────────────────

#[test]
fn descend_reverses_and_drops_everyone() {
    let mut formation = Formation { direction: -1 };
    let mut aliens = vec![alien_at(0, -1), alien_at(300, -1), alien_at(600, -1)];
    formation.descend(-1, &mut aliens);

    assert_eq!(formation.direction, 1);
    for a in &aliens {
        assert_eq!(a.y, 50 + DESCEND_STEP);
        assert_eq!(a.direction, 1);
    }
    assert_eq!(aliens[1].x, 300);
}

#[test]
fn descend_follows_edge_alien_not_stale_formation() {
    // Formation still says right, but the edge alien was heading left.
    let mut formation = Formation::default();
    let mut aliens = vec![alien_at(-1, -1), alien_at(300, -1)];
    formation.descend(aliens[0].direction, &mut aliens);

    assert_eq!(formation.direction, 1);
    assert!(aliens.iter().all(|a| a.direction == 1));
    assert!(!Formation::at_edge(&aliens[0]));
}

#[test]
fn descend_resyncs_stray_directions() {
    let mut formation = Formation { direction: 1 };
    let mut aliens = vec![alien_at(770, 1), alien_at(200, -1)];
    formation.descend(1, &mut aliens);
    assert_eq!(formation.direction, -1);
    assert!(aliens.iter().all(|a| a.direction == -1));
}
