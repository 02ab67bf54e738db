use space_defense::collision::*;
use space_defense::entities::*;

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn overlapping_rects_intersect() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(5, 5, 10, 10);
    assert!(a.intersects(&b));
}

#[test]
fn contained_rect_intersects() {
    let outer = Rect::new(0, 0, 50, 50);
    let inner = Rect::new(10, 10, 5, 5);
    assert!(outer.intersects(&inner));
    assert!(inner.intersects(&outer));
}

#[test]
fn touching_edges_do_not_intersect() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
    assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
}

#[test]
fn overlap_on_one_axis_only_is_a_miss() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!a.intersects(&Rect::new(5, 20, 10, 10)));
    assert!(!a.intersects(&Rect::new(20, 5, 10, 10)));
}

#[test]
fn intersection_is_symmetric() {
    let probe = Rect::new(20, 20, 30, 30);
    for x in (0..80).step_by(7) {
        for y in (0..80).step_by(7) {
            for size in [1, 5, 40] {
                let other = Rect::new(x, y, size, size);
                assert_eq!(
                    intersects(&probe, &other),
                    intersects(&other, &probe),
                    "asymmetric at {:?}",
                    other
                );
            }
        }
    }
}

// ── Entity footprints ─────────────────────────────────────────────────────────

#[test]
fn entity_footprints_use_canonical_sizes() {
    assert_eq!(Player::spawn(0).bounds(), Rect::new(400, 500, 40, 40));
    assert_eq!(
        Alien::new(10, 20, 0, 0).bounds(),
        Rect::new(10, 20, ALIEN_SIZE, ALIEN_SIZE)
    );
    assert_eq!(
        Bullet::new(1, 2, BulletOwner::Player).bounds(),
        Rect::new(1, 2, 5, 5)
    );
    assert_eq!(Obstacle::new(7).bounds(), Rect::new(7, 400, 50, 50));
}

#[test]
fn player_and_alien_collide() {
    let player = Player::spawn(0);
    assert!(intersects(&player, &Alien::new(380, 480, 0, 0)));
    // Alien's bottom edge exactly on the player's top edge.
    assert!(!intersects(&player, &Alien::new(380, 470, 0, 0)));
}

#[test]
fn bullet_and_obstacle_collide() {
    let obstacle = Obstacle::new(100);
    assert!(intersects(&Bullet::new(120, 440, BulletOwner::Player), &obstacle));
    assert!(!intersects(&Bullet::new(150, 440, BulletOwner::Player), &obstacle));
    assert!(intersects(&Bullet::new(96, 396, BulletOwner::Alien), &obstacle));
}
