/// Game entities and their per-tick rules.
///
/// Positions are play-field pixels with the origin at the top-left and `y`
/// growing downwards.  An entity is alive exactly as long as it sits in its
/// owning collection; there is no separate alive flag.

use rand::Rng;

use crate::collision::{Bounded, Rect};
use crate::config::FirePolicy;

// ── Field & sprite geometry ───────────────────────────────────────────────────

pub const FIELD_WIDTH: i32 = 800;
pub const FIELD_HEIGHT: i32 = 600;

pub const PLAYER_SIZE: i32 = 40;
pub const PLAYER_SPAWN_X: i32 = 400;
pub const PLAYER_SPAWN_Y: i32 = 500;
pub const PLAYER_STEP: i32 = 10;
pub const PLAYER_MIN_X: i32 = 0;
pub const PLAYER_MAX_X: i32 = 700;

/// Used for both collision and drawing.
pub const ALIEN_SIZE: i32 = 30;

pub const BULLET_SIZE: i32 = 5;
pub const BULLET_SPEED: i32 = 5;

pub const OBSTACLE_COUNT: usize = 5;
pub const OBSTACLE_SIZE: i32 = 50;
pub const OBSTACLE_Y: i32 = 400;
/// Obstacle x is drawn from `0..OBSTACLE_MAX_X`.
pub const OBSTACLE_MAX_X: i32 = 750;
/// Hits an obstacle absorbs before it is destroyed.
pub const OBSTACLE_DURABILITY: u32 = 5;

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Alien,
}

impl BulletOwner {
    /// Vertical unit step: player shots climb, alien shots fall.
    pub fn direction(self) -> i32 {
        match self {
            BulletOwner::Player => -1,
            BulletOwner::Alien => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    owner: BulletOwner,
}

impl Bullet {
    pub fn new(x: i32, y: i32, owner: BulletOwner) -> Self {
        Bullet { x, y, owner }
    }

    pub fn owner(&self) -> BulletOwner {
        self.owner
    }

    pub fn direction(&self) -> i32 {
        self.owner.direction()
    }

    pub fn update(&mut self) {
        self.y += self.direction() * BULLET_SPEED;
    }

    pub fn above_field(&self) -> bool {
        self.y < 0
    }

    pub fn below_field(&self) -> bool {
        self.y > FIELD_HEIGHT
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_SIZE, BULLET_SIZE)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    /// Shots in flight, exclusively owned by the player.
    pub bullets: Vec<Bullet>,
    /// Simulation time of the last accepted shot, or of the spawn.
    last_shot_ms: u64,
}

impl Player {
    /// The fire cooldown starts running at `spawned_at_ms`.
    pub fn new(x: i32, y: i32, spawned_at_ms: u64) -> Self {
        Player {
            x: x.clamp(PLAYER_MIN_X, PLAYER_MAX_X),
            y,
            bullets: Vec::new(),
            last_shot_ms: spawned_at_ms,
        }
    }

    pub fn spawn(now_ms: u64) -> Self {
        Player::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y, now_ms)
    }

    pub fn move_left(&mut self) {
        self.x = (self.x - PLAYER_STEP).max(PLAYER_MIN_X);
    }

    pub fn move_right(&mut self) {
        self.x = (self.x + PLAYER_STEP).min(PLAYER_MAX_X);
    }

    /// Fire from the top-centre of the ship once more than `cooldown_ms`
    /// has passed since the last shot (or the spawn).  Returns whether a
    /// bullet was created.
    pub fn fire(&mut self, now_ms: u64, cooldown_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_shot_ms) <= cooldown_ms {
            return false;
        }
        self.bullets.push(Bullet::new(
            self.x + PLAYER_SIZE / 2,
            self.y,
            BulletOwner::Player,
        ));
        self.last_shot_ms = now_ms;
        true
    }

    /// Advance every owned bullet one step and drop the ones that left the
    /// top of the field.
    pub fn update(&mut self) {
        for bullet in &mut self.bullets {
            bullet.update();
        }
        self.bullets.retain(|b| !b.above_field());
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_SIZE, PLAYER_SIZE)
    }
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Alien {
    pub x: i32,
    pub y: i32,
    /// `1` = right, `-1` = left.  Kept equal to the formation direction.
    pub direction: i32,
    /// Shots in flight; they disappear together with the alien.
    pub bullets: Vec<Bullet>,
    /// Updates left before the alien may fire again.
    cooldown_ticks: u32,
    last_shot_ms: u64,
    fire_delay_ms: u64,
}

impl Alien {
    /// `spawned_at_ms` counts as the last shot, so a fresh alien first waits
    /// `fire_delay_ms` before shooting.
    pub fn new(x: i32, y: i32, spawned_at_ms: u64, fire_delay_ms: u64) -> Self {
        Alien {
            x,
            y,
            direction: 1,
            bullets: Vec::new(),
            cooldown_ticks: 0,
            last_shot_ms: spawned_at_ms,
            fire_delay_ms,
        }
    }

    /// Negative means left; anything else means right.
    pub fn with_direction(mut self, direction: i32) -> Self {
        self.direction = if direction < 0 { -1 } else { 1 };
        self
    }

    pub fn fire_delay_ms(&self) -> u64 {
        self.fire_delay_ms
    }

    /// Step sideways, then shoot if both the tick cooldown and the sampled
    /// delay have run out.  Returns whether a bullet was created.
    pub fn update(&mut self, now_ms: u64, policy: &FirePolicy, rng: &mut impl Rng) -> bool {
        self.x += self.direction;

        let ready = self.cooldown_ticks == 0
            && now_ms.saturating_sub(self.last_shot_ms) > self.fire_delay_ms;
        if ready {
            self.bullets.push(Bullet::new(
                self.x + ALIEN_SIZE / 2,
                self.y + ALIEN_SIZE,
                BulletOwner::Alien,
            ));
            self.last_shot_ms = now_ms;
            self.fire_delay_ms = policy.sample_delay(rng);
            self.cooldown_ticks = policy.cooldown_ticks;
        }

        self.cooldown_ticks = self.cooldown_ticks.saturating_sub(1);
        ready
    }

    /// Drop one row and turn around.
    pub fn move_down(&mut self, step: i32) {
        self.y += step;
        self.direction = -self.direction;
    }
}

impl Bounded for Alien {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, ALIEN_SIZE, ALIEN_SIZE)
    }
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    hits: u32,
}

impl Obstacle {
    pub fn new(x: i32) -> Self {
        Obstacle {
            x,
            y: OBSTACLE_Y,
            hits: 0,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Obstacle::new(rng.gen_range(0..OBSTACLE_MAX_X))
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Record one hit.  Returns `true` on the hit that destroys it.
    pub fn hit(&mut self) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.hits += 1;
        self.is_destroyed()
    }

    pub fn is_destroyed(&self) -> bool {
        self.hits >= OBSTACLE_DURABILITY
    }
}

impl Bounded for Obstacle {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, OBSTACLE_SIZE, OBSTACLE_SIZE)
    }
}
