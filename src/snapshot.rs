/// Read-only view of the simulation handed to the renderer after each tick.
///
/// Carries no renderer types: just the kind, position and size of every
/// live entity plus the HUD values.

use crate::compute::GameStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Alien,
    PlayerBullet,
    AlienBullet,
    Obstacle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub kind: EntityKind,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Drawn in order: obstacles, aliens and their shots, player shots,
    /// then the player.
    pub sprites: Vec<Sprite>,
    pub score: u32,
    pub lives: u32,
    pub status: GameStatus,
}

impl Snapshot {
    pub fn count(&self, kind: EntityKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}
