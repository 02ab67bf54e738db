/// The alien grid: spawning, edge detection and the synchronized
/// descend-and-reverse that produces the zig-zag sweep.

use rand::Rng;

use crate::config::FirePolicy;
use crate::entities::{Alien, ALIEN_SIZE, FIELD_WIDTH};

pub const GRID_ROWS: usize = 4;
pub const GRID_COLS: usize = 5;
pub const GRID_ORIGIN_X: i32 = 50;
pub const GRID_ORIGIN_Y: i32 = 50;
pub const GRID_SPACING_X: i32 = 100;
pub const GRID_SPACING_Y: i32 = 50;
/// Pixels the whole formation drops when it reaches a side of the field.
pub const DESCEND_STEP: i32 = 10;

/// Shared state of the alien formation.
#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    /// `1` = right, `-1` = left.
    pub direction: i32,
}

impl Default for Formation {
    fn default() -> Self {
        Formation { direction: 1 }
    }
}

impl Formation {
    /// A fresh row-major grid moving in this formation's direction.  Every
    /// alien gets its own first fire delay from `policy`.
    pub fn spawn_grid(&self, now_ms: u64, policy: &FirePolicy, rng: &mut impl Rng) -> Vec<Alien> {
        let mut aliens = Vec::with_capacity(GRID_ROWS * GRID_COLS);
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                let x = GRID_ORIGIN_X + col as i32 * GRID_SPACING_X;
                let y = GRID_ORIGIN_Y + row as i32 * GRID_SPACING_Y;
                aliens.push(
                    Alien::new(x, y, now_ms, policy.sample_delay(rng))
                        .with_direction(self.direction),
                );
            }
        }
        aliens
    }

    /// Whether `alien` has reached the side it is heading for.  The alien's
    /// own direction decides which side that is.
    ///
    /// Only the leading side counts, so an alien left sitting on an edge
    /// after a reversal does not flip the formation straight back.
    pub fn at_edge(alien: &Alien) -> bool {
        if alien.direction < 0 {
            alien.x <= 0
        } else {
            alien.x + ALIEN_SIZE >= FIELD_WIDTH
        }
    }

    /// Drop every alien by [`DESCEND_STEP`] and send the whole formation
    /// away from `heading`, the direction the edge alien was travelling.
    /// Each alien's stored direction is overwritten with the new shared one
    /// rather than flipped on its own.
    pub fn descend(&mut self, heading: i32, aliens: &mut [Alien]) {
        self.direction = if heading < 0 { 1 } else { -1 };
        for alien in aliens.iter_mut() {
            alien.move_down(DESCEND_STEP);
            alien.direction = self.direction;
        }
    }
}
