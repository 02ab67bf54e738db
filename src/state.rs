/// Score and lives for one running game.
///
/// Exactly one instance exists per game; it is handed to the
/// [`crate::compute::Simulation`] at construction and only the simulation
/// mutates it.  Level clears never reset it.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    score: u32,
    lives: u32,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new(3)
    }
}

impl GameState {
    pub fn new(lives: u32) -> Self {
        GameState { score: 0, lives }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn increase_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Never goes below zero.
    pub fn decrease_lives(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Used when the run ends by contact rather than by running out of lives.
    pub fn exhaust_lives(&mut self) {
        self.lives = 0;
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_three_lives_and_no_score() {
        let s = GameState::default();
        assert_eq!(s.score(), 0);
        assert_eq!(s.lives(), 3);
    }

    #[test]
    fn lives_saturate_at_zero() {
        let mut s = GameState::new(1);
        s.decrease_lives();
        s.decrease_lives();
        assert_eq!(s.lives(), 0);
        assert!(s.is_out_of_lives());
    }

    #[test]
    fn score_accumulates() {
        let mut s = GameState::default();
        s.increase_score(10);
        s.increase_score(10);
        assert_eq!(s.score(), 20);
    }
}
