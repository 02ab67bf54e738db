/// Tunable game rules, loadable from a RON file.
///
/// Geometry (field size, sprite sizes, spawn points) is fixed in
/// [`crate::entities`]; only timing and scoring live here.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Validation(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

// ── Alien firing policy ───────────────────────────────────────────────────────

/// How often aliens shoot back.
///
/// After each shot an alien waits a delay drawn uniformly from
/// `min_delay_ms..=max_delay_ms`, and additionally cannot fire again for
/// `cooldown_ticks` updates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirePolicy {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub cooldown_ticks: u32,
}

impl Default for FirePolicy {
    fn default() -> Self {
        FirePolicy {
            min_delay_ms: 2000,
            max_delay_ms: 4000,
            cooldown_ticks: 100,
        }
    }
}

impl FirePolicy {
    /// A policy with no randomness: every delay is exactly `delay_ms`.
    pub fn fixed(delay_ms: u64, cooldown_ticks: u32) -> Self {
        FirePolicy {
            min_delay_ms: delay_ms,
            max_delay_ms: delay_ms,
            cooldown_ticks,
        }
    }

    pub fn sample_delay(&self, rng: &mut impl Rng) -> u64 {
        if self.min_delay_ms >= self.max_delay_ms {
            return self.min_delay_ms;
        }
        rng.gen_range(self.min_delay_ms..=self.max_delay_ms)
    }
}

// ── Game configuration ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Simulated milliseconds per tick; also the shell's frame interval.
    pub tick_ms: u64,
    /// Minimum time between two player shots.
    pub player_fire_cooldown_ms: u64,
    pub alien_fire: FirePolicy,
    pub starting_lives: u32,
    pub score_per_alien: u32,
    /// Seed for the shell's RNG.  `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tick_ms: 10,
            player_fire_cooldown_ms: 4000,
            alien_fire: FirePolicy::default(),
            starting_lives: 3,
            score_per_alien: 10,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::Validation("tick_ms must be positive".into()));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Validation(
                "starting_lives must be at least 1".into(),
            ));
        }
        if self.alien_fire.min_delay_ms > self.alien_fire.max_delay_ms {
            return Err(ConfigError::Validation(format!(
                "alien_fire.min_delay_ms ({}) exceeds max_delay_ms ({})",
                self.alien_fire.min_delay_ms, self.alien_fire.max_delay_ms
            )));
        }
        Ok(())
    }
}
