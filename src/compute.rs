/// The per-tick simulation.
///
/// [`Simulation::tick`] runs one step in a fixed order:
///
/// 1. player: apply queued input, advance player shots;
/// 2. obstacles absorb shots and crash into aliens;
/// 3. aliens move, fire, die to player shots, and the formation turns at
///    the field edges;
/// 4. an empty formation resets the level;
/// 5. player shots that left the field are swept;
/// 6. alien shots advance and may hit the player.
///
/// Removals in phases 2 and 3 are two-phase: scans only mark, and the
/// collections are compacted once the scan is over.  All randomness comes
/// through the injected `rng` so tests can seed it.

use rand::Rng;
use tracing::{debug, info};

use crate::collision::intersects;
use crate::config::{FirePolicy, GameConfig};
use crate::entities::{
    Alien, Obstacle, Player, ALIEN_SIZE, BULLET_SIZE, OBSTACLE_COUNT, OBSTACLE_SIZE, PLAYER_SIZE,
};
use crate::formation::Formation;
use crate::input::{Input, InputQueue};
use crate::snapshot::{EntityKind, Snapshot, Sprite};
use crate::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    /// An alien touched the player ship.
    AlienContact,
    /// An alien shot took the last life.
    OutOfLives,
}

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Aliens shot down by the player.
    pub aliens_destroyed: u32,
    /// Aliens that flew into an obstacle.
    pub aliens_crashed: u32,
    pub obstacles_destroyed: u32,
    /// Shots (either side) absorbed by obstacles.
    pub bullets_absorbed: u32,
    pub lives_lost: u32,
    pub descended: bool,
    pub level_cleared: bool,
    pub game_over: Option<GameOverCause>,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Every live entity.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub aliens: Vec<Alien>,
    pub obstacles: Vec<Obstacle>,
    pub formation: Formation,
}

impl World {
    /// A freshly populated level.
    pub fn spawn(now_ms: u64, policy: &FirePolicy, rng: &mut impl Rng) -> Self {
        let mut world = World::empty();
        world.reset_level(now_ms, policy, rng);
        world
    }

    /// Just the player at its spawn point, for hand-built scenarios.  The
    /// player counts as spawned at time 0.
    pub fn empty() -> Self {
        World {
            player: Player::spawn(0),
            aliens: Vec::new(),
            obstacles: Vec::new(),
            formation: Formation::default(),
        }
    }

    /// Fresh alien grid, fresh obstacles, player back at spawn with no
    /// shots in flight.
    pub fn reset_level(&mut self, now_ms: u64, policy: &FirePolicy, rng: &mut impl Rng) {
        self.formation = Formation::default();
        self.aliens = self.formation.spawn_grid(now_ms, policy, rng);
        self.obstacles.clear();
        for _ in 0..OBSTACLE_COUNT {
            self.obstacles.push(Obstacle::random(rng));
        }
        self.player = Player::spawn(now_ms);
    }

    pub fn alien_bullet_count(&self) -> usize {
        self.aliens.iter().map(|a| a.bullets.len()).sum()
    }
}

/// Drop every item whose flag in `doomed` is set.  `doomed` is indexed like
/// `items` as it was when the scan started.
fn compact<T>(items: &mut Vec<T>, doomed: &[bool]) {
    let mut flags = doomed.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

// ── Simulation ────────────────────────────────────────────────────────────────

pub struct Simulation {
    pub world: World,
    state: GameState,
    config: GameConfig,
    inputs: InputQueue,
    clock_ms: u64,
    ticks: u64,
    status: GameStatus,
}

impl Simulation {
    /// Start a game with a populated first level.
    pub fn new(config: GameConfig, state: GameState, rng: &mut impl Rng) -> Self {
        let world = World::spawn(0, &config.alien_fire, rng);
        Simulation::with_world(config, state, world)
    }

    pub fn with_world(config: GameConfig, state: GameState, world: World) -> Self {
        Simulation {
            world,
            state,
            config,
            inputs: InputQueue::default(),
            clock_ms: 0,
            ticks: 0,
            status: GameStatus::Playing,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// The score to report once the run has ended.
    pub fn final_score(&self) -> Option<u32> {
        self.is_over().then(|| self.state.score())
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Record an input for the next tick.  Ignored once the game is over.
    pub fn queue_input(&mut self, input: Input) {
        if !self.is_over() {
            self.inputs.push(input);
        }
    }

    /// Advance the game by one step.  A finished game does not change.
    pub fn tick(&mut self, rng: &mut impl Rng) -> TickReport {
        let mut report = TickReport::default();
        if self.is_over() {
            return report;
        }

        self.ticks += 1;
        self.clock_ms += self.config.tick_ms;
        let now = self.clock_ms;

        // ── 1. Player ────────────────────────────────────────────────────────
        self.update_player(now);

        // ── 2. Obstacles ─────────────────────────────────────────────────────
        self.resolve_obstacles(&mut report);

        // ── 3. Aliens & formation ────────────────────────────────────────────
        if let Some(cause) = self.update_aliens(now, rng, &mut report) {
            self.end_game(cause, &mut report);
            return report;
        }

        // ── 4. Level clear ───────────────────────────────────────────────────
        if self.world.aliens.is_empty() {
            self.world.reset_level(now, &self.config.alien_fire, rng);
            report.level_cleared = true;
            info!(
                score = self.state.score(),
                lives = self.state.lives(),
                tick = self.ticks,
                "level cleared"
            );
        }

        // ── 5. Player shots off the top ──────────────────────────────────────
        self.world.player.bullets.retain(|b| !b.above_field());

        // ── 6. Alien shots ───────────────────────────────────────────────────
        if let Some(cause) = self.update_alien_bullets(now, &mut report) {
            self.end_game(cause, &mut report);
        }

        report
    }

    fn update_player(&mut self, now: u64) {
        let player = &mut self.world.player;
        for input in self.inputs.drain() {
            match input {
                Input::MoveLeft => player.move_left(),
                Input::MoveRight => player.move_right(),
                Input::Fire => {
                    player.fire(now, self.config.player_fire_cooldown_ms);
                }
            }
        }
        player.update();
    }

    fn resolve_obstacles(&mut self, report: &mut TickReport) {
        let world = &mut self.world;
        let mut obstacle_doomed = vec![false; world.obstacles.len()];
        let mut alien_doomed = vec![false; world.aliens.len()];
        let mut shot_doomed = vec![false; world.player.bullets.len()];
        let mut alien_shot_doomed: Vec<Vec<bool>> = world
            .aliens
            .iter()
            .map(|a| vec![false; a.bullets.len()])
            .collect();

        for (oi, obstacle) in world.obstacles.iter_mut().enumerate() {
            for (bi, bullet) in world.player.bullets.iter().enumerate() {
                if obstacle.is_destroyed() {
                    break;
                }
                if !shot_doomed[bi] && intersects(&*obstacle, bullet) {
                    shot_doomed[bi] = true;
                    report.bullets_absorbed += 1;
                    obstacle.hit();
                }
            }

            for (ai, alien) in world.aliens.iter().enumerate() {
                if alien_doomed[ai] {
                    continue;
                }
                for (bi, bullet) in alien.bullets.iter().enumerate() {
                    if obstacle.is_destroyed() {
                        break;
                    }
                    if !alien_shot_doomed[ai][bi] && intersects(&*obstacle, bullet) {
                        alien_shot_doomed[ai][bi] = true;
                        report.bullets_absorbed += 1;
                        obstacle.hit();
                    }
                }
            }

            if obstacle.is_destroyed() {
                obstacle_doomed[oi] = true;
            } else {
                for (ai, alien) in world.aliens.iter().enumerate() {
                    if !alien_doomed[ai] && intersects(&*obstacle, alien) {
                        alien_doomed[ai] = true;
                        obstacle_doomed[oi] = true;
                        report.aliens_crashed += 1;
                    }
                }
            }

            if obstacle_doomed[oi] {
                report.obstacles_destroyed += 1;
            }
        }

        compact(&mut world.player.bullets, &shot_doomed);
        for (alien, doomed) in world.aliens.iter_mut().zip(&alien_shot_doomed) {
            compact(&mut alien.bullets, doomed);
        }
        compact(&mut world.aliens, &alien_doomed);
        compact(&mut world.obstacles, &obstacle_doomed);
    }

    /// Returns the cause if an alien reached the player.
    fn update_aliens(
        &mut self,
        now: u64,
        rng: &mut impl Rng,
        report: &mut TickReport,
    ) -> Option<GameOverCause> {
        let world = &mut self.world;
        let policy = &self.config.alien_fire;
        let mut alien_doomed = vec![false; world.aliens.len()];
        let mut shot_doomed = vec![false; world.player.bullets.len()];
        let mut outcome = None;

        for ai in 0..world.aliens.len() {
            let alien = &mut world.aliens[ai];
            alien.update(now, policy, rng);

            if intersects(&world.player, &*alien) {
                outcome = Some(GameOverCause::AlienContact);
                break;
            }

            for (bi, bullet) in world.player.bullets.iter().enumerate() {
                if shot_doomed[bi] || !intersects(bullet, &*alien) {
                    continue;
                }
                shot_doomed[bi] = true;
                if !alien_doomed[ai] {
                    alien_doomed[ai] = true;
                    self.state.increase_score(self.config.score_per_alien);
                    report.aliens_destroyed += 1;
                }
            }
            if alien_doomed[ai] {
                continue;
            }

            // The rest of the formation waits until next tick.
            if Formation::at_edge(alien) {
                let heading = alien.direction;
                world.formation.descend(heading, &mut world.aliens);
                report.descended = true;
                debug!(
                    direction = world.formation.direction,
                    tick = self.ticks,
                    "formation descended"
                );
                break;
            }
        }

        compact(&mut world.player.bullets, &shot_doomed);
        compact(&mut world.aliens, &alien_doomed);
        outcome
    }

    /// Returns the cause if the last life was lost.
    fn update_alien_bullets(
        &mut self,
        now: u64,
        report: &mut TickReport,
    ) -> Option<GameOverCause> {
        let world = &mut self.world;

        for alien in world.aliens.iter_mut() {
            let mut doomed = vec![false; alien.bullets.len()];
            let mut fatal = false;
            for (bi, bullet) in alien.bullets.iter_mut().enumerate() {
                bullet.update();
                if intersects(&world.player, &*bullet) {
                    doomed[bi] = true;
                    self.state.decrease_lives();
                    report.lives_lost += 1;
                    if self.state.is_out_of_lives() {
                        fatal = true;
                        break;
                    }
                    debug!(lives = self.state.lives(), "player hit, respawning");
                    world.player = Player::spawn(now);
                } else if bullet.below_field() {
                    doomed[bi] = true;
                }
            }
            compact(&mut alien.bullets, &doomed);
            if fatal {
                return Some(GameOverCause::OutOfLives);
            }
        }
        None
    }

    fn end_game(&mut self, cause: GameOverCause, report: &mut TickReport) {
        if cause == GameOverCause::AlienContact {
            self.state.exhaust_lives();
        }
        self.status = GameStatus::GameOver;
        self.inputs.clear();
        report.game_over = Some(cause);
        info!(
            score = self.state.score(),
            lives = self.state.lives(),
            tick = self.ticks,
            ?cause,
            "game over"
        );
    }

    // ── Render contract ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        let world = &self.world;
        let mut sprites = Vec::with_capacity(
            1 + world.obstacles.len()
                + world.aliens.len()
                + world.alien_bullet_count()
                + world.player.bullets.len(),
        );

        for o in &world.obstacles {
            sprites.push(Sprite {
                kind: EntityKind::Obstacle,
                x: o.x,
                y: o.y,
                width: OBSTACLE_SIZE,
                height: OBSTACLE_SIZE,
            });
        }
        for a in &world.aliens {
            sprites.push(Sprite {
                kind: EntityKind::Alien,
                x: a.x,
                y: a.y,
                width: ALIEN_SIZE,
                height: ALIEN_SIZE,
            });
            for b in &a.bullets {
                sprites.push(Sprite {
                    kind: EntityKind::AlienBullet,
                    x: b.x,
                    y: b.y,
                    width: BULLET_SIZE,
                    height: BULLET_SIZE,
                });
            }
        }
        for b in &world.player.bullets {
            sprites.push(Sprite {
                kind: EntityKind::PlayerBullet,
                x: b.x,
                y: b.y,
                width: BULLET_SIZE,
                height: BULLET_SIZE,
            });
        }
        sprites.push(Sprite {
            kind: EntityKind::Player,
            x: world.player.x,
            y: world.player.y,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
        });

        Snapshot {
            sprites,
            score: self.state.score(),
            lives: self.state.lives(),
            status: self.status,
        }
    }
}
