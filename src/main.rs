mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use space_defense::compute::Simulation;
use space_defense::config::GameConfig;
use space_defense::input::Input;
use space_defense::state::GameState;

#[derive(Parser, Debug)]
#[command(name = "space_defense", about = "Defend the base against a descending alien formation")]
struct Cli {
    /// RON file overriding the default rules
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a terminal and without input, then print the result
    #[arg(long)]
    headless: bool,

    /// Stop a headless run after this many ticks
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
}

/// How a key press maps onto the simulation.
enum Command {
    Play(Input),
    Quit,
    Ignore,
}

fn command_for(key: &KeyEvent) -> Command {
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Play(Input::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Command::Play(Input::MoveRight)
        }
        KeyCode::Char(' ') => Command::Play(Input::Fire),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        _ => Command::Ignore,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drain input, tick once, draw, sleep out the rest of the frame.  Returns
/// when the player quits or, after game over, presses any key.
fn game_loop<W: Write>(
    out: &mut W,
    sim: &mut Simulation,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let frame = Duration::from_millis(sim.config().tick_ms);

    loop {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else { continue };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if sim.is_over() {
                return Ok(());
            }
            match command_for(&key) {
                Command::Play(input) => sim.queue_input(input),
                Command::Quit => return Ok(()),
                Command::Ignore => {}
            }
        }

        sim.tick(rng);
        display::render(out, &sim.snapshot())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

fn run_interactive(sim: &mut Simulation, rng: &mut StdRng) -> Result<()> {
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Blocking reads happen on their own thread so the loop never stalls.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, sim, rng, &rx);

    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}

fn run_headless(sim: &mut Simulation, rng: &mut StdRng, max_ticks: u64) {
    while !sim.is_over() && sim.ticks() < max_ticks {
        sim.tick(rng);
    }
    if !sim.is_over() {
        info!(ticks = sim.ticks(), "tick limit reached");
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };

    let mut rng = match cli.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let state = GameState::new(config.starting_lives);
    let mut sim = Simulation::new(config, state, &mut rng);
    info!(headless = cli.headless, "starting game");

    if cli.headless {
        run_headless(&mut sim, &mut rng, cli.max_ticks);
    } else {
        run_interactive(&mut sim, &mut rng)?;
    }

    let snapshot = sim.snapshot();
    match sim.final_score() {
        Some(score) => println!("Game Over! Final score: {} (lives: {})", score, snapshot.lives),
        None => println!("Score: {}  Lives: {}", snapshot.score, snapshot.lives),
    }
    Ok(())
}
