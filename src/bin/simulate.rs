//! Flappy Headless Simulator
//!
//! Runs the real game loop against a null render surface on a simulated
//! clock, with an autopilot doing the flapping. Useful for checking that
//! physics or spawn changes keep the game playable.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --frames N      Frame limit per run (default: 3600 = one minute at 60 fps)
//!   --runs N        Number of runs with incrementing seeds (default: 1)
//!   --seed N        RNG seed (default: 42)
//!   --quiet         Only the summary line

use anyhow::{bail, Context};
use flappy::core::constants::BOARD_HEIGHT;
use flappy::core::game_state::GameSession;
use flappy::game::types::PipeVariant;
use flappy::render::{format_score, NullSurface};
use flappy::utils::logging::init_stderr_logger;
use flappy::{GameLoop, LoopTiming};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Flap once the bird's bottom edge is this close to the opening's lower edge.
const FLAP_MARGIN: f64 = 24.0;

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    frames: u64,
    runs: u32,
    seed: u64,
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frames: 3600,
            runs: 1,
            seed: 42,
            quiet: false,
        }
    }
}

fn number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> anyhow::Result<T> {
    let Some(value) = value else {
        bail!("{flag} requires a value");
    };
    value
        .parse()
        .ok()
        .with_context(|| format!("{flag} requires a number, got {value:?}"))
}

fn parse_args() -> anyhow::Result<Option<SimConfig>> {
    let mut config = SimConfig::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frames" => config.frames = number(&arg, args.next())?,
            "--runs" => config.runs = number(&arg, args.next())?,
            "--seed" => config.seed = number(&arg, args.next())?,
            "--quiet" => config.quiet = true,
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(Some(config))
}

fn print_usage() {
    eprintln!(
        "Flappy Headless Simulator\n\
         \n\
         Usage: simulate [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --frames N      Frame limit per run (default: 3600)\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 1)\n\
         \x20 --seed N        RNG seed (default: 42)\n\
         \x20 --quiet         Only the summary line\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Autopilot ────────────────────────────────────────────────────────

/// Lower edge of the next opening the bird has to fly through.
fn next_opening_bottom(session: &GameSession) -> f64 {
    let bird = &session.bird;
    session
        .pipes
        .iter()
        .filter(|pipe| pipe.variant == PipeVariant::Bottom)
        .find(|pipe| pipe.x + pipe.width >= bird.x)
        .map(|pipe| pipe.y)
        .unwrap_or(BOARD_HEIGHT * 0.7)
}

fn wants_flap(session: &GameSession) -> bool {
    let bird = &session.bird;
    session.velocity_y >= 0.0 && bird.y + bird.height > next_opening_bottom(session) - FLAP_MARGIN
}

// ── Simulation ───────────────────────────────────────────────────────

struct RunResult {
    score: f64,
    frames: u64,
    crashed: bool,
}

fn run_simulation(config: &SimConfig, seed: u64) -> RunResult {
    let timing = LoopTiming::default();
    let mut game = GameLoop::new(StdRng::seed_from_u64(seed), timing, 0);
    let mut surface = NullSurface;
    let mut now_ms = 0;

    while game.frames() < config.frames && game.session().is_running() {
        now_ms += timing.frame_interval_ms;
        if wants_flap(game.session()) {
            game.handle_key("Space", now_ms);
        }
        game.advance(now_ms, &mut surface);
    }

    RunResult {
        score: game.session().score(),
        frames: game.frames(),
        crashed: game.session().is_game_over(),
    }
}

fn main() -> anyhow::Result<()> {
    let Some(config) = parse_args().map_err(|e| {
        print_usage();
        e
    })?
    else {
        print_usage();
        return Ok(());
    };

    init_stderr_logger("warn").context("failed to initialise logging")?;

    if !config.quiet {
        eprintln!(
            "Flappy Simulator: {} frames x {} run(s), seed={}",
            config.frames, config.runs, config.seed
        );
    }

    let mut results = Vec::with_capacity(config.runs as usize);
    for run in 0..config.runs {
        let seed = config.seed + run as u64;
        let result = run_simulation(&config, seed);
        if !config.quiet {
            println!(
                "run {:>3}  seed={seed}  score={:>6}  frames={:>6}  {}",
                run + 1,
                format_score(result.score),
                result.frames,
                if result.crashed { "crashed" } else { "survived" }
            );
        }
        results.push(result);
    }

    if results.is_empty() {
        return Ok(());
    }

    let mean = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;
    let best = results.iter().map(|r| r.score).fold(0.0, f64::max);
    let crashes = results.iter().filter(|r| r.crashed).count();
    println!(
        "runs={} mean={:.2} best={} crashes={}",
        results.len(),
        mean,
        format_score(best),
        crashes
    );

    Ok(())
}
