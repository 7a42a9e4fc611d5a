use anyhow::Context;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::build_info;
use flappy::input::{classify, HostInput};
use flappy::ui::{draw_game, HudStats, TerminalCanvas};
use flappy::utils::config::{parse_args, resolve_config, CliCommand, Config};
use flappy::utils::logging::init_file_logger;
use flappy::GameLoop;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

fn print_help() {
    println!("Flappy - Terminal Flappy Bird\n");
    println!("Usage: flappy [options]\n");
    println!("Options:");
    println!("  --seed N           Seed pipe placement");
    println!("  --fps N            Frame rate (1-1000, default about 60)");
    println!("  --log-file PATH    Log destination (default: temp dir)");
    println!("  --log-level LEVEL  Log filter when RUST_LOG is unset");
    println!("  --config PATH      Config file (default: ~/.flappy/config.json)");
    println!("  --version          Show version information");
    println!("  --help             Show this help message");
}

fn main() -> anyhow::Result<()> {
    let overrides = match parse_args(std::env::args().skip(1)) {
        Ok(CliCommand::Run(overrides)) => overrides,
        Ok(CliCommand::Version) => {
            println!("{}", build_info::version_string());
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            print_help();
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'flappy --help' for usage.");
            std::process::exit(1);
        }
    };

    let config = resolve_config(&overrides).context("failed to load configuration")?;
    let log_path = config.log_path();
    init_file_logger(&log_path, &config.log_level)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    log::info!(
        "starting {}{} (seed {:?}, frame interval {}ms)",
        build_info::version_string(),
        if build_info::is_debug_build() { " [debug]" } else { "" },
        config.seed,
        config.timing().frame_interval_ms
    );

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = stdout.execute(EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("failed to enter alternate screen");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(LeaveAlternateScreen);
            return Err(e).context("failed to create terminal");
        }
    };

    let result = run(&mut terminal, &config);

    // Cleanup terminal, even when the loop failed
    let _ = disable_raw_mode();
    let _ = terminal.backend_mut().execute(LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    match &result {
        Ok(()) => log::info!("shutting down"),
        Err(e) => log::error!("terminal error: {}", e),
    }
    result.context("terminal error")
}

/// Drive the game until the player quits.
fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, config: &Config) -> io::Result<()> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let timing = config.timing();
    let mut hud = HudStats::new(timing.frame_interval_ms);

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let mut game = GameLoop::new(rng, timing, now_ms());
    let mut canvas = TerminalCanvas::new();

    terminal.draw(|frame| draw_game(frame, &canvas, game.session(), &hud))?;

    loop {
        let report = game.advance(now_ms(), &mut canvas);
        if report.frame.is_some() {
            hud.observe(game.session(), game.restarts());
            terminal.draw(|frame| draw_game(frame, &canvas, game.session(), &hud))?;
        }

        // Sleep in poll until the next task is due
        let wait = game.next_deadline().saturating_sub(now_ms());
        if event::poll(Duration::from_millis(wait))? {
            match event::read()? {
                Event::Key(key) => match classify(&key) {
                    Some(HostInput::Quit) => break,
                    Some(HostInput::Key(code)) => {
                        game.handle_key(&code, now_ms());
                    }
                    None => {}
                },
                Event::Resize(_, _) => {
                    terminal.draw(|frame| draw_game(frame, &canvas, game.session(), &hud))?;
                }
                _ => {}
            }
        }
    }

    Ok(())
}
