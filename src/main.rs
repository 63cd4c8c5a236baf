//! BLOCKFALL - terminal host
//!
//! Renders the game, feeds it key presses and frame timestamps, and forwards
//! its events to the audio manager.

use blockfall::audio::AudioManager;
use blockfall::game::{Action, Game, GameEvent};
use blockfall::input::InputHandler;
use blockfall::settings::Settings;
use blockfall::ui;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file; stdout belongs to the UI
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "blockfall=debug".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    // Load settings, writing defaults on first run so they can be edited
    let settings = Settings::load();
    if Settings::settings_path().is_some_and(|path| !path.exists()) {
        if let Err(e) = settings.save() {
            tracing::warn!("Could not write default settings: {}", e);
        }
    }

    // Initialize audio (optional - game works without audio)
    let mut audio = AudioManager::new();
    match &mut audio {
        Some(a) => {
            a.set_music_volume(settings.audio.music_volume as f32 / 100.0);
            a.set_sfx_volume(settings.audio.sfx_volume as f32 / 100.0);
        }
        None => tracing::info!("Audio unavailable, continuing without sound"),
    }

    let mut game = Game::new(settings.game);
    let input = InputHandler::from_settings(&settings);

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app and capture result
    let result = run_app(&mut terminal, &mut game, &input, &mut audio);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if result.is_ok() {
        println!("\nThanks for playing BLOCKFALL!");
        println!("Final Score: {} | Lines: {}", game.score(), game.lines());
    }
    tracing::info!("Shutting down with score {}", game.score());

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    input: &InputHandler,
    audio: &mut Option<AudioManager>,
) -> io::Result<()> {
    let clock = Instant::now();

    loop {
        // Render
        let snapshot = game.snapshot();
        terminal.draw(|frame| ui::render_game(frame, &snapshot))?;

        // Handle input; every pending key is applied before the next tick
        if event::poll(FRAME_DURATION)? {
            loop {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match input.key_down(key, game.state()) {
                            Some(Action::Quit) => return Ok(()),
                            Some(action) => game.process_action(action),
                            None => {}
                        }
                    }
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        game.tick(clock.elapsed());

        for event in game.poll_events() {
            if let GameEvent::LinesCleared(lines) = event {
                tracing::info!("Cleared {} lines, score {}", lines, game.score());
            }
            if let Some(audio) = audio {
                audio.handle_event(event);
            }
        }
    }
}
