//! Terminal Blockfall runner.
//!
//! Uses crossterm for input and the framebuffer renderer from `blockfall::term`.
//! Configuration comes from `BLOCKFALL_*` environment variables.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use blockfall::config::AppConfig;
use blockfall::core::GameSession;
use blockfall::input::{handle_key_event, is_restart, repeat_key, should_quit, InputHandler};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{Command, TICK_MS};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;
    config.warn_rejected();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// The terminal is in raw mode, so logs only ever go to a file.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let seed = config.seed_or_random();
    let mut game = GameSession::with_config(config.session, seed);
    info!("new game: seed {}, {:?}", seed, config.session);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut input_handler = InputHandler::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            info!("quit requested");
                            return Ok(());
                        }

                        if is_restart(key) && game.is_game_over() {
                            game.restart();
                            input_handler.reset();
                        } else if repeat_key(key.code).is_some() {
                            if let Some(cmd) = input_handler.handle_key_press(key.code) {
                                game.handle_command(cmd);
                            }
                        } else if let Some(cmd) = handle_key_event(key) {
                            game.handle_command(cmd);
                            if matches!(cmd, Command::TogglePause | Command::EndGame) {
                                input_handler.reset();
                            }
                        }
                    }
                    // Held keys repeat through the input handler instead.
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => input_handler.handle_key_release(key.code),
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for cmd in input_handler.update(TICK_MS) {
                game.handle_command(cmd);
            }
            game.tick(TICK_MS);

            if let Some(event) = game.take_last_event() {
                debug!("locked {:?}", event);
            }
        }
    }
}
