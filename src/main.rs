//! A scroll-hijacking hero animation for the terminal.
//!
//! The wheel and left-button drag scrub through a pre-rendered image
//! sequence.  When the last frame is reached the hijack lets go and the
//! page below scrolls normally.
//!
//! Run with `--init-config` to write the default config file.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    preload_runtime::{spawn_preload, PreloadUpdate},
    state::AppState,
    ticker::{sync_ticker, FrameTicker},
};
use crate::ui::{
    layout::AppLayout, spinner::LoadIndicator, stage::StageView, status::StatusBar,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scrub an image sequence with the scroll wheel")]
struct Cli {
    /// Directory holding `frame_001.png` … (overrides the config file).
    frame_dir: Option<PathBuf>,

    /// Number of frames in the sequence.
    #[arg(long = "frames")]
    frames: Option<usize>,

    /// Canvas width cap, in terminal columns.
    #[arg(long = "max-width")]
    max_width: Option<u32>,

    /// Text file shown below the hero once the scrub completes.
    #[arg(long)]
    page: Option<PathBuf>,

    /// Write the default config file and exit.
    #[arg(long = "init-config")]
    init_config: bool,
}

const DEFAULT_PAGE: &str = "\
# The story continues

You scrubbed through every frame, so the page lets go of the wheel.
From here on scrolling moves the document like any other page.

Pass --page <file> to show your own text here.";

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = config::config_path();
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        let path = config::AppConfig::default().save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    // ── configuration ─────────────────────────────────────────
    let mut cfg = config::AppConfig::load();
    if let Some(dir) = cli.frame_dir {
        cfg.frame_dir = dir;
    }
    if let Some(n) = cli.frames {
        cfg.frame_count = n.max(1);
    }
    if let Some(w) = cli.max_width {
        cfg.max_canvas_width = w.max(1);
    }

    let page_text = match &cli.page {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading page text from {}", path.display()))?,
        None => DEFAULT_PAGE.to_string(),
    };
    let page_lines = page_text.lines().map(str::to_owned).collect();

    let frame_dir = cfg.frame_dir.clone();
    let frame_count = cfg.frame_count;
    let frame_interval = cfg.frame_interval();
    let mut state = AppState::new(cfg, page_lines);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    handler::handle_resize(&mut state, size.width, size.height);

    // ── async channels ────────────────────────────────────────
    let (event_tx, mut events) = mpsc::unbounded_channel::<AppEvent>();
    spawn_event_reader(event_tx.clone(), Duration::from_millis(100));
    let (preload_tx, mut preload_rx) = mpsc::unbounded_channel::<PreloadUpdate>();
    let preload = spawn_preload(frame_dir, frame_count, preload_tx);
    let mut ticker: Option<FrameTicker> = None;

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());
            frame.render_widget(
                StageView {
                    stage: &state.stage,
                    page_lines: &state.page_lines,
                },
                layout.stage_area,
            );
            frame.render_widget(
                LoadIndicator {
                    loaded: state.stage.sequence.loaded(),
                    total: state.stage.sequence.total(),
                    tick: state.tick,
                },
                layout.stage_area,
            );
            frame.render_widget(StatusBar { state: &state }, layout.status_area);
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m, at) => handler::handle_mouse(&mut state, m, at),
                    AppEvent::Resize(w, h) => handler::handle_resize(&mut state, w, h),
                    AppEvent::Tick => state.tick = state.tick.wrapping_add(1),
                    AppEvent::AnimationFrame => {
                        handler::handle_animation_frame(&mut state);
                    }
                }
            }

            Some(update) = preload_rx.recv() => {
                handler::apply_preload_update(&mut state, update);
                // Drain everything already decoded before redrawing.
                while let Ok(update) = preload_rx.try_recv() {
                    handler::apply_preload_update(&mut state, update);
                }
            }
        }

        sync_ticker(
            &mut ticker,
            state.controller.is_animating(),
            frame_interval,
            &event_tx,
        );

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    preload.request_cancel();
    drop(ticker);
    {
        let AppState {
            controller, stage, ..
        } = &mut state;
        controller.teardown(stage);
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
