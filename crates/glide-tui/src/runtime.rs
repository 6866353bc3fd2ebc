//! Demo event loop: owns the terminal, feeds the animator task, ticks
//! transitions, and renders frames.
//!
//! The animator task runs beside this loop on the runtime; the loop only
//! sends `SetText` commands and reads glyph snapshots. Both sides meet
//! at the shared [`VisualStore`].

use std::io::Stdout;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use glide_engine::TextAnimator;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tokio_util::sync::CancellationToken;

use crate::adapter::TuiViewAdapter;
use crate::render;
use crate::store::VisualStore;
use crate::terminal::{install_panic_hook, restore_terminal, setup_terminal};

/// Frame pacing for the render loop (~60fps).
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Demo configuration.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    /// Texts rotated through, in order, wrapping around.
    pub texts: Vec<String>,
    /// Dwell time per text before rotating to the next.
    pub interval: Duration,
    /// When false, transitions apply their end state instantly.
    pub animations: bool,
}

/// Runs the full-screen demo until `q` or `Esc` is pressed.
///
/// # Errors
/// Returns an error if the terminal cannot be configured or drawn to.
pub async fn run_demo(options: DemoOptions) -> Result<()> {
    if options.texts.is_empty() {
        bail!("no texts to display");
    }

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &options).await;
    restore_terminal()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    options: &DemoOptions,
) -> Result<()> {
    let store = Arc::new(Mutex::new(VisualStore::new(options.animations)));
    let adapter = TuiViewAdapter::new(Arc::clone(&store));
    let animator = TextAnimator::new(adapter);
    let cancel = CancellationToken::new();
    let handle = glide_engine::spawn(animator, cancel.clone());

    let mut texts = options.texts.iter().cycle();
    let mut last_rotation = Instant::now();
    if let Some(text) = texts.next() {
        handle.set_text(text.clone());
    }

    loop {
        let size = terminal.size()?;
        let glyphs = {
            let mut store = lock(&store);
            let now = Instant::now();
            store.set_container_width(render::container_width(Rect::new(
                0,
                0,
                size.width,
                size.height,
            )));
            store.tick(now);
            store.snapshot(now)
        };
        tracing::trace!(glyphs = glyphs.len(), width = render::rendered_width(&glyphs), "frame");
        terminal.draw(|frame| render::render(&glyphs, frame))?;

        if event::poll(FRAME_DURATION)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char(' ') => {
                    if let Some(text) = texts.next() {
                        handle.set_text(text.clone());
                    }
                    last_rotation = Instant::now();
                }
                _ => {}
            }
        }

        if last_rotation.elapsed() >= options.interval {
            if let Some(text) = texts.next() {
                handle.set_text(text.clone());
            }
            last_rotation = Instant::now();
        }
    }

    cancel.cancel();
    Ok(())
}

fn lock(store: &Arc<Mutex<VisualStore>>) -> MutexGuard<'_, VisualStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}
