//! Shared visual state behind the terminal view adapter.
//!
//! The store is the single mutable surface both sides touch: the engine's
//! animator task drives it through [`crate::adapter::TuiViewAdapter`],
//! and the render loop ticks transition phases and reads snapshots each
//! frame. Transition completion is time-based: the frame tick moves
//! entering glyphs to steady and resolves exit signals once the exit
//! duration elapses (immediately when animations are disabled).

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;
use unicode_width::UnicodeWidthChar;

/// How long a glyph fades in after insertion.
pub const ENTER_DURATION: Duration = Duration::from_millis(150);

/// How long a glyph fades out before its visual is destroyed.
pub const EXIT_DURATION: Duration = Duration::from_millis(150);

#[derive(Debug)]
enum Phase {
    Steady,
    Entering { started: Instant },
    Exiting {
        started: Instant,
        done: Option<oneshot::Sender<()>>,
    },
}

#[derive(Debug)]
struct Visual {
    ch: char,
    column: usize,
    phase: Phase,
}

/// One glyph as the renderer sees it: character, column, and a 0..=1
/// brightness derived from its transition phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphView {
    pub ch: char,
    pub column: usize,
    pub brightness: f32,
}

/// Mutable store of live glyph visuals.
#[derive(Debug, Default)]
pub struct VisualStore {
    next_id: u64,
    visuals: BTreeMap<u64, Visual>,
    container_width: u16,
    animations: bool,
}

impl VisualStore {
    pub fn new(animations: bool) -> Self {
        Self {
            animations,
            ..Self::default()
        }
    }

    pub fn animations_enabled(&self) -> bool {
        self.animations
    }

    /// Updated by the render loop from the live frame area.
    pub fn set_container_width(&mut self, width: u16) {
        self.container_width = width;
    }

    pub fn container_width(&self) -> u16 {
        self.container_width
    }

    pub fn create(&mut self, ch: char) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.visuals.insert(
            id,
            Visual {
                ch,
                column: 0,
                phase: Phase::Steady,
            },
        );
        id
    }

    pub fn destroy(&mut self, id: u64) {
        self.visuals.remove(&id);
    }

    pub fn set_column(&mut self, id: u64, column: usize) {
        if let Some(visual) = self.visuals.get_mut(&id) {
            visual.column = column;
        }
    }

    pub fn begin_enter(&mut self, id: u64, now: Instant) {
        if !self.animations {
            return;
        }
        if let Some(visual) = self.visuals.get_mut(&id) {
            visual.phase = Phase::Entering { started: now };
        }
    }

    /// Starts a fade-out; `done` resolves once the fade elapses. With
    /// animations disabled the signal resolves before the next tick.
    pub fn begin_exit(&mut self, id: u64, done: oneshot::Sender<()>, now: Instant) {
        if !self.animations {
            let _ = done.send(());
            self.visuals.remove(&id);
            return;
        }
        if let Some(visual) = self.visuals.get_mut(&id) {
            visual.phase = Phase::Exiting {
                started: now,
                done: Some(done),
            };
        } else {
            let _ = done.send(());
        }
    }

    /// Advances transition phases; called once per rendered frame.
    pub fn tick(&mut self, now: Instant) {
        for visual in self.visuals.values_mut() {
            match &mut visual.phase {
                Phase::Entering { started } => {
                    if now.duration_since(*started) >= ENTER_DURATION {
                        visual.phase = Phase::Steady;
                    }
                }
                Phase::Exiting { started, done } => {
                    if now.duration_since(*started) >= EXIT_DURATION
                        && let Some(done) = done.take()
                    {
                        let _ = done.send(());
                    }
                }
                Phase::Steady => {}
            }
        }
    }

    /// Terminal-column extent of one glyph (wide glyphs measure 2).
    pub fn extent(&self, id: u64) -> f32 {
        self.visuals
            .get(&id)
            .and_then(|visual| visual.ch.width())
            .unwrap_or(0) as f32
    }

    /// Column-ordered snapshot for rendering. Exiting glyphs stay until
    /// the engine destroys them, so the fade-out is actually visible.
    pub fn snapshot(&self, now: Instant) -> Vec<GlyphView> {
        let mut glyphs: Vec<GlyphView> = self
            .visuals
            .values()
            .map(|visual| GlyphView {
                ch: visual.ch,
                column: visual.column,
                brightness: Self::brightness(&visual.phase, now),
            })
            .collect();
        glyphs.sort_by_key(|glyph| glyph.column);
        glyphs
    }

    fn brightness(phase: &Phase, now: Instant) -> f32 {
        match phase {
            Phase::Steady => 1.0,
            Phase::Entering { started } => {
                progress(now.duration_since(*started), ENTER_DURATION)
            }
            Phase::Exiting { started, .. } => {
                1.0 - progress(now.duration_since(*started), EXIT_DURATION)
            }
        }
    }
}

fn progress(elapsed: Duration, total: Duration) -> f32 {
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_settles_after_duration() {
        let mut store = VisualStore::new(true);
        let start = Instant::now();
        let id = store.create('a');
        store.begin_enter(id, start);
        assert!(store.snapshot(start)[0].brightness < 0.01);

        store.tick(start + ENTER_DURATION);
        assert_eq!(store.snapshot(start + ENTER_DURATION)[0].brightness, 1.0);
    }

    #[test]
    fn test_exit_resolves_signal_on_tick() {
        let mut store = VisualStore::new(true);
        let start = Instant::now();
        let id = store.create('a');
        let (tx, mut rx) = tokio::sync::oneshot::channel();
        store.begin_exit(id, tx, start);
        assert!(rx.try_recv().is_err());

        store.tick(start + EXIT_DURATION);
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_disabled_animations_resolve_exit_immediately() {
        let mut store = VisualStore::new(false);
        let id = store.create('a');
        let (tx, mut rx) = tokio::sync::oneshot::channel();
        store.begin_exit(id, tx, Instant::now());
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_wide_glyph_extent() {
        let mut store = VisualStore::new(true);
        let narrow = store.create('a');
        let wide = store.create('日');
        assert_eq!(store.extent(narrow), 1.0);
        assert_eq!(store.extent(wide), 2.0);
    }
}
