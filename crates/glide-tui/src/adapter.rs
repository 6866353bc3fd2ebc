//! `ViewAdapter` implementation over the shared visual store.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use glide_engine::view::{ExitSignal, ViewAdapter, VisualId};
use tokio::sync::oneshot;

use crate::store::VisualStore;

/// Terminal view adapter handed to the engine's animator task.
///
/// Clones share one store; the render loop keeps a clone to tick phases
/// and snapshot glyphs while the engine mutates through its own.
#[derive(Clone)]
pub struct TuiViewAdapter {
    store: Arc<Mutex<VisualStore>>,
}

impl TuiViewAdapter {
    pub fn new(store: Arc<Mutex<VisualStore>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<Mutex<VisualStore>> {
        Arc::clone(&self.store)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VisualStore> {
        self.store.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ViewAdapter for TuiViewAdapter {
    fn create_slot_visual(&mut self, ch: char) -> VisualId {
        VisualId(self.lock().create(ch))
    }

    fn destroy_slot_visual(&mut self, id: VisualId) {
        self.lock().destroy(id.0);
    }

    fn set_slot_position(&mut self, id: VisualId, column: usize) {
        self.lock().set_column(id.0, column);
    }

    fn play_enter_transition(&mut self, id: VisualId) {
        self.lock().begin_enter(id.0, Instant::now());
    }

    fn play_exit_transition(&mut self, id: VisualId) -> ExitSignal {
        let (tx, rx) = oneshot::channel();
        self.lock().begin_exit(id.0, tx, Instant::now());
        rx
    }

    fn container_extent(&self) -> f32 {
        f32::from(self.lock().container_width())
    }

    fn slot_extent(&self, id: VisualId) -> f32 {
        self.lock().extent(id.0)
    }

    fn animations_enabled(&self) -> bool {
        self.lock().animations_enabled()
    }
}
