//! The narrow interface the engine drives its presentation through.
//!
//! Everything visual — creating and positioning glyphs, playing enter and
//! exit transitions, measuring rendered extents — lives behind
//! [`ViewAdapter`]. The engine never learns how a slot is drawn; it only
//! holds opaque [`VisualId`] handles and awaits exit-transition signals.

use tokio::sync::oneshot;

/// Opaque handle to one slot's visual, issued by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualId(pub u64);

/// Resolves when an exit transition has finished playing.
///
/// Adapters that render instantly (animations disabled) resolve the
/// signal before returning it; the engine tolerates zero-duration
/// transitions.
pub type ExitSignal = oneshot::Receiver<()>;

/// Presentation collaborator for the reconciliation engine.
///
/// Enter transitions are fire-and-forget: the engine starts them and
/// moves on, paced only by its settle delay. Exit transitions are
/// awaited before the visual is destroyed, so a disappearing glyph is
/// never cut off while the column collapses around it.
pub trait ViewAdapter: Send {
    /// Materializes a visual for `ch` and returns its handle.
    fn create_slot_visual(&mut self, ch: char) -> VisualId;

    /// Destroys a visual. Called only after its exit transition resolved
    /// (or the engine's defensive timeout fired).
    fn destroy_slot_visual(&mut self, id: VisualId);

    /// Moves a visual to a zero-based column within the sequence.
    fn set_slot_position(&mut self, id: VisualId, column: usize);

    /// Starts the enter transition. Must not block.
    fn play_enter_transition(&mut self, id: VisualId);

    /// Starts the exit transition, returning its completion signal.
    fn play_exit_transition(&mut self, id: VisualId) -> ExitSignal;

    /// Available display budget, in the adapter's extent units.
    fn container_extent(&self) -> f32;

    /// Rendered extent of one slot, in the same units.
    fn slot_extent(&self, id: VisualId) -> f32;

    /// Whether transitions actually animate. Purely a presentation
    /// concern; queue pacing is unaffected.
    fn animations_enabled(&self) -> bool {
        true
    }
}
