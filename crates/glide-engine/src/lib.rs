//! Diff-and-reconcile engine for per-character animated text.
//!
//! A mutable text value is rendered as a sequence of individually
//! addressable slots, one per character. When the text changes, the
//! engine computes the minimal set of insertions and deletions (LCS
//! alignment), canonicalizes them into a left-to-right sweep, and plays
//! them through a sequential queue with a per-operation settle delay so
//! the change reads as a cascade. Overflowing content is truncated with
//! an ellipsis once the rendered extent exceeds the container budget.
//!
//! Structure:
//! - `diff`: edit-script computation and canonical ordering
//! - `model`: calculated text + pending-operation FIFO (always ahead of
//!   the visuals)
//! - `slots`: materialized slot bookkeeping
//! - `view`: the `ViewAdapter` seam all presentation hides behind
//! - `trim`: overflow truncation planning
//! - `animator`: the queue drain loop and the spawned animator task

pub mod animator;
pub mod diff;
pub mod model;
pub mod slots;
pub mod trim;
pub mod view;

pub use animator::{AnimatorHandle, TextAnimator, spawn};
pub use diff::EditAction;
pub use model::{PendingOp, SlotModel};
pub use slots::{Slot, SlotSequence};
pub use trim::{ELLIPSIS, TrimPlan};
pub use view::{ExitSignal, ViewAdapter, VisualId};
