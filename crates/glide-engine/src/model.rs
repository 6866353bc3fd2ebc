//! Authoritative text model and pending-operation queue.
//!
//! `SlotModel` owns the "calculated" text — the string the slot sequence
//! is converging toward — and the FIFO of atomic operations the
//! reconciliation queue still has to play out visually. The calculated
//! text is mutated synchronously as edits are scheduled, ahead of the
//! asynchronous visual catch-up, which keeps index arithmetic for
//! subsequent edits (and for any text update arriving mid-drain) correct.

use std::collections::VecDeque;

use crate::diff::{self, EditAction};

/// One atomic slot operation awaiting visual application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOp {
    /// Materialize a slot for `ch` at `index`.
    InsertAt { ch: char, index: usize },
    /// Remove the slot at `index`.
    RemoveAt { index: usize },
}

/// Calculated text plus the queue of not-yet-applied slot operations.
///
/// `schedule_insertion` and `schedule_removal` are the only mutators of
/// the calculated text. Out-of-bounds actions are dropped silently: the
/// single action is skipped, model state is untouched, and the rest of
/// the batch proceeds.
#[derive(Debug, Default)]
pub struct SlotModel {
    calculated: Vec<char>,
    pending: VecDeque<PendingOp>,
}

impl SlotModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text the slot sequence is converging toward.
    pub fn calculated_text(&self) -> String {
        self.calculated.iter().collect()
    }

    pub fn calculated_len(&self) -> usize {
        self.calculated.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Dequeues the next operation for the reconciliation queue.
    pub fn pop_op(&mut self) -> Option<PendingOp> {
        self.pending.pop_front()
    }

    /// Diffs `new` against the calculated text and schedules the batch.
    ///
    /// Runs synchronously: when this returns, `calculated_text() == new`
    /// and one pending operation exists per edit action, in canonical
    /// left-to-right order. Setting the current text again is a no-op
    /// (the diff is empty).
    pub fn set_text(&mut self, new: &str) {
        let new: Vec<char> = new.chars().collect();
        let mut script = diff::edit_script(&self.calculated, &new);
        diff::order_script(&mut script);
        tracing::debug!(
            actions = script.len(),
            from_len = self.calculated.len(),
            to_len = new.len(),
            "scheduling edit batch"
        );

        // Per-step index correction: each applied action shifts the live
        // positions of everything after it within this same batch.
        let mut offset: isize = 0;
        for action in script {
            let effective = action.index() as isize + offset;
            let Ok(effective) = usize::try_from(effective) else {
                tracing::trace!(?action, offset, "dropping action with negative index");
                continue;
            };
            match action {
                EditAction::Insert { ch, .. } => {
                    if self.schedule_insertion(ch, effective) {
                        offset += 1;
                    }
                }
                EditAction::Delete { .. } => {
                    if self.schedule_removal(effective) {
                        offset -= 1;
                    }
                }
            }
        }
    }

    /// Splices `ch` into the calculated text at `index` and enqueues the
    /// matching insert operation. Returns false (dropping the action, no
    /// state change) when `index` is past the end.
    pub fn schedule_insertion(&mut self, ch: char, index: usize) -> bool {
        if index > self.calculated.len() {
            tracing::trace!(ch = %ch, index, len = self.calculated.len(), "insertion out of bounds");
            return false;
        }
        self.calculated.insert(index, ch);
        self.pending.push_back(PendingOp::InsertAt { ch, index });
        true
    }

    /// Removes the character at `index` from the calculated text and
    /// enqueues the matching remove operation. Returns false when `index`
    /// is out of bounds.
    pub fn schedule_removal(&mut self, index: usize) -> bool {
        if index >= self.calculated.len() {
            tracing::trace!(index, len = self.calculated.len(), "removal out of bounds");
            return false;
        }
        self.calculated.remove(index);
        self.pending.push_back(PendingOp::RemoveAt { index });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculated_races_ahead_of_queue() {
        let mut model = SlotModel::new();
        model.set_text("hello");
        assert_eq!(model.calculated_text(), "hello");
        assert_eq!(model.pending_len(), 5);

        model.set_text("help");
        // Model already reflects the final target even though nothing
        // has been applied visually.
        assert_eq!(model.calculated_text(), "help");
        assert!(model.has_pending());
    }

    #[test]
    fn test_set_same_text_is_noop() {
        let mut model = SlotModel::new();
        model.set_text("same");
        let before = model.pending_len();
        model.set_text("same");
        assert_eq!(model.pending_len(), before);
        assert_eq!(model.calculated_text(), "same");
    }

    #[test]
    fn test_mid_drain_update_diffs_against_calculated() {
        let mut model = SlotModel::new();
        model.set_text("ab");
        // Nothing drained yet; the second update must diff against "ab",
        // not against the (empty) visual state.
        model.set_text("abc");
        assert_eq!(model.calculated_text(), "abc");
        // 2 inserts for "ab" plus exactly 1 corrective insert for 'c'.
        assert_eq!(model.pending_len(), 3);
    }

    #[test]
    fn test_out_of_bounds_insertion_dropped() {
        let mut model = SlotModel::new();
        model.set_text("ab");
        let pending = model.pending_len();
        assert!(!model.schedule_insertion('x', 5));
        assert_eq!(model.calculated_text(), "ab");
        assert_eq!(model.pending_len(), pending);
    }

    #[test]
    fn test_out_of_bounds_removal_dropped() {
        let mut model = SlotModel::new();
        model.set_text("ab");
        let pending = model.pending_len();
        assert!(!model.schedule_removal(2));
        assert_eq!(model.calculated_text(), "ab");
        assert_eq!(model.pending_len(), pending);
    }

    #[test]
    fn test_ops_emitted_in_canonical_order() {
        let mut model = SlotModel::new();
        model.set_text("ab");
        while model.pop_op().is_some() {}
        model.set_text("ba");
        assert_eq!(model.pop_op(), Some(PendingOp::RemoveAt { index: 0 }));
        assert_eq!(model.pop_op(), Some(PendingOp::InsertAt { ch: 'a', index: 1 }));
        assert_eq!(model.pop_op(), None);
        assert_eq!(model.calculated_text(), "ba");
    }
}
