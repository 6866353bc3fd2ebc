//! Materialized slot bookkeeping.
//!
//! One [`Slot`] per character currently on screen. The sequence is the
//! queue-side mirror of the model's calculated text: it trails behind by
//! however many operations are still pending, and matches exactly once
//! the queue has drained. Position indices are always contiguous and
//! equal to sequence order; after every structural change the animator
//! runs an explicit renumber pass through the adapter rather than letting
//! positions drift implicitly.

use crate::view::VisualId;

/// One materialized character position.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub ch: char,
    pub visual: VisualId,
}

/// Ordered sequence of materialized slots.
#[derive(Debug, Default)]
pub struct SlotSequence {
    slots: Vec<Slot>,
}

impl SlotSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// The text the materialized slots currently spell out.
    pub fn displayed_text(&self) -> String {
        self.slots.iter().map(|slot| slot.ch).collect()
    }

    /// Inserts a slot, shifting everything at or after `index` right.
    pub fn insert(&mut self, index: usize, slot: Slot) {
        self.slots.insert(index, slot);
    }

    /// Removes and returns the slot at `index`, shifting followers left.
    /// Returns `None` (no state change) when `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Option<Slot> {
        if index < self.slots.len() {
            Some(self.slots.remove(index))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(ch: char, id: u64) -> Slot {
        Slot {
            ch,
            visual: VisualId(id),
        }
    }

    #[test]
    fn test_insert_shifts_followers() {
        let mut seq = SlotSequence::new();
        seq.insert(0, slot('a', 0));
        seq.insert(1, slot('c', 1));
        seq.insert(1, slot('b', 2));
        assert_eq!(seq.displayed_text(), "abc");
    }

    #[test]
    fn test_remove_out_of_bounds_is_none() {
        let mut seq = SlotSequence::new();
        seq.insert(0, slot('a', 0));
        assert!(seq.remove(1).is_none());
        assert_eq!(seq.len(), 1);
    }
}
