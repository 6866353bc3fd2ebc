//! Overflow truncation planning.
//!
//! Runs after the reconciliation queue drains: when the slots' combined
//! rendered extent exceeds the container budget, the slot three positions
//! before the first budget-crossing slot is replaced with an ellipsis and
//! the slots from there through the crossing are removed. Slots past the
//! crossing are left alone; the crossing check is strict, and no trim
//! fires when the crossing sits at or before index 3.

/// A trim never fires unless the budget crossing happens strictly past
/// this index; closer to the front there is no room to show an ellipsis
/// meaningfully.
pub const MIN_CROSSING_INDEX: usize = 3;

/// Character substituted at the truncation point.
pub const ELLIPSIS: char = '…';

/// One planned truncation: replace the slot at `replace_at` with the
/// ellipsis, then remove the slots from `replace_at + 1` through
/// `remove_through` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimPlan {
    pub replace_at: usize,
    pub remove_through: usize,
}

/// First slot index whose cumulative extent strictly exceeds the budget,
/// or `None` when everything fits.
pub fn crossing_index(extents: &[f32], budget: f32) -> Option<usize> {
    let mut cumulative = 0.0f32;
    for (index, extent) in extents.iter().enumerate() {
        cumulative += extent;
        if cumulative > budget {
            return Some(index);
        }
    }
    None
}

/// Plans a single trim pass over the given slot extents.
///
/// Returns `None` when the sequence fits or the crossing sits at or
/// before [`MIN_CROSSING_INDEX`]. The ellipsis itself occupies extent, so
/// callers re-plan after applying until no further plan is produced.
pub fn plan_trim(extents: &[f32], budget: f32) -> Option<TrimPlan> {
    let crossing = crossing_index(extents, budget)?;
    if crossing <= MIN_CROSSING_INDEX {
        return None;
    }
    Some(TrimPlan {
        replace_at: crossing - MIN_CROSSING_INDEX,
        remove_through: crossing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_crossing_when_fits() {
        assert_eq!(crossing_index(&[30.0, 30.0, 30.0], 100.0), None);
        assert_eq!(plan_trim(&[30.0, 30.0, 30.0], 100.0), None);
    }

    #[test]
    fn test_crossing_is_strict() {
        // Cumulative hits exactly 100 at index 1; only index 2 exceeds.
        assert_eq!(crossing_index(&[50.0, 50.0, 1.0], 100.0), Some(2));
    }

    #[test]
    fn test_crossing_at_threshold_does_not_trim() {
        // Five slots of 30 against 100: cumulative 120 at index 3. The
        // crossing index equals the minimum, so no trim fires.
        let extents = [30.0; 5];
        assert_eq!(crossing_index(&extents, 100.0), Some(3));
        assert_eq!(plan_trim(&extents, 100.0), None);
    }

    #[test]
    fn test_crossing_past_threshold_trims() {
        // Six slots of 30 against 130: crossing at index 4, one past the
        // minimum. Replacement lands three before the crossing.
        let extents = [30.0; 6];
        assert_eq!(crossing_index(&extents, 130.0), Some(4));
        assert_eq!(
            plan_trim(&extents, 130.0),
            Some(TrimPlan {
                replace_at: 1,
                remove_through: 4,
            })
        );
    }
}
