//! Minimal edit-script computation between two character sequences.
//!
//! `edit_script` builds a longest-common-subsequence table and backtracks
//! it into an ordered list of insert/delete actions transforming the old
//! sequence into the new one. `order_script` canonicalizes that list into
//! a left-to-right sweep so the actions can be applied one at a time
//! against a single evolving sequence (see [`crate::model::SlotModel`],
//! which owns the running index correction).
//!
//! The backtracking tie-break prefers insertion when `dp[i][j-1] >=
//! dp[i-1][j]`. Several minimal scripts usually exist; this choice pins
//! down which one is produced, so downstream output is deterministic.

/// One scalar edit against the old character sequence.
///
/// Indices are positions in the old sequence's coordinate space, exactly
/// as backtracking produced them. They become valid live positions only
/// after the batch-wide offset correction applied by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Insert `ch` before position `index`.
    Insert { ch: char, index: usize },
    /// Delete the character at position `index`.
    Delete { index: usize },
}

impl EditAction {
    /// The old-coordinate position this action refers to.
    pub fn index(self) -> usize {
        match self {
            Self::Insert { index, .. } | Self::Delete { index } => index,
        }
    }

    fn is_insert(self) -> bool {
        matches!(self, Self::Insert { .. })
    }
}

/// Computes the minimal edit script transforming `old` into `new`.
///
/// O(m·n) time and space. Empty inputs produce an empty script. The
/// result is in left-to-right order but not yet canonicalized; callers
/// feed it through [`order_script`] before applying it.
pub fn edit_script(old: &[char], new: &[char]) -> Vec<EditAction> {
    let m = old.len();
    let n = new.len();

    // dp[i][j] = LCS length of old[..i] and new[..j].
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if old[i - 1] == new[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    // Backtrack from (m, n); emission order is right-to-left.
    let mut script = Vec::new();
    let mut i = m;
    let mut j = n;
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1] == new[j - 1] {
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || dp[i][j - 1] >= dp[i - 1][j]) {
            script.push(EditAction::Insert {
                ch: new[j - 1],
                index: i,
            });
            j -= 1;
        } else {
            script.push(EditAction::Delete { index: i - 1 });
            i -= 1;
        }
    }

    script.reverse();
    script
}

/// Canonicalizes a backtracked script: ascending index, deletions before
/// insertions on index ties. The sort is stable, so same-kind actions
/// keep their backtracked relative order (consecutive insertions at one
/// position must stay in left-to-right character order).
pub fn order_script(script: &mut [EditAction]) {
    script.sort_by_key(|action| (action.index(), action.is_insert()));
}

/// LCS length of two character sequences. Exposed for tests asserting
/// script minimality.
pub fn lcs_len(a: &[char], b: &[char]) -> usize {
    let a_len = a.len();
    let mut prev = vec![0usize; b.len() + 1];
    let mut row = vec![0usize; b.len() + 1];
    for i in 1..=a_len {
        for j in 1..=b.len() {
            row[j] = if a[i - 1] == b[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(row[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    /// Applies an ordered script with the model's offset-correction rule.
    fn apply(old: &str, script: &[EditAction]) -> String {
        let mut text = chars(old);
        let mut offset: isize = 0;
        for action in script {
            match *action {
                EditAction::Insert { ch, index } => {
                    let at = usize::try_from(index as isize + offset).unwrap();
                    text.insert(at, ch);
                    offset += 1;
                }
                EditAction::Delete { index } => {
                    let at = usize::try_from(index as isize + offset).unwrap();
                    text.remove(at);
                    offset -= 1;
                }
            }
        }
        text.into_iter().collect()
    }

    fn ordered_script(old: &str, new: &str) -> Vec<EditAction> {
        let mut script = edit_script(&chars(old), &chars(new));
        order_script(&mut script);
        script
    }

    #[test]
    fn test_empty_inputs_empty_script() {
        assert!(edit_script(&[], &[]).is_empty());
    }

    #[test]
    fn test_identical_inputs_empty_script() {
        assert!(ordered_script("hello", "hello").is_empty());
    }

    #[test]
    fn test_round_trip() {
        let cases = [
            ("", "hello"),
            ("hello", ""),
            ("kitten", "sitting"),
            ("sunday", "saturday"),
            ("ab", "ba"),
            ("abc", "axc"),
            ("12:59", "13:00"),
            ("loading", "loaded"),
            ("…abc", "abc…"),
        ];
        for (old, new) in cases {
            let script = ordered_script(old, new);
            assert_eq!(apply(old, &script), new, "{old:?} -> {new:?}");
        }
    }

    #[test]
    fn test_minimality() {
        let cases = [("kitten", "sitting"), ("abcdef", "azced"), ("", "abc")];
        for (old, new) in cases {
            let script = ordered_script(old, new);
            let expected = old.len() + new.len() - 2 * lcs_len(&chars(old), &chars(new));
            assert_eq!(script.len(), expected, "{old:?} -> {new:?}");
        }
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        // "ab" -> "ba" has two minimal scripts; the insertion-preferred
        // tie-break must pick delete-the-'a' then reinsert it after 'b'.
        let script = ordered_script("ab", "ba");
        assert_eq!(
            script,
            vec![
                EditAction::Delete { index: 0 },
                EditAction::Insert { ch: 'a', index: 2 },
            ]
        );
        assert_eq!(apply("ab", &script), "ba");
    }

    #[test]
    fn test_single_substitution_shape() {
        // A substitution comes out as delete-at-k plus insert-at-k+1,
        // never as an equal-index pair.
        let script = ordered_script("a", "b");
        assert_eq!(
            script,
            vec![
                EditAction::Delete { index: 0 },
                EditAction::Insert { ch: 'b', index: 1 },
            ]
        );
    }

    #[test]
    fn test_consecutive_inserts_keep_character_order() {
        let script = ordered_script("", "ab");
        assert_eq!(
            script,
            vec![
                EditAction::Insert { ch: 'a', index: 0 },
                EditAction::Insert { ch: 'b', index: 0 },
            ]
        );
        assert_eq!(apply("", &script), "ab");
    }
}
