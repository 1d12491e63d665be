//! Fixed-size subset enumeration.
//!
//! Subset and fish techniques enumerate all `K`-element combinations of the
//! candidate cells (or digits, or lines) of a house. [`combinations`]
//! yields them in ascending index order, so technique scans are
//! deterministic.

/// Iterator over all `K`-element combinations of a slice.
///
/// Combinations are yielded in lexicographic order of their element
/// indices. The iterator is empty when the slice has fewer than `K`
/// elements.
#[derive(Debug, Clone)]
pub(crate) struct Combinations<'a, T, const K: usize> {
    items: &'a [T],
    indices: [usize; K],
    done: bool,
}

/// Returns an iterator over all `K`-element combinations of `items`.
pub(crate) fn combinations<T: Copy, const K: usize>(items: &[T]) -> Combinations<'_, T, K> {
    const { assert!(K >= 1) };
    let mut indices = [0; K];
    for (k, index) in indices.iter_mut().enumerate() {
        *index = k;
    }
    Combinations {
        items,
        indices,
        done: items.len() < K,
    }
}

impl<T: Copy, const K: usize> Iterator for Combinations<'_, T, K> {
    type Item = [T; K];

    fn next(&mut self) -> Option<[T; K]> {
        if self.done {
            return None;
        }
        let mut combo = [self.items[0]; K];
        for (slot, &index) in combo.iter_mut().zip(&self.indices) {
            *slot = self.items[index];
        }

        // Advance the rightmost index that still has room to move.
        let mut k = K;
        loop {
            if k == 0 {
                self.done = true;
                break;
            }
            k -= 1;
            if self.indices[k] + 1 < self.items.len() - (K - 1 - k) {
                self.indices[k] += 1;
                for j in k + 1..K {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }
        Some(combo)
    }
}
