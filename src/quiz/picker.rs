//! Non-repeating random question selection
//!
//! Draws uniformly from the indices not yet asked in the current cycle.
//! Once every index has been asked the cycle restarts from the full pool.

use std::collections::BTreeSet;

use rand::Rng;

/// Result of a draw: the chosen index and the asked-set to carry forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    pub index: usize,
    pub asked: BTreeSet<usize>,
}

/// Pick an index in `0..pool_len` that is not in `asked`.
///
/// If every index has been asked, the returned asked-set is empty and the
/// draw covers the full pool. Returns `None` only for an empty pool.
pub fn pick_question<R: Rng + ?Sized>(
    pool_len: usize,
    asked: &BTreeSet<usize>,
    rng: &mut R,
) -> Option<Pick> {
    if pool_len == 0 {
        return None;
    }

    let mut asked = asked.clone();
    let mut available: Vec<usize> = (0..pool_len).filter(|i| !asked.contains(i)).collect();
    if available.is_empty() {
        asked.clear();
        available = (0..pool_len).collect();
    }

    let index = available[rng.random_range(0..available.len())];
    Some(Pick { index, asked })
}
