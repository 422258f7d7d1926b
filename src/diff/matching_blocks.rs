//! Longest-matching-block alignment.
//!
//! * time: `O(NM)` in the worst case, close to `O(N + M)` for documents with
//!   few repeated lines
//! * space `O(N + M)`
//!
//! The alignment finds the longest contiguous run of equal lines within the
//! current window, then recurses into the windows before and after it. Every
//! line takes part in matching: there is no "junk" predicate and no
//! popularity heuristic, so documents with many blank lines or repeated
//! boilerplate numbering are still aligned on their longest shared runs
//! instead of fragmenting around the repeats.

use std::{collections::HashMap, hash::Hash, ops::Range};

/// A run of equal lines: `old[old_start..old_start + len]` equals
/// `new[new_start..new_start + len]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    pub old_start: usize,
    pub new_start: usize,
    pub len: usize,
}

impl MatchingBlock {
    pub fn old_end(&self) -> usize { self.old_start + self.len }

    pub fn new_end(&self) -> usize { self.new_start + self.len }
}

/// Returns the maximal matching blocks between `old` and `new` in increasing
/// order of both `old_start` and `new_start`. Adjacent blocks are merged, so
/// two consecutive blocks are always separated by a non-empty gap on at least
/// one side.
pub fn matching_blocks<T>(old: &[T], new: &[T]) -> Vec<MatchingBlock>
where
    T: Eq + Hash,
{
    let index = LineIndex::new(new);
    let mut blocks = Vec::new();
    conquer(old, 0..old.len(), 0..new.len(), &index, &mut blocks);

    merge_adjacent(blocks)
}

/// Positions of every line of the new sequence, in increasing order.
struct LineIndex<'a, T> {
    positions: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T> LineIndex<'a, T>
where
    T: Eq + Hash,
{
    fn new(new: &'a [T]) -> Self {
        let mut positions: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, line) in new.iter().enumerate() {
            positions.entry(line).or_default().push(j);
        }

        Self { positions }
    }

    fn positions_of(&self, line: &T) -> &[usize] {
        self.positions.get(line).map_or(&[], Vec::as_slice)
    }
}

fn conquer<T>(
    old: &[T],
    old_range: Range<usize>,
    new_range: Range<usize>,
    index: &LineIndex<'_, T>,
    result: &mut Vec<MatchingBlock>,
) where
    T: Eq + Hash,
{
    if old_range.is_empty() || new_range.is_empty() {
        return;
    }

    let block = find_longest_match(old, old_range.clone(), new_range.clone(), index);
    if block.len == 0 {
        return;
    }

    conquer(
        old,
        old_range.start..block.old_start,
        new_range.start..block.new_start,
        index,
        result,
    );
    result.push(block);
    conquer(
        old,
        block.old_end()..old_range.end,
        block.new_end()..new_range.end,
        index,
        result,
    );
}

/// Finds the longest block of equal lines within the given windows.
///
/// Among equally long blocks the one starting earliest in `old` wins, and
/// among those the one starting earliest in `new`. Returns a block of length
/// 0 at the window start when nothing matches.
fn find_longest_match<T>(
    old: &[T],
    old_range: Range<usize>,
    new_range: Range<usize>,
    index: &LineIndex<'_, T>,
) -> MatchingBlock
where
    T: Eq + Hash,
{
    let mut best = MatchingBlock {
        old_start: old_range.start,
        new_start: new_range.start,
        len: 0,
    };

    // run_lengths[j] is the length of the matching run ending at
    // (i - 1, j) for the previous line i - 1.
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();
    for i in old_range {
        let mut next_run_lengths = HashMap::new();

        for &j in index.positions_of(&old[i]) {
            if j < new_range.start {
                continue;
            }
            if j >= new_range.end {
                break;
            }

            let len = j
                .checked_sub(1)
                .and_then(|previous| run_lengths.get(&previous))
                .map_or(1, |previous_len| previous_len + 1);
            next_run_lengths.insert(j, len);

            if len > best.len {
                best = MatchingBlock {
                    old_start: i + 1 - len,
                    new_start: j + 1 - len,
                    len,
                };
            }
        }

        run_lengths = next_run_lengths;
    }

    best
}

fn merge_adjacent(blocks: Vec<MatchingBlock>) -> Vec<MatchingBlock> {
    let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match merged.last_mut() {
            Some(last)
                if last.old_end() == block.old_start && last.new_end() == block.new_start =>
            {
                last.len += block.len;
            }
            _ => merged.push(block),
        }
    }

    merged
}
