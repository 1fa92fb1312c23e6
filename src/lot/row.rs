//! Row of slots with contiguous-run search

use super::slot::{PlacementId, Slot, SpotStatus};

/// A fixed-length row of slots
///
/// Runs a first-fit scan: the first run of free slots long enough wins,
/// even if a shorter sufficient run exists further along.
#[derive(Debug, Clone)]
pub struct Row {
    slots: Vec<Slot>,
}

impl Row {
    /// Create a row of `len` free slots
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![Slot::new(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Find the start of the first run of `needed` consecutive free slots
    ///
    /// Returns `None` when `needed` is zero or longer than the row.
    pub fn find_run(&self, needed: usize) -> Option<usize> {
        if needed == 0 || needed > self.slots.len() {
            return None;
        }

        let mut run_start = 0;
        let mut run_len = 0;
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.is_occupied() {
                run_len = 0;
                continue;
            }
            if run_len == 0 {
                run_start = index;
            }
            run_len += 1;
            if run_len == needed {
                return Some(run_start);
            }
        }

        None
    }

    /// Mark `len` slots starting at `start` as held by `id`
    pub fn occupy(&mut self, start: usize, len: usize, id: PlacementId) {
        for slot in &mut self.slots[start..start + len] {
            slot.occupy(id);
        }
    }

    /// Free `len` slots starting at `start`
    pub fn clear(&mut self, start: usize, len: usize) {
        for slot in &mut self.slots[start..start + len] {
            slot.free();
        }
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn status(&self, index: usize) -> Option<SpotStatus> {
        self.slots.get(index).map(Slot::status)
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Get the number of free slots
    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_occupied()).count()
    }

    /// Length of the longest run of free slots
    pub fn longest_free_run(&self) -> usize {
        let mut longest = 0;
        let mut current = 0;
        for slot in &self.slots {
            if slot.is_occupied() {
                current = 0;
            } else {
                current += 1;
                longest = longest.max(current);
            }
        }
        longest
    }
}
