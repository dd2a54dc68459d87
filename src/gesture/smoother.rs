//! Majority-vote smoothing over a fixed window of recent labels.

/// Fixed-capacity FIFO of the most recent values.
///
/// Backed by a pre-allocated slot array and a write cursor; pushing into a
/// full history overwrites the oldest entry. Never grows past `capacity`.
#[derive(Debug, Clone)]
pub struct LabelHistory<T> {
    slots: Vec<Option<T>>,
    /// Next slot to write
    write_index: usize,
    len: usize,
}

impl<T> LabelHistory<T> {
    /// Creates an empty history holding at most `capacity` values (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            write_index: 0,
            len: 0,
        }
    }

    /// Appends a value, evicting the oldest one when full.
    pub fn push(&mut self, value: T) {
        self.slots[self.write_index] = Some(value);
        self.write_index = (self.write_index + 1) % self.slots.len();
        if self.len < self.slots.len() {
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let capacity = self.slots.len();
        let start = (self.write_index + capacity - self.len) % capacity;
        (0..self.len).filter_map(move |i| self.slots[(start + i) % capacity].as_ref())
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.write_index = 0;
        self.len = 0;
    }
}

impl<T: PartialEq> LabelHistory<T> {
    /// Most frequent value; ties go to the value that appears first (oldest).
    pub fn majority(&self) -> Option<&T> {
        let mut best: Option<(&T, usize)> = None;
        for (i, candidate) in self.iter().enumerate() {
            // Count each distinct value once, at its first occurrence.
            if self.iter().take(i).any(|earlier| earlier == candidate) {
                continue;
            }
            let count = self.iter().filter(|v| *v == candidate).count();
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((candidate, count));
            }
        }
        best.map(|(value, _)| value)
    }
}

/// Suppresses frame-to-frame flicker by voting over the last N raw labels.
#[derive(Debug, Clone)]
pub struct MajoritySmoother<T> {
    history: LabelHistory<T>,
}

impl<T: Clone + PartialEq> MajoritySmoother<T> {
    pub fn new(window: usize) -> Self {
        Self {
            history: LabelHistory::new(window),
        }
    }

    /// Records `raw` and returns the smoothed value.
    ///
    /// With fewer than two samples there is nothing to vote on and `raw` is
    /// returned as is.
    pub fn smooth(&mut self, raw: T) -> T {
        self.history.push(raw.clone());
        if self.history.len() < 2 {
            return raw;
        }
        self.history.majority().cloned().unwrap_or(raw)
    }

    pub fn window(&self) -> usize {
        self.history.capacity()
    }

    pub fn history(&self) -> &LabelHistory<T> {
        &self.history
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}
