use std::collections::VecDeque;

/// How many samples the display history keeps by default.
pub const MAX_SAMPLES: usize = 500;

/// Bounded FIFO of the most recent samples, oldest first.
pub struct TraceBuffer {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl TraceBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_SAMPLES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one sample, dropping from the front once over capacity.
    pub fn push(&mut self, sample: f32) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Ordered copy of the current history, for plotting.
    pub fn snapshot(&self) -> Vec<f32> {
        self.samples.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    pub fn front(&self) -> Option<f32> {
        self.samples.front().copied()
    }

    pub fn back(&self) -> Option<f32> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_is_bounded_by_capacity() {
        let mut trace = TraceBuffer::with_capacity(5);
        for i in 0..12 {
            trace.push(i as f32);
            assert_eq!(trace.len(), (i + 1).min(5));
        }
    }

    #[test]
    fn eviction_is_first_in_first_out() {
        let mut trace = TraceBuffer::with_capacity(5);
        for i in 0..8 {
            trace.push(i as f32);
        }
        // 0, 1 and 2 were dropped
        assert_eq!(trace.snapshot(), vec![3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(trace.front(), Some(3.0));
        assert_eq!(trace.back(), Some(7.0));
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let mut trace = TraceBuffer::with_capacity(16);
        for v in [0.5, -1.0, 2.0] {
            trace.push(v);
        }
        assert_eq!(trace.snapshot(), vec![0.5, -1.0, 2.0]);
    }

    #[test]
    fn clear_empties_the_history() {
        let mut trace = TraceBuffer::with_capacity(4);
        trace.push(1.0);
        trace.push(2.0);
        trace.clear();
        assert!(trace.is_empty());
        assert_eq!(trace.capacity(), 4);
    }
}
