//! Fixed-capacity rolling window over the most recent capture samples.

use std::collections::VecDeque;

/// FIFO of the newest `capacity` samples; pushing past capacity evicts the oldest.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<i16>,
    capacity: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: i16) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn extend<I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = i16>,
    {
        for sample in samples {
            self.push(sample);
        }
    }

    /// Point-in-time copy, oldest sample first
    pub fn snapshot(&self) -> Vec<i16> {
        self.samples.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_fills_then_rolls() {
        let mut window = SampleWindow::new(4);
        window.extend([1, 2, 3]);
        assert_eq!(window.snapshot(), vec![1, 2, 3]);
        assert_eq!(window.len(), 3);

        window.extend([4, 5, 6]);
        assert_eq!(window.len(), 4);
        assert_eq!(window.snapshot(), vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_window_clear() {
        let mut window = SampleWindow::new(2);
        window.extend([7, 8]);
        window.clear();
        assert!(window.is_empty());

        // Capacity survives a clear
        window.extend([1, 2, 3]);
        assert_eq!(window.snapshot(), vec![2, 3]);
    }
}
