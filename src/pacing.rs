//! Fixed-rate frame pacing for the event loop.

use std::time::{Duration, Instant};

/// Schedules frames on a fixed grid of `interval`
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next_frame: Instant,
}

impl FramePacer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_frame: now,
        }
    }

    /// When the event loop should wake up next
    pub fn deadline(&self) -> Instant {
        self.next_frame
    }

    /// Consume a frame slot if one is due.
    ///
    /// A loop that fell more than one interval behind resynchronizes to
    /// `now` instead of bursting to catch up.
    pub fn try_begin_frame(&mut self, now: Instant) -> bool {
        if now < self.next_frame {
            return false;
        }
        self.next_frame += self.interval;
        if self.next_frame <= now {
            self.next_frame = now + self.interval;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_on_fixed_grid() {
        let interval = Duration::from_millis(33);
        let start = Instant::now();
        let mut pacer = FramePacer::new(interval, start);

        assert!(pacer.try_begin_frame(start));
        assert!(!pacer.try_begin_frame(start + Duration::from_millis(10)));
        assert_eq!(pacer.deadline(), start + interval);
        assert!(pacer.try_begin_frame(start + Duration::from_millis(34)));
        assert_eq!(pacer.deadline(), start + interval * 2);
    }

    #[test]
    fn test_no_burst_after_stall() {
        let interval = Duration::from_millis(33);
        let start = Instant::now();
        let mut pacer = FramePacer::new(interval, start);
        assert!(pacer.try_begin_frame(start));

        let late = start + Duration::from_secs(1);
        assert!(pacer.try_begin_frame(late));
        assert!(!pacer.try_begin_frame(late));
        assert_eq!(pacer.deadline(), late + interval);
    }
}
