//! Hotkey-driven cycling through capture devices.

use std::time::{Duration, Instant};

/// Round-robin over a fixed device list with a debounce between switches
#[derive(Debug, Clone)]
pub struct DeviceCycler {
    devices: Vec<String>,
    index: usize,
    debounce: Duration,
    last_switch: Option<Instant>,
}

impl DeviceCycler {
    /// Start at `current` if it is in the list, else at the first device
    pub fn new(devices: Vec<String>, current: Option<&str>, debounce: Duration) -> Self {
        let index = current
            .and_then(|name| devices.iter().position(|d| d == name))
            .unwrap_or(0);

        Self {
            devices,
            index,
            debounce,
            last_switch: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&str> {
        self.devices.get(self.index).map(String::as_str)
    }

    /// Move to the next device, wrapping around.
    ///
    /// Returns `None` when the list is empty or the previous switch was less
    /// than the debounce interval ago.
    pub fn advance(&mut self, now: Instant) -> Option<&str> {
        if self.devices.is_empty() {
            return None;
        }
        if let Some(last) = self.last_switch {
            if now.saturating_duration_since(last) < self.debounce {
                return None;
            }
        }

        self.last_switch = Some(now);
        self.index = (self.index + 1) % self.devices.len();
        self.current()
    }
}
