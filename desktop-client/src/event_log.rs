use chrono::Local;
use ringbuffer::{AllocRingBuffer, RingBuffer};

use crate::constants::EVENT_LOG_SIZE;

/// Recent game events shown in the log window.
pub struct EventLog {
    entries: AllocRingBuffer<String>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            entries: AllocRingBuffer::new(EVENT_LOG_SIZE),
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let timestamp = Local::now().format("%H:%M:%S");
        self.entries.enqueue(format!("[{}] {}", timestamp, message.into()));
    }

    pub fn entries(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_entries_are_dropped() {
        let mut log = EventLog::new();
        for i in 0..EVENT_LOG_SIZE + 3 {
            log.push(format!("event {}", i));
        }
        assert_eq!(log.len(), EVENT_LOG_SIZE);
        assert!(log.entries().next().unwrap().ends_with("event 3"));
        assert!(log.entries().last().unwrap().ends_with(&format!("event {}", EVENT_LOG_SIZE + 2)));
    }

    #[test]
    fn test_entries_are_timestamped() {
        let mut log = EventLog::new();
        assert!(log.is_empty());
        log.push("Piece placed");
        let entry = log.entries().next().unwrap();
        assert!(entry.starts_with('['));
        assert!(entry.ends_with("] Piece placed"));
    }
}
