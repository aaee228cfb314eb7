//! In-memory append-only event log.

use chrono::Utc;
use uuid::Uuid;

use crate::envelope::EventEnvelope;
use crate::event::Event;

/// Append-only log of enveloped events.
///
/// Sequence numbers start at 1 and increase by 1 per append. Entries are
/// never mutated, reordered, or removed; the log is the chronological record
/// of everything that happened in a session.
#[derive(Debug, Clone)]
pub struct EventLog<E> {
    source: String,
    entries: Vec<EventEnvelope<E>>,
}

impl<E: Event> EventLog<E> {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            entries: Vec::new(),
        }
    }

    /// Append an event; returns its assigned sequence number.
    pub fn append(&mut self, payload: E) -> u64 {
        let sequence_number = self.entries.len() as u64 + 1;
        self.entries.push(EventEnvelope::new(
            Uuid::now_v7(),
            self.source.clone(),
            sequence_number,
            Utc::now(),
            payload,
        ));
        sequence_number
    }

    pub fn entries(&self) -> &[EventEnvelope<E>] {
        &self.entries
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
    use chrono::{DateTime, Utc};

    #[derive(Debug, Clone, PartialEq)]
    struct Ping {
        at: DateTime<Utc>,
    }

    impl Event for Ping {
        fn event_type(&self) -> &'static str {
            "test.ping"
        }

        fn version(&self) -> u32 {
            1
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.at
        }
    }

    #[test]
    fn sequence_numbers_are_strictly_increasing_from_one() {
        let mut log = EventLog::new("test");
        for expected in 1..=5u64 {
            let seq = log.append(Ping { at: Utc::now() });
            assert_eq!(seq, expected);
        }
        let numbers: Vec<u64> = log.entries().iter().map(|e| e.sequence_number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn entries_carry_the_log_source() {
        let mut log = EventLog::new("session-journal");
        log.append(Ping { at: Utc::now() });
        assert_eq!(log.entries()[0].source(), "session-journal");
    }
}
