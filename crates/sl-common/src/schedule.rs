use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<E> {
    id: TimerId,
    due: DateTime<Utc>,
    period: Option<Duration>,
    event: E,
}

/// Virtual-time event queue.
///
/// Nothing happens on its own: the owner moves time forward with
/// [`Timeline::pop_due`] or [`Timeline::advance_to`] and handles whatever
/// came due. Events due at the same instant fire in the order they were
/// scheduled.
#[derive(Debug, Clone)]
pub struct Timeline<E> {
    now: DateTime<Utc>,
    entries: Vec<Entry<E>>,
    next_id: u64,
}

impl<E: Clone> Timeline<E> {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: start,
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn schedule(&mut self, due: DateTime<Utc>, period: Option<Duration>, event: E) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.entries.push(Entry {
            id,
            due,
            period,
            event,
        });
        id
    }

    /// Fire `event` once, `delay` from now.
    pub fn after(&mut self, delay: Duration, event: E) -> TimerId {
        let due = self.now + delay.max(Duration::zero());
        self.schedule(due, None, event)
    }

    /// Fire `event` every `period`, first one `period` from now.
    pub fn every(&mut self, period: Duration, event: E) -> TimerId {
        let period = period.max(Duration::milliseconds(1));
        let due = self.now + period;
        self.schedule(due, Some(period), event)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        before != self.entries.len()
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Take the earliest event due at or before `until`, moving `now` to its
    /// due time. Repeating timers are re-armed one period later.
    pub fn pop_due(&mut self, until: DateTime<Utc>) -> Option<(TimerId, E)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(index, _)| index)?;

        let due = self.entries[index].due;
        if due > self.now {
            self.now = due;
        }

        let id = self.entries[index].id;
        let event = match self.entries[index].period {
            Some(period) => {
                let entry = &mut self.entries[index];
                entry.due = due + period;
                entry.event.clone()
            }
            None => self.entries.remove(index).event,
        };

        trace!(timer = id.0, at = %self.now, "timer fired");
        Some((id, event))
    }

    /// Fire everything due up to `until` and leave `now` there.
    pub fn advance_to(&mut self, until: DateTime<Utc>) -> Vec<E> {
        let mut fired = Vec::new();
        while let Some((_, event)) = self.pop_due(until) {
            fired.push(event);
        }
        if until > self.now {
            self.now = until;
        }
        fired
    }

    pub fn advance(&mut self, by: Duration) -> Vec<E> {
        let until = self.now + by;
        self.advance_to(until)
    }
}
