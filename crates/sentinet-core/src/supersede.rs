//! # Request Supersession
//!
//! At most one computation per filter key counts at a time. Starting a new
//! computation for a key supersedes the one in flight; when the older one
//! finishes its result is discarded. Computations have no side effects, so
//! discarding is all cancellation means.

use std::collections::BTreeMap;

/// Proof that a computation for `key` was started as generation `generation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    key: K,
    generation: u64,
}

impl<K> Ticket<K> {
    /// The filter key this ticket was issued for.
    pub fn key(&self) -> &K {
        &self.key
    }
}

/// Tracks the newest in-flight generation per key.
#[derive(Debug, Clone)]
pub struct RequestTracker<K: Ord> {
    next_generation: u64,
    in_flight: BTreeMap<K, u64>,
}

impl<K: Ord> Default for RequestTracker<K> {
    fn default() -> Self {
        Self {
            next_generation: 0,
            in_flight: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> RequestTracker<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a computation for `key`, superseding any older one.
    pub fn begin(&mut self, key: K) -> Ticket<K> {
        self.next_generation = self.next_generation.saturating_add(1);
        let generation = self.next_generation;
        if self.in_flight.insert(key.clone(), generation).is_some() {
            tracing::debug!(generation, "superseding in-flight computation");
        }
        Ticket { key, generation }
    }

    /// Whether no newer computation for the ticket's key has started.
    #[must_use]
    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        self.in_flight.get(&ticket.key) == Some(&ticket.generation)
    }

    /// Hand back `value` if the ticket is still current, else drop it.
    ///
    /// A current ticket also releases the key's in-flight slot.
    pub fn finish<T>(&mut self, ticket: Ticket<K>, value: T) -> Option<T> {
        if self.is_current(&ticket) {
            self.in_flight.remove(&ticket.key);
            Some(value)
        } else {
            tracing::debug!(generation = ticket.generation, "discarding stale result");
            None
        }
    }

    /// Release the ticket's slot without a result.
    ///
    /// A stale ticket leaves the newer computation in place.
    pub fn abandon(&mut self, ticket: Ticket<K>) {
        if self.finish(ticket, ()).is_some() {
            tracing::debug!("abandoned in-flight computation");
        }
    }

    /// Number of keys with a computation in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_request_completes() {
        let mut tracker = RequestTracker::new();
        let ticket = tracker.begin("solar");
        assert!(tracker.is_current(&ticket));
        assert_eq!(tracker.finish(ticket, 1), Some(1));
        assert_eq!(tracker.in_flight(), 0);
    }

    #[test]
    fn newer_request_supersedes_older() {
        let mut tracker = RequestTracker::new();
        let old = tracker.begin("solar");
        let new = tracker.begin("solar");

        assert!(!tracker.is_current(&old));
        assert_eq!(tracker.finish(old, "stale"), None);
        assert_eq!(tracker.in_flight(), 1);
        assert_eq!(tracker.finish(new, "fresh"), Some("fresh"));
    }

    #[test]
    fn keys_do_not_interfere() {
        let mut tracker = RequestTracker::new();
        let solar = tracker.begin("solar");
        let wind = tracker.begin("wind");

        assert_eq!(tracker.in_flight(), 2);
        assert_eq!(tracker.finish(wind, 2), Some(2));
        assert_eq!(tracker.finish(solar, 1), Some(1));
    }

    #[test]
    fn abandon_releases_current_slot_only() {
        let mut tracker = RequestTracker::new();
        let old = tracker.begin("wind");
        let new = tracker.begin("wind");

        tracker.abandon(old);
        assert!(tracker.is_current(&new));
        assert_eq!(tracker.in_flight(), 1);

        tracker.abandon(new);
        assert_eq!(tracker.in_flight(), 0);
    }

    #[test]
    fn finished_key_can_start_again() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin("all");
        assert_eq!(tracker.finish(first, ()), Some(()));
        let second = tracker.begin("all");
        assert_eq!(second.key(), &"all");
        assert!(tracker.is_current(&second));
    }
}
