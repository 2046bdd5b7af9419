//! Deadline queue for deferred controller steps.
//!
//! Every scheduled step belongs to a run identified by a [`RunToken`].
//! Cancelling a token drops all of that run's pending steps at once, so a
//! superseded run can never fire late and race a newer mutation.

use std::time::Instant;

/// Cancellation token for one scheduled run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunToken(u64);

/// Hands out fresh run tokens.
#[derive(Debug, Default)]
pub struct TokenSource {
    last: u64,
}

impl TokenSource {
    pub fn issue(&mut self) -> RunToken {
        self.last += 1;
        RunToken(self.last)
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    at: Instant,
    seq: u64,
    token: RunToken,
    step: T,
}

/// A step that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Due<T> {
    /// When the step was scheduled to fire (not when it was observed).
    pub at: Instant,
    pub token: RunToken,
    pub step: T,
}

/// Pending steps ordered by deadline, then by scheduling order.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    entries: Vec<Entry<T>>,
    seq: u64,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            seq: 0,
        }
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Instant, token: RunToken, step: T) {
        self.seq += 1;
        self.entries.push(Entry {
            at,
            seq: self.seq,
            token,
            step,
        });
    }

    /// Drop every pending step of `token`. Returns how many were dropped.
    pub fn cancel(&mut self, token: RunToken) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.token != token);
        before - self.entries.len()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.at).min()
    }

    /// Remove and return the earliest step due at `now`, if any.
    pub fn take_due(&mut self, now: Instant) -> Option<Due<T>> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.at <= now)
            .min_by_key(|(_, e)| (e.at, e.seq))
            .map(|(i, _)| i)?;
        let entry = self.entries.swap_remove(index);
        Some(Due {
            at: entry.at,
            token: entry.token,
            step: entry.step,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_due_in_deadline_order() {
        let t0 = Instant::now();
        let mut tokens = TokenSource::default();
        let run = tokens.issue();
        let mut timeline = Timeline::new();
        timeline.schedule(t0 + ms(300), run, "second");
        timeline.schedule(t0 + ms(100), run, "first");

        assert!(timeline.take_due(t0 + ms(50)).is_none());
        assert_eq!(timeline.next_deadline(), Some(t0 + ms(100)));

        let due = timeline.take_due(t0 + ms(500)).unwrap();
        assert_eq!(due.step, "first");
        assert_eq!(due.at, t0 + ms(100));
        assert_eq!(timeline.take_due(t0 + ms(500)).unwrap().step, "second");
        assert_eq!(timeline.next_deadline(), None);
    }

    #[test]
    fn test_equal_deadlines_keep_schedule_order() {
        let t0 = Instant::now();
        let mut tokens = TokenSource::default();
        let run = tokens.issue();
        let mut timeline = Timeline::new();
        timeline.schedule(t0, run, 1);
        timeline.schedule(t0, run, 2);
        timeline.schedule(t0, run, 3);
        let order: Vec<i32> =
            std::iter::from_fn(|| timeline.take_due(t0).map(|d| d.step)).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel_drops_only_that_run() {
        let t0 = Instant::now();
        let mut tokens = TokenSource::default();
        let old = tokens.issue();
        let new = tokens.issue();
        assert_ne!(old, new);

        let mut timeline = Timeline::new();
        timeline.schedule(t0 + ms(10), old, 'a');
        timeline.schedule(t0 + ms(20), old, 'b');
        timeline.schedule(t0 + ms(30), new, 'c');

        assert_eq!(timeline.cancel(old), 2);
        assert_eq!(timeline.cancel(old), 0);
        assert_eq!(timeline.next_deadline(), Some(t0 + ms(30)));
        assert_eq!(timeline.take_due(t0 + ms(100)).unwrap().step, 'c');
        assert_eq!(timeline.next_deadline(), None);
    }
}
