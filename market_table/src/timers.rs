//! Cancelable delayed effects.
//!
//! Visual effects that happen "later" (reverting a row highlight, the reload
//! after the loading indicator) are scheduled here as data instead of detached
//! callbacks. The owner polls `take_due` from its event loop and can cancel a
//! single effect or dispose of everything on teardown.
//!
//! Time is passed in by the caller as `std::time::Instant`, which keeps the
//! bookkeeping deterministic in tests.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use market_common::RowId;

/// Something to do once a timer expires.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Effect {
    /// Remove the transient highlight from a row.
    RevertHighlight(RowId),
    /// Re-read the row source and rebuild the table.
    Reload,
}

/// Handle returned by `Timers::schedule`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct TimerId(u64);

struct Pending {
    deadline: Instant,
    effect: Effect,
}

/// Pending effects keyed by timer id.
#[derive(Default)]
pub struct Timers {
    pending: HashMap<TimerId, Pending>,
    next_id: u64,
}

impl Timers {
    /// Create an empty timer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `effect` to run `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, effect: Effect) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(
            id,
            Pending {
                deadline: now + delay,
                effect,
            },
        );
        id
    }

    /// Cancel one timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    /// Cancel every pending timer and return how many were dropped.
    pub fn dispose(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Whether an effect equal to `effect` is pending.
    pub fn is_pending(&self, effect: Effect) -> bool {
        self.pending.values().any(|p| p.effect == effect)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Remove and return every effect due at `now`, earliest deadline first.
    /// Timers with the same deadline come out in scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<Effect> {
        let mut due: Vec<(Instant, TimerId, Effect)> = Vec::new();
        self.pending.retain(|id, p| {
            if p.deadline <= now {
                due.push((p.deadline, *id, p.effect));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(deadline, id, _)| (*deadline, *id));
        due.into_iter().map(|(_, _, effect)| effect).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn effects_fire_once_after_their_delay() {
        let start = Instant::now();
        let mut timers = Timers::new();
        timers.schedule(start, 2000 * MS, Effect::RevertHighlight(RowId(1)));

        assert!(timers.take_due(start + 1999 * MS).is_empty());
        assert_eq!(
            timers.take_due(start + 2000 * MS),
            vec![Effect::RevertHighlight(RowId(1))]
        );
        assert!(timers.take_due(start + 5000 * MS).is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn due_effects_come_out_in_deadline_order() {
        let start = Instant::now();
        let mut timers = Timers::new();
        timers.schedule(start, 2000 * MS, Effect::RevertHighlight(RowId(0)));
        timers.schedule(start, 1500 * MS, Effect::Reload);
        timers.schedule(start, 1500 * MS, Effect::RevertHighlight(RowId(2)));

        assert_eq!(timers.next_deadline(), Some(start + 1500 * MS));
        assert_eq!(
            timers.take_due(start + 3000 * MS),
            vec![
                Effect::Reload,
                Effect::RevertHighlight(RowId(2)),
                Effect::RevertHighlight(RowId(0)),
            ]
        );
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let start = Instant::now();
        let mut timers = Timers::new();
        let id = timers.schedule(start, MS, Effect::Reload);

        assert!(timers.is_pending(Effect::Reload));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.take_due(start + 10 * MS).is_empty());
        assert_eq!(timers.next_deadline(), None);
    }

    #[test]
    fn dispose_drops_everything() {
        let start = Instant::now();
        let mut timers = Timers::new();
        timers.schedule(start, MS, Effect::Reload);
        timers.schedule(start, MS, Effect::RevertHighlight(RowId(0)));

        assert_eq!(timers.dispose(), 2);
        assert_eq!(timers.len(), 0);
        assert!(timers.take_due(start + 10 * MS).is_empty());
    }
}
