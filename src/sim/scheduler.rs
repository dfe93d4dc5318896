//! Virtual-time callback scheduler
//!
//! Stands in for browser timers: one-shot delays, fixed-interval repeats
//! and the frame callback all become entries here. The host advances the
//! clock and the owning engine handles each due event in turn.
//!
//! Events are delivered in due-time order, ties broken by scheduling order.
//! Cancelling is idempotent. Engines still validate every event against
//! their own state, since an event may have been queued by an older session.

/// Handle for a scheduled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<E> {
    id: TimerId,
    due_ms: u64,
    /// `Some` for repeating timers
    interval_ms: Option<u64>,
    event: E,
}

#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            timers: Vec::new(),
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn push(&mut self, delay_ms: u64, interval_ms: Option<u64>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms + delay_ms,
            interval_ms,
            event,
        });
        id
    }

    /// Fire `event` once after `delay_ms`
    pub fn schedule_once(&mut self, delay_ms: u64, event: E) -> TimerId {
        self.push(delay_ms, None, event)
    }

    /// Fire `event` every `interval_ms` (minimum 1ms), first after one interval
    pub fn schedule_repeating(&mut self, interval_ms: u64, event: E) -> TimerId {
        let interval_ms = interval_ms.max(1);
        self.push(interval_ms, Some(interval_ms), event)
    }

    /// Remove a timer. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

impl<E: Clone> Scheduler<E> {
    /// Pop the earliest event due at or before `until_ms`, moving the clock
    /// to its due time. Repeating timers are re-armed.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, E)> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;

        let timer = &self.timers[idx];
        self.now_ms = self.now_ms.max(timer.due_ms);
        let fired = (timer.id, timer.event.clone());
        let interval_ms = timer.interval_ms;

        match interval_ms {
            Some(interval) => self.timers[idx].due_ms += interval,
            None => {
                self.timers.swap_remove(idx);
            }
        }

        Some(fired)
    }
}
