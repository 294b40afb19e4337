//! Wall-clock timers
//!
//! Spawn schedules run on wall-clock time, independent of the frame-unit
//! physics. Timers never run code themselves: when due they hand back their
//! action for the orchestrator to apply. Every handle is retained so the whole
//! schedule can be cancelled on reset or teardown.

/// Insertion order, used to break ties between timers due at the same time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TimerId(u32);

#[derive(Debug, Clone)]
struct Timer<A> {
    id: TimerId,
    due_ms: f64,
    /// Some for intervals
    period_ms: Option<f64>,
    action: A,
}

#[derive(Debug)]
pub struct Scheduler<A> {
    timers: Vec<Timer<A>>,
    next_id: u32,
    now_ms: f64,
}

impl<A: Clone> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Clone> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
            now_ms: 0.0,
        }
    }

    /// Move the clock without firing anything (used when a match starts)
    pub fn sync_clock(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }

    fn push(&mut self, due_ms: f64, period_ms: Option<f64>, action: A) {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.timers.push(Timer {
            id,
            due_ms,
            period_ms,
            action,
        });
    }

    /// Fire `action` once, `delay_ms` from now
    pub fn set_timeout(&mut self, delay_ms: f64, action: A) {
        self.push(self.now_ms + delay_ms.max(0.0), None, action)
    }

    /// Fire `action` every `period_ms`, first one `period_ms` from now
    pub fn set_interval(&mut self, period_ms: f64, action: A) {
        let period = period_ms.max(1.0);
        self.push(self.now_ms + period, Some(period), action)
    }

    /// Cancel everything; returns how many timers were pending
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Advance the clock and collect every action that came due, in due order.
    ///
    /// An interval fires at most once per call; if the clock jumped past
    /// several periods (a backgrounded tab), the missed ones are dropped and
    /// the next firing is one period from now.
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<A> {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
        let now = self.now_ms;

        let mut due: Vec<(f64, TimerId)> = self
            .timers
            .iter()
            .filter(|t| t.due_ms <= now)
            .map(|t| (t.due_ms, t.id))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut fired = Vec::with_capacity(due.len());
        for (_, id) in due {
            let Some(index) = self.timers.iter().position(|t| t.id == id) else {
                continue;
            };
            let timer = &mut self.timers[index];
            fired.push(timer.action.clone());
            match timer.period_ms {
                Some(period) => {
                    timer.due_ms += period;
                    if timer.due_ms <= now {
                        timer.due_ms = now + period;
                    }
                }
                None => {
                    self.timers.remove(index);
                }
            }
        }
        fired
    }
}
