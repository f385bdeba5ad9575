//! Call-coalescing primitives driven by a virtual clock.
//!
//! Nothing here reads wall-clock time. Hosts advance the clock explicitly
//! with the elapsed `Duration` since their last tick, which keeps every
//! schedule, cancel and fire observable from tests.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use formgate_types::TaskId;

/// Queue of tasks armed to fire at a deadline on a virtual clock.
///
/// Tasks are opaque payloads: firing returns them to the caller, which
/// decides what running a task means.
#[derive(Debug)]
pub struct Timers<T> {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TaskId), T>,
    deadlines: HashMap<TaskId, Duration>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> Timers<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position of the virtual clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arm `task` to fire once `delay` has elapsed.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        let deadline = self.now.saturating_add(delay);
        self.queue.insert((deadline, id), task);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Disarm a pending task. Returns the payload if it had not fired yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let deadline = self.deadlines.remove(&id)?;
        self.queue.remove(&(deadline, id))
    }

    #[must_use]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.deadlines.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Move the clock forward and take every task whose deadline has been
    /// reached, earliest first. Tasks sharing a deadline come out in the
    /// order they were scheduled.
    pub fn advance(&mut self, delta: Duration) -> Vec<T> {
        self.now = self.now.saturating_add(delta);
        let mut due = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            let ((_, id), task) = entry.remove_entry();
            self.deadlines.remove(&id);
            due.push(task);
        }
        due
    }
}

/// Trailing-edge debounce over a shared [`Timers`] queue.
///
/// At most one task is pending per `Debounce`: each call replaces the
/// previous one, so only the payload of the last call ever fires.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    pending: Option<TaskId>,
}

impl Debounce {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn call<T>(&mut self, timers: &mut Timers<T>, task: T) -> TaskId {
        self.cancel(timers);
        let id = timers.schedule(self.delay, task);
        self.pending = Some(id);
        id
    }

    /// Drop the pending task, if any. Returns whether something was disarmed.
    pub fn cancel<T>(&mut self, timers: &mut Timers<T>) -> bool {
        self.pending
            .take()
            .is_some_and(|id| timers.cancel(id).is_some())
    }

    #[must_use]
    pub fn is_pending<T>(&self, timers: &Timers<T>) -> bool {
        self.pending.is_some_and(|id| timers.is_pending(id))
    }
}

/// Leading-edge throttle gate.
///
/// The first attempt passes; later attempts are refused until `delay` has
/// elapsed since the last attempt that passed.
#[derive(Debug, Clone)]
pub struct Throttle {
    delay: Duration,
    last_run: Option<Duration>,
}

impl Throttle {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_run: None,
        }
    }

    pub fn try_acquire(&mut self, now: Duration) -> bool {
        match self.last_run {
            Some(last) if now.saturating_sub(last) < self.delay => false,
            _ => {
                self.last_run = Some(now);
                true
            }
        }
    }
}

/// Closure wrapper returned by [`debounce`].
pub struct Debounced<A, F> {
    action: F,
    timers: Timers<A>,
    gate: Debounce,
}

/// Wrap `action` so that bursts of calls collapse into one invocation,
/// `delay` after the last call, with the last call's arguments.
pub fn debounce<A, F>(action: F, delay: Duration) -> Debounced<A, F>
where
    F: FnMut(A),
{
    Debounced {
        action,
        timers: Timers::new(),
        gate: Debounce::new(delay),
    }
}

impl<A, F> Debounced<A, F>
where
    F: FnMut(A),
{
    pub fn call(&mut self, args: A) {
        self.gate.call(&mut self.timers, args);
    }

    pub fn cancel(&mut self) -> bool {
        self.gate.cancel(&mut self.timers)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.gate.is_pending(&self.timers)
    }

    /// Advance the wrapper's clock; returns how many invocations ran.
    pub fn advance(&mut self, delta: Duration) -> usize {
        let due = self.timers.advance(delta);
        let ran = due.len();
        for args in due {
            (self.action)(args);
        }
        ran
    }
}

/// Closure wrapper returned by [`throttle`].
pub struct Throttled<F> {
    action: F,
    gate: Throttle,
    now: Duration,
}

/// Wrap `action` so it runs at most once per `delay`, on the leading edge.
pub fn throttle<F>(action: F, delay: Duration) -> Throttled<F> {
    Throttled {
        action,
        gate: Throttle::new(delay),
        now: Duration::ZERO,
    }
}

impl<F> Throttled<F> {
    /// Invoke the action unless throttled. Returns whether it ran.
    pub fn call<A>(&mut self, args: A) -> bool
    where
        F: FnMut(A),
    {
        if !self.gate.try_acquire(self.now) {
            return false;
        }
        (self.action)(args);
        true
    }

    pub fn advance(&mut self, delta: Duration) {
        self.now = self.now.saturating_add(delta);
    }
}
