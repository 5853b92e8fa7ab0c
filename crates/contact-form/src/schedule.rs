// File: src/schedule.rs
// Purpose: Deferred tasks (simulated round trip, self-dismissing notices)

use std::cell::{Cell, RefCell};
use std::time::Duration;

/// Runs a task once after a delay.
///
/// Tasks are fire-and-forget: nothing can cancel them, and two tasks
/// scheduled close together both run.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

struct Pending {
    due: Duration,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

/// Scheduler driven by a virtual clock.
///
/// Nothing runs until [`ManualScheduler::advance`] moves the clock past a
/// task's due time. Tasks due at the same instant run in scheduling order.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    seq: Cell<u64>,
    queue: RefCell<Vec<Pending>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward, running every task that falls due.
    ///
    /// Tasks scheduled by running tasks are picked up if they are due
    /// before the new time. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut ran = 0;

        while let Some(pending) = self.pop_due(target) {
            self.now.set(pending.due);
            (pending.task)();
            ran += 1;
        }

        self.now.set(target);
        ran
    }

    /// Run every queued task, including ones they schedule
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        loop {
            let next_due = self.queue.borrow().iter().map(|p| p.due).min();
            match next_due {
                Some(due) => ran += self.advance(due.saturating_sub(self.now.get())),
                None => return ran,
            }
        }
    }

    // The queue borrow ends before the task runs, so tasks may schedule more.
    fn pop_due(&self, target: Duration) -> Option<Pending> {
        let mut queue = self.queue.borrow_mut();
        let index = queue
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;
        Some(queue.swap_remove(index))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.queue.borrow_mut().push(Pending {
            due: self.now.get() + delay,
            seq,
            task,
        });
    }
}
