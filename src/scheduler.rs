//! Timer and frame scheduling behind a trait so animations can run against the
//! browser event loop or a virtual clock.

pub const TICK_INTERVAL_MS: u32 = 16;

pub trait Scheduler {
    fn now_ms(&self) -> f64;

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle;

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> TimerHandle;

    /// Runs `callback` once per display frame until the handle is dropped.
    fn on_each_frame(&self, callback: Box<dyn FnMut()>) -> TimerHandle;
}

/// Owns a scheduled callback. Dropping it cancels the callback.
#[must_use = "dropping a TimerHandle cancels the scheduled callback"]
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

pub struct Debouncer {
    delay_ms: u32,
    pending: Option<TimerHandle>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn call(&mut self, scheduler: &dyn Scheduler, callback: impl FnOnce() + 'static) {
        // Replacing the handle cancels the previous pending call.
        self.pending = Some(scheduler.set_timeout(self.delay_ms, Box::new(callback)));
    }
}

#[cfg(test)]
pub(crate) use manual::ManualScheduler;

#[cfg(test)]
mod manual {
    use super::{Scheduler, TimerHandle, TICK_INTERVAL_MS};
    use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

    enum Task {
        Once(Box<dyn FnOnce()>),
        Repeat(Box<dyn FnMut()>),
    }

    struct PendingTimer {
        due: u64,
        period: u64,
        task: Option<Task>,
    }

    #[derive(Default)]
    struct Clock {
        now: u64,
        next_id: u64,
        timers: BTreeMap<u64, PendingTimer>,
    }

    #[derive(Clone, Default)]
    pub(crate) struct ManualScheduler {
        clock: Rc<RefCell<Clock>>,
    }

    impl ManualScheduler {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn pending(&self) -> usize {
            self.clock.borrow().timers.len()
        }

        pub(crate) fn advance(&self, ms: u64) {
            let target = self.clock.borrow().now + ms;

            loop {
                let next = {
                    let clock = self.clock.borrow();
                    clock
                        .timers
                        .iter()
                        .filter(|(_, timer)| timer.task.is_some() && timer.due <= target)
                        .min_by_key(|(id, timer)| (timer.due, **id))
                        .map(|(id, timer)| (*id, timer.due))
                };

                let Some((id, due)) = next else {
                    break;
                };

                let task = {
                    let mut clock = self.clock.borrow_mut();
                    clock.now = due;
                    clock.timers.get_mut(&id).and_then(|timer| timer.task.take())
                };

                match task {
                    Some(Task::Once(callback)) => {
                        callback();
                        let finished = self.clock.borrow_mut().timers.remove(&id);
                        drop(finished);
                    }
                    Some(Task::Repeat(mut callback)) => {
                        callback();
                        let mut unused = None;
                        {
                            let mut clock = self.clock.borrow_mut();
                            match clock.timers.get_mut(&id) {
                                Some(timer) => {
                                    timer.due += timer.period;
                                    timer.task = Some(Task::Repeat(callback));
                                }
                                None => unused = Some(callback),
                            }
                        }
                        drop(unused);
                    }
                    None => {}
                }
            }

            self.clock.borrow_mut().now = target;
        }

        fn schedule(&self, delay: u64, period: u64, task: Task) -> TimerHandle {
            let id = {
                let mut clock = self.clock.borrow_mut();
                let id = clock.next_id;
                clock.next_id += 1;
                let due = clock.now + delay;
                clock.timers.insert(
                    id,
                    PendingTimer {
                        due,
                        period: period.max(1),
                        task: Some(task),
                    },
                );
                id
            };

            let clock = Rc::downgrade(&self.clock);
            TimerHandle::new(move || {
                if let Some(clock) = clock.upgrade() {
                    let removed = clock.borrow_mut().timers.remove(&id);
                    drop(removed);
                }
            })
        }
    }

    impl Scheduler for ManualScheduler {
        fn now_ms(&self) -> f64 {
            self.clock.borrow().now as f64
        }

        fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
            self.schedule(u64::from(delay_ms), 0, Task::Once(callback))
        }

        fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> TimerHandle {
            let period = u64::from(period_ms.max(1));
            self.schedule(period, period, Task::Repeat(callback))
        }

        fn on_each_frame(&self, callback: Box<dyn FnMut()>) -> TimerHandle {
            let period = u64::from(TICK_INTERVAL_MS);
            self.schedule(period, period, Task::Repeat(callback))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, cell::RefCell, rc::Rc};

    #[test]
    fn dropped_handle_never_fires() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));

        let handle = {
            let fired = fired.clone();
            scheduler.set_timeout(100, Box::new(move || fired.set(true)))
        };
        drop(handle);
        scheduler.advance(500);

        assert!(!fired.get());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn interval_can_cancel_itself_from_inside_its_callback() {
        let scheduler = ManualScheduler::new();
        let ticks = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));

        let handle = {
            let ticks = ticks.clone();
            let slot = slot.clone();
            scheduler.set_interval(
                10,
                Box::new(move || {
                    ticks.set(ticks.get() + 1);
                    if ticks.get() == 3 {
                        let own = slot.borrow_mut().take();
                        drop(own);
                    }
                }),
            )
        };
        *slot.borrow_mut() = Some(handle);

        scheduler.advance(1_000);
        assert_eq!(ticks.get(), 3);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn timers_fire_in_due_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let mut handles = Vec::new();
        for (label, delay) in [("late", 30), ("early", 10), ("middle", 20)] {
            let order = order.clone();
            handles.push(scheduler.set_timeout(
                delay,
                Box::new(move || order.borrow_mut().push(label)),
            ));
        }
        scheduler.advance(30);

        assert_eq!(*order.borrow(), vec!["early", "middle", "late"]);
        assert_eq!(scheduler.now_ms(), 30.0);
    }

    #[test]
    fn debouncer_runs_only_the_last_call() {
        let scheduler = ManualScheduler::new();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut debouncer = Debouncer::new(250);

        for value in 0..5 {
            let calls = calls.clone();
            debouncer.call(&scheduler, move || calls.borrow_mut().push(value));
            scheduler.advance(100);
        }
        assert!(calls.borrow().is_empty());

        scheduler.advance(150);
        assert_eq!(*calls.borrow(), vec![4]);
    }

    #[test]
    fn frames_follow_the_tick_interval() {
        let scheduler = ManualScheduler::new();
        let frames = Rc::new(Cell::new(0));
        let _handle = {
            let frames = frames.clone();
            scheduler.on_each_frame(Box::new(move || frames.set(frames.get() + 1)))
        };

        scheduler.advance(u64::from(TICK_INTERVAL_MS) * 10);
        assert_eq!(frames.get(), 10);
    }
}
