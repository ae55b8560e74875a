use crate::scheduler::{Scheduler, TimerHandle, TICK_INTERVAL_MS};
use std::{cell::RefCell, rc::Rc};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CounterStep {
    Running(u64),
    Finished(u64),
}

impl CounterStep {
    pub fn value(self) -> u64 {
        match self {
            Self::Running(value) | Self::Finished(value) => value,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CounterPlan {
    target: u64,
    increment: f64,
}

impl CounterPlan {
    pub fn new(target: u64, duration_ms: u32) -> Self {
        let ticks = f64::from(duration_ms) / f64::from(TICK_INTERVAL_MS);
        let increment = if ticks > 0.0 {
            target as f64 / ticks
        } else {
            f64::INFINITY
        };

        Self { target, increment }
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn step(&self, tick: u64) -> CounterStep {
        let accumulated = tick as f64 * self.increment;
        if accumulated >= self.target as f64 {
            CounterStep::Finished(self.target)
        } else {
            CounterStep::Running(accumulated.floor() as u64)
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct AnimatedCounter {
    pub target: u64,
    pub suffix: Option<&'static str>,
    pub current: u64,
    pub running: bool,
}

impl AnimatedCounter {
    pub fn new(target: u64, suffix: Option<&'static str>) -> Self {
        Self {
            target,
            suffix,
            current: 0,
            running: false,
        }
    }

    pub fn apply(&mut self, step: CounterStep) {
        self.current = step.value().min(self.target);
        self.running = matches!(step, CounterStep::Running(_));
    }

    pub fn display(&self) -> String {
        format!("{}{}", self.current, self.suffix.unwrap_or(""))
    }
}

/// Running count-up. Dropping it stops the ticks without further callbacks.
#[must_use = "dropping a CounterHandle cancels the animation"]
pub struct CounterHandle {
    timer: Rc<RefCell<Option<TimerHandle>>>,
}

impl CounterHandle {
    pub fn is_running(&self) -> bool {
        self.timer.borrow().is_some()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for CounterHandle {
    fn drop(&mut self) {
        let timer = self.timer.borrow_mut().take();
        drop(timer);
    }
}

/// Counts from 0 to `target`, calling `on_tick` every tick interval. The last call
/// carries exactly `target`, after which the interval is released.
pub fn start(
    scheduler: &dyn Scheduler,
    target: u64,
    duration_ms: u32,
    mut on_tick: impl FnMut(CounterStep) + 'static,
) -> CounterHandle {
    let plan = CounterPlan::new(target, duration_ms);
    let timer: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));

    let handle = {
        let timer = Rc::clone(&timer);
        let mut tick = 0_u64;
        scheduler.set_interval(
            TICK_INTERVAL_MS,
            Box::new(move || {
                if timer.borrow().is_none() {
                    return;
                }
                tick += 1;
                let step = plan.step(tick);
                on_tick(step);
                if let CounterStep::Finished(_) = step {
                    let finished = timer.borrow_mut().take();
                    drop(finished);
                }
            }),
        )
    };
    *timer.borrow_mut() = Some(handle);

    CounterHandle { timer }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;

    fn run_to_completion(target: u64, duration_ms: u32) -> Vec<CounterStep> {
        let scheduler = ManualScheduler::new();
        let steps = Rc::new(RefCell::new(Vec::new()));
        let handle = {
            let steps = steps.clone();
            start(&scheduler, target, duration_ms, move |step| {
                steps.borrow_mut().push(step)
            })
        };

        scheduler.advance(u64::from(duration_ms) + 10_000);
        assert!(!handle.is_running());
        assert_eq!(scheduler.pending(), 0);

        let steps = steps.borrow().clone();
        steps
    }

    #[test]
    fn hundred_over_two_seconds_takes_about_125_ticks() {
        let steps = run_to_completion(100, 2_000);

        assert!((124..=126).contains(&steps.len()), "ticks = {}", steps.len());
        assert_eq!(steps.last(), Some(&CounterStep::Finished(100)));
        assert!(steps[..steps.len() - 1]
            .iter()
            .all(|step| matches!(step, CounterStep::Running(value) if *value < 100)));
    }

    #[test]
    fn values_are_floored_multiples_of_the_increment_and_never_decrease() {
        for (target, duration_ms) in [(6, 2_000), (11, 2_000), (100, 2_000), (7, 333), (1_000_003, 1_700)] {
            let plan = CounterPlan::new(target, duration_ms);
            let steps = run_to_completion(target, duration_ms);

            let mut previous = 0;
            for (index, step) in steps.iter().enumerate() {
                let value = step.value();
                assert!(value >= previous);
                assert!(value <= target);
                if let CounterStep::Running(value) = step {
                    let k = index as u64 + 1;
                    assert_eq!(*value, (k as f64 * plan.increment()).floor() as u64);
                }
                previous = value;
            }
            assert_eq!(steps.last(), Some(&CounterStep::Finished(target)));
        }
    }

    #[test]
    fn zero_target_or_zero_duration_finishes_on_first_tick() {
        assert_eq!(run_to_completion(0, 2_000), vec![CounterStep::Finished(0)]);
        assert_eq!(run_to_completion(42, 0), vec![CounterStep::Finished(42)]);
        assert_eq!(run_to_completion(42, 10), vec![CounterStep::Finished(42)]);
    }

    #[test]
    fn cancelling_stops_further_callbacks() {
        let scheduler = ManualScheduler::new();
        let steps = Rc::new(RefCell::new(Vec::new()));
        let handle = {
            let steps = steps.clone();
            start(&scheduler, 100, 2_000, move |step| steps.borrow_mut().push(step))
        };

        scheduler.advance(u64::from(TICK_INTERVAL_MS) * 10);
        assert!(handle.is_running());
        handle.cancel();
        scheduler.advance(5_000);

        assert_eq!(steps.borrow().len(), 10);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn animated_counter_renders_suffix() {
        let mut counter = AnimatedCounter::new(100, Some("%"));
        assert_eq!(counter.display(), "0%");

        counter.apply(CounterStep::Running(37));
        assert!(counter.running);
        assert_eq!(counter.display(), "37%");

        counter.apply(CounterStep::Finished(100));
        assert!(!counter.running);
        assert_eq!(counter.display(), "100%");
    }
}
