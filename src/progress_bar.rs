use crate::scheduler::{Scheduler, TimerHandle};
use std::{cell::RefCell, rc::Rc};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BarPhase {
    Idle,
    Scheduled,
    Complete,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BarState {
    pub target_percent: f64,
    pub width_percent: f64,
    pub phase: BarPhase,
}

/// Flips a bar's width from 0 to its target once, after an optional delay. The
/// visual easing belongs to the stylesheet.
pub struct ProgressBarAnimator {
    state: Rc<RefCell<BarState>>,
    pending: RefCell<Option<TimerHandle>>,
}

impl Default for ProgressBarAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBarAnimator {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(BarState {
                target_percent: 0.0,
                width_percent: 0.0,
                phase: BarPhase::Idle,
            })),
            pending: RefCell::new(None),
        }
    }

    pub fn state(&self) -> BarState {
        *self.state.borrow()
    }

    /// Only the first call has any effect; later calls are ignored whether the bar is
    /// still waiting on its delay or already complete.
    pub fn start(
        &self,
        scheduler: &dyn Scheduler,
        target_percent: f64,
        delay_ms: u32,
        on_update: impl FnOnce(f64) + 'static,
    ) {
        let target_percent = clamp_percent(target_percent);
        {
            let mut state = self.state.borrow_mut();
            if state.phase != BarPhase::Idle {
                return;
            }
            state.target_percent = target_percent;
            state.phase = BarPhase::Scheduled;
        }

        if delay_ms == 0 {
            complete(&self.state, on_update);
            return;
        }

        let state = Rc::clone(&self.state);
        let timer = scheduler.set_timeout(
            delay_ms,
            Box::new(move || complete(&state, on_update)),
        );
        *self.pending.borrow_mut() = Some(timer);
    }
}

fn complete(state: &Rc<RefCell<BarState>>, on_update: impl FnOnce(f64)) {
    let width = {
        let mut state = state.borrow_mut();
        state.width_percent = state.target_percent;
        state.phase = BarPhase::Complete;
        state.width_percent
    };
    on_update(width);
}

pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

pub fn skill_bar_delay_ms(category_index: usize, skill_index: usize) -> u32 {
    let stagger = (category_index + skill_index).min(100) as u32;
    400 + stagger * 100
}
