use crate::scheduler::{Scheduler, TimerHandle};
use std::{cell::RefCell, rc::Rc};

#[derive(Clone, Debug, PartialEq)]
pub struct Typewriter {
    text: String,
    revealed: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            revealed: 0,
        }
    }

    pub fn visible(&self) -> &str {
        &self.text[..self.revealed]
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.text.len()
    }

    pub fn advance(&mut self) -> bool {
        match self.text[self.revealed..].chars().next() {
            Some(next) => {
                self.revealed += next.len_utf8();
                true
            }
            None => false,
        }
    }
}

#[must_use = "dropping a TypingHandle stops the effect"]
pub struct TypingHandle {
    timer: Rc<RefCell<Option<TimerHandle>>>,
}

impl TypingHandle {
    pub fn is_running(&self) -> bool {
        self.timer.borrow().is_some()
    }
}

impl Drop for TypingHandle {
    fn drop(&mut self) {
        let timer = self.timer.borrow_mut().take();
        drop(timer);
    }
}

/// Waits `start_delay_ms`, then reveals one character every `char_interval_ms`.
/// `on_update` receives the visible prefix and whether typing has finished.
pub fn start(
    scheduler: Rc<dyn Scheduler>,
    text: impl Into<String>,
    start_delay_ms: u32,
    char_interval_ms: u32,
    on_update: impl FnMut(&str, bool) + 'static,
) -> TypingHandle {
    let timer: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));
    let writer = Typewriter::new(text);

    let delayed = {
        let timer = Rc::clone(&timer);
        let interval_scheduler = Rc::clone(&scheduler);
        Box::new(move || {
            let mut writer = writer;
            let mut on_update = on_update;
            let interval = {
                let timer = Rc::clone(&timer);
                interval_scheduler.set_interval(
                    char_interval_ms,
                    Box::new(move || {
                        if timer.borrow().is_none() {
                            return;
                        }
                        writer.advance();
                        let complete = writer.is_complete();
                        on_update(writer.visible(), complete);
                        if complete {
                            let finished = timer.borrow_mut().take();
                            drop(finished);
                        }
                    }),
                )
            };
            // Replacing the slot releases the spent start-delay timeout.
            let spent = timer.borrow_mut().replace(interval);
            drop(spent);
        })
    };

    let handle = scheduler.set_timeout(start_delay_ms, delayed);
    *timer.borrow_mut() = Some(handle);
    TypingHandle { timer }
}
