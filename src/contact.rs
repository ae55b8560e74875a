//! Contact form submission (simulated delivery) and toast notifications.

use crate::{
    scheduler::{Scheduler, TimerHandle},
    signal::{ReadSignal, Signal},
};
use serde::Serialize;
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::{Rc, Weak},
};

const NOTIFICATION_ENTER_MS: u32 = 100;
const NOTIFICATION_EXIT_MS: u32 = 300;

pub const SENT_MESSAGE: &str = "Message envoye avec succes !";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "notification-success",
            Self::Error => "notification-error",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NotificationPhase {
    Entering,
    Shown,
    Leaving,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub phase: NotificationPhase,
}

struct NotifierInner {
    scheduler: Rc<dyn Scheduler>,
    visible_ms: u32,
    items: Signal<Vec<Notification>>,
    timers: RefCell<HashMap<u64, Vec<TimerHandle>>>,
    next_id: Cell<u64>,
}

impl NotifierInner {
    fn set_phase(&self, id: u64, phase: NotificationPhase) {
        self.items.update(|items| {
            items
                .iter()
                .cloned()
                .map(|mut item| {
                    if item.id == id {
                        item.phase = phase;
                    }
                    item
                })
                .collect()
        });
    }

    fn track(&self, id: u64, timer: TimerHandle) {
        self.timers.borrow_mut().entry(id).or_default().push(timer);
    }

    fn remove(&self, id: u64) {
        self.items
            .update(|items| items.iter().filter(|item| item.id != id).cloned().collect());
        let timers = self.timers.borrow_mut().remove(&id);
        drop(timers);
    }
}

/// Auto-dismissing toasts: enter, stay for `visible_ms`, slide out, disappear.
#[derive(Clone)]
pub struct Notifier {
    inner: Rc<NotifierInner>,
}

impl PartialEq for Notifier {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Notifier {
    pub fn new(scheduler: Rc<dyn Scheduler>, visible_ms: u32) -> Self {
        Self {
            inner: Rc::new(NotifierInner {
                scheduler,
                visible_ms,
                items: Signal::new(Vec::new()),
                timers: RefCell::new(HashMap::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn items(&self) -> ReadSignal<Vec<Notification>> {
        self.inner.items.reader()
    }

    pub fn show(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let inner = &self.inner;
        let id = inner.next_id.get();
        inner.next_id.set(id + 1);

        let message = message.into();
        inner.items.update(|items| {
            let mut items = items.clone();
            items.push(Notification {
                id,
                kind,
                message,
                phase: NotificationPhase::Entering,
            });
            items
        });

        let weak = Rc::downgrade(inner);
        let enter = inner.scheduler.set_timeout(
            NOTIFICATION_ENTER_MS,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.set_phase(id, NotificationPhase::Shown);
                }
            }),
        );

        let weak = Rc::downgrade(inner);
        let leave = inner.scheduler.set_timeout(
            inner.visible_ms,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                inner.set_phase(id, NotificationPhase::Leaving);
                let weak = Rc::downgrade(&inner);
                let exit = inner.scheduler.set_timeout(
                    NOTIFICATION_EXIT_MS,
                    Box::new(move || {
                        if let Some(inner) = weak.upgrade() {
                            inner.remove(id);
                        }
                    }),
                );
                inner.track(id, exit);
            }),
        );

        inner.track(id, enter);
        inner.track(id, leave);
        id
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactError {
    MissingName,
    InvalidEmail,
    MissingMessage,
}

impl ContactError {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingName => "Erreur lors de l'envoi du message : nom manquant.",
            Self::InvalidEmail => "Erreur lors de l'envoi du message : adresse email invalide.",
            Self::MissingMessage => "Erreur lors de l'envoi du message : message vide.",
        }
    }
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::MissingName);
        }

        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(ContactError::InvalidEmail),
        }

        if self.message.trim().is_empty() {
            return Err(ContactError::MissingMessage);
        }

        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubmitStatus {
    Sending,
    Rejected(ContactError),
    Busy,
}

struct ContactInner {
    scheduler: Rc<dyn Scheduler>,
    send_delay_ms: u32,
    sending: Signal<bool>,
    notifier: Notifier,
    pending: RefCell<Option<TimerHandle>>,
}

/// Drives the contact form's submit button and feedback. Delivery is simulated by
/// a fixed delay; nothing leaves the page.
#[derive(Clone)]
pub struct ContactFlow {
    inner: Rc<ContactInner>,
}

impl PartialEq for ContactFlow {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ContactFlow {
    pub fn new(scheduler: Rc<dyn Scheduler>, send_delay_ms: u32, notifier: Notifier) -> Self {
        Self {
            inner: Rc::new(ContactInner {
                scheduler,
                send_delay_ms,
                sending: Signal::new(false),
                notifier,
                pending: RefCell::new(None),
            }),
        }
    }

    pub fn sending(&self) -> ReadSignal<bool> {
        self.inner.sending.reader()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    /// `on_sent` runs after a successful delivery, typically to reset the form.
    pub fn submit(&self, message: &ContactMessage, on_sent: impl FnOnce() + 'static) -> SubmitStatus {
        let inner = &self.inner;
        if inner.sending.get() {
            return SubmitStatus::Busy;
        }

        if let Err(error) = message.validate() {
            inner.notifier.show(NotificationKind::Error, error.message());
            inner.sending.set(false);
            return SubmitStatus::Rejected(error);
        }

        inner.sending.set(true);
        let weak: Weak<ContactInner> = Rc::downgrade(inner);
        let timer = inner.scheduler.set_timeout(
            inner.send_delay_ms,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                inner.notifier.show(NotificationKind::Success, SENT_MESSAGE);
                on_sent();
                inner.sending.set(false);
            }),
        );
        *inner.pending.borrow_mut() = Some(timer);
        SubmitStatus::Sending
    }
}
