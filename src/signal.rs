use std::{cell::RefCell, rc::Rc};

type Subscriber<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct SignalState<T> {
    value: T,
    subscribers: Vec<Subscriber<T>>,
}

/// Writable side of a value shared with any number of readers.
///
/// Only the owner holds a `Signal`; consumers get a [`ReadSignal`]. Subscribers
/// are notified after each change, never while the value is borrowed.
pub struct Signal<T> {
    state: Rc<RefCell<SignalState<T>>>,
}

pub struct ReadSignal<T> {
    state: Rc<RefCell<SignalState<T>>>,
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T> PartialEq for ReadSignal<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl<T: Clone + PartialEq + 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            state: Rc::new(RefCell::new(SignalState {
                value,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn reader(&self) -> ReadSignal<T> {
        ReadSignal {
            state: Rc::clone(&self.state),
        }
    }

    pub fn get(&self) -> T {
        self.state.borrow().value.clone()
    }

    pub fn set(&self, value: T) -> bool {
        let subscribers = {
            let mut state = self.state.borrow_mut();
            if state.value == value {
                return false;
            }
            state.value = value.clone();
            state.subscribers.clone()
        };

        for subscriber in subscribers {
            (subscriber.borrow_mut())(&value);
        }
        true
    }

    pub fn update(&self, change: impl FnOnce(&T) -> T) -> bool {
        let next = change(&self.state.borrow().value);
        self.set(next)
    }
}

impl<T: Clone + 'static> ReadSignal<T> {
    pub fn get(&self) -> T {
        self.state.borrow().value.clone()
    }

    pub fn subscribe(&self, subscriber: impl FnMut(&T) + 'static) -> Subscription {
        let subscriber: Subscriber<T> = Rc::new(RefCell::new(subscriber));
        self.state.borrow_mut().subscribers.push(Rc::clone(&subscriber));

        let state = Rc::downgrade(&self.state);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(state) = state.upgrade() {
                    state
                        .borrow_mut()
                        .subscribers
                        .retain(|item| !Rc::ptr_eq(item, &subscriber));
                }
            })),
        }
    }
}

#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}
