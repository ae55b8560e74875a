//! One-shot viewport visibility tracking.

use serde::Serialize;
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ElementId(u64);

impl ElementId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationTag {
    FadeIn,
    SlideUp,
    SectionHeader,
    Counter,
    ProgressBar,
}

impl AnimationTag {
    pub fn hidden_class(self) -> &'static str {
        match self {
            Self::Counter | Self::ProgressBar => "is-waiting",
            _ => "opacity-0",
        }
    }

    pub fn visible_class(self) -> &'static str {
        match self {
            Self::FadeIn => "animate-fade-in",
            Self::SlideUp | Self::SectionHeader => "animate-slide-up",
            Self::Counter | Self::ProgressBar => "is-running",
        }
    }

    pub fn class(self, visible: bool) -> &'static str {
        if visible {
            self.visible_class()
        } else {
            self.hidden_class()
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Intersection {
    pub ratio: f64,
    pub is_intersecting: bool,
}

impl Intersection {
    pub fn visible(ratio: f64) -> Self {
        Self {
            ratio,
            is_intersecting: ratio > 0.0,
        }
    }

    pub fn hidden() -> Self {
        Self {
            ratio: 0.0,
            is_intersecting: false,
        }
    }

    fn crosses(self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio + f64::EPSILON >= threshold
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ObservableElement {
    pub id: ElementId,
    pub tag: AnimationTag,
    pub visible: bool,
}

struct Watched {
    element: ObservableElement,
    threshold: f64,
    on_visible: Option<Box<dyn FnOnce()>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: BTreeMap<ElementId, Watched>,
}

/// Outcome of a single report.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Reported {
    /// The element crossed its threshold for the first time; observation can stop.
    Fired,
    Pending,
    Ignored,
}

#[derive(Clone, Default)]
pub struct VisibilityObserver {
    registry: Rc<RefCell<Registry>>,
}

impl PartialEq for VisibilityObserver {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.registry, &other.registry)
    }
}

impl VisibilityObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an element. `on_visible` runs at most once, the first time at least
    /// `threshold` of the element is on screen.
    pub fn watch(
        &self,
        tag: AnimationTag,
        threshold: f64,
        on_visible: impl FnOnce() + 'static,
    ) -> Watch {
        let threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };

        let mut registry = self.registry.borrow_mut();
        let id = ElementId(registry.next_id);
        registry.next_id += 1;
        registry.entries.insert(
            id,
            Watched {
                element: ObservableElement {
                    id,
                    tag,
                    visible: false,
                },
                threshold,
                on_visible: Some(Box::new(on_visible)),
            },
        );

        Watch {
            id,
            threshold,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn report(&self, id: ElementId, sample: Intersection) -> Reported {
        let callback = {
            let mut registry = self.registry.borrow_mut();
            let Some(watched) = registry.entries.get_mut(&id) else {
                return Reported::Ignored;
            };
            if watched.element.visible {
                return Reported::Ignored;
            }
            if !sample.crosses(watched.threshold) {
                return Reported::Pending;
            }
            watched.element.visible = true;
            watched.on_visible.take()
        };

        if let Some(callback) = callback {
            callback();
        }
        Reported::Fired
    }

    pub fn report_batch(
        &self,
        samples: impl IntoIterator<Item = (ElementId, Intersection)>,
    ) -> Vec<(ElementId, Reported)> {
        samples
            .into_iter()
            .map(|(id, sample)| (id, self.report(id, sample)))
            .collect()
    }

    pub fn element(&self, id: ElementId) -> Option<ObservableElement> {
        self.registry
            .borrow()
            .entries
            .get(&id)
            .map(|watched| watched.element)
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(|element| element.visible)
    }

    pub fn observing(&self) -> usize {
        self.registry
            .borrow()
            .entries
            .values()
            .filter(|watched| !watched.element.visible)
            .count()
    }
}

/// Registration guard; dropping it (unmount) forgets the element.
#[must_use = "dropping a Watch stops observing the element"]
pub struct Watch {
    id: ElementId,
    threshold: f64,
    registry: std::rc::Weak<RefCell<Registry>>,
}

impl Watch {
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Drop for Watch {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let removed = registry.borrow_mut().entries.remove(&self.id);
            drop(removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn fires_once_even_when_scrolled_in_and_out_repeatedly() {
        let observer = VisibilityObserver::new();
        let (fired, on_visible) = counter();
        let watch = observer.watch(AnimationTag::Counter, 0.5, on_visible);

        assert_eq!(observer.report(watch.id(), Intersection::visible(0.2)), Reported::Pending);
        assert_eq!(observer.report(watch.id(), Intersection::visible(0.6)), Reported::Fired);
        observer.report(watch.id(), Intersection::hidden());
        assert_eq!(observer.report(watch.id(), Intersection::visible(1.0)), Reported::Ignored);
        observer.report(watch.id(), Intersection::hidden());
        observer.report(watch.id(), Intersection::visible(0.9));

        assert_eq!(fired.get(), 1);
        assert!(observer.is_visible(watch.id()));
        assert_eq!(observer.observing(), 0);
    }

    #[test]
    fn never_intersecting_element_never_fires() {
        let observer = VisibilityObserver::new();
        let (fired, on_visible) = counter();
        let watch = observer.watch(AnimationTag::ProgressBar, 0.5, on_visible);

        for _ in 0..10 {
            observer.report(watch.id(), Intersection::hidden());
        }

        assert_eq!(fired.get(), 0);
        assert!(!observer.is_visible(watch.id()));
    }

    #[test]
    fn zero_threshold_needs_an_actual_intersection() {
        let observer = VisibilityObserver::new();
        let (fired, on_visible) = counter();
        let watch = observer.watch(AnimationTag::FadeIn, 0.0, on_visible);

        observer.report(watch.id(), Intersection::hidden());
        assert_eq!(fired.get(), 0);

        observer.report(
            watch.id(),
            Intersection {
                ratio: 0.0,
                is_intersecting: true,
            },
        );
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn thresholds_are_clamped() {
        let observer = VisibilityObserver::new();
        assert_eq!(observer.watch(AnimationTag::FadeIn, 3.0, || ()).threshold(), 1.0);
        assert_eq!(observer.watch(AnimationTag::FadeIn, -1.0, || ()).threshold(), 0.0);
        assert_eq!(observer.watch(AnimationTag::FadeIn, f64::NAN, || ()).threshold(), 0.0);
    }

    #[test]
    fn batch_evaluates_every_element_independently() {
        let observer = VisibilityObserver::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let watches: Vec<Watch> = (0..3)
            .map(|index| {
                let order = order.clone();
                observer.watch(AnimationTag::SlideUp, 0.1, move || {
                    order.borrow_mut().push(index)
                })
            })
            .collect();

        let results = observer.report_batch([
            (watches[2].id(), Intersection::visible(0.5)),
            (watches[0].id(), Intersection::visible(0.05)),
            (watches[1].id(), Intersection::visible(0.5)),
        ]);

        assert_eq!(*order.borrow(), vec![2, 1]);
        assert_eq!(results[1].1, Reported::Pending);
        assert!(observer.is_visible(watches[1].id()));
        assert!(!observer.is_visible(watches[0].id()));
    }

    #[test]
    fn callback_may_register_new_watches() {
        let observer = VisibilityObserver::new();
        let nested: Rc<RefCell<Option<Watch>>> = Rc::new(RefCell::new(None));

        let watch = {
            let observer_inside = observer.clone();
            let nested = nested.clone();
            observer.watch(AnimationTag::SectionHeader, 0.1, move || {
                *nested.borrow_mut() = Some(observer_inside.watch(AnimationTag::FadeIn, 0.1, || ()));
            })
        };
        observer.report(watch.id(), Intersection::visible(1.0));

        assert!(nested.borrow().is_some());
        assert_eq!(observer.observing(), 1);
    }

    #[test]
    fn dropped_watch_is_forgotten_and_later_reports_are_ignored() {
        let observer = VisibilityObserver::new();
        let (fired, on_visible) = counter();
        let watch = observer.watch(AnimationTag::Counter, 0.5, on_visible);
        let id = watch.id();
        drop(watch);

        assert_eq!(observer.report(id, Intersection::visible(1.0)), Reported::Ignored);
        assert_eq!(fired.get(), 0);
        assert!(observer.element(id).is_none());
    }
}
