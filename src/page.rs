//! Page-view coordinator: the single owner of state shared across components.

use crate::{
    capability::{evaluate, CapabilityDecision, CapabilityProbe},
    config::MotionConfig,
    contact::{ContactFlow, Notifier},
    log::{log_event, LogLevel},
    scheduler::Scheduler,
    scroll::{ScrollMetrics, ScrollState, ScrollTracker, SectionOffset},
    signal::{ReadSignal, Signal},
    theme::{persist_theme, resolve_theme, PreferenceStore, Theme},
    visibility::VisibilityObserver,
};
use serde_json::json;
use std::{cell::OnceCell, rc::Rc};

struct PageInner {
    scheduler: Rc<dyn Scheduler>,
    config: MotionConfig,
    capability: OnceCell<CapabilityDecision>,
    store: Rc<dyn PreferenceStore>,
    theme: Signal<Theme>,
    menu_open: Signal<bool>,
    scroll: ScrollTracker,
    visibility: VisibilityObserver,
    contact: ContactFlow,
}

#[derive(Clone)]
pub struct Page {
    inner: Rc<PageInner>,
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Page {
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        config: MotionConfig,
        store: Rc<dyn PreferenceStore>,
        system_prefers_dark: bool,
    ) -> Self {
        let theme = resolve_theme(store.as_ref(), system_prefers_dark);
        let notifier = Notifier::new(Rc::clone(&scheduler), config.notification_visible_ms);
        let contact = ContactFlow::new(Rc::clone(&scheduler), config.contact_send_delay_ms, notifier);

        Self {
            inner: Rc::new(PageInner {
                scroll: ScrollTracker::new(&config),
                scheduler,
                config,
                capability: OnceCell::new(),
                store,
                theme: Signal::new(theme),
                menu_open: Signal::new(false),
                visibility: VisibilityObserver::new(),
                contact,
            }),
        }
    }

    pub fn scheduler(&self) -> Rc<dyn Scheduler> {
        Rc::clone(&self.inner.scheduler)
    }

    pub fn config(&self) -> &MotionConfig {
        &self.inner.config
    }

    /// Evaluated on first call; later calls return the same decision without
    /// consulting `probe`.
    pub fn capability(&self, probe: &dyn CapabilityProbe) -> CapabilityDecision {
        *self.inner.capability.get_or_init(|| {
            let decision = evaluate(probe);
            self.log(
                LogLevel::Info,
                "capability_decided",
                json!({ "enabled": decision.enabled(), "reason": decision.reason }),
            );
            decision
        })
    }

    pub fn theme(&self) -> ReadSignal<Theme> {
        self.inner.theme.reader()
    }

    pub fn toggle_theme(&self) -> Theme {
        let next = self.inner.theme.get().toggled();
        persist_theme(self.inner.store.as_ref(), next);
        self.inner.theme.set(next);
        self.log(LogLevel::Debug, "theme_changed", json!({ "theme": next }));
        next
    }

    pub fn menu_open(&self) -> ReadSignal<bool> {
        self.inner.menu_open.reader()
    }

    pub fn toggle_menu(&self) -> bool {
        let open = !self.inner.menu_open.get();
        self.inner.menu_open.set(open);
        open
    }

    pub fn close_menu(&self) {
        self.inner.menu_open.set(false);
    }

    pub fn handle_key(&self, key: &str) -> bool {
        if key == "Escape" && self.inner.menu_open.get() {
            self.close_menu();
            return true;
        }
        false
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.inner.scroll.state()
    }

    pub fn handle_scroll(
        &self,
        measure: impl FnOnce() -> Option<(ScrollMetrics, Vec<SectionOffset>)>,
    ) -> bool {
        let now = self.inner.scheduler.now_ms();
        self.inner.scroll.handle_scroll(now, measure)
    }

    pub fn measure_scroll(&self, metrics: ScrollMetrics, offsets: &[SectionOffset]) {
        self.inner.scroll.recompute(metrics, offsets);
    }

    pub fn visibility(&self) -> &VisibilityObserver {
        &self.inner.visibility
    }

    pub fn contact(&self) -> &ContactFlow {
        &self.inner.contact
    }

    pub fn log(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        log_event(self.inner.config.log_level, level, event, fields);
    }
}
