use crate::{
    capability::{user_agent_is_mobile, CapabilityProbe},
    config::MotionConfig,
    scheduler::{Scheduler, TimerHandle},
    scroll::{ScrollMetrics, Section, SectionOffset},
    theme::{MemoryStore, PreferenceStore, Theme},
    visibility::{Intersection, Reported, VisibilityObserver, Watch},
};
use gloo::{
    render::{request_animation_frame, AnimationFrame},
    timers::callback::{Interval, Timeout},
};
use js_sys::{Array, Function, Reflect};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, HtmlCanvasElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Storage,
};

const FALLBACK_VIEWPORT: (f64, f64) = (1280.0, 720.0);

#[derive(Clone, Copy, Default)]
pub struct BrowserScheduler;

struct FrameLoop {
    callback: RefCell<Box<dyn FnMut()>>,
    frame: RefCell<Option<AnimationFrame>>,
    active: Cell<bool>,
}

impl FrameLoop {
    fn request(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let frame = request_animation_frame(move |_timestamp| {
            let Some(frame_loop) = weak.upgrade() else {
                return;
            };
            (frame_loop.callback.borrow_mut())();
            if frame_loop.active.get() {
                frame_loop.request();
            }
        });
        let spent = self.frame.borrow_mut().replace(frame);
        drop(spent);
    }
}

impl Scheduler for BrowserScheduler {
    fn now_ms(&self) -> f64 {
        window()
            .and_then(|w| w.performance())
            .map(|performance| performance.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let timeout = Timeout::new(delay_ms, callback);
        TimerHandle::new(move || drop(timeout))
    }

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> TimerHandle {
        let interval = Interval::new(period_ms, callback);
        TimerHandle::new(move || drop(interval))
    }

    fn on_each_frame(&self, callback: Box<dyn FnMut()>) -> TimerHandle {
        let frame_loop = Rc::new(FrameLoop {
            callback: RefCell::new(callback),
            frame: RefCell::new(None),
            active: Cell::new(true),
        });
        frame_loop.request();

        TimerHandle::new(move || {
            frame_loop.active.set(false);
            let pending = frame_loop.frame.borrow_mut().take();
            drop(pending);
        })
    }
}

fn match_media(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn prefers_reduced_motion() -> bool {
    match_media("(prefers-reduced-motion: reduce)")
}

pub fn system_prefers_dark() -> bool {
    match_media("(prefers-color-scheme: dark)")
}

pub struct BrowserProbe;

impl CapabilityProbe for BrowserProbe {
    fn rendering_context_available(&self) -> bool {
        let Some(document) = window().and_then(|w| w.document()) else {
            return false;
        };
        let Some(canvas) = document
            .create_element("canvas")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
        else {
            return false;
        };

        ["webgl", "experimental-webgl"]
            .into_iter()
            .any(|kind| matches!(canvas.get_context(kind), Ok(Some(_))))
    }

    fn is_mobile(&self) -> bool {
        window()
            .and_then(|w| w.navigator().user_agent().ok())
            .is_some_and(|user_agent| user_agent_is_mobile(&user_agent))
    }

    fn prefers_reduced_motion(&self) -> bool {
        prefers_reduced_motion()
    }
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

/// `localStorage`; reads and writes are silently skipped when storage is blocked.
pub struct LocalStorageStore;

pub fn preference_store() -> Rc<dyn PreferenceStore> {
    if local_storage().is_some() {
        Rc::new(LocalStorageStore)
    } else {
        Rc::new(MemoryStore::default())
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, value);
        }
    }
}

fn root_element() -> Option<Element> {
    window()?.document()?.document_element()
}

pub fn apply_theme(theme: Theme) {
    if let Some(root) = root_element() {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

/// Switches the theme inside a view transition when the browser supports one and
/// the user has not asked for reduced motion.
pub fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let start_view_transition = Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok());
    let Some(start_view_transition) = start_view_transition else {
        apply_theme(theme);
        return;
    };

    // Runs asynchronously, after this function returns.
    let update = Closure::once_into_js(move || apply_theme(theme));
    if start_view_transition.call1(&document_js, &update).is_err() {
        apply_theme(theme);
    }
}

pub fn config_from_document() -> MotionConfig {
    let root = root_element();
    MotionConfig::from_lookup(|key| root.as_ref()?.get_attribute(&format!("data-{key}")))
}

pub fn set_body_scroll_locked(locked: bool) {
    let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    let _ = body
        .style()
        .set_property("overflow", if locked { "hidden" } else { "" });
}

pub fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return FALLBACK_VIEWPORT;
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.1);

    (width, height)
}

pub fn scroll_metrics() -> Option<ScrollMetrics> {
    let win = window()?;
    let root = win.document()?.document_element()?;
    let (_, viewport_height) = viewport_size();

    Some(ScrollMetrics {
        scroll_top: win.scroll_y().unwrap_or(0.0),
        document_height: f64::from(root.scroll_height()),
        viewport_height,
    })
}

fn section_element(section: Section) -> Option<HtmlElement> {
    window()?
        .document()?
        .get_element_by_id(section.dom_id())?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn section_offsets() -> Vec<SectionOffset> {
    Section::ALL
        .into_iter()
        .filter_map(|section| {
            section_element(section).map(|element| SectionOffset {
                section,
                top: f64::from(element.offset_top()),
            })
        })
        .collect()
}

pub fn scroll_to_section(section: Section, header_offset: f64) -> Result<(), &'static str> {
    let win = window().ok_or("window unavailable")?;
    let element = section_element(section).ok_or("section element missing")?;

    let options = ScrollToOptions::new();
    options.set_top(f64::from(element.offset_top()) - header_offset);
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

/// Feeds one element's intersection reports into a [`VisibilityObserver`]. The
/// underlying observer disconnects once the watch fires, or when this is dropped.
pub struct IntersectionBinding {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for IntersectionBinding {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn bind_intersection(
    element: &Element,
    watch: &Watch,
    visibility: &VisibilityObserver,
    root_margin: Option<&str>,
) -> Result<IntersectionBinding, &'static str> {
    let id = watch.id();
    let visibility = visibility.clone();

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            let samples = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| {
                    (
                        id,
                        Intersection {
                            ratio: entry.intersection_ratio(),
                            is_intersecting: entry.is_intersecting(),
                        },
                    )
                });

            let fired = visibility
                .report_batch(samples)
                .into_iter()
                .any(|(_, reported)| reported == Reported::Fired);
            if fired {
                observer.disconnect();
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(watch.threshold()));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(|_| "failed to create IntersectionObserver")?;
    observer.observe(element);

    Ok(IntersectionBinding {
        observer,
        _callback: callback,
    })
}
