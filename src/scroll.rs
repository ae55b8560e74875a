//! Scroll progress, active-section tracking and the condensed-header flag.

use crate::{
    config::MotionConfig,
    signal::{ReadSignal, Signal},
};
use serde::Serialize;
use std::cell::Cell;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Home,
    About,
    Projects,
    Skills,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::About,
        Section::Projects,
        Section::Skills,
        Section::Contact,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            Self::Home => "accueil",
            Self::About => "apropos",
            Self::Projects => "projets",
            Self::Skills => "competences",
            Self::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Accueil",
            Self::About => "A propos",
            Self::Projects => "Projets",
            Self::Skills => "Competences",
            Self::Contact => "Contact",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SectionOffset {
    pub section: Section,
    pub top: f64,
}

/// Fraction of the scrollable distance covered, in [0, 1]. Pages that do not
/// scroll report 0.
pub fn scroll_fraction(metrics: ScrollMetrics) -> f64 {
    let scrollable = metrics.document_height - metrics.viewport_height;
    if scrollable.is_nan() || scrollable <= 0.0 {
        return 0.0;
    }

    let fraction = metrics.scroll_top / scrollable;
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Last section, in the given order, whose corrected top is at or above the
/// lookahead line.
pub fn active_section(
    offsets: &[SectionOffset],
    scroll_top: f64,
    header_offset: f64,
    lookahead: f64,
) -> Option<Section> {
    let line = scroll_top + lookahead;
    offsets
        .iter()
        .rev()
        .find(|offset| offset.top - header_offset <= line)
        .map(|offset| offset.section)
}

#[derive(Clone, PartialEq)]
pub struct ScrollState {
    pub fraction: ReadSignal<f64>,
    pub active_section: ReadSignal<Option<Section>>,
    pub header_condensed: ReadSignal<bool>,
}

pub struct ScrollTracker {
    throttle_ms: f64,
    header_offset: f64,
    lookahead: f64,
    condense_after: f64,
    last_run_ms: Cell<Option<f64>>,
    fraction: Signal<f64>,
    active_section: Signal<Option<Section>>,
    header_condensed: Signal<bool>,
}

impl ScrollTracker {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            throttle_ms: f64::from(config.scroll_throttle_ms),
            header_offset: config.header_offset_px,
            lookahead: config.section_lookahead_px,
            condense_after: config.header_condense_px,
            last_run_ms: Cell::new(None),
            fraction: Signal::new(0.0),
            active_section: Signal::new(None),
            header_condensed: Signal::new(false),
        }
    }

    pub fn state(&self) -> ScrollState {
        ScrollState {
            fraction: self.fraction.reader(),
            active_section: self.active_section.reader(),
            header_condensed: self.header_condensed.reader(),
        }
    }

    /// Scroll event entry point. Runs at most once per throttle window (leading edge)
    /// and returns whether it ran. `measure` is only called once the window is open.
    pub fn handle_scroll(
        &self,
        now_ms: f64,
        measure: impl FnOnce() -> Option<(ScrollMetrics, Vec<SectionOffset>)>,
    ) -> bool {
        if let Some(last) = self.last_run_ms.get() {
            if now_ms - last < self.throttle_ms {
                return false;
            }
        }
        let Some((metrics, offsets)) = measure() else {
            return false;
        };
        self.last_run_ms.set(Some(now_ms));
        self.recompute(metrics, &offsets);
        true
    }

    pub fn recompute(&self, metrics: ScrollMetrics, offsets: &[SectionOffset]) {
        self.fraction.set(scroll_fraction(metrics));
        self.header_condensed
            .set(metrics.scroll_top > self.condense_after);

        // No match keeps the previous section.
        if let Some(section) =
            active_section(offsets, metrics.scroll_top, self.header_offset, self.lookahead)
        {
            self.active_section.set(Some(section));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    fn metrics(scroll_top: f64, document_height: f64, viewport_height: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top,
            document_height,
            viewport_height,
        }
    }

    fn page_offsets() -> Vec<SectionOffset> {
        Section::ALL
            .into_iter()
            .zip([0.0, 900.0, 1_800.0, 2_700.0, 3_600.0])
            .map(|(section, top)| SectionOffset { section, top })
            .collect()
    }

    #[test]
    fn fraction_is_zero_when_the_page_does_not_scroll() {
        for scroll_top in [0.0, 10.0, 400.0, 5_000.0, -3.0] {
            let fraction = scroll_fraction(metrics(scroll_top, 800.0, 800.0));
            assert_eq!(fraction, 0.0);
        }
        assert_eq!(scroll_fraction(metrics(50.0, 600.0, 800.0)), 0.0);
        assert_eq!(scroll_fraction(metrics(f64::NAN, 2_000.0, 800.0)), 0.0);
    }

    #[test]
    fn fraction_is_clamped() {
        assert_eq!(scroll_fraction(metrics(600.0, 2_000.0, 800.0)), 0.5);
        assert_eq!(scroll_fraction(metrics(5_000.0, 2_000.0, 800.0)), 1.0);
        assert_eq!(scroll_fraction(metrics(-100.0, 2_000.0, 800.0)), 0.0);
    }

    #[test]
    fn active_section_uses_header_correction_and_lookahead() {
        let offsets = page_offsets();

        assert_eq!(active_section(&offsets, 0.0, 80.0, 150.0), Some(Section::Home));
        // 900 - 80 = 820 <= 680 + 150
        assert_eq!(active_section(&offsets, 680.0, 80.0, 150.0), Some(Section::About));
        assert_eq!(active_section(&offsets, 669.0, 80.0, 150.0), Some(Section::Home));
        assert_eq!(active_section(&offsets, 10_000.0, 80.0, 150.0), Some(Section::Contact));
    }

    #[test]
    fn active_section_is_retained_when_nothing_matches() {
        let tracker = ScrollTracker::new(&MotionConfig::default());
        let state = tracker.state();
        let offsets = page_offsets();

        tracker.recompute(metrics(2_000.0, 5_000.0, 800.0), &offsets);
        assert_eq!(state.active_section.get(), Some(Section::Projects));

        // Only sections far below the viewport are mounted.
        let below = [SectionOffset {
            section: Section::Contact,
            top: 9_000.0,
        }];
        tracker.recompute(metrics(0.0, 10_000.0, 800.0), &below);
        assert_eq!(state.active_section.get(), Some(Section::Projects));
    }

    #[test]
    fn handler_is_throttled_on_the_leading_edge() {
        let tracker = ScrollTracker::new(&MotionConfig::default());
        let at = |top| move || Some((metrics(top, 5_000.0, 1_000.0), page_offsets()));

        assert!(tracker.handle_scroll(0.0, at(100.0)));
        assert!(!tracker.handle_scroll(8.0, at(200.0)));
        assert!(!tracker.handle_scroll(15.9, at(300.0)));
        assert_eq!(tracker.state().fraction.get(), 100.0 / 4_000.0);

        assert!(tracker.handle_scroll(16.0, at(400.0)));
        assert_eq!(tracker.state().fraction.get(), 0.1);
    }

    #[test]
    fn throttled_events_skip_measurement() {
        let tracker = ScrollTracker::new(&MotionConfig::default());
        let measured = Rc::new(Cell::new(0));
        let measure = |top| {
            let measured = measured.clone();
            move || {
                measured.set(measured.get() + 1);
                Some((metrics(top, 5_000.0, 1_000.0), page_offsets()))
            }
        };

        assert!(tracker.handle_scroll(0.0, measure(100.0)));
        for now in [1.0, 5.0, 10.0, 15.0] {
            assert!(!tracker.handle_scroll(now, measure(200.0)));
        }
        assert_eq!(measured.get(), 1);

        assert!(tracker.handle_scroll(20.0, measure(300.0)));
        assert_eq!(measured.get(), 2);
    }

    #[test]
    fn failed_measurement_leaves_the_window_open() {
        let tracker = ScrollTracker::new(&MotionConfig::default());

        assert!(!tracker.handle_scroll(0.0, || None));
        assert!(tracker.handle_scroll(1.0, || {
            Some((metrics(500.0, 5_000.0, 1_000.0), page_offsets()))
        }));
        assert_eq!(tracker.state().fraction.get(), 0.125);
    }

    #[test]
    fn outputs_notify_subscribers_independently() {
        let tracker = ScrollTracker::new(&MotionConfig::default());
        let state = tracker.state();
        let sections = Rc::new(RefCell::new(Vec::new()));
        let condensed = Rc::new(RefCell::new(Vec::new()));

        let _sections_sub = {
            let sections = sections.clone();
            state
                .active_section
                .subscribe(move |section| sections.borrow_mut().push(*section))
        };
        let _condensed_sub = {
            let condensed = condensed.clone();
            state
                .header_condensed
                .subscribe(move |value| condensed.borrow_mut().push(*value))
        };

        let offsets = page_offsets();
        tracker.recompute(metrics(50.0, 5_000.0, 800.0), &offsets);
        tracker.recompute(metrics(60.0, 5_000.0, 800.0), &offsets);
        tracker.recompute(metrics(150.0, 5_000.0, 800.0), &offsets);
        tracker.recompute(metrics(1_000.0, 5_000.0, 800.0), &offsets);

        assert_eq!(
            *sections.borrow(),
            vec![Some(Section::Home), Some(Section::About)]
        );
        assert_eq!(*condensed.borrow(), vec![true]);
    }

    #[test]
    fn dom_ids_are_unique() {
        let mut ids: Vec<_> = Section::ALL.into_iter().map(Section::dom_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Section::ALL.len());
    }
}
