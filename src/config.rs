use crate::log::LogLevel;

const DEFAULT_COUNTER_DURATION_MS: u32 = 2_000;
const DEFAULT_SCROLL_THROTTLE_MS: u32 = 16;
const DEFAULT_HEADER_OFFSET_PX: f64 = 80.0;
const DEFAULT_SECTION_LOOKAHEAD_PX: f64 = 150.0;
const DEFAULT_HEADER_CONDENSE_PX: f64 = 100.0;
const DEFAULT_TYPING_START_DELAY_MS: u32 = 1_000;
const DEFAULT_TYPING_CHAR_INTERVAL_MS: u32 = 80;
const DEFAULT_NOTIFICATION_VISIBLE_MS: u32 = 3_000;
const DEFAULT_CONTACT_SEND_DELAY_MS: u32 = 2_000;
const DEFAULT_RESIZE_DEBOUNCE_MS: u32 = 250;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const COUNTER_DURATION_MS_BOUNDS: (u32, u32) = (0, 60_000);
const SCROLL_THROTTLE_MS_BOUNDS: (u32, u32) = (0, 1_000);
const HEADER_OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 400.0);
const SECTION_LOOKAHEAD_PX_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const HEADER_CONDENSE_PX_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const TYPING_START_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const TYPING_CHAR_INTERVAL_MS_BOUNDS: (u32, u32) = (1, 1_000);
const NOTIFICATION_VISIBLE_MS_BOUNDS: (u32, u32) = (500, 30_000);
const CONTACT_SEND_DELAY_MS_BOUNDS: (u32, u32) = (0, 30_000);
const RESIZE_DEBOUNCE_MS_BOUNDS: (u32, u32) = (0, 5_000);

#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub counter_duration_ms: u32,
    pub scroll_throttle_ms: u32,
    pub header_offset_px: f64,
    pub section_lookahead_px: f64,
    pub header_condense_px: f64,
    pub typing_start_delay_ms: u32,
    pub typing_char_interval_ms: u32,
    pub notification_visible_ms: u32,
    pub contact_send_delay_ms: u32,
    pub resize_debounce_ms: u32,
    pub log_level: LogLevel,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
            header_offset_px: DEFAULT_HEADER_OFFSET_PX,
            section_lookahead_px: DEFAULT_SECTION_LOOKAHEAD_PX,
            header_condense_px: DEFAULT_HEADER_CONDENSE_PX,
            typing_start_delay_ms: DEFAULT_TYPING_START_DELAY_MS,
            typing_char_interval_ms: DEFAULT_TYPING_CHAR_INTERVAL_MS,
            notification_visible_ms: DEFAULT_NOTIFICATION_VISIBLE_MS,
            contact_send_delay_ms: DEFAULT_CONTACT_SEND_DELAY_MS,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl MotionConfig {
    /// Builds a config from a key lookup such as the root element's `data-*` attributes.
    /// Missing, unparsable or out-of-range values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            counter_duration_ms: parse_u32_with_bounds(
                &lookup,
                "counter-duration-ms",
                DEFAULT_COUNTER_DURATION_MS,
                COUNTER_DURATION_MS_BOUNDS,
            ),
            scroll_throttle_ms: parse_u32_with_bounds(
                &lookup,
                "scroll-throttle-ms",
                DEFAULT_SCROLL_THROTTLE_MS,
                SCROLL_THROTTLE_MS_BOUNDS,
            ),
            header_offset_px: parse_f64_with_bounds(
                &lookup,
                "header-offset-px",
                DEFAULT_HEADER_OFFSET_PX,
                HEADER_OFFSET_PX_BOUNDS,
            ),
            section_lookahead_px: parse_f64_with_bounds(
                &lookup,
                "section-lookahead-px",
                DEFAULT_SECTION_LOOKAHEAD_PX,
                SECTION_LOOKAHEAD_PX_BOUNDS,
            ),
            header_condense_px: parse_f64_with_bounds(
                &lookup,
                "header-condense-px",
                DEFAULT_HEADER_CONDENSE_PX,
                HEADER_CONDENSE_PX_BOUNDS,
            ),
            typing_start_delay_ms: parse_u32_with_bounds(
                &lookup,
                "typing-start-delay-ms",
                DEFAULT_TYPING_START_DELAY_MS,
                TYPING_START_DELAY_MS_BOUNDS,
            ),
            typing_char_interval_ms: parse_u32_with_bounds(
                &lookup,
                "typing-char-interval-ms",
                DEFAULT_TYPING_CHAR_INTERVAL_MS,
                TYPING_CHAR_INTERVAL_MS_BOUNDS,
            ),
            notification_visible_ms: parse_u32_with_bounds(
                &lookup,
                "notification-visible-ms",
                DEFAULT_NOTIFICATION_VISIBLE_MS,
                NOTIFICATION_VISIBLE_MS_BOUNDS,
            ),
            contact_send_delay_ms: parse_u32_with_bounds(
                &lookup,
                "contact-send-delay-ms",
                DEFAULT_CONTACT_SEND_DELAY_MS,
                CONTACT_SEND_DELAY_MS_BOUNDS,
            ),
            resize_debounce_ms: parse_u32_with_bounds(
                &lookup,
                "resize-debounce-ms",
                DEFAULT_RESIZE_DEBOUNCE_MS,
                RESIZE_DEBOUNCE_MS_BOUNDS,
            ),
            log_level: parse_log_level(&lookup, "log-level", DEFAULT_LOG_LEVEL),
        }
    }
}

fn parse_non_empty_string(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u32_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u32,
    bounds: (u32, u32),
) -> u32 {
    parse_non_empty_string(lookup, name)
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: f64,
    bounds: (f64, f64),
) -> f64 {
    parse_non_empty_string(lookup, name)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: LogLevel,
) -> LogLevel {
    parse_non_empty_string(lookup, name)
        .and_then(|value| LogLevel::from_str(&value.to_ascii_lowercase()))
        .unwrap_or(default)
}
