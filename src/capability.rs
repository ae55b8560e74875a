//! Startup gate for the heavy background scene.

use serde::Serialize;

/// Environment facts the gate needs. The browser implementation lives in
/// `browser::BrowserProbe`; tests use fixed answers.
pub trait CapabilityProbe {
    fn rendering_context_available(&self) -> bool;
    fn is_mobile(&self) -> bool;
    fn prefers_reduced_motion(&self) -> bool;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledReason {
    NoRenderingContext,
    MobileDevice,
    ReducedMotion,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CapabilityDecision {
    pub reason: Option<DisabledReason>,
}

impl CapabilityDecision {
    pub fn enabled(self) -> bool {
        self.reason.is_none()
    }
}

/// Applies the rules in order; the first one that matches disables the scene.
pub fn evaluate(probe: &dyn CapabilityProbe) -> CapabilityDecision {
    let reason = if !probe.rendering_context_available() {
        Some(DisabledReason::NoRenderingContext)
    } else if probe.is_mobile() {
        Some(DisabledReason::MobileDevice)
    } else if probe.prefers_reduced_motion() {
        Some(DisabledReason::ReducedMotion)
    } else {
        None
    };

    CapabilityDecision { reason }
}

pub fn decide(probe: &dyn CapabilityProbe) -> bool {
    evaluate(probe).enabled()
}

const MOBILE_USER_AGENT_TOKENS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

pub fn user_agent_is_mobile(user_agent: &str) -> bool {
    let user_agent = user_agent.to_ascii_lowercase();
    MOBILE_USER_AGENT_TOKENS
        .iter()
        .any(|token| user_agent.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixedProbe {
        context: bool,
        mobile: bool,
        reduced_motion: bool,
        context_checks: Cell<u32>,
    }

    impl FixedProbe {
        fn new(context: bool, mobile: bool, reduced_motion: bool) -> Self {
            Self {
                context,
                mobile,
                reduced_motion,
                context_checks: Cell::new(0),
            }
        }
    }

    impl CapabilityProbe for FixedProbe {
        fn rendering_context_available(&self) -> bool {
            self.context_checks.set(self.context_checks.get() + 1);
            self.context
        }

        fn is_mobile(&self) -> bool {
            self.mobile
        }

        fn prefers_reduced_motion(&self) -> bool {
            self.reduced_motion
        }
    }

    #[test]
    fn capable_desktop_enables_the_scene() {
        let probe = FixedProbe::new(true, false, false);
        assert!(decide(&probe));
        assert_eq!(probe.context_checks.get(), 1);
    }

    #[test]
    fn reduced_motion_disables_regardless_of_other_inputs() {
        for context in [true, false] {
            for mobile in [true, false] {
                let probe = FixedProbe::new(context, mobile, true);
                assert!(!decide(&probe), "context={context} mobile={mobile}");
            }
        }
    }

    #[test]
    fn reduced_motion_on_capable_desktop_reports_its_reason() {
        let probe = FixedProbe::new(true, false, true);
        assert_eq!(
            evaluate(&probe).reason,
            Some(DisabledReason::ReducedMotion)
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        assert_eq!(
            evaluate(&FixedProbe::new(false, true, true)).reason,
            Some(DisabledReason::NoRenderingContext)
        );
        assert_eq!(
            evaluate(&FixedProbe::new(true, true, true)).reason,
            Some(DisabledReason::MobileDevice)
        );
    }

    #[test]
    fn mobile_user_agents_are_recognized() {
        assert!(user_agent_is_mobile(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
        ));
        assert!(user_agent_is_mobile("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
        assert!(!user_agent_is_mobile(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/126.0 Safari/537.36"
        ));
    }
}
