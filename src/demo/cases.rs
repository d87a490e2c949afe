//! The demo cases.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use super::{Callback, Case};
use crate::error::PeekError;
use crate::peek::{PeekOptions, Props};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// An object rebuilt with fresh content on every parent render.
#[derive(Debug, Serialize)]
struct UnstableObject {
    id: u64,
}

impl UnstableObject {
    fn fresh() -> Self {
        Self {
            id: NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed),
        }
    }
}

/// An object rebuilt every parent render with the same content.
#[derive(Debug, Serialize)]
struct StaticObject {
    id: u64,
}

/// Stable label plus an ignored prop that changes every render: flashes.
#[derive(Debug)]
pub struct FlashExpected {
    label: String,
}

impl FlashExpected {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[derive(Serialize)]
struct FlashExpectedProps<'a> {
    label: &'a str,
    unstable_prop: UnstableObject,
}

impl Case for FlashExpected {
    fn title(&self) -> &str {
        "Case 1: Flash Expected"
    }

    fn description(&self) -> &[&'static str] {
        &[
            "I receive a new object every render, but I ignore it.",
            "My relevant props are stable.",
        ]
    }

    fn props(&self, _parent_count: u64) -> Result<Props, PeekError> {
        Props::from_serialize(&FlashExpectedProps {
            label: &self.label,
            unstable_prop: UnstableObject::fresh(),
        })
    }

    fn options(&self) -> PeekOptions {
        PeekOptions::new().ignore("unstable_prop")
    }

    fn expects_flash(&self) -> bool {
        true
    }
}

/// Receives the parent's counter, so every render is necessary.
#[derive(Debug)]
pub struct NoFlash;

#[derive(Serialize)]
struct NoFlashProps {
    count: u64,
}

impl Case for NoFlash {
    fn title(&self) -> &str {
        "Case 2: No Flash Expected"
    }

    fn description(&self) -> &[&'static str] {
        &[
            "My prop 'count' changes every render.",
            "This is a necessary re-render.",
        ]
    }

    fn props(&self, parent_count: u64) -> Result<Props, PeekError> {
        Props::from_serialize(&NoFlashProps {
            count: parent_count,
        })
    }

    fn expects_flash(&self) -> bool {
        false
    }
}

/// A freshly built but deeply equal object on every render: flashes
/// without any options.
#[derive(Debug)]
pub struct FlashNoOptions;

#[derive(Serialize)]
struct FlashNoOptionsProps {
    static_obj: StaticObject,
}

impl Case for FlashNoOptions {
    fn title(&self) -> &str {
        "Case 3: Flash Expected (No Options)"
    }

    fn description(&self) -> &[&'static str] {
        &[
            "I receive a DEEP EQUAL object every render: {\"id\":1}",
            "The value is rebuilt, but its content is the same. I should flash.",
        ]
    }

    fn props(&self, _parent_count: u64) -> Result<Props, PeekError> {
        Props::from_serialize(&FlashNoOptionsProps {
            static_obj: StaticObject { id: 1 },
        })
    }

    fn expects_flash(&self) -> bool {
        true
    }
}

/// Stable id plus a new callback every render, with the callback ignored.
#[derive(Debug)]
pub struct ChildWithCallback {
    stable_id: String,
}

impl ChildWithCallback {
    pub fn new(stable_id: impl Into<String>) -> Self {
        Self {
            stable_id: stable_id.into(),
        }
    }
}

#[derive(Serialize)]
struct ChildProps<'a> {
    stable_id: &'a str,
    unstable_callback: Callback,
}

impl Case for ChildWithCallback {
    fn title(&self) -> &str {
        "Child Component"
    }

    fn description(&self) -> &[&'static str] {
        &[
            "I receive a new callback on every render, but I ignore it.",
            "So I should FLASH because my relevant props haven't changed!",
        ]
    }

    fn props(&self, _parent_count: u64) -> Result<Props, PeekError> {
        Props::from_serialize(&ChildProps {
            stable_id: &self.stable_id,
            unstable_callback: Callback::new("unstable_callback"),
        })
    }

    fn options(&self) -> PeekOptions {
        PeekOptions::new().ignore("unstable_callback")
    }

    fn expects_flash(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::default_cases;
    use crate::peek::{detect, Detection};

    /// Two consecutive parent renders, classified the way a monitor would.
    fn second_render(case: &dyn Case) -> Detection {
        let options = case.options();
        let first = case.props(1).unwrap();
        let second = case.props(2).unwrap();
        detect(Some(&first), &second, options.ignored())
    }

    #[test]
    fn test_cases_match_expectation() {
        for case in default_cases() {
            let expected = if case.expects_flash() {
                Detection::Redundant
            } else {
                Detection::Changed
            };
            assert_eq!(second_render(case.as_ref()), expected, "{}", case.title());
        }
    }

    #[test]
    fn test_ignored_props_really_change() {
        let case = FlashExpected::new("label");
        let first = case.props(1).unwrap();
        let second = case.props(1).unwrap();
        assert_ne!(first.get("unstable_prop"), second.get("unstable_prop"));

        let child = ChildWithCallback::new("id");
        let first = child.props(1).unwrap();
        let second = child.props(1).unwrap();
        assert_ne!(first.get("unstable_callback"), second.get("unstable_callback"));
    }

    #[test]
    fn test_without_ignore_keys_flash_cases_change() {
        let case = FlashExpected::new("label");
        let first = case.props(1).unwrap();
        let second = case.props(2).unwrap();
        assert_eq!(
            detect(Some(&first), &second, &Default::default()),
            Detection::Changed
        );
    }

    #[test]
    fn test_default_suite() {
        let cases = default_cases();
        assert_eq!(cases.len(), 4);
        assert_eq!(cases.iter().filter(|c| c.expects_flash()).count(), 3);
    }
}
