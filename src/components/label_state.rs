use std::time::Instant;

use crate::motion::LabelAnimator;
use crate::style::{LabelEndpoint, LabelPhase};

use super::control;

const LABEL_SLOT: &str = "label";

/// Whether the label floats. Each event returns the phase the animator should head
/// for, or `None` when the event leaves the label where it is.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirtyTracker {
    text: String,
    dirty: bool,
    focused: bool,
    last_controlled: Option<String>,
}

impl DirtyTracker {
    /// A placeholder only counts here; later transitions look at text and focus.
    pub fn new(value: Option<&str>, placeholder: Option<&str>) -> Self {
        let text = value.unwrap_or_default().to_string();
        let dirty = !text.is_empty() || placeholder.is_some_and(|value| !value.is_empty());
        Self {
            text,
            dirty,
            focused: false,
            last_controlled: value.map(str::to_string),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn phase(&self) -> LabelPhase {
        LabelPhase::from_dirty(self.dirty)
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) -> Option<LabelPhase> {
        self.focused = true;
        self.dirty = true;
        Some(LabelPhase::Dirty)
    }

    pub fn blur(&mut self) -> Option<LabelPhase> {
        self.focused = false;
        if !self.text.is_empty() {
            return None;
        }
        self.dirty = false;
        Some(LabelPhase::Clean)
    }

    /// Text and focus decide; a placeholder no longer keeps the label up.
    pub fn change_text(&mut self, text: &str) -> Option<LabelPhase> {
        self.text.clear();
        self.text.push_str(text);
        let dirty = !self.text.is_empty() || self.focused;
        if dirty == self.dirty {
            return None;
        }
        self.dirty = dirty;
        Some(self.phase())
    }

    /// Host-owned value. Only a value that changed since the last pass and differs
    /// from the current text overrides what the user typed.
    pub fn sync_controlled(&mut self, incoming: Option<&str>) -> Option<LabelPhase> {
        let incoming = incoming?;
        if self.last_controlled.as_deref() == Some(incoming) {
            return None;
        }
        self.last_controlled = Some(incoming.to_string());
        if incoming == self.text {
            return None;
        }
        self.text = incoming.to_string();
        self.dirty = !incoming.is_empty();
        Some(self.phase())
    }
}

/// Show/hide state of a secret field. Starts hidden.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PasswordVisibility {
    hidden: bool,
}

impl Default for PasswordVisibility {
    fn default() -> Self {
        Self { hidden: true }
    }
}

impl PasswordVisibility {
    pub fn hidden(self) -> bool {
        self.hidden
    }

    pub fn toggle(&mut self) -> bool {
        self.hidden = !self.hidden;
        self.hidden
    }

    pub fn obscures(self, secret: bool) -> bool {
        secret && self.hidden
    }
}

#[derive(Clone, Debug)]
pub struct FloatingLabelState {
    pub tracker: DirtyTracker,
    pub animator: LabelAnimator,
    pub password: PasswordVisibility,
}

impl FloatingLabelState {
    pub fn new(value: Option<&str>, placeholder: Option<&str>) -> Self {
        let tracker = DirtyTracker::new(value, placeholder);
        let animator = LabelAnimator::settled(tracker.phase());
        Self {
            tracker,
            animator,
            password: PasswordVisibility::default(),
        }
    }

    fn retarget(&mut self, id: &str, phase: Option<LabelPhase>, now: Instant) -> bool {
        let Some(phase) = phase else {
            return false;
        };
        let started = self.animator.animate_to(phase, now);
        if started {
            log::trace!("{id}: label animating to {phase:?}");
        }
        started
    }
}

pub struct LabelStateInput<'a> {
    pub id: &'a str,
    pub value: Option<&'a str>,
    pub placeholder: Option<&'a str>,
}

/// What one render pass needs to draw the label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelFrame {
    pub text: String,
    pub phase: LabelPhase,
    pub label: LabelEndpoint,
    pub animating: bool,
    pub password: PasswordVisibility,
}

fn with_label_state<R>(id: &str, update: impl FnOnce(&mut FloatingLabelState) -> R) -> R {
    control::with_state(id, LABEL_SLOT, || FloatingLabelState::new(None, None), update)
}

pub fn resolve(input: LabelStateInput<'_>, now: Instant) -> LabelFrame {
    let id = input.id;
    control::with_state(
        id,
        LABEL_SLOT,
        || FloatingLabelState::new(input.value, input.placeholder),
        |state| {
            let synced = state.tracker.sync_controlled(input.value);
            if let Some(phase) = synced {
                log::debug!("{id}: controlled value resynced, label {phase:?}");
            }
            state.retarget(id, synced, now);
            LabelFrame {
                text: state.tracker.text().to_string(),
                phase: state.tracker.phase(),
                label: state.animator.sample(now),
                animating: state.animator.is_running(now),
                password: state.password,
            }
        },
    )
}

pub fn focus(id: &str, now: Instant) -> bool {
    with_label_state(id, |state| {
        let phase = state.tracker.focus();
        state.retarget(id, phase, now)
    })
}

pub fn blur(id: &str, now: Instant) -> bool {
    with_label_state(id, |state| {
        let phase = state.tracker.blur();
        state.retarget(id, phase, now)
    })
}

pub fn change_text(id: &str, text: &str, now: Instant) -> bool {
    with_label_state(id, |state| {
        let phase = state.tracker.change_text(text);
        state.retarget(id, phase, now)
    })
}

pub fn toggle_password(id: &str) -> bool {
    with_label_state(id, |state| state.password.toggle())
}

/// False for an id with no state, including one already released.
pub fn is_dirty(id: &str) -> bool {
    control::read_state::<FloatingLabelState>(id, LABEL_SLOT)
        .is_some_and(|state| state.tracker.is_dirty())
}

/// Instance teardown: stops any flight and forgets the instance.
pub fn release(id: &str, now: Instant) {
    with_label_state(id, |state| state.animator.stop(now));
    let dropped = control::release(id);
    log::debug!("{id}: released {dropped} state slots");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_or_placeholder_starts_dirty() {
        assert!(DirtyTracker::new(Some("a"), None).is_dirty());
        assert!(DirtyTracker::new(Some(""), Some("Email")).is_dirty());
        assert!(!DirtyTracker::new(Some(""), Some("")).is_dirty());
        assert!(!DirtyTracker::new(None, None).is_dirty());
    }

    #[test]
    fn focus_always_floats_the_label() {
        let mut tracker = DirtyTracker::new(None, None);
        assert_eq!(tracker.focus(), Some(LabelPhase::Dirty));
        assert!(tracker.is_dirty());
    }

    #[test]
    fn blur_only_settles_an_empty_field() {
        let mut tracker = DirtyTracker::new(None, None);
        tracker.focus();
        tracker.change_text("hi");
        assert_eq!(tracker.blur(), None);
        assert!(tracker.is_dirty());

        tracker.change_text("");
        assert_eq!(tracker.blur(), Some(LabelPhase::Clean));
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn blur_ignores_placeholder_after_construction() {
        let mut tracker = DirtyTracker::new(Some(""), Some("Email"));
        assert!(tracker.is_dirty());
        assert_eq!(tracker.blur(), Some(LabelPhase::Clean));
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn typing_into_a_clean_field_floats_the_label() {
        let mut tracker = DirtyTracker::new(None, None);
        assert_eq!(tracker.change_text("x"), Some(LabelPhase::Dirty));
        assert_eq!(tracker.change_text("xy"), None);
        assert!(tracker.is_dirty());
    }

    #[test]
    fn emptying_an_unfocused_field_settles_the_label() {
        let mut tracker = DirtyTracker::new(Some("abc"), None);
        assert!(!tracker.is_focused());
        assert_eq!(tracker.change_text(""), Some(LabelPhase::Clean));
        assert!(!tracker.is_dirty());
        assert_eq!(tracker.change_text(""), None);
    }

    #[test]
    fn emptying_a_focused_field_keeps_the_label_up() {
        let mut tracker = DirtyTracker::new(Some("abc"), None);
        tracker.focus();
        assert_eq!(tracker.change_text(""), None);
        assert!(tracker.is_dirty());

        tracker.blur();
        assert!(!tracker.is_focused());
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn controlled_value_resyncs_only_when_it_changes() {
        let mut tracker = DirtyTracker::new(Some(""), None);
        assert_eq!(tracker.sync_controlled(None), None);
        assert_eq!(tracker.sync_controlled(Some("")), None);

        assert_eq!(tracker.sync_controlled(Some("joe")), Some(LabelPhase::Dirty));
        assert_eq!(tracker.text(), "joe");

        tracker.change_text("joel");
        assert_eq!(tracker.sync_controlled(Some("joe")), None);
        assert_eq!(tracker.text(), "joel");

        assert_eq!(tracker.sync_controlled(Some("")), Some(LabelPhase::Clean));
        assert_eq!(tracker.text(), "");
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn controlled_echo_of_typed_text_is_a_no_op() {
        let mut tracker = DirtyTracker::new(Some(""), None);
        tracker.focus();
        tracker.change_text("a");
        assert_eq!(tracker.sync_controlled(Some("a")), None);
        assert!(tracker.is_dirty());
    }

    #[test]
    fn password_visibility_starts_hidden_and_flips() {
        let mut visibility = PasswordVisibility::default();
        assert!(visibility.hidden());
        assert!(visibility.obscures(true));
        assert!(!visibility.obscures(false));

        assert!(!visibility.toggle());
        assert!(!visibility.obscures(true));
        assert!(visibility.toggle());
    }
}
