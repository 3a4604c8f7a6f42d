use std::{
    cell::RefCell,
    rc::Rc,
    sync::{LazyLock, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use super::floating_label_input::{route_to_tracker, shows_toggle};
use super::{control, label_state};
use crate::options::TextInputOptions;
use crate::style::{CLEAN, DIRTY, LabelPhase};

static STATE_TEST_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

struct StateTestGuard {
    _lock: MutexGuard<'static, ()>,
}

fn guard() -> StateTestGuard {
    let lock = match STATE_TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    control::clear_all();
    StateTestGuard { _lock: lock }
}

impl Drop for StateTestGuard {
    fn drop(&mut self) {
        control::clear_all();
    }
}

fn after(start: Instant, ms: u64) -> Instant {
    start + Duration::from_millis(ms)
}

fn frame(
    id: &str,
    value: Option<&str>,
    placeholder: Option<&str>,
    now: Instant,
) -> label_state::LabelFrame {
    label_state::resolve(
        label_state::LabelStateInput {
            id,
            value,
            placeholder,
        },
        now,
    )
}

#[test]
fn initial_phase_follows_value_or_placeholder() {
    let _guard = guard();
    let now = Instant::now();

    let valued = frame("valued", Some("jane"), None, now);
    assert_eq!(valued.phase, LabelPhase::Dirty);
    assert_eq!(valued.label, DIRTY);
    assert!(!valued.animating);

    let hinted = frame("hinted", Some(""), Some("Email"), now);
    assert_eq!(hinted.label, DIRTY);

    let empty = frame("empty", Some(""), Some(""), now);
    assert_eq!(empty.phase, LabelPhase::Clean);
    assert_eq!(empty.label, CLEAN);
    assert!(!empty.animating);
}

#[test]
fn focusing_a_clean_field_animates_to_dirty() {
    let _guard = guard();
    let start = Instant::now();
    frame("focus", None, None, start);

    assert!(label_state::focus("focus", start));
    assert!(label_state::is_dirty("focus"));

    let midway = frame("focus", None, None, after(start, 100));
    assert!(midway.animating);
    assert!(midway.label.font_size < CLEAN.font_size);
    assert!(midway.label.font_size > DIRTY.font_size);
    assert!(midway.label.top < CLEAN.top);
    assert!(midway.label.top > DIRTY.top);

    let settled = frame("focus", None, None, after(start, 200));
    assert!(!settled.animating);
    assert_eq!(settled.label, DIRTY);
}

#[test]
fn blur_with_empty_text_returns_to_clean() {
    let _guard = guard();
    let start = Instant::now();
    frame("blur-empty", None, None, start);
    label_state::focus("blur-empty", start);

    let blurred_at = after(start, 250);
    assert!(label_state::blur("blur-empty", blurred_at));
    assert!(!label_state::is_dirty("blur-empty"));
    assert!(frame("blur-empty", None, None, after(blurred_at, 50)).animating);
    assert_eq!(
        frame("blur-empty", None, None, after(blurred_at, 200)).label,
        CLEAN
    );
}

#[test]
fn blur_with_text_keeps_the_label_floating() {
    let _guard = guard();
    let start = Instant::now();
    frame("blur-text", None, None, start);
    label_state::focus("blur-text", start);
    label_state::change_text("blur-text", "hello", after(start, 50));

    let blurred_at = after(start, 300);
    assert!(!label_state::blur("blur-text", blurred_at));
    assert!(label_state::is_dirty("blur-text"));

    let rest = frame("blur-text", None, None, blurred_at);
    assert!(!rest.animating);
    assert_eq!(rest.label, DIRTY);
    assert_eq!(rest.text, "hello");
}

#[test]
fn controlled_value_flips_the_label_without_focus() {
    let _guard = guard();
    let start = Instant::now();
    assert_eq!(
        frame("controlled", Some(""), None, start).phase,
        LabelPhase::Clean
    );

    let filled = frame("controlled", Some("joe@example.com"), None, after(start, 10));
    assert_eq!(filled.phase, LabelPhase::Dirty);
    assert_eq!(filled.text, "joe@example.com");
    assert!(filled.animating);

    let cleared = frame("controlled", Some(""), None, after(start, 400));
    assert_eq!(cleared.phase, LabelPhase::Clean);
    assert_eq!(cleared.text, "");
    assert!(cleared.animating);
    assert_eq!(
        frame("controlled", Some(""), None, after(start, 600)).label,
        CLEAN
    );
}

#[test]
fn unchanged_controlled_value_keeps_typed_text() {
    let _guard = guard();
    let start = Instant::now();
    frame("typed", Some(""), None, start);
    label_state::focus("typed", start);
    label_state::change_text("typed", "abc", start);

    let rerendered = frame("typed", Some(""), None, after(start, 20));
    assert_eq!(rerendered.text, "abc");
    assert_eq!(rerendered.phase, LabelPhase::Dirty);
}

#[test]
fn password_toggle_flips_obscuring() {
    let _guard = guard();
    let now = Instant::now();

    let initial = frame("secret", None, None, now);
    assert!(initial.password.hidden());
    assert!(initial.password.obscures(true));
    assert!(!initial.password.obscures(false));

    assert!(!label_state::toggle_password("secret"));
    let revealed = frame("secret", None, None, now);
    assert!(!revealed.password.obscures(true));

    assert!(label_state::toggle_password("secret"));
    assert!(frame("secret", None, None, now).password.obscures(true));
}

#[test]
fn double_blur_does_not_restart_the_animation() {
    let _guard = guard();
    let start = Instant::now();
    frame("double", None, None, start);
    label_state::focus("double", start);

    let first = after(start, 300);
    assert!(label_state::blur("double", first));
    let second = after(start, 400);
    assert!(!label_state::blur("double", second));
    assert_eq!(frame("double", None, None, after(first, 200)).label, CLEAN);
}

#[test]
fn email_scenario_round_trip() {
    let _guard = guard();
    let start = Instant::now();

    assert!(frame("email-hinted", Some(""), Some("Email"), start).phase.is_dirty());

    let clean = frame("email", Some(""), Some(""), start);
    assert_eq!(clean.label, CLEAN);

    assert!(label_state::focus("email", start));
    assert_eq!(frame("email", Some(""), Some(""), after(start, 200)).label, DIRTY);

    let blurred_at = after(start, 500);
    assert!(label_state::blur("email", blurred_at));
    let reversing = frame("email", Some(""), Some(""), after(blurred_at, 100));
    assert!(reversing.animating);
    assert_eq!(reversing.phase, LabelPhase::Clean);
    assert_eq!(
        frame("email", Some(""), Some(""), after(blurred_at, 200)).label,
        CLEAN
    );
}

#[test]
fn release_forgets_the_instance_and_its_parts() {
    let _guard = guard();
    let start = Instant::now();
    frame("gone", Some("kept"), None, start);
    control::set_flag("gone::field", "focused", true);
    label_state::toggle_password("gone");

    label_state::release("gone", start);

    assert!(!control::flag("gone::field", "focused"));
    assert!(!label_state::is_dirty("gone"));
    assert!(control::read_state::<label_state::FloatingLabelState>("gone", "label").is_none());
    let fresh = frame("gone", None, None, start);
    assert_eq!(fresh.phase, LabelPhase::Clean);
    assert!(fresh.password.hidden());
}

#[test]
fn instances_do_not_share_state() {
    let _guard = guard();
    let now = Instant::now();
    frame("first", None, None, now);
    frame("second", None, None, now);

    label_state::focus("first", now);
    assert!(label_state::is_dirty("first"));
    assert!(!label_state::is_dirty("second"));
}

#[test]
fn clearing_an_unfocused_field_lowers_the_label() {
    let _guard = guard();
    let start = Instant::now();
    assert_eq!(frame("cleared", None, None, start).phase, LabelPhase::Clean);
    label_state::change_text("cleared", "draft", start);
    assert_eq!(frame("cleared", None, None, after(start, 200)).label, DIRTY);

    let cleared_at = after(start, 300);
    assert!(label_state::change_text("cleared", "", cleared_at));
    assert!(!label_state::is_dirty("cleared"));
    assert_eq!(
        frame("cleared", None, None, after(cleared_at, 200)).label,
        CLEAN
    );
}

#[test]
fn is_dirty_does_not_create_state() {
    let _guard = guard();
    assert!(!label_state::is_dirty("never-rendered"));
    assert!(
        control::read_state::<label_state::FloatingLabelState>("never-rendered", "label")
            .is_none()
    );
}

#[test]
fn toggle_is_shown_only_for_secret_fields() {
    assert!(!shows_toggle(&TextInputOptions::default()));
    assert!(shows_toggle(&TextInputOptions {
        password: true,
        ..TextInputOptions::default()
    }));
    assert!(shows_toggle(&TextInputOptions {
        secure_text_entry: Some(true),
        ..TextInputOptions::default()
    }));
    assert!(!shows_toggle(&TextInputOptions {
        password: true,
        secure_text_entry: Some(false),
        ..TextInputOptions::default()
    }));
}

#[test]
fn tracker_sees_focus_before_the_host_handler() {
    let _guard = guard();
    let now = Instant::now();
    frame("routed", None, None, now);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let host: Rc<dyn Fn(&str)> = {
        let seen = seen.clone();
        Rc::new(move |change: &str| {
            seen.borrow_mut()
                .push((change.to_string(), label_state::is_dirty("routed")));
        })
    };

    let moved = route_to_tracker(
        || label_state::focus("routed", now),
        Some(&host),
        |handler| handler("focus"),
    );
    assert!(moved);

    let moved = route_to_tracker(
        || label_state::blur("routed", after(now, 300)),
        Some(&host),
        |handler| handler("blur"),
    );
    assert!(moved);

    assert_eq!(
        *seen.borrow(),
        vec![("focus".to_string(), true), ("blur".to_string(), false)]
    );
}

#[test]
fn missing_host_handler_still_drives_the_tracker() {
    let _guard = guard();
    let now = Instant::now();
    frame("unhandled", None, None, now);

    let moved = route_to_tracker(
        || label_state::change_text("unhandled", "typed", now),
        None::<&Rc<dyn Fn(&str)>>,
        |handler| handler("change"),
    );
    assert!(moved);
    assert!(label_state::is_dirty("unhandled"));
    assert_eq!(frame("unhandled", None, None, now).text, "typed");
}
