use super::*;

fn tracker_with_pan() -> KeyTracker {
    let mut keys = KeyTracker::new();
    keys.watch(" ", KeyBinding::PanMode);
    keys
}

#[test]
fn unseen_key_is_up() {
    let keys = KeyTracker::new();
    assert!(!keys.is_down("Shift"));
}

#[test]
fn press_and_release_track_any_key() {
    let mut keys = KeyTracker::new();
    assert_eq!(keys.press("Shift"), None);
    assert!(keys.is_down("Shift"));
    assert_eq!(keys.release("Shift"), None);
    assert!(!keys.is_down("Shift"));
}

#[test]
fn watched_key_reports_down_then_up() {
    let mut keys = tracker_with_pan();
    assert_eq!(keys.press(" "), Some(KeyTransition { binding: KeyBinding::PanMode, edge: KeyEdge::Down }));
    assert_eq!(keys.release(" "), Some(KeyTransition { binding: KeyBinding::PanMode, edge: KeyEdge::Up }));
}

#[test]
fn repeated_press_fires_once() {
    let mut keys = tracker_with_pan();
    assert!(keys.press(" ").is_some());
    assert_eq!(keys.press(" "), None);
    assert_eq!(keys.press(" "), None);
    assert!(keys.release(" ").is_some());
}

#[test]
fn release_without_press_fires_nothing() {
    let mut keys = tracker_with_pan();
    assert_eq!(keys.release(" "), None);
}

#[test]
fn key_names_are_case_sensitive() {
    let mut keys = tracker_with_pan();
    keys.press("a");
    assert!(keys.is_down("a"));
    assert!(!keys.is_down("A"));
}

#[test]
fn release_all_reports_held_watched_keys() {
    let mut keys = tracker_with_pan();
    keys.press(" ");
    keys.press("Shift");
    let transitions = keys.release_all();
    assert_eq!(transitions, vec![KeyTransition { binding: KeyBinding::PanMode, edge: KeyEdge::Up }]);
    assert!(!keys.is_down(" "));
    assert!(!keys.is_down("Shift"));
}

#[test]
fn only_watched_keys_dispatch() {
    let mut keys = KeyTracker::new();
    keys.watch("Alt", KeyBinding::PanMode);
    assert!(keys.press("Alt").is_some());
    assert_eq!(keys.press(" "), None);
}
