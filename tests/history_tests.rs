//! Integration tests for the navigation history tracker

mod common;

use common::{history_with, snapshot};
use gpui_browser_overlay::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_back_stack_grows_with_each_distinct_navigation() {
    let pages = ["/a", "/b", "/c", "/d", "/e"];
    for n in 0..=pages.len() {
        let history = history_with("/", &pages[..n]);
        assert_eq!(history.back_stack().len(), n);
        assert_eq!(history.current(), if n == 0 { "/" } else { pages[n - 1] });
    }
}

#[test]
fn test_duplicate_navigation_is_ignored() {
    let mut history = history_with("/", &["/a"]);
    assert!(history.record_navigation("/a").is_none());
    assert_eq!(history.back_stack(), ["/".to_string()]);
}

#[test]
fn test_back_then_forward_restores_state() {
    let mut history = history_with("/", &["/a", "/b", "/c"]);
    history.go_back();
    let before = snapshot(&history);

    history.go_back();
    history.go_forward();

    let after = snapshot(&history);
    assert_eq!(after.0, before.0);
    assert_eq!(after.1.len(), before.1.len());
    assert_eq!(after.2.len(), before.2.len());
}

#[test]
fn test_back_on_empty_stack_is_inert() {
    let mut history = NavigationHistory::new("/");
    let before = snapshot(&history);
    assert!(history.go_back().is_none());
    assert_eq!(snapshot(&history), before);

    let mut history = history_with("/", &["/a"]);
    history.go_back();
    let before = snapshot(&history);
    assert!(history.go_back().is_none());
    assert_eq!(snapshot(&history), before);
}

#[test]
fn test_forward_on_empty_stack_is_inert() {
    let mut history = history_with("/", &["/a"]);
    let before = snapshot(&history);
    assert!(history.go_forward().is_none());
    assert_eq!(snapshot(&history), before);
}

#[test]
fn test_reset_clears_everything() {
    let mut history = history_with("/", &["/a", "/b"]);
    history.go_back();
    history.reset("https://fresh.example");

    assert_eq!(history.current(), "https://fresh.example");
    assert!(history.back_stack().is_empty());
    assert!(history.forward_stack().is_empty());
    assert!(!history.can_go_back());
    assert!(!history.can_go_forward());
}

#[test]
fn test_retain_policy_keeps_forward_stack() {
    let mut history = history_with("/", &["/a", "/b"]);
    history.go_back();
    history.record_navigation("/c");

    assert_eq!(history.policy(), ForwardPolicy::Retain);
    assert_eq!(history.peek_forward(), Some("/b"));
    assert!(history.can_go_forward());
}

#[test]
fn test_clear_on_navigate_policy_drops_forward_stack() {
    let mut history = NavigationHistory::new("/").with_policy(ForwardPolicy::ClearOnNavigate);
    history.record_navigation("/a");
    history.record_navigation("/b");
    history.go_back();
    history.record_navigation("/c");

    assert!(!history.can_go_forward());
    assert_eq!(history.back_stack(), ["/".to_string(), "/a".to_string()]);
}

#[test]
fn test_commands_and_listener_see_same_changes() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();

    let mut history = NavigationHistory::new("/");
    history.add_listener(listener_fn(move |change: &HistoryChange| {
        log.borrow_mut().push((change.direction, change.to.clone()));
    }));

    let commands = [
        HistoryCommand::RecordNavigation("/a".into()),
        HistoryCommand::RecordNavigation("/a".into()),
        HistoryCommand::GoBack,
        HistoryCommand::GoBack,
        HistoryCommand::GoForward,
        HistoryCommand::Reset("/".into()),
    ];
    let applied = commands
        .into_iter()
        .filter_map(|command| history.apply(command))
        .count();

    assert_eq!(applied, 3);
    assert_eq!(
        *seen.borrow(),
        vec![
            (HistoryDirection::Navigate, "/a".to_string()),
            (HistoryDirection::Back, "/".to_string()),
            (HistoryDirection::Forward, "/a".to_string()),
        ]
    );
    assert_eq!(history.current(), "/");
}

#[test]
fn test_max_depth_evicts_oldest() {
    let mut history = NavigationHistory::new("/0").with_max_depth(2);
    for page in ["/1", "/2", "/3"] {
        history.record_navigation(page);
    }
    assert_eq!(history.back_stack(), ["/1".to_string(), "/2".to_string()]);
}
