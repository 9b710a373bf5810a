use crate::common::harness::MenuTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use fresh_menu::config::{AutoClose, AutoOpen};
use fresh_menu::menu::listeners::ListenerKind;
use fresh_menu::{MenuConfig, PointerTarget};
use serde_json::{json, Value};

fn dataset() -> Vec<Value> {
    vec![
        json!({"label": "Home", "link": "/"}),
        json!({"label": "Docs", "link": "/docs", "children": [{"label": "Intro", "link": "/docs/intro"}]}),
    ]
}

fn auto_close(policy: AutoClose) -> MenuConfig {
    MenuConfig {
        auto_close: policy,
        ..MenuConfig::default()
    }
}

#[test]
fn test_trigger_click_toggles() {
    let mut harness = MenuTestHarness::new(dataset());
    harness.assert_closed();
    harness.click_trigger();
    harness.assert_open();
    harness.click_trigger();
    harness.assert_closed();
}

#[test]
fn test_reopening_starts_without_focus() {
    let mut harness = MenuTestHarness::new(dataset());
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.click_trigger();
    harness.click_trigger();
    harness.assert_no_focus();
}

#[test]
fn test_auto_open_always() {
    let config = MenuConfig {
        auto_open: AutoOpen::Always,
        ..MenuConfig::default()
    };
    let harness = MenuTestHarness::with_config(config, dataset());
    harness.assert_open();
}

#[test]
fn test_auto_open_active_page_matches_nested_link() {
    let config = MenuConfig {
        auto_open: AutoOpen::ActivePage,
        ..MenuConfig::default()
    };
    let nested = vec![json!({"label": "Docs", "children": [
        {"label": "Intro", "link": "/docs/intro"}
    ]})];
    let harness = MenuTestHarness::with_location(config, nested, "/docs/intro");
    harness.assert_open();

    let config = MenuConfig {
        auto_open: AutoOpen::ActivePage,
        ..MenuConfig::default()
    };
    let harness = MenuTestHarness::with_location(
        config,
        vec![json!({"label": "Blog", "link": "/blog"})],
        "/docs",
    );
    harness.assert_closed();
}

#[test]
fn test_outside_click_with_never_policy_stays_open() {
    let mut harness = MenuTestHarness::with_config(auto_close(AutoClose::Never), dataset());
    harness.click_trigger();
    harness.click_outside();
    harness.assert_open();
    assert_eq!(harness.listeners.active_count(ListenerKind::OutsideClick), 0);
}

#[test]
fn test_outside_click_with_outside_policy_closes() {
    let mut harness =
        MenuTestHarness::with_config(auto_close(AutoClose::OutsideClick), dataset());
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.clear_events();

    harness.click_outside();
    harness.assert_closed();
    harness.assert_no_focus();
    assert_eq!(harness.events(), vec!["focus trigger"]);
}

#[test]
fn test_press_inside_does_not_close() {
    let mut harness = MenuTestHarness::new(dataset());
    harness.click_trigger();
    let home = harness.node("Home");
    harness.menu_mut().pointer_down(PointerTarget::Node(home));
    harness.menu_mut().pointer_down(PointerTarget::Trigger);
    harness.assert_open();
}

#[test]
fn test_outside_listener_lives_while_open() {
    let mut harness = MenuTestHarness::new(dataset());
    assert_eq!(harness.listeners.active_count(ListenerKind::OutsideClick), 0);

    harness.click_trigger();
    assert_eq!(harness.listeners.active_count(ListenerKind::OutsideClick), 1);

    harness.press(KeyCode::Esc);
    assert_eq!(harness.listeners.active_count(ListenerKind::OutsideClick), 0);
}

#[test]
fn test_shortcut_toggles_and_focuses_trigger() {
    let config = MenuConfig {
        shortcut_key: Some("ctrl+m".to_string()),
        ..MenuConfig::default()
    };
    let mut harness = MenuTestHarness::with_config(config, dataset());
    assert_eq!(harness.listeners.active_count(ListenerKind::ShortcutKey), 1);

    harness.send_global_key(KeyCode::Char('m'), KeyModifiers::CONTROL);
    harness.assert_open();
    assert_eq!(harness.events(), vec!["focus trigger"]);

    harness.send_global_key(KeyCode::Char('m'), KeyModifiers::ALT);
    harness.assert_open();

    harness.send_global_key(KeyCode::Char('M'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
    harness.assert_closed();
}

#[test]
fn test_bare_shortcut_defaults_to_alt() {
    let config = MenuConfig {
        shortcut_key: Some("k".to_string()),
        ..MenuConfig::default()
    };
    let mut harness = MenuTestHarness::with_config(config, dataset());
    harness.send_global_key(KeyCode::Char('k'), KeyModifiers::NONE);
    harness.assert_closed();
    harness.send_global_key(KeyCode::Char('k'), KeyModifiers::ALT);
    harness.assert_open();
}

#[test]
fn test_hover_container_opens_and_closes() {
    let config = MenuConfig {
        show_on_hover: true,
        ..MenuConfig::default()
    };
    let mut harness = MenuTestHarness::with_config(config, dataset());
    harness.menu_mut().pointer_enter_container();
    harness.assert_open();

    harness
        .menu_mut()
        .pointer_leave_container(PointerTarget::Dropdown);
    harness.assert_open();

    harness
        .menu_mut()
        .pointer_leave_container(PointerTarget::Outside);
    harness.assert_closed();
}

#[test]
fn test_hover_container_ignored_in_click_mode() {
    let mut harness = MenuTestHarness::new(dataset());
    harness.menu_mut().pointer_enter_container();
    harness.assert_closed();
}

#[test]
fn test_unmount_releases_listeners_and_registry_entry() {
    let config = MenuConfig {
        name: Some("main-nav".to_string()),
        shortcut_key: Some("alt+n".to_string()),
        ..MenuConfig::default()
    };
    let mut harness = MenuTestHarness::with_config(config, dataset());
    harness.click_trigger();
    assert_eq!(harness.listeners.total(), 2);
    assert!(harness.widgets.contains("main-nav"));

    let (listeners, widgets) = harness.unmount();
    assert_eq!(listeners.total(), 0);
    assert!(!widgets.contains("main-nav"));
}
