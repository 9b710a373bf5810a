use crate::common::harness::MenuTestHarness;
use crossterm::event::KeyCode;
use fresh_menu::config::AutoClose;
use fresh_menu::menu::selection::SelectSource;
use fresh_menu::MenuConfig;
use serde_json::{json, Value};

fn dataset() -> Vec<Value> {
    vec![
        json!({"label": "Profile", "link": "/profile", "value": "profile-id", "icon": "user"}),
        json!({"label": "Logout", "link": "#"}),
        json!({"label": "Help", "link": "https://example.com/help", "target": "_blank"}),
        json!({"label": "More", "children": [{"label": "About", "link": "/about"}]}),
        json!({"label": "Locked", "disabled": true}),
    ]
}

fn auto_close(policy: AutoClose) -> MenuConfig {
    MenuConfig {
        auto_close: policy,
        ..MenuConfig::default()
    }
}

#[test]
fn test_leaf_activation_closes_under_always() {
    let mut harness = MenuTestHarness::with_config(auto_close(AutoClose::Always), dataset());
    harness.click_trigger();
    harness.click("More");
    harness.assert_open();
    assert!(harness.is_expanded("More"));

    harness.click("About");
    harness.assert_closed();
}

#[test]
fn test_leaf_activation_keeps_open_under_outside_click() {
    let mut harness =
        MenuTestHarness::with_config(auto_close(AutoClose::OutsideClick), dataset());
    harness.click_trigger();
    harness.click("Profile");
    harness.assert_open();

    let state = harness.menu().focus_state();
    assert_eq!(state.active_node, Some(harness.node("Profile")));
    assert_eq!(state.focused_index, Some(0));
}

#[test]
fn test_on_select_receives_projection() {
    let mut harness = MenuTestHarness::new(dataset());
    harness.click_trigger();
    harness.click("Profile");

    let selections = harness.selections();
    assert_eq!(selections.len(), 1);
    let selected = &selections[0];
    assert_eq!(selected.source, SelectSource::Pointer);
    assert_eq!(selected.widget, "menu");
    assert_eq!(selected.item.label, "Profile");
    assert_eq!(selected.item.value, "profile-id");
    assert_eq!(selected.item.icon.as_deref(), Some("user"));
    assert_eq!(selected.item.link.as_deref(), Some("/profile"));
}

#[test]
fn test_action_then_select_then_navigate() {
    let mut harness = MenuTestHarness::new(dataset());
    harness.click_trigger();
    harness.click("Help");

    assert_eq!(
        harness.events(),
        vec![
            "action Help Pointer",
            "select Help",
            "navigate https://example.com/help _blank",
        ]
    );
}

#[test]
fn test_hash_link_does_not_navigate() {
    let mut harness = MenuTestHarness::new(dataset());
    harness.click_trigger();
    harness.click("Logout");

    assert!(harness.events_matching("navigate").is_empty());
    assert_eq!(harness.selections()[0].item.value, "Logout");
}

#[test]
fn test_parent_activation_only_toggles() {
    let mut harness = MenuTestHarness::new(dataset());
    harness.click_trigger();
    harness.click("More");

    assert!(harness.selections().is_empty());
    assert!(harness.events().is_empty());
    assert_eq!(harness.menu().display_value(), None);
}

#[test]
fn test_disabled_node_is_ignored() {
    let mut harness = MenuTestHarness::new(dataset());
    harness.click_trigger();
    harness.click("Locked");
    harness.assert_open();
    assert!(harness.selections().is_empty());
}

#[test]
fn test_display_value_tracks_last_selection() {
    let config = MenuConfig {
        name: Some("account".to_string()),
        auto_close: AutoClose::Never,
        ..MenuConfig::default()
    };
    let mut harness = MenuTestHarness::with_config(config, dataset());
    harness.click("Profile");
    assert_eq!(harness.widgets.display_value("account").as_deref(), Some("Profile"));
    harness.click("Logout");
    assert_eq!(harness.widgets.display_value("account").as_deref(), Some("Logout"));
}

#[test]
fn test_keyboard_activation_reports_keyboard_source() {
    let mut harness = MenuTestHarness::new(dataset());
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.press(KeyCode::Enter);

    let selections = harness.selections();
    assert_eq!(selections.len(), 1);
    assert_eq!(selections[0].source, SelectSource::Keyboard);
    assert_eq!(
        harness.events_matching("navigate"),
        vec!["navigate /profile"]
    );
    harness.assert_closed();
}

#[test]
fn test_malformed_node_selects_with_empty_values() {
    let mut harness = MenuTestHarness::new(vec![json!({"id": 3})]);
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.press(KeyCode::Enter);

    let selections = harness.selections();
    assert_eq!(selections.len(), 1);
    assert_eq!(selections[0].item.label, "");
    assert_eq!(selections[0].item.link, None);
    assert!(harness.events_matching("navigate").is_empty());
}

#[test]
fn test_active_link_follows_location() {
    let harness = MenuTestHarness::with_location(MenuConfig::default(), dataset(), "/profile/edit");
    assert!(harness.menu().is_active_link(harness.node("Profile")));
    assert!(!harness.menu().is_active_link(harness.node("Logout")));

    harness.set_location("/about");
    assert!(harness.menu().is_active_link(harness.node("About")));
    assert!(!harness.menu().is_active_link(harness.node("Profile")));
}
