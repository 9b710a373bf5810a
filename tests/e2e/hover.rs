use crate::common::harness::MenuTestHarness;
use fresh_menu::config::HoverConfig;
use fresh_menu::MenuConfig;
use serde_json::{json, Value};

fn dataset() -> Vec<Value> {
    vec![
        json!({"label": "File", "children": [
            {"label": "Recent", "children": [{"label": "notes.txt"}]}
        ]}),
        json!({"label": "Edit", "children": [{"label": "Undo"}]}),
    ]
}

fn hover_mode(enter_delay_ms: u64, leave_delay_ms: u64) -> MenuConfig {
    MenuConfig {
        show_on_hover: true,
        hover: HoverConfig {
            enter_delay_ms,
            leave_delay_ms,
        },
        ..MenuConfig::default()
    }
}

#[test]
fn test_enter_shows_submenu_immediately() {
    let mut harness = MenuTestHarness::with_config(hover_mode(0, 0), dataset());
    harness.menu_mut().pointer_enter_container();
    harness.hover("File");
    assert!(harness.is_submenu_visible("File"));

    harness.unhover("File");
    assert!(!harness.is_submenu_visible("File"));
}

#[test]
fn test_moving_into_descendant_keeps_parent_hovered() {
    let mut harness = MenuTestHarness::with_config(hover_mode(0, 0), dataset());
    harness.hover("File");
    harness.move_pointer("File", "Recent");
    assert!(harness.is_submenu_visible("File"));
    assert!(harness.is_submenu_visible("Recent"));

    harness.move_pointer("Recent", "Edit");
    assert!(!harness.is_submenu_visible("Recent"));
    harness.move_pointer("File", "Edit");
    assert!(!harness.is_submenu_visible("File"));
    assert!(harness.is_submenu_visible("Edit"));
}

#[test]
fn test_leave_grace_delay_is_tunable() {
    let mut harness = MenuTestHarness::with_config(hover_mode(0, 150), dataset());
    harness.hover("File");
    harness.unhover("File");
    assert!(harness.is_submenu_visible("File"));

    harness.wait(100);
    assert!(harness.is_submenu_visible("File"));
    harness.hover("File");
    harness.wait(100);
    assert!(harness.is_submenu_visible("File"));

    harness.unhover("File");
    harness.wait(150);
    assert!(!harness.is_submenu_visible("File"));
}

#[test]
fn test_enter_delay_defers_visibility() {
    let mut harness = MenuTestHarness::with_config(hover_mode(80, 0), dataset());
    harness.hover("Edit");
    assert!(!harness.is_submenu_visible("Edit"));
    harness.wait(80);
    assert!(harness.is_submenu_visible("Edit"));
}

#[test]
fn test_closing_cancels_pending_hover() {
    let mut harness = MenuTestHarness::with_config(hover_mode(80, 0), dataset());
    harness.menu_mut().pointer_enter_container();
    harness.hover("Edit");
    harness.click_trigger();
    harness.assert_closed();

    harness.wait(200);
    assert!(!harness.is_submenu_visible("Edit"));
}

#[test]
fn test_click_mode_combines_expansion_and_hover() {
    let mut harness = MenuTestHarness::new(dataset());
    harness.click_trigger();
    harness.hover("Edit");
    assert!(harness.is_submenu_visible("Edit"));
    assert!(!harness.is_expanded("Edit"));

    harness.unhover("Edit");
    assert!(!harness.is_submenu_visible("Edit"));

    harness.click("Edit");
    assert!(harness.is_submenu_visible("Edit"));
    harness.click("Edit");
    assert!(!harness.is_submenu_visible("Edit"));
}

#[test]
fn test_hover_mode_ignores_expansion() {
    let mut harness = MenuTestHarness::with_config(hover_mode(0, 0), dataset());
    harness.menu_mut().pointer_enter_container();
    harness.click("File");
    assert!(!harness.is_expanded("File"));
    assert!(!harness.is_submenu_visible("File"));
}
