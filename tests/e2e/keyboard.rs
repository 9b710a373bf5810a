use crate::common::harness::MenuTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use fresh_menu::config::{MenuLayout, MenuPosition, TextDirection};
use fresh_menu::MenuConfig;
use serde_json::{json, Value};

fn abc() -> Vec<Value> {
    vec![
        json!({"label": "A"}),
        json!({"label": "B"}),
        json!({"label": "C"}),
    ]
}

fn file_menu() -> Vec<Value> {
    vec![json!({"label": "File", "children": [{"label": "New"}, {"label": "Open"}]})]
}

fn positioned(position: MenuPosition) -> MenuConfig {
    MenuConfig {
        menu_position: position,
        ..MenuConfig::default()
    }
}

/// The physical forward key depends on where the menu opens
#[test]
fn test_forward_key_follows_menu_position() {
    let cases = [
        (MenuPosition::DownRight, KeyCode::Down),
        (MenuPosition::DownLeft, KeyCode::Down),
        (MenuPosition::UpRight, KeyCode::Up),
        (MenuPosition::UpLeft, KeyCode::Up),
    ];
    for (position, forward) in cases {
        let mut harness = MenuTestHarness::with_config(positioned(position), abc());
        harness.click_trigger();
        harness.press(forward);
        harness.press(forward);
        assert_eq!(harness.focused_index(), Some(1), "position {:?}", position);
    }
}

/// ArrowDown under up,left is move-backward, like ArrowUp under down,right
#[test]
fn test_remapped_backward_matches_default_backward() {
    let mut up_left = MenuTestHarness::with_config(positioned(MenuPosition::UpLeft), abc());
    let mut down_right = MenuTestHarness::new(abc());
    for harness in [&mut up_left, &mut down_right] {
        harness.click_trigger();
    }

    up_left.press(KeyCode::Down);
    down_right.press(KeyCode::Up);
    assert_eq!(up_left.focused_index(), Some(2));
    assert_eq!(up_left.focused_index(), down_right.focused_index());
}

#[test]
fn test_forward_wraps_around() {
    let mut harness = MenuTestHarness::new(abc());
    harness.click_trigger();
    for _ in 0..4 {
        harness.press(KeyCode::Down);
    }
    harness.assert_focused("A");
}

#[test]
fn test_backward_from_first_entry_closes() {
    let mut harness = MenuTestHarness::new(abc());
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.assert_focused("A");

    harness.press(KeyCode::Up);
    harness.assert_closed();
    harness.assert_no_focus();
    assert_eq!(
        harness.events_matching("focus").last().map(String::as_str),
        Some("focus trigger")
    );
}

#[test]
fn test_escape_closes_and_resets_focus() {
    let mut harness = MenuTestHarness::new(abc());
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.press(KeyCode::Down);
    assert_eq!(harness.focused_index(), Some(1));

    harness.press(KeyCode::Esc);
    harness.assert_closed();
    harness.assert_no_focus();
    assert_eq!(
        harness.events_matching("focus"),
        vec!["focus 0", "focus 1", "focus trigger"]
    );
}

#[test]
fn test_tab_closes_without_redirecting_focus() {
    let mut harness = MenuTestHarness::new(abc());
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.clear_events();

    harness.send_key(KeyCode::BackTab, KeyModifiers::SHIFT);
    harness.assert_closed();
    assert!(harness.events_matching("focus").is_empty());
}

#[test]
fn test_expand_collapse_round_trip() {
    let mut harness = MenuTestHarness::new(file_menu());
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.assert_focused("File");

    harness.press(KeyCode::Right);
    harness.assert_focused("New");
    assert_eq!(harness.focused_index(), Some(1));
    assert!(harness.is_expanded("File"));
    assert!(harness.is_submenu_visible("File"));

    harness.press(KeyCode::Left);
    harness.assert_focused("File");
    assert!(!harness.is_expanded("File"));
}

#[test]
fn test_collapse_at_root_is_noop() {
    let mut harness = MenuTestHarness::new(file_menu());
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.press(KeyCode::Left);
    harness.assert_open();
    harness.assert_focused("File");
}

#[test]
fn test_left_opening_menu_expands_with_left() {
    let mut harness =
        MenuTestHarness::with_config(positioned(MenuPosition::DownLeft), file_menu());
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.press(KeyCode::Left);
    harness.assert_focused("New");
    harness.press(KeyCode::Right);
    harness.assert_focused("File");
}

#[test]
fn test_rtl_mirrors_expand_key() {
    let config = MenuConfig {
        direction: TextDirection::Rtl,
        ..MenuConfig::default()
    };
    let mut harness = MenuTestHarness::with_config(config, file_menu());
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.press(KeyCode::Left);
    harness.assert_focused("New");
}

#[test]
fn test_horizontal_layout_moves_across_siblings() {
    let config = MenuConfig {
        menu_layout: MenuLayout::Horizontal,
        ..MenuConfig::default()
    };
    let dataset = vec![
        json!({"label": "File", "children": [{"label": "New"}]}),
        json!({"label": "Edit"}),
        json!({"label": "View"}),
    ];
    let mut harness = MenuTestHarness::with_config(config, dataset);
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.assert_focused("File");

    harness.press(KeyCode::Right);
    harness.assert_focused("Edit");
    harness.press(KeyCode::Right);
    harness.assert_focused("View");
    harness.press(KeyCode::Right);
    harness.assert_focused("File");
    harness.press(KeyCode::Left);
    harness.assert_focused("View");
    assert!(!harness.is_expanded("File"));
}

#[test]
fn test_home_and_end() {
    let mut harness = MenuTestHarness::new(abc());
    harness.click_trigger();
    harness.press(KeyCode::End);
    harness.assert_focused("C");
    harness.press(KeyCode::Home);
    harness.assert_focused("A");
}

#[test]
fn test_disabled_entries_are_skipped() {
    let dataset = vec![
        json!({"label": "A"}),
        json!({"label": "B", "disabled": true}),
        json!({"label": "C"}),
    ];
    let mut harness = MenuTestHarness::new(dataset);
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.press(KeyCode::Down);
    harness.assert_focused("C");
}

#[test]
fn test_enter_on_trigger_opens_closed_menu() {
    let mut harness = MenuTestHarness::new(abc());
    harness.press_on_trigger(KeyCode::Enter);
    harness.assert_open();
    harness.assert_no_focus();
}

#[test]
fn test_enter_without_focus_closes() {
    let mut harness = MenuTestHarness::new(abc());
    harness.click_trigger();
    harness.press(KeyCode::Enter);
    harness.assert_closed();
    assert!(harness.selections().is_empty());
}

#[test]
fn test_space_activates_focused_leaf() {
    let mut harness = MenuTestHarness::new(abc());
    harness.click_trigger();
    harness.press(KeyCode::Down);
    harness.press(KeyCode::Char(' '));

    let selections = harness.selections();
    assert_eq!(selections.len(), 1);
    assert_eq!(selections[0].item.label, "A");
}

#[test]
fn test_focus_moves_after_rebuild_use_new_nodes() {
    let mut harness = MenuTestHarness::new(abc());
    harness.click_trigger();
    harness.press(KeyCode::Down);

    harness
        .menu_mut()
        .set_dataset(vec![json!({"label": "X"}), json!({"label": "Y"})]);
    harness.assert_no_focus();

    harness.press(KeyCode::Down);
    harness.assert_focused("X");
}
