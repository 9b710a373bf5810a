use crate::common::harness::MenuTestHarness;
use fresh_menu::menu::selection::SelectSource;
use fresh_menu::{MenuConfig, NodePath};
use serde_json::{json, Value};

fn emission(active: Option<&str>) -> Vec<Value> {
    let item = |label: &str| {
        json!({
            "label": label,
            "link": format!("/{}", label.to_lowercase()),
            "isActive": Some(label) == active,
        })
    };
    vec![
        item("Home"),
        json!({"label": "Products", "children": [item("Laptops"), item("Phones")]}),
    ]
}

#[test]
fn test_active_node_reported_once() {
    let mut harness = MenuTestHarness::new(Vec::new());
    let emission = emission(Some("Phones"));

    assert!(harness.menu_mut().nodes_changed(&emission));
    assert!(!harness.menu_mut().nodes_changed(&emission));
    assert!(!harness.menu_mut().nodes_changed(&emission));

    let selections = harness.selections();
    assert_eq!(selections.len(), 1);
    assert_eq!(selections[0].source, SelectSource::Sync);
    assert_eq!(selections[0].item.label, "Phones");
    assert_eq!(selections[0].item.link.as_deref(), Some("/phones"));
}

#[test]
fn test_new_activation_is_reported() {
    let mut harness = MenuTestHarness::new(Vec::new());
    harness.menu_mut().nodes_changed(&emission(Some("Home")));
    harness.menu_mut().nodes_changed(&emission(Some("Laptops")));

    let labels: Vec<String> = harness
        .selections()
        .into_iter()
        .map(|s| s.item.label)
        .collect();
    assert_eq!(labels, vec!["Home", "Laptops"]);
}

#[test]
fn test_reactivation_after_gap_is_reported() {
    let mut harness = MenuTestHarness::new(Vec::new());
    harness.menu_mut().nodes_changed(&emission(Some("Home")));
    assert!(!harness.menu_mut().nodes_changed(&emission(None)));
    assert!(harness.menu_mut().nodes_changed(&emission(Some("Home"))));
    assert_eq!(harness.selections().len(), 2);
}

#[test]
fn test_sync_uses_configured_accessors() {
    let config = MenuConfig {
        item_label: "title".to_string(),
        item_children: "items".to_string(),
        ..MenuConfig::default()
    };
    let mut harness = MenuTestHarness::with_config(config, Vec::new());
    let emission = vec![json!({"title": "Root", "items": [{"title": "Leaf", "isActive": true}]})];

    assert!(harness.menu_mut().nodes_changed(&emission));
    assert_eq!(harness.selections()[0].item.label, "Leaf");
}

#[test]
fn test_sync_does_not_navigate_or_close() {
    let mut harness = MenuTestHarness::new(emission(None));
    harness.click_trigger();
    harness.menu_mut().nodes_changed(&emission(Some("Home")));

    harness.assert_open();
    assert!(harness.events_matching("navigate").is_empty());
    assert!(harness.events_matching("action").is_empty());
}

#[test]
fn test_inserted_sibling_keeps_activation() {
    let mut harness = MenuTestHarness::new(Vec::new());
    let home = json!({"label": "Home", "link": "/home", "isActive": true});

    assert!(harness.menu_mut().nodes_changed(&[home.clone()]));
    let shifted = vec![json!({"label": "Blog", "link": "/blog"}), home.clone()];
    assert!(!harness.menu_mut().nodes_changed(&shifted));
    let reordered = vec![home, json!({"label": "Blog", "link": "/blog"})];
    assert!(!harness.menu_mut().nodes_changed(&reordered));

    assert_eq!(harness.selections().len(), 1);
}

#[test]
fn test_sync_path_matches_ordered_tree() {
    let config = MenuConfig {
        order_by: Some("label:asc".to_string()),
        ..MenuConfig::default()
    };
    let dataset = vec![
        json!({"label": "b", "link": "/b"}),
        json!({"label": "a", "link": "/a"}),
    ];
    let mut harness = MenuTestHarness::with_config(config, dataset);
    let emission = vec![
        json!({"label": "b", "link": "/b", "isActive": true}),
        json!({"label": "a", "link": "/a"}),
    ];

    assert!(harness.menu_mut().nodes_changed(&emission));
    let selections = harness.selections();
    let selection = &selections[0];
    assert_eq!(selection.item.label, "b");
    assert_eq!(selection.path, NodePath(vec![1]));

    let b = harness.node("b");
    let tree_path = harness.menu().tree().get(b).map(|n| n.path.clone());
    assert_eq!(tree_path, Some(selection.path.clone()));
}

#[test]
fn test_sync_path_resolves_against_current_dataset() {
    // The emission lists fewer entries than the mounted dataset
    let mut harness = MenuTestHarness::new(emission(None));
    let emission = vec![json!({"label": "Phones", "link": "/phones", "isActive": true})];

    assert!(harness.menu_mut().nodes_changed(&emission));
    assert_eq!(harness.selections()[0].path, NodePath(vec![1, 1]));
}
