//! Replay a scripted sequence of host events against a menu and print the
//! resulting state after every step as one JSON line.
//!
//! Steps:
//!   click | enter | leave | outside
//!   key:<combo> | trigger:<combo> | global:<combo>   (e.g. key:down, global:alt+m)
//!   hover:<label> | unhover:<label> | select:<label>
//!   wait:<ms> | nodes:<path>   (path of a JSON node-list emission)

use anyhow::{anyhow, bail, Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::KeyEvent;
use fresh_menu::input::keybindings::parse_key_combo;
use fresh_menu::menu::location::StaticLocation;
use fresh_menu::{Menu, MenuConfig, MenuHost, NodeId, PointerTarget};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Replay menu interactions from the command line
#[derive(Parser, Debug)]
#[command(name = "menu-replay")]
#[command(about = "Replay scripted events against a dropdown menu", long_about = None)]
#[command(version)]
struct Args {
    /// JSON file holding the dataset (an array of records)
    #[arg(value_name = "DATASET")]
    dataset: PathBuf,

    /// Steps to replay, in order
    #[arg(value_name = "STEPS")]
    steps: Vec<String>,

    /// Path to a menu configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Current navigation location
    #[arg(long, value_name = "PATH", default_value = "/")]
    location: String,
}

fn read_records(path: &Path) -> AnyhowResult<Vec<Value>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    match value {
        Value::Array(records) => Ok(records),
        other => Ok(vec![other]),
    }
}

fn parse_key_event(combo: &str) -> AnyhowResult<KeyEvent> {
    let (code, modifiers) =
        parse_key_combo(combo).ok_or_else(|| anyhow!("unknown key combination {:?}", combo))?;
    Ok(KeyEvent::new(code, modifiers))
}

fn node_by_label(menu: &Menu, label: &str) -> AnyhowResult<NodeId> {
    menu.tree()
        .find_by_label(label)
        .map(|n| n.id)
        .ok_or_else(|| anyhow!("no node labelled {:?}", label))
}

fn apply_step(menu: &mut Menu, step: &str) -> AnyhowResult<()> {
    let (verb, arg) = match step.split_once(':') {
        Some((verb, arg)) => (verb, Some(arg)),
        None => (step, None),
    };
    match (verb, arg) {
        ("click", None) => menu.trigger_click(),
        ("enter", None) => menu.pointer_enter_container(),
        ("leave", None) => menu.pointer_leave_container(PointerTarget::Outside),
        ("outside", None) => menu.pointer_down(PointerTarget::Outside),
        ("key", Some(combo)) => {
            menu.dropdown_key_down(&parse_key_event(combo)?);
        }
        ("trigger", Some(combo)) => {
            menu.trigger_key_down(&parse_key_event(combo)?);
        }
        ("global", Some(combo)) => {
            menu.global_key_down(&parse_key_event(combo)?);
        }
        ("hover", Some(label)) => {
            let id = node_by_label(menu, label)?;
            menu.pointer_enter_node(id);
        }
        ("unhover", Some(label)) => {
            let id = node_by_label(menu, label)?;
            menu.pointer_leave_node(id, PointerTarget::Dropdown);
        }
        ("select", Some(label)) => {
            let id = node_by_label(menu, label)?;
            menu.node_click(id);
        }
        ("wait", Some(ms)) => {
            let ms: u64 = ms
                .parse()
                .with_context(|| format!("invalid wait duration {:?}", ms))?;
            menu.advance_time(Duration::from_millis(ms));
        }
        ("nodes", Some(path)) => {
            let records = read_records(Path::new(path))?;
            menu.nodes_changed(&records);
        }
        _ => bail!("unknown step {:?}", step),
    }
    Ok(())
}

fn snapshot(menu: &Menu, step: &str) -> Value {
    let labels = |pred: &dyn Fn(NodeId) -> bool| -> Vec<String> {
        menu.tree()
            .nodes()
            .iter()
            .filter(|n| pred(n.id))
            .map(|n| n.label.clone())
            .collect()
    };
    json!({
        "step": step,
        "open": menu.is_open(),
        "focused_index": menu.focus_state().focused_index,
        "focused": menu.focused_node().map(|n| n.label.clone()),
        "expanded": labels(&|id: NodeId| menu.is_expanded(id)),
        "hovered": labels(&|id: NodeId| menu.is_hovered(id)),
        "display_value": menu.display_value(),
    })
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let config = match &args.config {
        Some(path) => MenuConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => MenuConfig::default(),
    };
    let dataset = read_records(&args.dataset)?;

    let selections = Rc::new(std::cell::RefCell::new(Vec::new()));
    let seen = Rc::clone(&selections);
    let host = MenuHost::default()
        .with_location(Rc::new(StaticLocation::new(args.location.clone())))
        .on_select(move |event, widget, item| {
            seen.borrow_mut().push(json!({
                "widget": widget.name,
                "event": event,
                "item": item,
            }));
        });

    let mut menu = Menu::builder(config)
        .dataset(dataset)
        .host(host)
        .build()
        .context("Failed to build menu")?;

    println!("{}", snapshot(&menu, "mount"));
    for step in &args.steps {
        apply_step(&mut menu, step)?;
        let mut state = snapshot(&menu, step);
        let selected: Vec<Value> = selections.borrow_mut().drain(..).collect();
        if !selected.is_empty() {
            state["selected"] = Value::Array(selected);
        }
        println!("{}", state);
    }
    Ok(())
}
