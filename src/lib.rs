//! Headless hierarchical dropdown menu engine.
//!
//! A [`Menu`] materializes an arbitrary dataset into a node tree, flattens it
//! for keyboard addressing and reacts to host events (clicks, keys, pointer
//! movement, timer ticks). Rendering is left to the host, which reads the
//! menu state back through its query methods.

pub mod config;
pub mod input;
pub mod menu;
pub mod model;

pub use config::{ConfigError, MenuConfig};
pub use menu::{Menu, MenuBuilder, MenuHost, PointerTarget};
pub use model::{Accessor, ItemAccessors, NodeId, NodePath};
