//! Process-wide listeners (outside-click detector, shortcut key).
//!
//! A menu acquires a [`ListenerGuard`] for every global listener it needs;
//! dropping the guard unregisters the listener, so a listener can never
//! outlive the menu state that registered it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer-down anywhere, registered while a menu is open
    OutsideClick,
    /// Key-down anywhere, registered while a menu is mounted
    ShortcutKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Registration {
    kind: ListenerKind,
    owner: String,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: u64,
    active: BTreeMap<u64, Registration>,
}

/// Shared table of active global listeners
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `owner`; it stays active while the guard lives
    pub fn acquire(&self, kind: ListenerKind, owner: impl Into<String>) -> ListenerGuard {
        let owner = owner.into();
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        tracing::debug!("register {:?} listener #{} for {:?}", kind, id, owner);
        inner.active.insert(id, Registration { kind, owner });
        ListenerGuard {
            id,
            registry: Rc::clone(&self.inner),
        }
    }

    pub fn active_count(&self, kind: ListenerKind) -> usize {
        self.inner
            .borrow()
            .active
            .values()
            .filter(|r| r.kind == kind)
            .count()
    }

    pub fn total(&self) -> usize {
        self.inner.borrow().active.len()
    }

    pub fn owners(&self, kind: ListenerKind) -> Vec<String> {
        self.inner
            .borrow()
            .active
            .values()
            .filter(|r| r.kind == kind)
            .map(|r| r.owner.clone())
            .collect()
    }
}

/// Registration handle; unregisters on drop
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    registry: Rc<RefCell<RegistryInner>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registration) = self.registry.borrow_mut().active.remove(&self.id) {
            tracing::debug!(
                "unregister {:?} listener #{} for {:?}",
                registration.kind,
                self.id,
                registration.owner
            );
        }
    }
}
