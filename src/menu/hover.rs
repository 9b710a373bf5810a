//! Hover intent: debounced pointer enter/leave per node.
//!
//! Each node runs a small state machine
//! `Idle -> PendingEnter -> Hovered -> PendingLeave -> Idle`. A zero delay
//! skips the pending phase and applies the transition synchronously. Nodes in
//! `Hovered` or `PendingLeave` form the hover set.

use super::timer::{TimerId, TimerQueue};
use crate::config::HoverConfig;
use crate::model::node::NodeId;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HoverPhase {
    #[default]
    Idle,
    PendingEnter(TimerId),
    Hovered,
    PendingLeave(TimerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoverTimer {
    Enter(NodeId),
    Leave(NodeId),
}

#[derive(Debug)]
pub struct HoverTracker {
    phases: HashMap<NodeId, HoverPhase>,
    timers: TimerQueue<HoverTimer>,
    enter_delay: Duration,
    leave_delay: Duration,
}

impl HoverTracker {
    pub fn new(config: HoverConfig) -> Self {
        Self {
            phases: HashMap::new(),
            timers: TimerQueue::new(),
            enter_delay: config.enter_delay(),
            leave_delay: config.leave_delay(),
        }
    }

    pub fn phase(&self, node: NodeId) -> HoverPhase {
        self.phases.get(&node).copied().unwrap_or_default()
    }

    fn set_phase(&mut self, node: NodeId, phase: HoverPhase) {
        tracing::trace!("hover {:?}: {:?} -> {:?}", node, self.phase(node), phase);
        if phase == HoverPhase::Idle {
            self.phases.remove(&node);
        } else {
            self.phases.insert(node, phase);
        }
    }

    fn cancel_pending(&mut self, node: NodeId) {
        match self.phase(node) {
            HoverPhase::PendingEnter(id) | HoverPhase::PendingLeave(id) => {
                self.timers.cancel(id);
            }
            HoverPhase::Idle | HoverPhase::Hovered => {}
        }
    }

    /// Pointer entered a node. Returns true if the hover set changed.
    pub fn on_enter(&mut self, node: NodeId) -> bool {
        let was_hovered = self.is_hovered(node);
        self.cancel_pending(node);

        let phase = match self.phase(node) {
            HoverPhase::Hovered | HoverPhase::PendingLeave(_) => HoverPhase::Hovered,
            HoverPhase::Idle | HoverPhase::PendingEnter(_) if self.enter_delay.is_zero() => {
                HoverPhase::Hovered
            }
            HoverPhase::Idle | HoverPhase::PendingEnter(_) => {
                let timer = self
                    .timers
                    .schedule(self.enter_delay, HoverTimer::Enter(node));
                HoverPhase::PendingEnter(timer)
            }
        };
        self.set_phase(node, phase);
        self.is_hovered(node) != was_hovered
    }

    /// Pointer left a node. Returns true if the hover set changed.
    pub fn on_leave(&mut self, node: NodeId) -> bool {
        let was_hovered = self.is_hovered(node);
        self.cancel_pending(node);

        let phase = match self.phase(node) {
            HoverPhase::Idle | HoverPhase::PendingEnter(_) => HoverPhase::Idle,
            HoverPhase::Hovered | HoverPhase::PendingLeave(_) if self.leave_delay.is_zero() => {
                HoverPhase::Idle
            }
            HoverPhase::Hovered | HoverPhase::PendingLeave(_) => {
                let timer = self
                    .timers
                    .schedule(self.leave_delay, HoverTimer::Leave(node));
                HoverPhase::PendingLeave(timer)
            }
        };
        self.set_phase(node, phase);
        self.is_hovered(node) != was_hovered
    }

    /// Advance the hover clock. Returns true if the hover set changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let mut changed = false;
        for timer in self.timers.advance(elapsed) {
            match timer {
                HoverTimer::Enter(node) => {
                    if matches!(self.phase(node), HoverPhase::PendingEnter(_)) {
                        self.set_phase(node, HoverPhase::Hovered);
                        changed = true;
                    }
                }
                HoverTimer::Leave(node) => {
                    if matches!(self.phase(node), HoverPhase::PendingLeave(_)) {
                        self.set_phase(node, HoverPhase::Idle);
                        changed = true;
                    }
                }
            }
        }
        changed
    }

    pub fn is_hovered(&self, node: NodeId) -> bool {
        matches!(
            self.phase(node),
            HoverPhase::Hovered | HoverPhase::PendingLeave(_)
        )
    }

    /// The hover set, in no particular order
    pub fn hovered(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.phases
            .iter()
            .filter(|(_, phase)| {
                matches!(phase, HoverPhase::Hovered | HoverPhase::PendingLeave(_))
            })
            .map(|(&node, _)| node)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Cancel every timer and forget all hover state
    pub fn clear(&mut self) {
        self.timers.clear();
        self.phases.clear();
    }
}
