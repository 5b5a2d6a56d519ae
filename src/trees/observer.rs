//! Observation points for structural changes of an [`LLRBTree`](super::llrb::LLRBTree).
//!
//! A visualizer (or anything else) can watch the tree rebalance itself by
//! implementing [`Observer`] and handing it to
//! [`LLRBTree::with_observer`](super::llrb::LLRBTree::with_observer).
//! Every method has a no-op default, so an observer only implements what it needs.
//!
//! Events are delivered synchronously while the tree is being mutated.
//! Observers get no access to the tree, and the tree's correctness does not
//! depend on what they do.

use std::fmt::Debug;

use super::basic_tree::{Color, NodeId, Slot};

/// A single rebalancing step.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Rebalance {
    /// The colors of `node` and both of its sons were inverted.
    FlipColor { node: NodeId },
    /// `node` was rotated down to the left. `top` is the node that replaced it.
    RotateLeft { node: NodeId, top: NodeId },
    /// `node` was rotated down to the right. `top` is the node that replaced it.
    RotateRight { node: NodeId, top: NodeId },
    /// The keys of `node` and `with` were exchanged. The nodes stayed in place.
    SwapKeys { node: NodeId, with: NodeId },
}

pub trait Observer<K> {
    /// Whether the tree should maintain node slots for this observer.
    /// Layout maintenance costs time proportional to the size of every
    /// rotated subtree, so it is off unless asked for.
    fn tracks_slots(&self) -> bool {
        false
    }

    /// A rebalancing step just completed.
    fn rebalanced(&mut self, _step: Rebalance) {}

    /// A new node was created for `key`. The node is not yet linked into
    /// the tree: it is attached to its parent right after this returns,
    /// before the rebalancing on the way back up.
    fn node_created(&mut self, _node: NodeId, _key: &K) {}

    /// A node was removed from the tree and is being dropped.
    fn node_removed(&mut self, _node: NodeId, _key: &K) {}

    /// The color of `node` is about to change. `old` is its current color.
    fn before_color_change(&mut self, _node: NodeId, _old: Color) {}

    /// The key of `node` is about to change. `old` is its current key.
    fn before_key_change(&mut self, _node: NodeId, _old: &K) {}

    /// The slot of `node` is about to change. `old` is its current slot.
    fn before_slot_change(&mut self, _node: NodeId, _old: Option<Slot>) {}
}

/// The unit observer ignores everything.
impl<K> Observer<K> for () {}

impl<K, O: Observer<K> + ?Sized> Observer<K> for &mut O {
    fn tracks_slots(&self) -> bool {
        (**self).tracks_slots()
    }
    fn rebalanced(&mut self, step: Rebalance) {
        (**self).rebalanced(step)
    }
    fn node_created(&mut self, node: NodeId, key: &K) {
        (**self).node_created(node, key)
    }
    fn node_removed(&mut self, node: NodeId, key: &K) {
        (**self).node_removed(node, key)
    }
    fn before_color_change(&mut self, node: NodeId, old: Color) {
        (**self).before_color_change(node, old)
    }
    fn before_key_change(&mut self, node: NodeId, old: &K) {
        (**self).before_key_change(node, old)
    }
    fn before_slot_change(&mut self, node: NodeId, old: Option<Slot>) {
        (**self).before_slot_change(node, old)
    }
}

/// Allows registering an observer at runtime, as a `Box<dyn Observer<K>>`.
impl<K, O: Observer<K> + ?Sized> Observer<K> for Box<O> {
    fn tracks_slots(&self) -> bool {
        (**self).tracks_slots()
    }
    fn rebalanced(&mut self, step: Rebalance) {
        (**self).rebalanced(step)
    }
    fn node_created(&mut self, node: NodeId, key: &K) {
        (**self).node_created(node, key)
    }
    fn node_removed(&mut self, node: NodeId, key: &K) {
        (**self).node_removed(node, key)
    }
    fn before_color_change(&mut self, node: NodeId, old: Color) {
        (**self).before_color_change(node, old)
    }
    fn before_key_change(&mut self, node: NodeId, old: &K) {
        (**self).before_key_change(node, old)
    }
    fn before_slot_change(&mut self, node: NodeId, old: Option<Slot>) {
        (**self).before_slot_change(node, old)
    }
}

/// An owned record of one observer callback.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Event<K> {
    Rebalanced(Rebalance),
    NodeCreated { node: NodeId, key: K },
    NodeRemoved { node: NodeId, key: K },
    BeforeColorChange { node: NodeId, old: Color },
    BeforeKeyChange { node: NodeId, old: K },
    BeforeSlotChange { node: NodeId, old: Option<Slot> },
}

/// An observer that records every event it receives, in order.
#[derive(Clone, Debug)]
pub struct EventLog<K> {
    events: Vec<Event<K>>,
    track_slots: bool,
}

impl<K> EventLog<K> {
    pub fn new() -> Self {
        EventLog {
            events: vec![],
            track_slots: false,
        }
    }

    /// A log that also asks the tree to maintain node slots.
    pub fn with_slots() -> Self {
        EventLog {
            events: vec![],
            track_slots: true,
        }
    }

    pub fn events(&self) -> &[Event<K>] {
        &self.events
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&mut self) -> Vec<Event<K>> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<K> Default for EventLog<K> {
    fn default() -> Self {
        EventLog::new()
    }
}

impl<K: Clone> Observer<K> for EventLog<K> {
    fn tracks_slots(&self) -> bool {
        self.track_slots
    }

    fn rebalanced(&mut self, step: Rebalance) {
        self.events.push(Event::Rebalanced(step));
    }

    fn node_created(&mut self, node: NodeId, key: &K) {
        self.events.push(Event::NodeCreated {
            node,
            key: key.clone(),
        });
    }

    fn node_removed(&mut self, node: NodeId, key: &K) {
        self.events.push(Event::NodeRemoved {
            node,
            key: key.clone(),
        });
    }

    fn before_color_change(&mut self, node: NodeId, old: Color) {
        self.events.push(Event::BeforeColorChange { node, old });
    }

    fn before_key_change(&mut self, node: NodeId, old: &K) {
        self.events.push(Event::BeforeKeyChange {
            node,
            old: old.clone(),
        });
    }

    fn before_slot_change(&mut self, node: NodeId, old: Option<Slot>) {
        self.events.push(Event::BeforeSlotChange { node, old });
    }
}

/// An observer that reports every event through `tracing`.
/// Structural changes are logged at `debug` level, node-level
/// before-change notifications at `trace` level.
#[derive(Clone, Copy, Default, Debug)]
pub struct TracingObserver {
    pub track_slots: bool,
}

impl<K: Debug> Observer<K> for TracingObserver {
    fn tracks_slots(&self) -> bool {
        self.track_slots
    }

    fn rebalanced(&mut self, step: Rebalance) {
        tracing::debug!(?step, "rebalanced");
    }

    fn node_created(&mut self, node: NodeId, key: &K) {
        tracing::debug!(node = node.0, ?key, "node created");
    }

    fn node_removed(&mut self, node: NodeId, key: &K) {
        tracing::debug!(node = node.0, ?key, "node removed");
    }

    fn before_color_change(&mut self, node: NodeId, old: Color) {
        tracing::trace!(node = node.0, ?old, "color about to change");
    }

    fn before_key_change(&mut self, node: NodeId, old: &K) {
        tracing::trace!(node = node.0, ?old, "key about to change");
    }

    fn before_slot_change(&mut self, node: NodeId, old: Option<Slot>) {
        tracing::trace!(node = node.0, ?old, "slot about to change");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poke<O: Observer<i32>>(observer: &mut O) {
        observer.node_created(NodeId(0), &5);
        observer.before_color_change(NodeId(0), Color::Red);
        observer.rebalanced(Rebalance::FlipColor { node: NodeId(0) });
    }

    #[test]
    fn event_log_records_in_order() {
        let mut log: EventLog<i32> = EventLog::new();
        poke(&mut log);
        assert_eq!(
            log.drain(),
            vec![
                Event::NodeCreated {
                    node: NodeId(0),
                    key: 5
                },
                Event::BeforeColorChange {
                    node: NodeId(0),
                    old: Color::Red
                },
                Event::Rebalanced(Rebalance::FlipColor { node: NodeId(0) }),
            ]
        );
        assert!(log.is_empty());
    }

    #[test]
    fn forwarding_impls_reach_the_inner_observer() {
        let mut log: EventLog<i32> = EventLog::with_slots();
        {
            let mut by_ref = &mut log;
            assert!(Observer::<i32>::tracks_slots(&by_ref));
            poke(&mut by_ref);
        }
        assert_eq!(log.events().len(), 3);

        let mut boxed: Box<dyn Observer<i32>> = Box::new(EventLog::<i32>::new());
        assert!(!Observer::<i32>::tracks_slots(&boxed));
        poke(&mut boxed);
    }
}
