//! This module contains the red-black tree and the pieces it is made of.
//!
//! [`basic_tree`] holds the owned node representation, [`llrb`] the balancing
//! algorithm, and [`observer`] the hooks through which the balancing can be watched.

pub mod basic_tree;
pub mod llrb;
pub mod observer;

pub use basic_tree::{BasicNode, BasicTree, Color, NodeId, Slot};
pub use llrb::LLRBTree;
pub use observer::{Event, EventLog, Observer, Rebalance, TracingObserver};
