pub mod command;
pub mod config;
pub mod trees;

pub use trees::{basic_tree, observer};
pub use trees::{
    BasicNode, BasicTree, Color, Event, EventLog, LLRBTree, NodeId, Observer, Rebalance, Slot,
    TracingObserver,
};
