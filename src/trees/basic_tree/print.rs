use std::fmt::Debug;

use super::{BasicTree, Color};

/// Debug printer for red-black trees.
///
/// Every node is printed with its color, id and key, and its sons are
/// printed below it, indented by `tab` plus two spaces.
pub fn print<K: Debug>(tree: &BasicTree<K>, tab: &str) -> String {
    match tree.node() {
        None => "∅".to_string(),
        Some(node) => {
            let color = match node.color() {
                Color::Red => "red",
                Color::Black => "black",
            };
            let left = print(node.left(), &format!("{tab}  "));
            let right = print(node.right(), &format!("{tab}  "));
            format!(
                "Node[{}] {color} {:?}\n{tab}L={left}\n{tab}R={right}",
                node.id().0,
                node.key()
            )
        }
    }
}
