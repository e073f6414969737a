//! Recursive deep-merge of locale trees.

use crate::tree::{Tree, TreeValue};

/// Merges two optional trees into a fresh result.
///
/// Both sides absent yields `None` (an absent result, distinguishable
/// from an empty tree). Exactly one side present yields a structural deep
/// copy of that side, never the original object. With both present, the
/// base is merged into an empty result first, then the overlay, so the
/// overlay wins wherever its value is terminal: a terminal overlay value
/// replaces whatever the base had at that path, including a whole
/// subtree. Keys present on only one side are carried through. An
/// overlay subtree at a key where the base held a terminal replaces the
/// terminal with a node and merges into it.
///
/// The function is total and pure: no input is mutated, the output shares
/// no structure with the inputs, and it completes in time proportional to
/// the combined input size.
///
/// ```
/// use locale::{merge, Tree};
/// use serde_json::json;
///
/// let base: Tree = serde_json::from_value(json!({
///     "info": { "name": "a", "version": { "major": 1 } }
/// })).expect("base tree");
/// let overlay: Tree = serde_json::from_value(json!({
///     "info": { "name": "b", "version": 2 }
/// })).expect("overlay tree");
///
/// let merged = merge(Some(&base), Some(&overlay)).expect("both present");
/// assert_eq!(merged.text("info.name"), "b");
/// assert_eq!(merged.text("info.version"), "2");
///
/// assert!(merge(None, None).is_none());
/// ```
pub fn merge(base: Option<&Tree>, overlay: Option<&Tree>) -> Option<Tree> {
    if base.is_none() && overlay.is_none() {
        return None;
    }

    let mut result = Tree::new();
    if let Some(base) = base {
        merge_into(&mut result, base);
    }
    if let Some(overlay) = overlay {
        merge_into(&mut result, overlay);
    }
    Some(result)
}

/// Walks every key of `src`, recursing into nodes and overwriting
/// terminals at the same path in `dest`.
fn merge_into(dest: &mut Tree, src: &Tree) {
    for (key, value) in src.iter() {
        match value {
            TreeValue::Node(child) => {
                let slot = dest
                    .0
                    .entry(key.clone())
                    .or_insert_with(|| TreeValue::Node(Tree::new()));
                // A terminal in the destination gives way to the subtree.
                if let TreeValue::Terminal(_) = slot {
                    *slot = TreeValue::Node(Tree::new());
                }
                if let TreeValue::Node(dest_child) = slot {
                    merge_into(dest_child, child);
                }
            }
            TreeValue::Terminal(_) => {
                dest.0.insert(key.clone(), value.clone());
            }
        }
    }
}
