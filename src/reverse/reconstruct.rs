//! Reconstruction of input strings from solution leaves

use super::tree::{LeafRef, SearchTree};

/// Rebuild the forward input string for one solution leaf.
///
/// The walk from leaf to root yields alphabet indices already in forward
/// order (the deepest node holds the first symbol the forward hash
/// consumed), so the tokens are concatenated as encountered. The root
/// contributes no symbol.
pub(crate) fn reconstruct_input<S>(
    tree: &SearchTree<S>,
    symbols: &[String],
    leaf: LeafRef,
) -> String {
    tree.symbol_path(leaf)
        .into_iter()
        .map(|index| symbols[index].as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reverse::tree::Node;

    fn alphabet() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn test_forward_order_reconstruction() {
        // Reverse walk for "ab": the root consumed nothing, level 1
        // consumed the trailing "b", level 2 the leading "a".
        let mut tree = SearchTree::with_root(85i64);
        tree.push_level(vec![Node {
            symbol: Some(1),
            state: 16,
            parent: Some(0),
        }]);
        tree.push_level(vec![Node {
            symbol: Some(0),
            state: 0,
            parent: Some(0),
        }]);

        let input = reconstruct_input(&tree, &alphabet(), LeafRef { level: 2, index: 0 });
        assert_eq!(input, "ab");
    }

    #[test]
    fn test_multi_character_tokens_concatenate() {
        let symbols = vec!["foo".to_string(), "ba".to_string()];
        let mut tree = SearchTree::with_root(1i64);
        tree.push_level(vec![Node {
            symbol: Some(0),
            state: 2,
            parent: Some(0),
        }]);
        tree.push_level(vec![Node {
            symbol: Some(1),
            state: 0,
            parent: Some(0),
        }]);

        let input = reconstruct_input(&tree, &symbols, LeafRef { level: 2, index: 0 });
        assert_eq!(input, "bafoo");
    }

    #[test]
    fn test_level_one_leaf_is_single_symbol() {
        let mut tree = SearchTree::with_root(5i64);
        tree.push_level(vec![Node {
            symbol: Some(0),
            state: 0,
            parent: Some(0),
        }]);

        let input = reconstruct_input(&tree, &alphabet(), LeafRef { level: 1, index: 0 });
        assert_eq!(input, "a");
    }
}
