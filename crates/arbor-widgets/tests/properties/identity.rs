//! Property tests for key assignment and path resolution.

use proptest::prelude::*;

use arbor_widgets::tree_select::index::{KeyAllocator, TreeIndex};
use arbor_widgets::tree_select::path::{id_chain, key_for_path, menu_by_id, node_path};
use arbor_widgets::tree_select::{SelectedValue, TreeSelect};

use super::forest::{build, forest};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every key resolves to a path ending at that very node,
    /// whose ids follow the parent chain.
    #[test]
    fn property_paths_end_at_their_node(shapes in forest()) {
        let data = build(&shapes);
        let index = TreeIndex::build(&data, &mut KeyAllocator::new());
        for position in 0..index.groups().len() {
            for key in index.dfs(position) {
                let path = node_path(&index, key);
                let node = index.get(key).expect("key from dfs");
                prop_assert_eq!(path.len(), menu_by_id(&index, key).len());
                prop_assert_eq!(path.last().map(|n| &n.display_name), Some(&node.display_name));
                let ids: Vec<&str> = path.iter().map(|n| n.id.as_str()).collect();
                prop_assert_eq!(ids, id_chain(&index, key));
                for pair in path.windows(2) {
                    prop_assert!(pair[0].children.nodes().iter().any(|c| c == &pair[1]));
                }
            }
        }
    }

    /// PROPERTY: a path resolves back to the key it came from, even when
    /// other groups hold the same id chain.
    #[test]
    fn property_paths_round_trip(shapes in forest()) {
        let data = build(&shapes);
        let index = TreeIndex::build(&data, &mut KeyAllocator::new());
        for position in 0..index.groups().len() {
            for key in index.dfs(position) {
                prop_assert_eq!(key_for_path(&index, &node_path(&index, key)), Some(key));
            }
        }
    }

    /// PROPERTY: a selected leaf opens the menu on its parent's level.
    #[test]
    fn property_initial_value_opens_parent_level(shapes in forest()) {
        let data = build(&shapes);
        let index = TreeIndex::build(&data, &mut KeyAllocator::new());
        for position in 0..index.groups().len() {
            for key in index.dfs(position) {
                if !index.get(key).is_some_and(|n| n.is_leaf()) {
                    continue;
                }
                let path = node_path(&index, key);
                let tree = TreeSelect::new(data.clone())
                    .with_value(SelectedValue::Single(path.clone()));
                prop_assert_eq!(tree.navigation_path(), path[..path.len() - 1].to_vec());
                prop_assert!(tree.visible_nodes().contains(&path[path.len() - 1]));
            }
        }
    }
}
