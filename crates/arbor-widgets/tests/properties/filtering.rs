//! Property tests for search filtering.

use proptest::prelude::*;

use arbor_widgets::tree_select::index::{KeyAllocator, TreeIndex};
use arbor_widgets::tree_select::search::{filter_keys, global_search, leaf_keys, matches, parent_keys};

use super::forest::{build, forest};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: an empty query returns its input unchanged.
    #[test]
    fn property_empty_filter_is_identity(shapes in forest()) {
        let index = TreeIndex::build(&build(&shapes), &mut KeyAllocator::new());
        for position in 0..index.groups().len() {
            let keys = index.dfs(position);
            prop_assert_eq!(filter_keys(&index, &keys, ""), keys);
        }
    }

    /// PROPERTY: filtering keeps order and only keeps matches.
    #[test]
    fn property_filter_is_ordered_subset(shapes in forest(), query in "[a-z0-9 ]{0,4}") {
        let index = TreeIndex::build(&build(&shapes), &mut KeyAllocator::new());
        for position in 0..index.groups().len() {
            let keys = index.dfs(position);
            let kept = filter_keys(&index, &keys, &query);
            let mut rest = keys.iter();
            for key in &kept {
                prop_assert!(rest.any(|k| k == key), "order broken");
                let name = &index.get(*key).expect("kept key").display_name;
                prop_assert!(matches(name, &query));
            }
        }
    }

    /// PROPERTY: global search splits every node into leaves and parents,
    /// and drops groups without parents.
    #[test]
    fn property_global_search_partitions_nodes(shapes in forest()) {
        let index = TreeIndex::build(&build(&shapes), &mut KeyAllocator::new());
        let results = global_search(&index, "node");
        let leaves: Vec<_> = (0..index.groups().len())
            .flat_map(|position| leaf_keys(&index, position))
            .collect();
        prop_assert_eq!(&results.leaves, &leaves);

        let parents: Vec<_> = (0..index.groups().len())
            .map(|position| parent_keys(&index, position))
            .filter(|keys| !keys.is_empty())
            .collect();
        let found: Vec<_> = results.groups.iter().map(|g| g.keys.clone()).collect();
        prop_assert_eq!(found, parents);
        prop_assert_eq!(results.is_empty(), index.is_empty());
    }
}
