//! Menu filtering.
//!
//! Two queries exist side by side: `menu` filters the whole dataset while
//! the root level is shown, `sub_menu` filters the children of the level
//! currently entered. Matching is a case-insensitive substring test on the
//! display name.

use super::index::{NodeKey, TreeIndex};

/// Query text for the root and drilled-down levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub menu: String,
    pub sub_menu: String,
}

impl SearchState {
    pub fn clear(&mut self) {
        self.menu.clear();
        self.sub_menu.clear();
    }

    /// Query for the root level (`root == true`) or the drilled-down level.
    pub fn text(&self, root: bool) -> &str {
        if root {
            &self.menu
        } else {
            &self.sub_menu
        }
    }

    pub fn text_mut(&mut self, root: bool) -> &mut String {
        if root {
            &mut self.menu
        } else {
            &mut self.sub_menu
        }
    }
}

pub fn matches(text: &str, query: &str) -> bool {
    query.is_empty() || text.to_lowercase().contains(&query.to_lowercase())
}

/// `keys` whose display name matches `query`, order kept.
pub fn filter_keys<T>(index: &TreeIndex<T>, keys: &[NodeKey], query: &str) -> Vec<NodeKey> {
    keys.iter()
        .copied()
        .filter(|key| {
            index
                .get(*key)
                .is_some_and(|node| matches(&node.display_name, query))
        })
        .collect()
}

/// Every leaf of the group at `position`, depth first.
pub fn leaf_keys<T>(index: &TreeIndex<T>, position: usize) -> Vec<NodeKey> {
    index
        .dfs(position)
        .into_iter()
        .filter(|key| index.get(*key).is_some_and(|node| node.is_leaf()))
        .collect()
}

/// Every non-leaf of the group at `position` (empty parents included),
/// depth first.
pub fn parent_keys<T>(index: &TreeIndex<T>, position: usize) -> Vec<NodeKey> {
    index
        .dfs(position)
        .into_iter()
        .filter(|key| index.get(*key).is_some_and(|node| !node.is_leaf()))
        .collect()
}

/// Non-leaf matches of one root group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupResults {
    pub label: String,
    pub keys: Vec<NodeKey>,
}

/// Result of a query over the whole dataset: matching leaves from all
/// groups, then matching parents grouped by root group. Groups without
/// matches are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalResults {
    pub leaves: Vec<NodeKey>,
    pub groups: Vec<GroupResults>,
}

impl GlobalResults {
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty() && self.groups.is_empty()
    }
}

pub fn global_search<T>(index: &TreeIndex<T>, query: &str) -> GlobalResults {
    let positions = 0..index.groups().len();
    let leaves = positions
        .clone()
        .flat_map(|position| filter_keys(index, &leaf_keys(index, position), query))
        .collect();
    let groups = positions
        .filter_map(|position| {
            let keys = filter_keys(index, &parent_keys(index, position), query);
            (!keys.is_empty()).then(|| GroupResults {
                label: index.groups()[position].label.clone(),
                keys,
            })
        })
        .collect();
    GlobalResults { leaves, groups }
}

/// Root level without a query: each group's top-level keys, filtered.
/// Groups that end up empty are left out.
pub fn root_menu<T>(index: &TreeIndex<T>, query: &str) -> Vec<Vec<NodeKey>> {
    index
        .groups()
        .iter()
        .map(|group| filter_keys(index, &group.roots, query))
        .filter(|keys| !keys.is_empty())
        .collect()
}

/// Children of the entered level `parent`, filtered.
pub fn sub_menu<T>(index: &TreeIndex<T>, parent: NodeKey, query: &str) -> Vec<NodeKey> {
    filter_keys(index, index.children_of(parent), query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_select::index::KeyAllocator;
    use crate::tree_select::node::{Node, RootGroup};
    use pretty_assertions::assert_eq;

    fn org() -> Vec<RootGroup<()>> {
        vec![
            RootGroup::new(
                "Teams",
                vec![Node::parent(
                    "org",
                    "Org",
                    vec![
                        Node::parent(
                            "t1",
                            "Team A",
                            vec![Node::leaf("a1", "Alice"), Node::leaf("b1", "Bob")],
                        ),
                        Node::empty_parent("t2", "Team Alpha"),
                    ],
                )],
            ),
            RootGroup::new("Guests", vec![Node::leaf("a1", "Alison")]),
            RootGroup::new("Nobody", vec![]),
        ]
    }

    fn names(index: &TreeIndex<()>, keys: &[NodeKey]) -> Vec<String> {
        keys.iter()
            .filter_map(|k| index.get(*k).map(|n| n.display_name.clone()))
            .collect()
    }

    #[test]
    fn matching_ignores_case() {
        assert!(matches("Alice", "ALI"));
        assert!(matches("Alice", ""));
        assert!(!matches("Bob", "ali"));
    }

    #[test]
    fn empty_query_keeps_everything() {
        let index = TreeIndex::build(&org(), &mut KeyAllocator::new());
        let keys = index.dfs(0);
        assert_eq!(filter_keys(&index, &keys, ""), keys);
    }

    #[test]
    fn leaves_and_parents_are_split() {
        let index = TreeIndex::build(&org(), &mut KeyAllocator::new());
        assert_eq!(names(&index, &leaf_keys(&index, 0)), vec!["Alice", "Bob"]);
        assert_eq!(
            names(&index, &parent_keys(&index, 0)),
            vec!["Org", "Team A", "Team Alpha"]
        );
    }

    #[test]
    fn global_search_finds_leaves_across_groups() {
        let index = TreeIndex::build(&org(), &mut KeyAllocator::new());
        let results = global_search(&index, "ali");
        assert_eq!(names(&index, &results.leaves), vec!["Alice", "Alison"]);
        assert!(results.groups.is_empty());
    }

    #[test]
    fn global_search_groups_parents_by_label() {
        let index = TreeIndex::build(&org(), &mut KeyAllocator::new());
        let results = global_search(&index, "team");
        assert!(results.leaves.is_empty());
        assert_eq!(results.groups.len(), 1);
        assert_eq!(results.groups[0].label, "Teams");
        assert_eq!(
            names(&index, &results.groups[0].keys),
            vec!["Team A", "Team Alpha"]
        );
    }

    #[test]
    fn global_search_without_matches_is_empty() {
        let index = TreeIndex::build(&org(), &mut KeyAllocator::new());
        assert!(global_search(&index, "zzz").is_empty());
    }

    #[test]
    fn root_menu_skips_empty_groups() {
        let index = TreeIndex::build(&org(), &mut KeyAllocator::new());
        let menu = root_menu(&index, "");
        assert_eq!(menu.len(), 2);
        assert_eq!(names(&index, &menu[1]), vec!["Alison"]);
    }

    #[test]
    fn sub_menu_filters_children() {
        let index = TreeIndex::build(&org(), &mut KeyAllocator::new());
        let team = index.dfs(0)[1];
        assert_eq!(names(&index, &sub_menu(&index, team, "b")), vec!["Bob"]);
        assert_eq!(sub_menu(&index, team, "").len(), 2);
    }
}
