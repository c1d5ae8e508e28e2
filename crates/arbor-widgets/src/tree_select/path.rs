//! Turning keys into caller paths and back.

use super::index::{NodeKey, TreeIndex};
use super::node::{Node, Path};

/// Keys from the top-level ancestor of `key` down to `key`. Empty when the
/// key is not in the index.
pub fn menu_by_id<T>(index: &TreeIndex<T>, key: NodeKey) -> Vec<NodeKey> {
    let mut chain = Vec::new();
    let mut current = index.get(key);
    while let Some(node) = current {
        chain.push(node.key);
        current = node.parent.and_then(|parent| index.get(parent));
    }
    chain.reverse();
    chain
}

/// The caller path for `key`: each element carries its original fields and
/// subtree.
pub fn node_path<T: Clone>(index: &TreeIndex<T>, key: NodeKey) -> Path<T> {
    menu_by_id(index, key)
        .into_iter()
        .filter_map(|k| index.to_node(k))
        .collect()
}

/// Caller ids along the chain ending at `key`.
pub fn id_chain<T>(index: &TreeIndex<T>, key: NodeKey) -> Vec<&str> {
    menu_by_id(index, key)
        .into_iter()
        .filter_map(|k| index.get(k).map(|node| node.id.as_str()))
        .collect()
}

/// Whether two paths name the same nodes.
pub fn is_same_path<T>(a: &[Node<T>], b: &[Node<T>]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x.id == y.id && x.display_name == y.display_name)
}

/// Resolve a caller path to the key of its last node.
///
/// Ids may repeat across groups and among siblings, so every candidate is
/// tried and a chain that also matches display names wins over one that
/// matches ids only.
pub fn key_for_path<T>(index: &TreeIndex<T>, path: &[Node<T>]) -> Option<NodeKey> {
    let roots = index.groups().iter().flat_map(|group| group.roots.iter().copied());
    resolve(index, roots, path).map(|(key, _)| key)
}

/// Follow `path` down from `candidates`. The flag tells whether every step
/// also matched its display name.
fn resolve<T>(
    index: &TreeIndex<T>,
    candidates: impl IntoIterator<Item = NodeKey>,
    path: &[Node<T>],
) -> Option<(NodeKey, bool)> {
    let (step, rest) = path.split_first()?;
    let mut fallback = None;
    for key in candidates {
        let Some(node) = index.get(key).filter(|n| n.id == step.id) else {
            continue;
        };
        let found = if rest.is_empty() {
            Some((key, true))
        } else {
            resolve(index, index.children_of(key).iter().copied(), rest)
        };
        let Some((found, exact)) = found else {
            continue;
        };
        if exact && node.display_name == step.display_name {
            return Some((found, true));
        }
        fallback.get_or_insert((found, false));
    }
    fallback
}

/// Stack that reveals the last node of `path`: its ancestors, so the menu
/// opens on the level holding the selected node.
pub fn initial_menu<T>(index: &TreeIndex<T>, path: &[Node<T>]) -> Vec<NodeKey> {
    let Some(key) = key_for_path(index, path) else {
        return Vec::new();
    };
    let mut menu = menu_by_id(index, key);
    menu.pop();
    menu
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_select::index::KeyAllocator;
    use crate::tree_select::node::RootGroup;
    use pretty_assertions::assert_eq;

    fn org() -> Vec<RootGroup<()>> {
        vec![
            RootGroup::new(
                "Current",
                vec![Node::parent(
                    "org",
                    "Org",
                    vec![Node::parent(
                        "t1",
                        "Team A",
                        vec![Node::leaf("a1", "Alice"), Node::leaf("b1", "Bob")],
                    )],
                )],
            ),
            RootGroup::new(
                "Former",
                vec![Node::parent(
                    "org",
                    "Org (2019)",
                    vec![Node::parent("t1", "Team A", vec![Node::leaf("a1", "Alice")])],
                )],
            ),
        ]
    }

    fn names<T>(path: &[Node<T>]) -> Vec<&str> {
        path.iter().map(|n| n.display_name.as_str()).collect()
    }

    #[test]
    fn path_runs_from_root_to_node() {
        let index = TreeIndex::build(&org(), &mut KeyAllocator::new());
        let alice = index.dfs(0)[2];
        assert_eq!(names(&node_path(&index, alice)), vec!["Org", "Team A", "Alice"]);
        assert_eq!(id_chain(&index, alice), vec!["org", "t1", "a1"]);
    }

    #[test]
    fn path_elements_link_parent_to_child() {
        let index = TreeIndex::build(&org(), &mut KeyAllocator::new());
        let alice = index.dfs(0)[2];
        let path = node_path(&index, alice);
        for pair in path.windows(2) {
            assert!(pair[0].children.nodes().iter().any(|c| c.id == pair[1].id));
        }
    }

    #[test]
    fn missing_key_gives_empty_path() {
        let mut keys = KeyAllocator::new();
        let index = TreeIndex::build(&org(), &mut keys);
        let later = TreeIndex::build(&org(), &mut keys);
        let stale = later.dfs(0)[2];
        assert!(menu_by_id(&index, stale).is_empty());
        assert!(node_path(&index, stale).is_empty());
    }

    #[test]
    fn key_for_path_prefers_exact_group() {
        let index = TreeIndex::build(&org(), &mut KeyAllocator::new());
        let former_alice = index.dfs(1)[2];
        let path = node_path(&index, former_alice);
        assert_eq!(key_for_path(&index, &path), Some(former_alice));

        let current_alice = index.dfs(0)[2];
        let path = node_path(&index, current_alice);
        assert_eq!(key_for_path(&index, &path), Some(current_alice));
    }

    #[test]
    fn same_path_compares_ids_and_names() {
        let index = TreeIndex::build(&org(), &mut KeyAllocator::new());
        let alice = index.dfs(0)[2];
        let team = index.dfs(0)[1];
        let path = node_path(&index, alice);
        assert!(is_same_path(&path, &node_path(&index, alice)));
        assert!(!is_same_path(&path, &node_path(&index, team)));
        assert!(!is_same_path(&path, &node_path(&index, index.dfs(1)[2])));
    }

    fn twin_siblings() -> Vec<RootGroup<()>> {
        vec![RootGroup::unlabeled(vec![Node::parent(
            "p",
            "P",
            vec![
                Node::parent("q", "Q one", vec![Node::leaf("a1", "A1")]),
                Node::parent("q", "Q two", vec![Node::leaf("b2", "B2")]),
            ],
        )])]
    }

    #[test]
    fn key_for_path_searches_every_sibling_with_the_id() {
        let index = TreeIndex::build(&twin_siblings(), &mut KeyAllocator::new());
        let order = index.dfs(0);
        let path = node_path(&index, order[4]);
        assert_eq!(names(&path), vec!["P", "Q two", "B2"]);
        assert_eq!(key_for_path(&index, &path), Some(order[4]));
        assert_eq!(initial_menu(&index, &path), vec![order[0], order[3]]);
    }

    #[test]
    fn key_for_path_prefers_matching_names_among_siblings() {
        let index = TreeIndex::build(&twin_siblings(), &mut KeyAllocator::new());
        let q_two = index.dfs(0)[3];
        assert_eq!(key_for_path(&index, &node_path(&index, q_two)), Some(q_two));

        let renamed = vec![
            Node::<()>::empty_parent("p", "P"),
            Node::empty_parent("q", "Q renamed"),
        ];
        assert_eq!(key_for_path(&index, &renamed), Some(index.dfs(0)[1]));
    }

    #[test]
    fn initial_menu_opens_on_parent_level() {
        let index = TreeIndex::build(&org(), &mut KeyAllocator::new());
        let alice = index.dfs(0)[2];
        let menu = initial_menu(&index, &node_path(&index, alice));
        assert_eq!(menu, index.dfs(0)[..2].to_vec());
        assert!(initial_menu(&index, &[Node::<()>::leaf("zz", "Nobody")]).is_empty());
    }
}
