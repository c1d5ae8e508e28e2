//! The drill-down stack.

use super::index::{NodeKey, TreeIndex};
use super::path::menu_by_id;

/// Keys of the parents the user has entered, outermost first. Empty at the
/// root level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationStack {
    entries: Vec<NodeKey>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys(entries: Vec<NodeKey>) -> Self {
        Self { entries }
    }

    pub fn is_root(&self) -> bool {
        self.entries.is_empty()
    }

    /// The level currently shown, if drilled down.
    pub fn last(&self) -> Option<NodeKey> {
        self.entries.last().copied()
    }

    pub fn keys(&self) -> &[NodeKey] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Enter `key`. Only parents with children can be entered; the stack
    /// becomes the full ancestor chain of `key`.
    pub fn descend<T>(&mut self, index: &TreeIndex<T>, key: NodeKey) -> bool {
        if !index.get(key).is_some_and(|node| node.is_navigable()) {
            return false;
        }
        self.entries = menu_by_id(index, key);
        true
    }

    /// Leave the current level. Returns `false` at the root.
    pub fn previous<T>(&mut self, index: &TreeIndex<T>) -> bool {
        if self.entries.pop().is_none() {
            return false;
        }
        if let Some(last) = self.last() {
            self.entries = menu_by_id(index, last);
        }
        true
    }

    /// Re-resolve the stack against a rebuilt index.
    ///
    /// Each entry is matched by caller id: the first among the roots of its
    /// old group (then any group), the rest among the children of the entry
    /// resolved before it. Where several nodes share the id, the one with
    /// the same display name wins. The stack is cut at the first entry that no
    /// longer exists or can no longer be entered. Returns `true` when
    /// anything was cut.
    pub fn reconcile<T>(&mut self, old: &TreeIndex<T>, new: &TreeIndex<T>) -> bool {
        let mut fresh: Vec<NodeKey> = Vec::with_capacity(self.entries.len());
        for key in &self.entries {
            let Some(previous) = old.get(*key) else {
                break;
            };
            let found = match fresh.last() {
                None => find_root(new, previous.group, &previous.id, &previous.display_name),
                Some(parent) => find_among(
                    new,
                    new.children_of(*parent),
                    &previous.id,
                    &previous.display_name,
                ),
            };
            match found {
                Some(key) if new.get(key).is_some_and(|node| node.is_navigable()) => {
                    fresh.push(key)
                }
                _ => break,
            }
        }
        let truncated = fresh.len() < self.entries.len();
        if truncated {
            log::debug!(
                "navigation stack cut from {} to {} levels",
                self.entries.len(),
                fresh.len()
            );
        }
        self.entries = fresh;
        truncated
    }
}

fn find_root<T>(index: &TreeIndex<T>, group: usize, id: &str, name: &str) -> Option<NodeKey> {
    find_among(index, index.group_roots(group), id, name).or_else(|| {
        index
            .groups()
            .iter()
            .find_map(|g| find_among(index, &g.roots, id, name))
    })
}

/// The key among `keys` with caller id `id`, preferring one whose display
/// name is also unchanged.
fn find_among<T>(index: &TreeIndex<T>, keys: &[NodeKey], id: &str, name: &str) -> Option<NodeKey> {
    let same_id = |key: &NodeKey| index.get(*key).is_some_and(|node| node.id == id);
    keys.iter()
        .copied()
        .filter(same_id)
        .find(|key| index.get(*key).is_some_and(|node| node.display_name == name))
        .or_else(|| keys.iter().copied().find(same_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_select::index::KeyAllocator;
    use crate::tree_select::node::{Node, RootGroup};

    fn org(team_members: Vec<Node<()>>) -> Vec<RootGroup<()>> {
        vec![RootGroup::unlabeled(vec![Node::parent(
            "org",
            "Org",
            vec![
                Node::parent("t1", "Team A", team_members),
                Node::empty_parent("t2", "Team B"),
            ],
        )])]
    }

    fn alice_bob() -> Vec<Node<()>> {
        vec![Node::leaf("a1", "Alice"), Node::leaf("b1", "Bob")]
    }

    #[test]
    fn descend_sets_full_chain() {
        let index = TreeIndex::build(&org(alice_bob()), &mut KeyAllocator::new());
        let team = index.dfs(0)[1];
        let mut stack = NavigationStack::new();
        assert!(stack.descend(&index, team));
        assert_eq!(stack.keys(), &index.dfs(0)[..2]);
        assert_eq!(stack.last(), Some(team));
    }

    #[test]
    fn leaves_and_empty_parents_cannot_be_entered() {
        let index = TreeIndex::build(&org(alice_bob()), &mut KeyAllocator::new());
        let mut stack = NavigationStack::new();
        let alice = index.dfs(0)[2];
        let team_b = index.dfs(0)[4];
        assert!(!stack.descend(&index, alice));
        assert!(!stack.descend(&index, team_b));
        assert!(stack.is_root());
    }

    #[test]
    fn previous_pops_until_root() {
        let index = TreeIndex::build(&org(alice_bob()), &mut KeyAllocator::new());
        let mut stack = NavigationStack::new();
        stack.descend(&index, index.dfs(0)[1]);
        assert!(stack.previous(&index));
        assert_eq!(stack.len(), 1);
        assert!(stack.previous(&index));
        assert!(stack.is_root());
        assert!(!stack.previous(&index));
    }

    #[test]
    fn reconcile_follows_ids_into_new_index() {
        let mut keys = KeyAllocator::new();
        let old = TreeIndex::build(&org(alice_bob()), &mut keys);
        let mut stack = NavigationStack::new();
        stack.descend(&old, old.dfs(0)[1]);

        let mut more = alice_bob();
        more.push(Node::leaf("c1", "Carol"));
        let new = TreeIndex::build(&org(more), &mut keys);
        assert!(!stack.reconcile(&old, &new));
        assert_eq!(stack.keys(), &new.dfs(0)[..2]);
        assert_eq!(new.children_of(stack.last().unwrap_or(new.dfs(0)[0])).len(), 3);
    }

    #[test]
    fn reconcile_cuts_when_level_loses_children() {
        let mut keys = KeyAllocator::new();
        let old = TreeIndex::build(&org(alice_bob()), &mut keys);
        let mut stack = NavigationStack::new();
        stack.descend(&old, old.dfs(0)[1]);

        let new = TreeIndex::build(&org(Vec::new()), &mut keys);
        assert!(stack.reconcile(&old, &new));
        assert_eq!(stack.keys(), &new.dfs(0)[..1]);
    }

    #[test]
    fn reconcile_to_root_when_ancestor_removed() {
        let mut keys = KeyAllocator::new();
        let old = TreeIndex::build(&org(alice_bob()), &mut keys);
        let mut stack = NavigationStack::new();
        stack.descend(&old, old.dfs(0)[1]);

        let new = TreeIndex::build(
            &[RootGroup::unlabeled(vec![Node::leaf("x", "Other")])],
            &mut keys,
        );
        assert!(stack.reconcile(&old, &new));
        assert!(stack.is_root());
    }

    #[test]
    fn reconcile_keeps_sibling_with_shared_id() {
        let twins = |extra: Vec<Node<()>>| {
            let mut second = vec![Node::leaf("b2", "B2")];
            second.extend(extra);
            vec![RootGroup::unlabeled(vec![Node::parent(
                "p",
                "P",
                vec![
                    Node::parent("q", "Q one", vec![Node::leaf("a1", "A1")]),
                    Node::parent("q", "Q two", second),
                ],
            )])]
        };
        let mut keys = KeyAllocator::new();
        let old = TreeIndex::build(&twins(Vec::new()), &mut keys);
        let mut stack = NavigationStack::new();
        stack.descend(&old, old.dfs(0)[3]);

        let new = TreeIndex::build(&twins(vec![Node::leaf("c2", "C2")]), &mut keys);
        assert!(!stack.reconcile(&old, &new));
        let shown: Vec<_> = stack
            .last()
            .map(|key| new.children_of(key).to_vec())
            .unwrap_or_default()
            .into_iter()
            .filter_map(|key| new.get(key).map(|n| n.display_name.clone()))
            .collect();
        assert_eq!(shown, vec!["B2", "C2"]);
    }
}
