//! Internal keying and the flat index built from each dataset.
//!
//! Caller ids may repeat across root groups, so every node gets a fresh
//! [`NodeKey`] when a dataset is indexed. The nested keyed tree is then
//! flattened into a map from key to [`InternalNode`], with parent links and
//! child key lists, so navigation and search never walk the caller's tree.

use std::collections::HashMap;

use ratatui::style::Color;

use super::node::{Children, Node, RootGroup};

/// Identity of a node inside one index. Keys are never reused by the
/// allocator that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(u64);

/// Hands out unique keys. Each component instance owns one.
#[derive(Debug, Default)]
pub struct KeyAllocator {
    next: u64,
}

impl KeyAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_key(&mut self) -> NodeKey {
        let key = NodeKey(self.next);
        self.next += 1;
        key
    }
}

/// A caller node annotated with a key, children keyed recursively.
#[derive(Debug, Clone)]
pub struct KeyedNode<T> {
    pub key: NodeKey,
    pub id: String,
    pub display_name: String,
    pub data: Option<T>,
    pub text_color: Option<Color>,
    pub suffix_icon: Option<String>,
    pub children: KeyedChildren<T>,
}

#[derive(Debug, Clone)]
pub enum KeyedChildren<T> {
    Leaf,
    EmptyParent,
    Parent(Vec<KeyedNode<T>>),
}

#[derive(Debug, Clone)]
pub struct KeyedGroup<T> {
    pub label: String,
    pub nodes: Vec<KeyedNode<T>>,
}

/// Children of an indexed node, by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalChildren {
    Leaf,
    EmptyParent,
    Parent(Vec<NodeKey>),
}

/// A node as stored in the index.
#[derive(Debug, Clone)]
pub struct InternalNode<T> {
    pub key: NodeKey,
    pub parent: Option<NodeKey>,
    /// Position of the root group the node belongs to.
    pub group: usize,
    pub id: String,
    pub display_name: String,
    pub data: Option<T>,
    pub text_color: Option<Color>,
    pub suffix_icon: Option<String>,
    pub children: InternalChildren,
}

impl<T> InternalNode<T> {
    pub fn is_leaf(&self) -> bool {
        self.children == InternalChildren::Leaf
    }

    pub fn is_empty_parent(&self) -> bool {
        self.children == InternalChildren::EmptyParent
    }

    /// A parent with at least one child.
    pub fn is_navigable(&self) -> bool {
        matches!(&self.children, InternalChildren::Parent(keys) if !keys.is_empty())
    }

    pub fn child_keys(&self) -> &[NodeKey] {
        match &self.children {
            InternalChildren::Parent(keys) => keys,
            InternalChildren::Leaf | InternalChildren::EmptyParent => &[],
        }
    }
}

pub type NodeMap<T> = HashMap<NodeKey, InternalNode<T>>;

/// A root group after indexing: its label and top-level keys.
#[derive(Debug, Clone)]
pub struct IndexedGroup {
    pub label: String,
    pub roots: Vec<NodeKey>,
}

/// Flat view of one dataset.
#[derive(Debug, Clone)]
pub struct TreeIndex<T> {
    groups: Vec<IndexedGroup>,
    nodes: NodeMap<T>,
}

impl<T> Default for TreeIndex<T> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            nodes: HashMap::new(),
        }
    }
}

/// Attach a fresh key to every node of every group, preserving order.
pub fn assign_keys<T: Clone>(groups: &[RootGroup<T>], keys: &mut KeyAllocator) -> Vec<KeyedGroup<T>> {
    groups
        .iter()
        .map(|group| KeyedGroup {
            label: group.label.clone(),
            nodes: group.nodes.iter().map(|node| key_node(node, keys)).collect(),
        })
        .collect()
}

fn key_node<T: Clone>(node: &Node<T>, keys: &mut KeyAllocator) -> KeyedNode<T> {
    let key = keys.next_key();
    let children = match &node.children {
        Children::Leaf => KeyedChildren::Leaf,
        Children::EmptyParent => KeyedChildren::EmptyParent,
        Children::Parent(nodes) if nodes.is_empty() => KeyedChildren::EmptyParent,
        Children::Parent(nodes) => {
            KeyedChildren::Parent(nodes.iter().map(|child| key_node(child, keys)).collect())
        }
    };
    KeyedNode {
        key,
        id: node.id.clone(),
        display_name: node.display_name.clone(),
        data: node.data.clone(),
        text_color: node.text_color,
        suffix_icon: node.suffix_icon.clone(),
        children,
    }
}

/// Flatten a keyed forest into an index with parent links.
pub fn flatten<T>(groups: Vec<KeyedGroup<T>>) -> TreeIndex<T> {
    let mut index = TreeIndex::default();
    for (position, group) in groups.into_iter().enumerate() {
        let roots = group.nodes.iter().map(|node| node.key).collect();
        for node in group.nodes {
            insert(&mut index.nodes, node, None, position);
        }
        index.groups.push(IndexedGroup {
            label: group.label,
            roots,
        });
    }
    index
}

fn insert<T>(nodes: &mut NodeMap<T>, node: KeyedNode<T>, parent: Option<NodeKey>, group: usize) {
    let (children, descendants) = match node.children {
        KeyedChildren::Leaf => (InternalChildren::Leaf, Vec::new()),
        KeyedChildren::EmptyParent => (InternalChildren::EmptyParent, Vec::new()),
        KeyedChildren::Parent(kids) => {
            (InternalChildren::Parent(kids.iter().map(|k| k.key).collect()), kids)
        }
    };
    nodes.insert(
        node.key,
        InternalNode {
            key: node.key,
            parent,
            group,
            id: node.id,
            display_name: node.display_name,
            data: node.data,
            text_color: node.text_color,
            suffix_icon: node.suffix_icon,
            children,
        },
    );
    for child in descendants {
        insert(nodes, child, Some(node.key), group);
    }
}

impl<T> TreeIndex<T> {
    /// Key and flatten `groups` in one step.
    pub fn build(groups: &[RootGroup<T>], keys: &mut KeyAllocator) -> Self
    where
        T: Clone,
    {
        flatten(assign_keys(groups, keys))
    }

    pub fn get(&self, key: NodeKey) -> Option<&InternalNode<T>> {
        self.nodes.get(&key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(&key)
    }

    pub fn groups(&self) -> &[IndexedGroup] {
        &self.groups
    }

    /// Top-level keys of the group at `position`.
    pub fn group_roots(&self, position: usize) -> &[NodeKey] {
        self.groups
            .get(position)
            .map(|group| group.roots.as_slice())
            .unwrap_or(&[])
    }

    /// Child keys of `key`; empty when missing or not a parent.
    pub fn children_of(&self, key: NodeKey) -> &[NodeKey] {
        self.get(key).map(InternalNode::child_keys).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every key of the group at `position`, depth first, parents before
    /// their children.
    pub fn dfs(&self, position: usize) -> Vec<NodeKey> {
        let mut order = Vec::new();
        let mut pending: Vec<NodeKey> = self.group_roots(position).iter().rev().copied().collect();
        while let Some(key) = pending.pop() {
            order.push(key);
            pending.extend(self.children_of(key).iter().rev().copied());
        }
        order
    }

    /// Rebuild the caller's node for `key`, subtree included.
    pub fn to_node(&self, key: NodeKey) -> Option<Node<T>>
    where
        T: Clone,
    {
        let node = self.get(key)?;
        let children = match &node.children {
            InternalChildren::Leaf => Children::Leaf,
            InternalChildren::EmptyParent => Children::EmptyParent,
            InternalChildren::Parent(keys) => {
                Children::from_nodes(keys.iter().filter_map(|k| self.to_node(*k)).collect())
            }
        };
        Some(Node {
            display_name: node.display_name.clone(),
            id: node.id.clone(),
            data: node.data.clone(),
            children,
            text_color: node.text_color,
            suffix_icon: node.suffix_icon.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dataset() -> Vec<RootGroup<u32>> {
        vec![
            RootGroup::new(
                "Teams",
                vec![Node::parent(
                    "t1",
                    "Team A",
                    vec![Node::leaf("a1", "Alice").with_data(1), Node::leaf("b1", "Bob")],
                )],
            ),
            RootGroup::new("Archive", vec![Node::leaf("t1", "Team A (old)")]),
        ]
    }

    #[test]
    fn keys_are_unique_across_groups() {
        let mut keys = KeyAllocator::new();
        let index = TreeIndex::build(&dataset(), &mut keys);
        assert_eq!(index.len(), 4);

        let first = index.group_roots(0)[0];
        let second = index.group_roots(1)[0];
        assert_ne!(first, second);
        assert_eq!(index.get(first).map(|n| n.id.as_str()), Some("t1"));
        assert_eq!(index.get(second).map(|n| n.id.as_str()), Some("t1"));
        assert_eq!(index.get(second).map(|n| n.group), Some(1));
    }

    #[test]
    fn rebuild_never_reuses_keys() {
        let mut keys = KeyAllocator::new();
        let a = TreeIndex::build(&dataset(), &mut keys);
        let b = TreeIndex::build(&dataset(), &mut keys);
        assert!(a.dfs(0).iter().all(|key| !b.contains(*key)));
    }

    #[test]
    fn parent_links_and_children() {
        let mut keys = KeyAllocator::new();
        let index = TreeIndex::build(&dataset(), &mut keys);
        let team = index.group_roots(0)[0];
        let kids = index.children_of(team);
        assert_eq!(kids.len(), 2);
        for kid in kids {
            assert_eq!(index.get(*kid).and_then(|n| n.parent), Some(team));
        }
        assert!(index.get(team).is_some_and(InternalNode::is_navigable));
    }

    #[test]
    fn empty_children_list_becomes_empty_parent() {
        let groups = vec![RootGroup::unlabeled(vec![Node::<()> {
            children: Children::Parent(Vec::new()),
            ..Node::leaf("x", "X")
        }])];
        let index = TreeIndex::build(&groups, &mut KeyAllocator::new());
        let key = index.group_roots(0)[0];
        assert!(index.get(key).is_some_and(InternalNode::is_empty_parent));
    }

    #[test]
    fn dfs_is_preorder() {
        let index = TreeIndex::build(&dataset(), &mut KeyAllocator::new());
        let names: Vec<_> = index
            .dfs(0)
            .into_iter()
            .filter_map(|k| index.get(k).map(|n| n.display_name.clone()))
            .collect();
        assert_eq!(names, vec!["Team A", "Alice", "Bob"]);
    }

    #[test]
    fn to_node_restores_caller_fields() {
        let data = dataset();
        let index = TreeIndex::build(&data, &mut KeyAllocator::new());
        let team = index.group_roots(0)[0];
        assert_eq!(index.to_node(team).as_ref(), data[0].nodes.first());
    }
}
