//! Caller-facing tree data: nodes, root groups, paths and selected values.

use ratatui::style::Color;

/// One element of the caller's tree.
///
/// `id` is whatever the caller uses to recognise the node; it does not have
/// to be unique across root groups. The component never relies on it for
/// identity while navigating.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    /// Label drawn in the menu and matched by search.
    pub display_name: String,
    /// Caller-supplied identifier.
    pub id: String,
    /// Opaque payload handed back in selected paths.
    pub data: Option<T>,
    /// Leaf, empty parent, or parent with children.
    pub children: Children<T>,
    /// Overrides the label colour.
    pub text_color: Option<Color>,
    /// Short glyph drawn after the label.
    pub suffix_icon: Option<String>,
}

/// What sits below a [`Node`].
///
/// An empty parent is drawn like a parent but can be neither entered nor
/// selected; keeping it distinct from [`Leaf`](Children::Leaf) is the whole
/// point of this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Children<T> {
    /// No children at all: selectable.
    Leaf,
    /// A parent that currently has no children: inert.
    EmptyParent,
    /// A parent with children: entering it drills down.
    Parent(Vec<Node<T>>),
}

impl<T> Default for Children<T> {
    fn default() -> Self {
        Children::Leaf
    }
}

impl<T> Children<T> {
    /// Parent children, mapping an empty list to [`EmptyParent`](Children::EmptyParent).
    pub fn from_nodes(nodes: Vec<Node<T>>) -> Self {
        if nodes.is_empty() {
            Children::EmptyParent
        } else {
            Children::Parent(nodes)
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Children::Leaf)
    }

    /// Child nodes; empty for leaves and empty parents.
    pub fn nodes(&self) -> &[Node<T>] {
        match self {
            Children::Parent(nodes) => nodes,
            Children::Leaf | Children::EmptyParent => &[],
        }
    }

    /// Append children, turning a leaf or empty parent into a parent.
    pub fn extend(&mut self, more: impl IntoIterator<Item = Node<T>>) {
        let mut nodes = match std::mem::take(self) {
            Children::Parent(nodes) => nodes,
            Children::Leaf | Children::EmptyParent => Vec::new(),
        };
        nodes.extend(more);
        *self = Children::from_nodes(nodes);
    }
}

impl<T> Node<T> {
    /// A selectable leaf.
    pub fn leaf(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            id: id.into(),
            data: None,
            children: Children::Leaf,
            text_color: None,
            suffix_icon: None,
        }
    }

    /// A parent; an empty `children` list yields an empty parent.
    pub fn parent(
        id: impl Into<String>,
        display_name: impl Into<String>,
        children: Vec<Node<T>>,
    ) -> Self {
        Self {
            children: Children::from_nodes(children),
            ..Self::leaf(id, display_name)
        }
    }

    /// A parent with no children yet.
    pub fn empty_parent(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::parent(id, display_name, Vec::new())
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn with_suffix_icon(mut self, icon: impl Into<String>) -> Self {
        self.suffix_icon = Some(icon.into());
        self
    }
}

/// A labelled bucket of top-level nodes. The whole dataset is a sequence of
/// these.
#[derive(Debug, Clone, PartialEq)]
pub struct RootGroup<T> {
    /// Section label shown in global search results; may be empty.
    pub label: String,
    pub nodes: Vec<Node<T>>,
}

impl<T> RootGroup<T> {
    pub fn new(label: impl Into<String>, nodes: Vec<Node<T>>) -> Self {
        Self {
            label: label.into(),
            nodes,
        }
    }

    pub fn unlabeled(nodes: Vec<Node<T>>) -> Self {
        Self::new("", nodes)
    }
}

/// Nodes from a top-level ancestor down to a target, inclusive.
pub type Path<T> = Vec<Node<T>>;

/// The caller-owned selection the component highlights.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectedValue<T> {
    None,
    Single(Path<T>),
    Multiple(Vec<Path<T>>),
}

impl<T> Default for SelectedValue<T> {
    fn default() -> Self {
        SelectedValue::None
    }
}

impl<T> SelectedValue<T> {
    /// Every selected path, in order.
    pub fn paths(&self) -> &[Path<T>] {
        match self {
            SelectedValue::None => &[],
            SelectedValue::Single(path) => std::slice::from_ref(path),
            SelectedValue::Multiple(paths) => paths,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths().iter().all(|path| path.is_empty())
    }
}

/// Whether activating a leaf replaces the selection or toggles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
}
