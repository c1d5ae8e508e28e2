//! Incremental loading at the bottom of the menu.
//!
//! When more children may exist for the current level, a sentinel row is
//! appended to the menu. [`LoadMoreObserver`] watches whether that row is in
//! view and reports the moment it becomes visible. The observer is only
//! connected while loading is allowed; any change to the inputs that gate
//! it drops the connection and starts a fresh one.

use std::fmt;
use std::sync::Arc;

use super::index::NodeKey;
use super::node::Node;

type Predicate<T> = Arc<dyn Fn(Option<&Node<T>>) -> bool + Send + Sync>;

/// Whether more children can be requested for the level being shown.
pub enum HasMore<T> {
    Flag(bool),
    /// Called with the entered node, or `None` at the root level.
    Predicate(Predicate<T>),
}

impl<T> HasMore<T> {
    pub fn predicate(f: impl Fn(Option<&Node<T>>) -> bool + Send + Sync + 'static) -> Self {
        HasMore::Predicate(Arc::new(f))
    }

    pub fn evaluate(&self, scope: Option<&Node<T>>) -> bool {
        match self {
            HasMore::Flag(flag) => *flag,
            HasMore::Predicate(f) => f(scope),
        }
    }
}

impl<T> Default for HasMore<T> {
    fn default() -> Self {
        HasMore::Flag(false)
    }
}

impl<T> Clone for HasMore<T> {
    fn clone(&self) -> Self {
        match self {
            HasMore::Flag(flag) => HasMore::Flag(*flag),
            HasMore::Predicate(f) => HasMore::Predicate(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for HasMore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HasMore::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
            HasMore::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<T> From<bool> for HasMore<T> {
    fn from(flag: bool) -> Self {
        HasMore::Flag(flag)
    }
}

/// Inputs deciding whether the observer may be connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    pub enabled: bool,
    pub loading: bool,
    pub has_more: bool,
    /// Entered level; `None` at the root.
    pub scope: Option<NodeKey>,
}

impl Gate {
    pub fn is_open(&self) -> bool {
        self.enabled && !self.loading && self.has_more
    }
}

#[derive(Debug)]
struct Connection {
    scope: Option<NodeKey>,
    was_visible: bool,
}

/// Fires once each time the sentinel goes from hidden to visible.
#[derive(Debug, Default)]
pub struct LoadMoreObserver {
    gate: Option<Gate>,
    connection: Option<Connection>,
}

impl LoadMoreObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the current gate. An unchanged gate keeps the connection; a
    /// changed one disconnects, then reconnects if the gate is open.
    pub fn sync(&mut self, gate: Gate) {
        if self.gate == Some(gate) {
            return;
        }
        self.disconnect();
        self.gate = Some(gate);
        if gate.is_open() {
            log::trace!("load-more observer connected for {:?}", gate.scope);
            self.connection = Some(Connection {
                scope: gate.scope,
                was_visible: false,
            });
        }
    }

    pub fn disconnect(&mut self) {
        if self.connection.take().is_some() {
            log::trace!("load-more observer disconnected");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Report the sentinel's visibility. Returns the scope to load for on a
    /// hidden-to-visible transition. A fresh connection counts as hidden, so
    /// a sentinel already in view fires right away.
    pub fn observe(&mut self, sentinel_visible: bool) -> Option<Option<NodeKey>> {
        let connection = self.connection.as_mut()?;
        let fire = sentinel_visible && !connection.was_visible;
        connection.was_visible = sentinel_visible;
        fire.then_some(connection.scope)
    }
}

impl Drop for LoadMoreObserver {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_gate() -> Gate {
        Gate {
            enabled: true,
            loading: false,
            has_more: true,
            scope: None,
        }
    }

    #[test]
    fn fires_once_per_visibility_edge() {
        let mut observer = LoadMoreObserver::new();
        observer.sync(open_gate());
        assert_eq!(observer.observe(false), None);
        assert_eq!(observer.observe(true), Some(None));
        assert_eq!(observer.observe(true), None);
        assert_eq!(observer.observe(false), None);
        assert_eq!(observer.observe(true), Some(None));
    }

    #[test]
    fn loading_disconnects() {
        let mut observer = LoadMoreObserver::new();
        observer.sync(open_gate());
        observer.sync(Gate {
            loading: true,
            ..open_gate()
        });
        assert!(!observer.is_connected());
        assert_eq!(observer.observe(true), None);
    }

    #[test]
    fn closed_gate_never_connects() {
        for gate in [
            Gate { enabled: false, ..open_gate() },
            Gate { has_more: false, ..open_gate() },
        ] {
            let mut observer = LoadMoreObserver::new();
            observer.sync(gate);
            assert!(!observer.is_connected());
        }
    }

    #[test]
    fn unchanged_gate_keeps_edge_state() {
        let mut observer = LoadMoreObserver::new();
        observer.sync(open_gate());
        assert!(observer.observe(true).is_some());
        observer.sync(open_gate());
        assert_eq!(observer.observe(true), None);
    }

    #[test]
    fn reconnect_fires_for_visible_sentinel() {
        let mut observer = LoadMoreObserver::new();
        observer.sync(open_gate());
        assert!(observer.observe(true).is_some());
        observer.sync(Gate { loading: true, ..open_gate() });
        observer.sync(open_gate());
        assert_eq!(observer.observe(true), Some(None));
    }

    #[test]
    fn scope_change_starts_a_fresh_connection() {
        let mut keys = crate::tree_select::index::KeyAllocator::new();
        let team = keys.next_key();
        let mut observer = LoadMoreObserver::new();
        observer.sync(open_gate());
        assert_eq!(observer.observe(true), Some(None));

        observer.sync(Gate { scope: Some(team), ..open_gate() });
        assert!(observer.is_connected());
        assert_eq!(observer.observe(true), Some(Some(team)));

        observer.sync(Gate { scope: None, has_more: false, ..open_gate() });
        assert!(!observer.is_connected());
    }

    #[test]
    fn disconnect_drops_edge_state() {
        let mut observer = LoadMoreObserver::new();
        observer.sync(open_gate());
        observer.observe(true);
        observer.disconnect();
        assert!(!observer.is_connected());
        assert_eq!(observer.observe(true), None);
    }

    #[test]
    fn predicate_sees_scope() {
        let has_more: HasMore<()> = HasMore::predicate(|scope| scope.is_some_and(|n| n.id == "t1"));
        assert!(!has_more.evaluate(None));
        assert!(has_more.evaluate(Some(&Node::leaf("t1", "Team A"))));
        assert!(HasMore::<()>::from(true).evaluate(None));
    }
}
