//! Hierarchical drill-down selector.
//!
//! [`TreeSelect`] shows a forest of labelled root groups one level at a
//! time. Entering a parent replaces the menu with its children and pushes
//! it on a navigation stack; leaving pops it. Leaves are selected and
//! reported as a [`Path`] from the top-level ancestor down to the leaf.
//! Parents with an empty child list are drawn but inert.
//!
//! The root level has a global search that lists matching leaves from every
//! group followed by matching parents grouped under their group label.
//! Inside a level the search only filters that level's children.
//!
//! The selected value is owned by the caller: the widget reports
//! [`Message::Changed`] (or [`Message::ValueChanged`] in multiple mode) and
//! the caller stores the result and hands it back with
//! [`TreeSelect::set_value`].
//!
//! # Incremental loading
//!
//! With [`TreeSelect::with_load_more`], a sentinel row follows the menu
//! while more children may exist. Each time it scrolls into view the widget
//! emits [`Message::LoadMore`] with the level being shown. The caller marks
//! the load with [`TreeSelect::set_loading_more`], fetches, then installs
//! the grown dataset with [`TreeSelect::set_data`]. The navigation stack is
//! carried across the new dataset by following caller ids.
//!
//! Setters do not emit anything. After calling them from outside `update`,
//! send [`Message::ViewportChanged`] so visibility is re-checked.
//!
//! # Example
//!
//! ```ignore
//! use arbor_widgets::tree_select::{Message, Node, RootGroup, TreeSelect};
//!
//! let mut tree = TreeSelect::new(vec![RootGroup::new(
//!     "Org",
//!     vec![Node::parent(
//!         "t1",
//!         "Team A",
//!         vec![Node::leaf("a1", "Alice"), Node::leaf("b1", "Bob")],
//!     )],
//! )])
//! .with_placeholder("Find a person");
//! tree.focus();
//!
//! // In the parent's update:
//! match msg {
//!     Msg::Tree(Message::Changed(path)) => self.chosen = Some(path),
//!     Msg::Tree(inner) => return self.tree.update(inner).map(Msg::Tree),
//! }
//! ```

pub mod index;
pub mod load_more;
pub mod navigation;
pub mod node;
pub mod path;
pub mod search;

pub use index::NodeKey;
pub use load_more::HasMore;
pub use node::{Children, Node, Path, RootGroup, SelectedValue, SelectionMode};

use std::cell::Cell;
use std::sync::Arc;

use arbor_core::command::Command;
use arbor_core::component::Component;
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::key::{Binding, KeyCombination};
use crate::runeutil::{display_width, truncate};
use crate::selection::{ScrollInfo, SelectionState};

use index::{KeyAllocator, TreeIndex};
use load_more::{Gate, LoadMoreObserver};
use navigation::NavigationStack;
use search::SearchState;

/// Messages for the tree select.
#[derive(Debug, Clone, PartialEq)]
pub enum Message<T> {
    /// A key press forwarded to the widget.
    KeyPress(KeyEvent),
    /// A mouse event forwarded to the widget.
    Mouse(MouseEvent),
    /// The menu was swapped or resized; re-check scroll edges and the
    /// load-more sentinel.
    ViewportChanged,
    /// A leaf was selected (single mode).
    Changed(Path<T>),
    /// The selection was toggled (multiple mode); carries the new set.
    ValueChanged(Vec<Path<T>>),
    /// The navigation stack changed; carries the entered nodes.
    PathChanged(Path<T>),
    /// The search text of the current level changed.
    SearchChanged {
        text: String,
        /// Entered node, `None` at the root level.
        scope: Option<Node<T>>,
    },
    /// The load-more sentinel came into view.
    LoadMore(Option<Node<T>>),
}

/// Style configuration for the tree select.
#[derive(Debug, Clone)]
pub struct TreeSelectStyle {
    pub normal: Style,
    /// Row under the cursor.
    pub cursor: Style,
    /// Rows on the selected path.
    pub active: Style,
    /// Empty parents.
    pub disabled: Style,
    pub group_label: Style,
    pub separator: Style,
    /// The "previous" header shown when drilled down.
    pub back: Style,
    pub search_prompt: Style,
    pub placeholder: Style,
    pub loading: Style,
    pub scroll_marker: Style,
    /// Symbol left of the cursor row.
    pub highlight_symbol: String,
    /// Drawn at the end of every non-leaf row.
    pub chevron: String,
}

impl Default for TreeSelectStyle {
    fn default() -> Self {
        Self {
            normal: Style::default(),
            cursor: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            active: Style::default().bg(Color::DarkGray),
            disabled: Style::default().fg(Color::DarkGray),
            group_label: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),
            back: Style::default().fg(Color::Yellow),
            search_prompt: Style::default().fg(Color::Yellow),
            placeholder: Style::default().fg(Color::DarkGray),
            loading: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            scroll_marker: Style::default().fg(Color::DarkGray),
            highlight_symbol: "▸ ".to_string(),
            chevron: "›".to_string(),
        }
    }
}

/// Configurable key bindings for the tree select.
pub struct TreeSelectKeyBindings {
    /// Default: Up, k
    pub up: Binding,
    /// Default: Down, j
    pub down: Binding,
    /// Default: Home, g
    pub first: Binding,
    /// Default: End, G
    pub last: Binding,
    pub page_up: Binding,
    pub page_down: Binding,
    /// Enter a parent or select a leaf. Default: Enter, Right, l
    pub activate: Binding,
    /// Leave the current level. Default: Left, h, Backspace, Esc
    pub previous: Binding,
    /// Start typing a search. Default: /
    pub search: Binding,
    /// Default: Ctrl+U
    pub clear_search: Binding,
}

impl Default for TreeSelectKeyBindings {
    fn default() -> Self {
        Self {
            up: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Up),
                    KeyCombination::new(KeyCode::Char('k')),
                ],
                "Up",
            ),
            down: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Down),
                    KeyCombination::new(KeyCode::Char('j')),
                ],
                "Down",
            ),
            first: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Home),
                    KeyCombination::new(KeyCode::Char('g')),
                ],
                "First",
            ),
            last: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::End),
                    KeyCombination::new(KeyCode::Char('G')),
                ],
                "Last",
            ),
            page_up: Binding::new(KeyCombination::new(KeyCode::PageUp), "Page up"),
            page_down: Binding::new(KeyCombination::new(KeyCode::PageDown), "Page down"),
            activate: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Enter),
                    KeyCombination::new(KeyCode::Right),
                    KeyCombination::new(KeyCode::Char('l')),
                ],
                "Open / select",
            ),
            previous: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Left),
                    KeyCombination::new(KeyCode::Char('h')),
                    KeyCombination::new(KeyCode::Backspace),
                    KeyCombination::new(KeyCode::Esc),
                ],
                "Back",
            ),
            search: Binding::new(KeyCombination::new(KeyCode::Char('/')), "Search"),
            clear_search: Binding::new(KeyCombination::ctrl(KeyCode::Char('u')), "Clear search"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuRow {
    Item(NodeKey),
    Header(String),
    Separator,
    /// Global search found nothing.
    Empty,
    Loading,
    Sentinel,
}

#[derive(Debug, Clone, Copy)]
enum Motion {
    Up,
    Down,
    First,
    Last,
    PageUp,
    PageDown,
}

/// A drill-down tree selector. See the [module docs](self).
pub struct TreeSelect<T> {
    data: Arc<[RootGroup<T>]>,
    index: TreeIndex<T>,
    keys: KeyAllocator,
    value: SelectedValue<T>,
    mode: SelectionMode,
    stack: NavigationStack,
    search: SearchState,
    search_enabled: bool,
    editing: bool,
    rows: Vec<MenuRow>,
    selection: SelectionState,
    visible_height: Cell<usize>,
    list_area: Cell<Rect>,
    back_area: Cell<Option<Rect>>,
    has_more: Option<HasMore<T>>,
    should_load_more: bool,
    loading_more: bool,
    observer: LoadMoreObserver,
    placeholder: String,
    empty_label: String,
    loading_label: String,
    focus: bool,
    style: TreeSelectStyle,
    block: Option<Block<'static>>,
    key_bindings: TreeSelectKeyBindings,
}

impl<T: Clone + Send + Sync + 'static> TreeSelect<T> {
    /// Create a selector over `data`, showing the root level.
    pub fn new(data: impl Into<Arc<[RootGroup<T>]>>) -> Self {
        let data = data.into();
        let mut keys = KeyAllocator::new();
        let index = TreeIndex::build(&data, &mut keys);
        let mut select = Self {
            data,
            index,
            keys,
            value: SelectedValue::None,
            mode: SelectionMode::Single,
            stack: NavigationStack::new(),
            search: SearchState::default(),
            search_enabled: true,
            editing: false,
            rows: Vec::new(),
            selection: SelectionState::new(0, 10),
            visible_height: Cell::new(10),
            list_area: Cell::new(Rect::default()),
            back_area: Cell::new(None),
            has_more: None,
            should_load_more: false,
            loading_more: false,
            observer: LoadMoreObserver::new(),
            placeholder: "Search…".to_string(),
            empty_label: "No results".to_string(),
            loading_label: "Loading…".to_string(),
            focus: false,
            style: TreeSelectStyle::default(),
            block: None,
            key_bindings: TreeSelectKeyBindings::default(),
        };
        select.rebuild_rows(true);
        select
    }

    /// Set the initial value. The menu opens on the level holding the last
    /// selected node.
    pub fn with_value(mut self, value: SelectedValue<T>) -> Self {
        if let Some(path) = value.paths().last() {
            self.stack = NavigationStack::from_keys(path::initial_menu(&self.index, path));
        }
        self.value = value;
        self.rebuild_rows(true);
        self
    }

    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Show or hide the search line.
    pub fn with_search(mut self, enabled: bool) -> Self {
        self.search_enabled = enabled;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Text shown when a global search matches nothing.
    pub fn with_empty_label(mut self, label: impl Into<String>) -> Self {
        self.empty_label = label.into();
        self
    }

    pub fn with_loading_label(mut self, label: impl Into<String>) -> Self {
        self.loading_label = label.into();
        self
    }

    /// Enable incremental loading.
    pub fn with_load_more(mut self, has_more: HasMore<T>) -> Self {
        self.has_more = Some(has_more);
        self.rebuild_rows(false);
        self
    }

    pub fn with_style(mut self, style: TreeSelectStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn with_key_bindings(mut self, bindings: TreeSelectKeyBindings) -> Self {
        self.key_bindings = bindings;
        self
    }

    /// Install a new dataset. Passing the same `Arc` again is a no-op.
    /// The navigation stack is carried over by caller id and cut where a
    /// level no longer exists.
    pub fn set_data(&mut self, data: impl Into<Arc<[RootGroup<T>]>>) {
        let data = data.into();
        if Arc::ptr_eq(&self.data, &data) {
            return;
        }
        let index = TreeIndex::build(&data, &mut self.keys);
        log::debug!(
            "tree index rebuilt: {} nodes in {} groups",
            index.len(),
            index.groups().len()
        );
        let truncated = self.stack.reconcile(&self.index, &index);
        self.data = data;
        self.index = index;
        self.rebuild_rows(truncated);
    }

    /// Replace the highlighted value. The navigation stack is left alone.
    pub fn set_value(&mut self, value: SelectedValue<T>) {
        self.value = value;
    }

    pub fn set_loading_more(&mut self, loading: bool) {
        if self.loading_more != loading {
            self.loading_more = loading;
            self.rebuild_rows(false);
        }
    }

    pub fn set_has_more(&mut self, has_more: HasMore<T>) {
        self.has_more = Some(has_more);
        self.rebuild_rows(false);
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
        self.editing = false;
    }

    pub fn data(&self) -> &Arc<[RootGroup<T>]> {
        &self.data
    }

    pub fn value(&self) -> &SelectedValue<T> {
        &self.value
    }

    /// Entered nodes, outermost first. Empty at the root level.
    pub fn navigation_path(&self) -> Path<T> {
        self.stack
            .keys()
            .iter()
            .filter_map(|key| self.index.to_node(*key))
            .collect()
    }

    pub fn is_root(&self) -> bool {
        self.stack.is_root()
    }

    /// Search text of the level being shown.
    pub fn search_text(&self) -> &str {
        self.search.text(self.stack.is_root())
    }

    /// Whether keystrokes currently go to the search text.
    pub fn is_editing_search(&self) -> bool {
        self.editing
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    /// Nodes listed in the menu, in display order.
    pub fn visible_nodes(&self) -> Vec<Node<T>> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                MenuRow::Item(key) => self.index.to_node(*key),
                _ => None,
            })
            .collect()
    }

    /// Node under the cursor.
    pub fn cursor_node(&self) -> Option<Node<T>> {
        match self.rows.get(self.selection.cursor()) {
            Some(MenuRow::Item(key)) => self.index.to_node(*key),
            _ => None,
        }
    }

    pub fn scroll_info(&self) -> ScrollInfo {
        self.selection.scroll_info()
    }

    fn scope_node(&self) -> Option<Node<T>> {
        self.stack.last().and_then(|key| self.index.to_node(key))
    }

    fn rebuild_rows(&mut self, reset: bool) {
        self.should_load_more = match &self.has_more {
            Some(has_more) => has_more.evaluate(self.scope_node().as_ref()),
            None => false,
        };

        let mut rows = Vec::new();
        match self.stack.last() {
            None if !self.search.menu.is_empty() => {
                let results = search::global_search(&self.index, &self.search.menu);
                if results.is_empty() {
                    rows.push(MenuRow::Empty);
                }
                rows.extend(results.leaves.into_iter().map(MenuRow::Item));
                for group in results.groups {
                    if !rows.is_empty() {
                        rows.push(MenuRow::Separator);
                    }
                    if !group.label.is_empty() {
                        rows.push(MenuRow::Header(group.label));
                    }
                    rows.extend(group.keys.into_iter().map(MenuRow::Item));
                }
            }
            None => {
                for (position, keys) in search::root_menu(&self.index, "").into_iter().enumerate() {
                    if position > 0 {
                        rows.push(MenuRow::Separator);
                    }
                    rows.extend(keys.into_iter().map(MenuRow::Item));
                }
            }
            Some(parent) => {
                rows.extend(
                    search::sub_menu(&self.index, parent, &self.search.sub_menu)
                        .into_iter()
                        .map(MenuRow::Item),
                );
            }
        }
        if self.loading_more {
            rows.push(MenuRow::Loading);
        } else if self.should_load_more {
            rows.push(MenuRow::Sentinel);
        }

        let index = &self.index;
        let rows_ref = &rows;
        let selectable = |row: usize| is_selectable(rows_ref, index, row);
        if reset {
            self.selection.reset(rows.len(), selectable);
        } else {
            self.selection.set_count(rows.len(), selectable);
        }
        self.rows = rows;
    }

    fn move_cursor(&mut self, motion: Motion) {
        let index = &self.index;
        let rows = &self.rows;
        let selectable = |row: usize| is_selectable(rows, index, row);
        match motion {
            Motion::Up => self.selection.move_up(selectable),
            Motion::Down => self.selection.move_down(selectable),
            Motion::First => self.selection.home(selectable),
            Motion::Last => self.selection.end(selectable),
            Motion::PageUp => self.selection.page_up(selectable),
            Motion::PageDown => self.selection.page_down(selectable),
        }
    }

    fn activate(&mut self, key: NodeKey) -> Command<Message<T>> {
        let Some(node) = self.index.get(key) else {
            return Command::none();
        };
        if node.is_navigable() {
            self.descend(key)
        } else if node.is_leaf() {
            self.select(key)
        } else {
            Command::none()
        }
    }

    fn activate_cursor(&mut self) -> Command<Message<T>> {
        match self.rows.get(self.selection.cursor()) {
            Some(MenuRow::Item(key)) => {
                let key = *key;
                self.activate(key)
            }
            _ => Command::none(),
        }
    }

    fn descend(&mut self, key: NodeKey) -> Command<Message<T>> {
        if !self.stack.descend(&self.index, key) {
            return Command::none();
        }
        self.rebuild_rows(true);
        Command::batch([
            Command::message(Message::PathChanged(self.navigation_path())),
            Command::message(Message::ViewportChanged),
        ])
    }

    fn select(&mut self, key: NodeKey) -> Command<Message<T>> {
        let selected = path::node_path(&self.index, key);
        match self.mode {
            SelectionMode::Single => Command::message(Message::Changed(selected)),
            SelectionMode::Multiple => {
                let mut paths = self.value.paths().to_vec();
                match paths.iter().position(|p| path::is_same_path(p, &selected)) {
                    Some(position) => {
                        paths.remove(position);
                    }
                    None => paths.push(selected),
                }
                Command::message(Message::ValueChanged(paths))
            }
        }
    }

    fn previous(&mut self) -> Command<Message<T>> {
        if self.stack.is_root() {
            if self.search.menu.is_empty() {
                return Command::none();
            }
            return self.set_search_text(String::new());
        }
        self.stack.previous(&self.index);
        self.search.clear();
        self.editing = false;
        self.rebuild_rows(true);
        Command::batch([
            Command::message(Message::PathChanged(self.navigation_path())),
            Command::message(Message::ViewportChanged),
        ])
    }

    fn set_search_text(&mut self, text: String) -> Command<Message<T>> {
        let root = self.stack.is_root();
        if self.search.text(root) == text {
            return Command::none();
        }
        *self.search.text_mut(root) = text.clone();
        self.rebuild_rows(true);
        Command::message(Message::SearchChanged {
            text,
            scope: self.scope_node(),
        })
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message<T>> {
        if self.editing {
            if let Some(cmd) = self.handle_search_key(key) {
                return cmd;
            }
        }
        if self.key_bindings.up.matches(&key) {
            self.move_cursor(Motion::Up);
        } else if self.key_bindings.down.matches(&key) {
            self.move_cursor(Motion::Down);
        } else if self.key_bindings.first.matches(&key) {
            self.move_cursor(Motion::First);
        } else if self.key_bindings.last.matches(&key) {
            self.move_cursor(Motion::Last);
        } else if self.key_bindings.page_up.matches(&key) {
            self.move_cursor(Motion::PageUp);
        } else if self.key_bindings.page_down.matches(&key) {
            self.move_cursor(Motion::PageDown);
        } else if self.key_bindings.activate.matches(&key) {
            return self.activate_cursor();
        } else if self.key_bindings.previous.matches(&key) {
            return self.previous();
        } else if self.key_bindings.search.matches(&key) {
            self.editing = self.search_enabled;
        } else if self.key_bindings.clear_search.matches(&key) {
            return self.set_search_text(String::new());
        }
        Command::none()
    }

    /// Keys consumed while typing a search; `None` falls through to
    /// navigation.
    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Command<Message<T>>> {
        if self.key_bindings.clear_search.matches(&key) {
            return Some(self.set_search_text(String::new()));
        }
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.editing = false;
                Some(Command::none())
            }
            KeyCode::Backspace => {
                let mut text = self.search_text().to_string();
                if text.pop().is_some() {
                    Some(self.set_search_text(text))
                } else {
                    Some(Command::none())
                }
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut text = self.search_text().to_string();
                text.push(c);
                Some(self.set_search_text(text))
            }
            _ => None,
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Command<Message<T>> {
        let position = Position::new(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.back_area.get().is_some_and(|area| area.contains(position)) {
                    return self.previous();
                }
                let area = self.list_area.get();
                if !area.contains(position) {
                    return Command::none();
                }
                let row = self.selection.offset() + usize::from(event.row - area.y);
                match self.rows.get(row) {
                    Some(MenuRow::Item(key)) => {
                        let key = *key;
                        if is_selectable(&self.rows, &self.index, row) {
                            self.selection.select(row);
                        }
                        self.activate(key)
                    }
                    _ => Command::none(),
                }
            }
            MouseEventKind::ScrollDown => {
                self.move_cursor(Motion::Down);
                Command::none()
            }
            MouseEventKind::ScrollUp => {
                self.move_cursor(Motion::Up);
                Command::none()
            }
            _ => Command::none(),
        }
    }

    fn poll_load_more(&mut self) -> Command<Message<T>> {
        self.observer.sync(Gate {
            enabled: self.has_more.is_some(),
            loading: self.loading_more,
            has_more: self.should_load_more,
            scope: self.stack.last(),
        });
        let sentinel_visible = self.rows.last() == Some(&MenuRow::Sentinel)
            && self.selection.is_visible(self.rows.len() - 1);
        match self.observer.observe(sentinel_visible) {
            Some(scope) => {
                log::debug!("load-more sentinel visible, scope {:?}", scope);
                Command::message(Message::LoadMore(
                    scope.and_then(|key| self.index.to_node(key)),
                ))
            }
            None => Command::none(),
        }
    }

    /// Whether `key` lies on any selected path.
    fn is_active(&self, key: NodeKey) -> bool {
        self.value.paths().iter().any(|selected| {
            path::key_for_path(&self.index, selected)
                .is_some_and(|resolved| path::menu_by_id(&self.index, resolved).contains(&key))
        })
    }

    fn row_line(&self, row: &MenuRow, is_cursor: bool, width: usize) -> Line<'static> {
        match row {
            MenuRow::Item(key) => self.item_line(*key, is_cursor, width),
            MenuRow::Header(label) => Line::styled(
                truncate(label, width, "…"),
                self.style.group_label,
            ),
            MenuRow::Separator => Line::styled("─".repeat(width), self.style.separator),
            MenuRow::Empty => Line::styled(
                truncate(&self.empty_label, width, "…"),
                self.style.placeholder,
            ),
            MenuRow::Loading => Line::styled(
                truncate(&self.loading_label, width, "…"),
                self.style.loading,
            ),
            MenuRow::Sentinel => Line::default(),
        }
    }

    fn item_line(&self, key: NodeKey, is_cursor: bool, width: usize) -> Line<'static> {
        let Some(node) = self.index.get(key) else {
            return Line::default();
        };
        let symbol_width = display_width(&self.style.highlight_symbol);
        let symbol = if is_cursor && self.focus {
            self.style.highlight_symbol.clone()
        } else {
            " ".repeat(symbol_width)
        };
        let chevron = if node.is_leaf() {
            String::new()
        } else {
            format!(" {}", self.style.chevron)
        };
        let suffix = node
            .suffix_icon
            .as_ref()
            .map(|icon| format!(" {icon}"))
            .unwrap_or_default();
        let room = width
            .saturating_sub(symbol_width)
            .saturating_sub(display_width(&chevron))
            .saturating_sub(display_width(&suffix));
        let label = truncate(&node.display_name, room, "…");
        let padding = " ".repeat(room.saturating_sub(display_width(&label)));

        let mut style = self.style.normal;
        if let Some(color) = node.text_color {
            style = style.fg(color);
        }
        if self.is_active(key) {
            style = style.patch(self.style.active);
        }
        if node.is_empty_parent() {
            style = style.patch(self.style.disabled);
        } else if is_cursor && self.focus {
            style = style.patch(self.style.cursor);
        }

        Line::from(vec![
            Span::styled(symbol, self.style.cursor),
            Span::styled(label, style),
            Span::styled(padding, style),
            Span::styled(suffix, style),
            Span::styled(chevron, style),
        ])
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let text = self.search_text();
        let mut spans = vec![Span::styled("/ ", self.style.search_prompt)];
        if text.is_empty() && !self.editing {
            spans.push(Span::styled(self.placeholder.clone(), self.style.placeholder));
        } else {
            spans.push(Span::raw(text.to_string()));
        }
        if self.editing && self.focus {
            spans.push(Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_back(&self, frame: &mut Frame, area: Rect) {
        let name = self
            .stack
            .last()
            .and_then(|key| self.index.get(key))
            .map(|node| node.display_name.as_str())
            .unwrap_or_default();
        let label = truncate(&format!("‹ {name}"), area.width as usize, "…");
        frame.render_widget(Paragraph::new(Line::styled(label, self.style.back)), area);
    }
}

fn is_selectable<T>(rows: &[MenuRow], index: &TreeIndex<T>, row: usize) -> bool {
    match rows.get(row) {
        Some(MenuRow::Item(key)) => index.get(*key).is_some_and(|node| !node.is_empty_parent()),
        _ => false,
    }
}

impl<T: Clone + Send + Sync + 'static> Component for TreeSelect<T> {
    type Message = Message<T>;

    fn update(&mut self, msg: Message<T>) -> Command<Message<T>> {
        self.selection.set_visible(self.visible_height.get());
        let cmd = match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::Mouse(event) => self.handle_mouse(event),
            // Nothing to do beyond the visibility check below.
            Message::ViewportChanged => Command::none(),
            // Notifications emitted by this widget; parents match on them.
            Message::Changed(_)
            | Message::ValueChanged(_)
            | Message::PathChanged(_)
            | Message::SearchChanged { .. }
            | Message::LoadMore(_) => Command::none(),
            Message::KeyPress(_) => Command::none(),
        };
        Command::batch([cmd, self.poll_load_more()])
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            frame.render_widget(block.clone(), area);
            inner
        } else {
            area
        };
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let has_back = !self.stack.is_root();
        let mut constraints = Vec::new();
        if has_back {
            constraints.push(Constraint::Length(1));
        }
        if self.search_enabled {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(0));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let mut chunk_idx = 0;
        if has_back {
            self.render_back(frame, chunks[chunk_idx]);
            self.back_area.set(Some(chunks[chunk_idx]));
            chunk_idx += 1;
        } else {
            self.back_area.set(None);
        }
        if self.search_enabled {
            self.render_search(frame, chunks[chunk_idx]);
            chunk_idx += 1;
        }

        let list_area = chunks[chunk_idx];
        self.list_area.set(list_area);
        self.visible_height.set(if list_area.height > 0 {
            list_area.height as usize
        } else {
            10
        });
        if list_area.height == 0 {
            return;
        }

        let height = list_area.height as usize;
        let overflow = self.rows.len() > height;
        let width = (list_area.width as usize).saturating_sub(usize::from(overflow));
        let offset = self.selection.offset();
        let lines: Vec<Line> = self
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(row, menu_row)| self.row_line(menu_row, row == self.selection.cursor(), width))
            .collect();
        frame.render_widget(Paragraph::new(lines), list_area);

        if overflow {
            let x = list_area.right() - 1;
            if offset > 0 {
                frame.render_widget(
                    Span::styled("▲", self.style.scroll_marker),
                    Rect::new(x, list_area.y, 1, 1),
                );
            }
            if offset + height < self.rows.len() {
                frame.render_widget(
                    Span::styled("▼", self.style.scroll_marker),
                    Rect::new(x, list_area.bottom() - 1, 1, 1),
                );
            }
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
