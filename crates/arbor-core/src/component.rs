use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// `Component` mirrors [`Model`](crate::Model), except that its
/// [`view`](Component::view) receives the area to draw into. A parent model
/// decides *where* each child renders by handing it a sub-region of the frame.
///
/// # Composition pattern
///
/// Wrap the component's message type in a variant of the parent message and
/// lift returned commands with [`Command::map`]. Notification messages that a
/// component emits (for example a tree select reporting a chosen path) come
/// back through the same variant, so the parent can react to them before
/// forwarding:
///
/// ```rust,ignore
/// use arbor_core::{Command, Component, Model};
/// use arbor_widgets::tree_select::{self, TreeSelect};
///
/// struct App { tree: TreeSelect<()> }
///
/// enum Msg { Tree(tree_select::Message<()>) }
///
/// impl Model for App {
///     // ...
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Tree(tree_select::Message::Changed(path)) => {
///                 // react to the selection, then let the tree see it too
///                 self.tree.update(tree_select::Message::Changed(path)).map(Msg::Tree)
///             }
///             Msg::Tree(m) => self.tree.update(m).map(Msg::Tree),
///         }
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// The returned command uses the component's own `Message` type; the
    /// parent should call [`.map()`](Command::map) to lift it.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    ///
    /// Implementations should confine all rendering to the given rectangle.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently has focus.
    ///
    /// A parent can query this to decide which child receives keyboard
    /// events. Defaults to `false`.
    fn focused(&self) -> bool {
        false
    }
}
