//! **arbor** -- a hierarchical tree select for [`ratatui`].
//!
//! Umbrella crate re-exporting the runtime and widgets from one dependency:
//!
//! ```toml
//! [dependencies]
//! arbor = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`arbor_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Program`], [`run`],
//!   [`run_with`], etc.).
//! * The [`widgets`] module re-exports [`arbor_widgets`], home of
//!   [`TreeSelect`](widgets::tree_select::TreeSelect).
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use arbor::widgets::tree_select::{self, Node, RootGroup, TreeSelect};
//! use arbor::{Command, Component, Model, TerminalEvent};
//! use ratatui::Frame;
//!
//! struct Picker {
//!     tree: TreeSelect<()>,
//! }
//!
//! impl Model for Picker {
//!     type Message = tree_select::Message<()>;
//!     type Flags = Vec<RootGroup<()>>;
//!
//!     fn init(data: Self::Flags) -> (Self, Command<Self::Message>) {
//!         let mut tree = TreeSelect::new(data);
//!         tree.focus();
//!         (Picker { tree }, Command::none())
//!     }
//!     fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
//!         match msg {
//!             tree_select::Message::Changed(_) => Command::quit(),
//!             other => self.tree.update(other),
//!         }
//!     }
//!     fn view(&self, frame: &mut Frame) {
//!         self.tree.view(frame, frame.area());
//!     }
//!     fn event(&self, event: TerminalEvent) -> Option<Self::Message> {
//!         event.key_press().map(tree_select::Message::KeyPress)
//!     }
//! }
//! ```

pub use arbor_core::*;
pub mod widgets {
    pub use arbor_widgets::*;
}

pub use crossterm;
pub use ratatui;
pub use tokio;
