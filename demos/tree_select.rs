//! # Tree Select Example
//!
//! Pick a person from an org chart split into two root groups. Demonstrates:
//! - drilling into teams and going back
//! - global search from the root level (`/` then type)
//! - empty parents drawn but inert
//! - active-path highlighting after a pick
//!
//! Run with: `cargo run --example tree_select`

use arbor::crossterm::event::{KeyCode, KeyModifiers};
use arbor::ratatui::layout::{Constraint, Layout};
use arbor::ratatui::style::{Color, Style};
use arbor::ratatui::text::{Line, Span};
use arbor::ratatui::widgets::{Block, Borders, Paragraph};
use arbor::ratatui::Frame;
use arbor::widgets::tree_select::{self, Node, Path, RootGroup, SelectedValue, TreeSelect};
use arbor::{Command, Component, Model, ProgramOptions, TerminalEvent};

struct Picker {
    tree: TreeSelect<&'static str>,
    chosen: Option<Path<&'static str>>,
}

#[derive(Debug)]
enum Msg {
    Tree(tree_select::Message<&'static str>),
    Quit,
}

fn org_chart() -> Vec<RootGroup<&'static str>> {
    vec![
        RootGroup::new(
            "Engineering",
            vec![
                Node::parent(
                    "platform",
                    "Platform",
                    vec![
                        Node::leaf("u1", "Alice Moreau").with_data("alice@example.com"),
                        Node::leaf("u2", "Bob Okafor").with_data("bob@example.com"),
                        Node::leaf("u3", "Chen Wei")
                            .with_data("chen@example.com")
                            .with_suffix_icon("★"),
                    ],
                ),
                Node::parent(
                    "apps",
                    "Applications",
                    vec![
                        Node::parent(
                            "mobile",
                            "Mobile",
                            vec![Node::leaf("u4", "Dana Fischer").with_data("dana@example.com")],
                        ),
                        Node::empty_parent("web", "Web (hiring)"),
                    ],
                ),
            ],
        ),
        RootGroup::new(
            "Operations",
            vec![
                Node::parent(
                    "support",
                    "Support",
                    vec![
                        Node::leaf("u5", "Eli Navarro").with_data("eli@example.com"),
                        Node::leaf("u1", "Alice Moreau (on call)")
                            .with_data("alice@example.com")
                            .with_text_color(Color::Yellow),
                    ],
                ),
                Node::leaf("u6", "Farah Haddad").with_data("farah@example.com"),
            ],
        ),
    ]
}

impl Model for Picker {
    type Message = Msg;
    type Flags = ();

    fn init(_: ()) -> (Self, Command<Msg>) {
        let mut tree = TreeSelect::new(org_chart())
            .with_placeholder("Find a person or team")
            .with_empty_label("Nobody matches")
            .with_block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" People ")
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        tree.focus();
        (Picker { tree, chosen: None }, Command::none())
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Tree(tree_select::Message::Changed(path)) => {
                self.tree.set_value(SelectedValue::Single(path.clone()));
                self.chosen = Some(path);
                Command::none()
            }
            Msg::Tree(inner) => self.tree.update(inner).map(Msg::Tree),
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [body, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(frame.area());
        self.tree.view(frame, body);

        let status = match &self.chosen {
            Some(path) => {
                let trail: Vec<&str> = path.iter().map(|n| n.display_name.as_str()).collect();
                let email = path.last().and_then(|n| n.data).unwrap_or("");
                Line::from(vec![
                    Span::styled(trail.join(" › "), Style::default().fg(Color::Green)),
                    Span::raw(format!("  {email}")),
                ])
            }
            None => Line::styled(
                "enter open/select · ← back · / search · q quit",
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(
            Paragraph::new(status).block(Block::default().borders(Borders::ALL)),
            footer,
        );
    }

    fn event(&self, event: TerminalEvent) -> Option<Msg> {
        match event {
            TerminalEvent::Mouse(mouse) => Some(Msg::Tree(tree_select::Message::Mouse(mouse))),
            TerminalEvent::Resize(..) => Some(Msg::Tree(tree_select::Message::ViewportChanged)),
            other => {
                let key = other.key_press()?;
                let quit = (key.code == KeyCode::Char('q') && !self.tree.is_editing_search())
                    || (key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL));
                if quit {
                    Some(Msg::Quit)
                } else {
                    Some(Msg::Tree(tree_select::Message::KeyPress(key)))
                }
            }
        }
    }
}

#[arbor::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = ProgramOptions {
        mouse_capture: true,
        title: Some("arbor tree select".into()),
        ..ProgramOptions::default()
    };
    let picker = arbor::run_with::<Picker>((), options).await?;
    if let Some(path) = picker.chosen {
        let trail: Vec<&str> = path.iter().map(|n| n.display_name.as_str()).collect();
        println!("{}", trail.join(" / "));
    }
    Ok(())
}
