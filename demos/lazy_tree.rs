//! # Lazy Tree Example
//!
//! Children of each team arrive in pages. Scrolling the sentinel row into
//! view asks for the next page, which is "fetched" with a delay through
//! `Command::perform`. Demonstrates:
//! - `HasMore::predicate` deciding per level whether more pages exist
//! - `set_loading_more` around the fetch
//! - `set_data` keeping the open level while the dataset grows
//!
//! Logs go to `lazy_tree.log` (set `RUST_LOG=debug` to see them).
//!
//! Run with: `cargo run --example lazy_tree`

use std::time::Duration;

use arbor::crossterm::event::{KeyCode, KeyModifiers};
use arbor::ratatui::style::{Color, Style};
use arbor::ratatui::widgets::{Block, Borders};
use arbor::ratatui::Frame;
use arbor::widgets::tree_select::{self, Children, HasMore, Node, RootGroup, TreeSelect};
use arbor::{Command, Component, Model, TerminalEvent};

const PAGE: u32 = 15;
const TEAM_SIZE: u32 = 60;

struct Roster {
    tree: TreeSelect<u32>,
}

#[derive(Debug)]
enum Msg {
    Tree(tree_select::Message<u32>),
    Page { team: String, members: Vec<Node<u32>> },
    Quit,
}

async fn fetch_page(team: String, start: u32) -> (String, Vec<Node<u32>>) {
    arbor::tokio::time::sleep(Duration::from_millis(600)).await;
    let members = member_range(&team, start, (start + PAGE).min(TEAM_SIZE));
    (team, members)
}

fn member_range(team: &str, start: u32, end: u32) -> Vec<Node<u32>> {
    (start..end)
        .map(|i| Node::leaf(format!("{team}-{i}"), format!("{team} member {i}")).with_data(i))
        .collect()
}

fn append_page(nodes: &mut [Node<u32>], team: &str, page: &[Node<u32>]) -> bool {
    for node in nodes {
        if node.id == team {
            node.children.extend(page.iter().cloned());
            return true;
        }
        if let Children::Parent(kids) = &mut node.children {
            if append_page(kids, team, page) {
                return true;
            }
        }
    }
    false
}

impl Model for Roster {
    type Message = Msg;
    type Flags = ();

    fn init(_: ()) -> (Self, Command<Msg>) {
        // Empty parents cannot be entered, so every team starts with a page.
        let teams = ["red", "green", "blue"]
            .into_iter()
            .map(|team| Node::parent(team, format!("Team {team}"), member_range(team, 0, PAGE)))
            .collect();
        let groups = vec![RootGroup::new("Teams", teams)];

        let mut tree = TreeSelect::new(groups)
            .with_loading_label("Fetching more members…")
            .with_load_more(HasMore::predicate(|scope: Option<&Node<u32>>| {
                scope.is_some_and(|team| (team.children.nodes().len() as u32) < TEAM_SIZE)
            }))
            .with_block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Roster ")
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        tree.focus();
        (Roster { tree }, Command::none())
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Tree(tree_select::Message::LoadMore(Some(team))) => {
                log::info!("loading page for {} from {}", team.id, team.children.nodes().len());
                self.tree.set_loading_more(true);
                let start = team.children.nodes().len() as u32;
                Command::perform(fetch_page(team.id, start), |(team, members)| Msg::Page {
                    team,
                    members,
                })
            }
            Msg::Tree(tree_select::Message::Changed(path)) => {
                if let Some(member) = path.last() {
                    log::info!("picked {}", member.display_name);
                }
                Command::none()
            }
            Msg::Tree(inner) => self.tree.update(inner).map(Msg::Tree),
            Msg::Page { team, members } => {
                let mut groups = self.tree.data().to_vec();
                let found = groups
                    .iter_mut()
                    .any(|group| append_page(&mut group.nodes, &team, &members));
                if !found {
                    log::warn!("team {team} vanished before its page arrived");
                }
                self.tree.set_data(groups);
                self.tree.set_loading_more(false);
                Command::message(Msg::Tree(tree_select::Message::ViewportChanged))
            }
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        self.tree.view(frame, frame.area());
    }

    fn event(&self, event: TerminalEvent) -> Option<Msg> {
        match event {
            TerminalEvent::Resize(..) => Some(Msg::Tree(tree_select::Message::ViewportChanged)),
            other => {
                let key = other.key_press()?;
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
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
    let file = arbor::log_to_file("lazy_tree.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    arbor::run::<Roster>(()).await?;
    Ok(())
}
