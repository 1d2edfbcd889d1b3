// src/app/mod.rs
use crossterm::event::KeyCode;
use std::path::Path;

use crate::filesystem::{DirNavigator, NavigationIntent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Open,
    Back,
    Parent,
    ToggleHidden,
    CycleSort,
    Refresh,
    /// Jump to the breadcrumb with this index, root being 0.
    Breadcrumb(usize),
    Quit,
}

impl Action {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Some(Action::Open),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => Some(Action::Back),
            KeyCode::Char('u') => Some(Action::Parent),
            KeyCode::Char('.') => Some(Action::ToggleHidden),
            KeyCode::Char('s') => Some(Action::CycleSort),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                c.to_digit(10).map(|d| Action::Breadcrumb(d as usize))
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Browser session state. Navigation failures end up in `status`, never
/// in an early exit.
pub struct App {
    pub navigator: DirNavigator,
    pub selected: usize,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(navigator: DirNavigator) -> Self {
        App { navigator, selected: 0, status: None, should_quit: false }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        if let Some(action) = Action::from_key(code) {
            self.apply(action);
        }
    }

    pub fn apply(&mut self, action: Action) {
        self.status = None;
        match action {
            Action::Up => self.selected = self.selected.saturating_sub(1),
            Action::Down => {
                if self.selected + 1 < self.navigator.entries.len() {
                    self.selected += 1;
                }
            }
            Action::Open => self.open_selected(),
            Action::Back => {
                let left = self.navigator.current_path.clone();
                match self.navigator.back() {
                    Ok(true) => self.select_path(&left),
                    Ok(false) => self.status = Some("no previous directory".to_string()),
                    Err(e) => self.status = Some(e.to_string()),
                }
            }
            Action::Parent => {
                let left = self.navigator.current_path.clone();
                match self.navigator.navigate_up() {
                    Ok(true) => self.select_path(&left),
                    Ok(false) => self.status = Some("already at the root".to_string()),
                    Err(e) => self.status = Some(e.to_string()),
                }
            }
            Action::ToggleHidden => {
                let show = !self.navigator.options.include_hidden;
                match self.navigator.set_show_hidden(show) {
                    Ok(_) => {
                        let label = if show { "shown" } else { "hidden" };
                        self.status = Some(format!("hidden files {}", label));
                    }
                    Err(e) => self.status = Some(e.to_string()),
                }
            }
            Action::CycleSort => {
                let sort_by = self.navigator.options.sort_by.next();
                self.navigator.set_sort_by(sort_by);
                self.status = Some(format!("sorted by {}", sort_by.label()));
            }
            Action::Refresh => {
                if let Err(e) = self.navigator.refresh() {
                    self.status = Some(e.to_string());
                }
            }
            Action::Breadcrumb(index) => {
                let below = self.navigator.breadcrumbs().get(index + 1).map(|p| p.to_path_buf());
                match self.navigator.open_breadcrumb(index) {
                    Ok(true) => {
                        if let Some(below) = below {
                            self.select_path(&below);
                        } else {
                            self.selected = 0;
                        }
                    }
                    Ok(false) => self.status = Some(format!("no breadcrumb {}", index)),
                    Err(e) => self.status = Some(e.to_string()),
                }
            }
            Action::Quit => self.should_quit = true,
        }
        self.clamp_selection();
    }

    fn open_selected(&mut self) {
        match self.navigator.select(self.selected) {
            Ok(NavigationIntent::Open(_)) => self.selected = 0,
            Ok(NavigationIntent::None) => {
                if let Some(entry) = self.navigator.entries.get(self.selected) {
                    self.status = Some(format!("{} is not a directory", entry.name));
                }
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn select_path(&mut self, path: &Path) {
        self.selected = self
            .navigator
            .entries
            .iter()
            .position(|entry| entry.path == path)
            .unwrap_or(0);
    }

    fn clamp_selection(&mut self) {
        let len = self.navigator.entries.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
