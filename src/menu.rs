//! Menu, name prompt and round-over choices as small UI-agnostic state
//! machines. The terminal front end maps key presses onto these inputs.

use crate::config::MAX_NAME_LEN;

/// Which screen the front end is showing.
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Menu,
    Leaderboard,
    Playing,
    NameEntry,
    RoundOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Leaderboard,
    Quit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 3] = [MenuChoice::Start, MenuChoice::Leaderboard, MenuChoice::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Start => "Start",
            MenuChoice::Leaderboard => "Leaderboard",
            MenuChoice::Quit => "Quit",
        }
    }

    /// Screen reached by picking this option; `None` means exit.
    pub fn target(&self) -> Option<Screen> {
        match self {
            MenuChoice::Start => Some(Screen::Playing),
            MenuChoice::Leaderboard => Some(Screen::Leaderboard),
            MenuChoice::Quit => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuInput {
    Up,
    Down,
    Select,
}

/// Main menu cursor. Up/Down wrap around.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    pub selected: usize,
}

impl MenuState {
    pub fn selected_choice(&self) -> MenuChoice {
        MenuChoice::ALL[self.selected]
    }

    /// Returns the picked option on `Select`.
    pub fn handle(&mut self, input: MenuInput) -> Option<MenuChoice> {
        let count = MenuChoice::ALL.len();
        match input {
            MenuInput::Up => {
                self.selected = (self.selected + count - 1) % count;
                None
            }
            MenuInput::Down => {
                self.selected = (self.selected + 1) % count;
                None
            }
            MenuInput::Select => Some(self.selected_choice()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameInput {
    Char(char),
    Backspace,
    Confirm,
}

/// Name prompt for a leaderboard place: up to ten alphanumeric characters,
/// confirmed only once non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameEntry {
    pub name: String,
}

impl NameEntry {
    /// Returns the finished name on a valid `Confirm`.
    pub fn handle(&mut self, input: NameInput) -> Option<String> {
        match input {
            NameInput::Char(c) => {
                if c.is_alphanumeric() && self.name.chars().count() < MAX_NAME_LEN {
                    self.name.push(c);
                }
                None
            }
            NameInput::Backspace => {
                self.name.pop();
                None
            }
            NameInput::Confirm if !self.name.is_empty() => Some(self.name.clone()),
            NameInput::Confirm => None,
        }
    }
}

/// What the player picks on the round-over overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOverChoice {
    /// Show the leaderboard, then go back to the menu.
    Continue,
    /// Start a new round straight away.
    Replay,
    Quit,
}

impl RoundOverChoice {
    pub fn target(&self) -> Option<Screen> {
        match self {
            RoundOverChoice::Continue => Some(Screen::Leaderboard),
            RoundOverChoice::Replay => Some(Screen::Playing),
            RoundOverChoice::Quit => None,
        }
    }
}
