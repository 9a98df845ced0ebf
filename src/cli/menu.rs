//! The menu state machine.
//!
//! [`transition`] maps the current menu and the user's raw choice to the next
//! menu and the action to perform. It does no I/O, so the session only has to
//! carry out actions.

use std::str::FromStr;

/// The menu the user is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The login menu: admin, user or exit.
    LoggedOut,
    /// The menu available to every user.
    User,
    /// The menu available after an admin login.
    Admin,
    /// The session is over.
    Exited,
}

/// What the session should do after a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond showing the next menu.
    Nothing,
    /// Challenge for admin credentials, entering [`State::Admin`] on success.
    Authenticate,
    Book,
    Statistics,
    ListUpcoming,
    ChangePriority,
    Disable,
    RunEvents,
    /// Write the tickets to disk and say goodbye.
    Save,
    /// The choice was not one of the listed options.
    Invalid,
}

/// Choices on the login menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginChoice {
    Admin,
    User,
    Exit,
}

/// Choices on the user menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserChoice {
    Book,
    Exit,
}

/// Choices on the admin menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminChoice {
    Statistics,
    Book,
    ListAll,
    ChangePriority,
    Disable,
    RunEvents,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UnknownChoice;

impl FromStr for LoginChoice {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Admin),
            "2" => Ok(Self::User),
            "3" => Ok(Self::Exit),
            _ => Err(UnknownChoice),
        }
    }
}

impl FromStr for UserChoice {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Book),
            "2" => Ok(Self::Exit),
            _ => Err(UnknownChoice),
        }
    }
}

impl FromStr for AdminChoice {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Statistics),
            "2" => Ok(Self::Book),
            "3" => Ok(Self::ListAll),
            "4" => Ok(Self::ChangePriority),
            "5" => Ok(Self::Disable),
            "6" => Ok(Self::RunEvents),
            "7" => Ok(Self::Exit),
            _ => Err(UnknownChoice),
        }
    }
}

/// Returns the next state and the action to take for `input` in `state`.
///
/// Unrecognised input leaves the state unchanged with [`Action::Invalid`].
pub fn transition(state: State, input: &str) -> (State, Action) {
    let invalid = (state, Action::Invalid);
    match state {
        State::LoggedOut => match input.parse::<LoginChoice>() {
            Ok(LoginChoice::Admin) => (State::LoggedOut, Action::Authenticate),
            Ok(LoginChoice::User) => (State::User, Action::Nothing),
            Ok(LoginChoice::Exit) => (State::Exited, Action::Save),
            Err(UnknownChoice) => invalid,
        },
        State::User => match input.parse::<UserChoice>() {
            Ok(UserChoice::Book) => (State::User, Action::Book),
            Ok(UserChoice::Exit) => (State::LoggedOut, Action::Save),
            Err(UnknownChoice) => invalid,
        },
        State::Admin => match input.parse::<AdminChoice>() {
            Ok(AdminChoice::Statistics) => (State::Admin, Action::Statistics),
            Ok(AdminChoice::Book) => (State::Admin, Action::Book),
            Ok(AdminChoice::ListAll) => (State::Admin, Action::ListUpcoming),
            Ok(AdminChoice::ChangePriority) => (State::Admin, Action::ChangePriority),
            Ok(AdminChoice::Disable) => (State::Admin, Action::Disable),
            Ok(AdminChoice::RunEvents) => (State::Admin, Action::RunEvents),
            Ok(AdminChoice::Exit) => (State::LoggedOut, Action::Save),
            Err(UnknownChoice) => invalid,
        },
        State::Exited => (State::Exited, Action::Nothing),
    }
}

/// The heading and numbered options shown for a menu.
pub struct Menu {
    pub title: &'static str,
    pub options: &'static [&'static str],
}

impl Menu {
    /// The prompt asking for a choice, e.g. `Enter your choice (1-3): `.
    pub fn prompt(&self) -> String {
        format!("Enter your choice (1-{}): ", self.options.len())
    }

    /// The numbered option lines.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("{}. {option}", i + 1))
    }
}

impl State {
    /// The menu shown in this state, if any.
    pub const fn menu(self) -> Option<Menu> {
        match self {
            Self::LoggedOut => Some(Menu {
                title: "Login:",
                options: &["Admin", "User", "Exit"],
            }),
            Self::User => Some(Menu {
                title: "User Menu:",
                options: &["Book a Ticket", "Exit"],
            }),
            Self::Admin => Some(Menu {
                title: "Admin Menu:",
                options: &[
                    "Display Statistics",
                    "Book a Ticket",
                    "Display all Tickets",
                    "Change Ticket's Priority",
                    "Disable Ticket",
                    "Run Events",
                    "Exit",
                ],
            }),
            Self::Exited => None,
        }
    }
}
