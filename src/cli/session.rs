//! An interactive booking session.
//!
//! The session owns the ticket store for the lifetime of the process. Changes
//! are only written to the ticket file when the user leaves a menu (or the
//! input ends), so a crash loses everything since the last exit.

use std::{
    io::{self, BufRead, Write},
    num::NonZeroU32,
    path::Path,
};

use ticketing::{
    is_storable, validate_date, validate_priority, Credentials, NewTicket, TicketFile,
    TicketStore,
};
use tracing::instrument;

use super::{
    clock::Clock,
    console::Console,
    menu::{transition, Action, State},
    terminal::Tone,
};

const INVALID_PRIORITY: &str = "Invalid priority. Priority should be a non-negative integer.";
const NO_TICKETS: &str = "No tickets found.";
const UNSTORABLE_TEXT: &str = "Invalid input. Event ID and username must not contain \", \".";

pub struct Session<C, K> {
    store: TicketStore,
    file: TicketFile,
    credentials: C,
    clock: K,
    max_login_attempts: NonZeroU32,
    admin_locked: bool,
    state: State,
}

impl<C: Credentials, K: Clock> Session<C, K> {
    pub fn new(
        store: TicketStore,
        file: TicketFile,
        credentials: C,
        clock: K,
        max_login_attempts: NonZeroU32,
    ) -> Self {
        Self {
            store,
            file,
            credentials,
            clock,
            max_login_attempts,
            admin_locked: false,
            state: State::LoggedOut,
        }
    }

    /// The path tickets are saved to.
    pub fn file(&self) -> &Path {
        self.file.path()
    }

    /// Shows menus and carries out choices until the user exits.
    ///
    /// If the input ends the tickets are saved as though the user had chosen
    /// to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the console cannot be written to or the ticket file
    /// cannot be saved.
    pub fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> io::Result<()> {
        while self.state != State::Exited {
            match self.step(console) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    tracing::info!("input closed");
                    self.state = State::Exited;
                    self.save(console)?;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn step<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> io::Result<()> {
        let Some(menu) = self.state.menu() else {
            return Ok(());
        };

        console.say("")?;
        console.say(Tone::Heading.paint(menu.title))?;
        for line in menu.lines() {
            console.say(line)?;
        }
        let input = console.prompt(&menu.prompt())?;

        let (next, action) = transition(self.state, &input);
        tracing::debug!(from = ?self.state, to = ?next, ?action, "menu choice");
        self.state = next;

        match action {
            Action::Nothing => Ok(()),
            Action::Authenticate => self.authenticate(console),
            Action::Book => self.book(console),
            Action::Statistics => self.statistics(console),
            Action::ListUpcoming => self.list_upcoming(console),
            Action::ChangePriority => self.change_priority(console),
            Action::Disable => self.disable(console),
            Action::RunEvents => self.run_events(console),
            Action::Save => self.save(console),
            Action::Invalid => {
                console.say(Tone::Problem.paint("Invalid choice. Please try again."))
            }
        }
    }

    #[instrument(level = "debug", skip_all)]
    fn authenticate<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> io::Result<()> {
        if self.admin_locked {
            return console.say(Tone::Locked.paint("Admin access is locked for this session."));
        }

        for attempt in 1..=self.max_login_attempts.get() {
            let username = console.prompt("Enter your username: ")?;
            let password = console.prompt("Enter your password: ")?;

            if self.credentials.verify(&username, &password) {
                tracing::info!("admin logged in");
                self.state = State::Admin;
                return Ok(());
            }

            tracing::warn!(attempt, "failed admin login");
            console.say(
                Tone::Problem.paint("Incorrect Username and/or Password. Please try again."),
            )?;
        }

        self.admin_locked = true;
        tracing::warn!("admin access locked");
        console.say(Tone::Locked.paint(
            "Maximum login attempts reached. Admin access is locked for this session.",
        ))
    }

    fn book<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> io::Result<()> {
        let event_id = console.prompt("Enter the event ID: ")?;
        if !is_storable(&event_id) {
            return console.say(Tone::Problem.paint(UNSTORABLE_TEXT));
        }

        let date = console.prompt("Enter the date of the event (YYYYMMDD): ")?;
        let Some(date) = validate_date(&date) else {
            return console.say(Tone::Problem.paint(
                "Invalid date format. Please use YYYYMMDD.",
            ));
        };

        let username = console.prompt("Enter your username: ")?;
        if !is_storable(&username) {
            return console.say(Tone::Problem.paint(UNSTORABLE_TEXT));
        }

        let priority = console.prompt("Enter the priority: ")?;
        let Some(priority) = validate_priority(&priority) else {
            return console.say(Tone::Problem.paint(INVALID_PRIORITY));
        };

        let ticket = self.store.book(NewTicket {
            event_id,
            username,
            date,
            priority,
        });
        console.say(Tone::Done.paint(&format!(
            "Ticket booked successfully! Your ticket ID is {}.",
            ticket.id
        )))
    }

    fn statistics<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> io::Result<()> {
        match self.store.busiest_event() {
            None => console.say(NO_TICKETS),
            Some(busiest) => console.say(format!(
                "The event ID with the highest number of tickets is: {} ({} tickets)",
                busiest.event_id, busiest.tickets
            )),
        }
    }

    fn list_upcoming<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> io::Result<()> {
        let upcoming = self.store.upcoming(self.clock.today());
        if upcoming.is_empty() {
            return console.say(NO_TICKETS);
        }

        console.say("")?;
        console.say(Tone::Heading.paint("All Tickets:"))?;
        for ticket in upcoming {
            console.say(format!(
                "Ticket ID: {}, Event ID: {}, Date: {}, Priority: {}",
                ticket.id,
                ticket.event_id,
                ticket.date.format("%Y-%m-%d"),
                ticket.priority
            ))?;
        }
        Ok(())
    }

    fn change_priority<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> io::Result<()> {
        let id = console.prompt("Enter the ticket ID to change its priority: ")?;
        let id = id.trim();
        if !self.store.contains(id) {
            return console.say(Tone::Problem.paint("Invalid ticket ID."));
        }

        let priority = console.prompt("Enter the new priority: ")?;
        let Some(priority) = validate_priority(&priority) else {
            return console.say(Tone::Problem.paint(INVALID_PRIORITY));
        };

        match self.store.change_priority(id, priority) {
            Ok(()) => console.say(Tone::Done.paint("Priority updated successfully!")),
            Err(e) => console.say(Tone::Problem.paint(&e.to_string())),
        }
    }

    fn disable<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> io::Result<()> {
        let id = console.prompt("Enter the ticket ID to disable: ")?;

        match self.store.disable(id.trim()) {
            Ok(_) => console.say(Tone::Done.paint("Ticket disabled successfully!")),
            Err(_) => console.say(Tone::Problem.paint("Ticket ID not found.")),
        }
    }

    fn run_events<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> io::Result<()> {
        let ran = self.store.run_events(self.clock.today());
        if ran.is_empty() {
            return console.say("No events today.");
        }

        console.say("")?;
        console.say(Tone::Heading.paint("Today's Events:"))?;
        for ticket in &ran {
            console.say(format!(
                "Event ID: {}, Priority: {}",
                ticket.event_id, ticket.priority
            ))?;
        }
        Ok(())
    }

    #[instrument(level = "debug", skip_all, fields(path = %self.file.path().display()))]
    fn save<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> io::Result<()> {
        self.file.save(self.store.tickets())?;
        tracing::info!(count = self.store.len(), "saved tickets");
        console.say(Tone::Farewell.paint("Goodbye!"))
    }
}

#[cfg(test)]
impl<C, K> Session<C, K> {
    pub const fn store(&self) -> &TicketStore {
        &self.store
    }

    pub const fn state(&self) -> State {
        self.state
    }
}
