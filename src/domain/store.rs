//! The in-memory ticket collection and the operations performed on it.

use std::{collections::HashMap, mem};

use chrono::NaiveDate;
use tracing::instrument;

use crate::domain::{Config, Priority, Ticket, TicketId};

/// Error returned when no ticket has the requested identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Ticket ID '{0}' not found")]
pub struct NotFound(pub TicketId);

/// The fields of a ticket supplied when booking.
///
/// The identifier is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    /// The event being booked.
    pub event_id: String,
    /// The person booking.
    pub username: String,
    /// The date of the event.
    pub date: NaiveDate,
    /// The ticket priority.
    pub priority: Priority,
}

/// The event with the most tickets, as reported by
/// [`TicketStore::busiest_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCount<'a> {
    /// The event identifier.
    pub event_id: &'a str,
    /// The number of tickets booked for the event.
    pub tickets: usize,
}

/// An ordered, in-memory collection of tickets.
///
/// The store never touches the filesystem. Loading and saving are the job of
/// [`crate::storage::TicketFile`], and only happen when the caller asks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    id_prefix: String,
    digits: usize,
}

impl TicketStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_tickets(Vec::new(), config)
    }

    /// Creates a store holding the given tickets, in order.
    #[must_use]
    pub fn with_tickets(tickets: Vec<Ticket>, config: &Config) -> Self {
        Self {
            tickets,
            id_prefix: config.id_prefix().to_string(),
            digits: config.digits(),
        }
    }

    /// Returns the tickets in insertion order.
    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Returns the number of tickets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Returns `true` if there are no tickets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Returns `true` if a ticket with this identifier exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.tickets.iter().any(|ticket| ticket.id.as_str() == id)
    }

    /// The identifier the next booking will receive.
    ///
    /// Numbering starts at one more than the current size. If that number is
    /// already in use (after tickets were removed) it counts upwards until a
    /// free identifier is found.
    #[must_use]
    pub fn next_id(&self) -> TicketId {
        let mut n = self.tickets.len() + 1;
        loop {
            let id = TicketId::sequence(&self.id_prefix, n, self.digits);
            if !self.contains(&id) {
                return id;
            }
            n += 1;
        }
    }

    /// Books a ticket, appending it to the collection.
    #[instrument(level = "debug", skip(self))]
    pub fn book(&mut self, ticket: NewTicket) -> &Ticket {
        let id = self.next_id();
        tracing::info!(%id, event_id = %ticket.event_id, "booked ticket");

        self.tickets.push(Ticket {
            id,
            event_id: ticket.event_id,
            username: ticket.username,
            date: ticket.date,
            priority: ticket.priority,
        });
        self.tickets.last().expect("a ticket was just pushed")
    }

    /// Returns the tickets dated `today` or later, sorted by date and then by
    /// event identifier.
    #[must_use]
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&Ticket> {
        let mut upcoming: Vec<_> = self
            .tickets
            .iter()
            .filter(|ticket| ticket.date >= today)
            .collect();
        upcoming.sort_by(|a, b| (a.date, &a.event_id).cmp(&(b.date, &b.event_id)));
        upcoming
    }

    /// Returns the event with the most tickets.
    ///
    /// Ties go to the event that was booked first. Returns `None` if the store
    /// is empty.
    #[must_use]
    pub fn busiest_event(&self) -> Option<EventCount<'_>> {
        let mut order: Vec<EventCount<'_>> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for ticket in &self.tickets {
            let event_id = ticket.event_id.as_str();
            if let Some(&i) = index.get(event_id) {
                order[i].tickets += 1;
            } else {
                index.insert(event_id, order.len());
                order.push(EventCount {
                    event_id,
                    tickets: 1,
                });
            }
        }

        order.into_iter().fold(None, |best, candidate| match best {
            Some(best) if best.tickets >= candidate.tickets => Some(best),
            _ => Some(candidate),
        })
    }

    /// Sets the priority of the ticket with this identifier.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no ticket has the identifier.
    #[instrument(level = "debug", skip(self))]
    pub fn change_priority(&mut self, id: &str, priority: Priority) -> Result<(), NotFound> {
        let ticket = self
            .tickets
            .iter_mut()
            .find(|ticket| ticket.id.as_str() == id)
            .ok_or_else(|| NotFound(TicketId::new(id)))?;

        tracing::info!(%id, from = %ticket.priority, to = %priority, "changed priority");
        ticket.priority = priority;
        Ok(())
    }

    /// Removes the ticket with this identifier and returns it.
    ///
    /// Identifiers are unique, so at most one ticket is removed.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no ticket has the identifier.
    #[instrument(level = "debug", skip(self))]
    pub fn disable(&mut self, id: &str) -> Result<Ticket, NotFound> {
        let position = self
            .tickets
            .iter()
            .position(|ticket| ticket.id.as_str() == id)
            .ok_or_else(|| NotFound(TicketId::new(id)))?;

        tracing::info!(%id, "disabled ticket");
        Ok(self.tickets.remove(position))
    }

    /// Runs today's events.
    ///
    /// Every ticket dated `today` is removed from the store and returned,
    /// highest priority first. Tickets with equal priority keep their booking
    /// order.
    #[instrument(level = "debug", skip(self))]
    pub fn run_events(&mut self, today: NaiveDate) -> Vec<Ticket> {
        let (mut todays, remaining): (Vec<_>, Vec<_>) = mem::take(&mut self.tickets)
            .into_iter()
            .partition(|ticket| ticket.date == today);
        self.tickets = remaining;

        todays.sort_by(|a, b| b.priority.cmp(&a.priority));
        tracing::info!(count = todays.len(), "ran today's events");
        todays
    }
}
