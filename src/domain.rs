//! Domain models for ticket booking.
//!
//! This module contains the ticket entity and its validated value types, the
//! in-memory ticket store, configuration, and the admin credential policy.

/// Tickets and their validated fields.
pub mod ticket;
pub use ticket::{validate_date, validate_priority, Priority, Ticket, TicketId};

/// The in-memory ticket collection.
pub mod store;
pub use store::{EventCount, NewTicket, NotFound, TicketStore};

mod config;
pub use config::Config;

mod credentials;
pub use credentials::{Credentials, StaticCredentials};
