//! Console Ticket Booking
//!
//! Tickets are held in memory and stored as lines of a plain-text file.

pub mod domain;
pub use domain::{
    validate_date, validate_priority, Config, Credentials, EventCount, NewTicket, NotFound,
    Priority, StaticCredentials, Ticket, TicketId, TicketStore,
};

/// Plain-text storage for tickets.
pub mod storage;
pub use storage::{is_storable, LoadError, TicketFile};
