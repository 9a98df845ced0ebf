pub mod ticket_file;

pub use ticket_file::{
    is_storable, read_tickets, write_tickets, LoadError, MalformedLine, TicketFile,
};
