use std::{fmt, ops::Deref, str::FromStr};

use chrono::NaiveDate;

/// The on-disk and on-screen format of ticket dates.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// A unique identifier for a ticket.
///
/// Identifiers generated by the store look like `tick001`, but identifiers
/// loaded from disk are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TicketId(String);

impl TicketId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds a sequential identifier from a prefix and a number padded to
    /// `digits` with leading zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticketing::TicketId;
    ///
    /// assert_eq!(TicketId::sequence("tick", 7, 3).as_str(), "tick007");
    /// assert_eq!(TicketId::sequence("tick", 1234, 3).as_str(), "tick1234");
    /// ```
    #[must_use]
    pub fn sequence(prefix: &str, n: usize, digits: usize) -> Self {
        Self(format!("{prefix}{n:0digits$}"))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for TicketId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TicketId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The priority of a ticket. Higher values run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Priority(u64);

impl Priority {
    /// Creates a priority from a raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string is not an integer between zero and
/// [`u64::MAX`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid priority '{0}': expected a non-negative integer")]
pub struct InvalidPriority(String);

impl FromStr for Priority {
    type Err = InvalidPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i128>()
            .ok()
            .and_then(|value| u64::try_from(value).ok())
            .map(Self)
            .ok_or_else(|| InvalidPriority(s.to_string()))
    }
}

/// Error returned when a string is not a valid `YYYYMMDD` calendar date.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid date '{0}': expected a calendar date formatted as YYYYMMDD")]
pub struct InvalidDate(String);

/// Parses a `YYYYMMDD` date.
///
/// Impossible dates such as `20240230` are rejected.
///
/// # Errors
///
/// Returns [`InvalidDate`] if the input is not exactly eight digits forming a
/// real calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, InvalidDate> {
    let trimmed = s.trim();
    // chrono accepts short or signed years for %Y, the file format does not
    if trimmed.len() != 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| InvalidDate(s.to_string()))
}

/// Returns the date if `s` is a valid `YYYYMMDD` date.
#[must_use]
pub fn validate_date(s: &str) -> Option<NaiveDate> {
    parse_date(s).ok()
}

/// Returns the priority if `s` is a non-negative integer.
#[must_use]
pub fn validate_priority(s: &str) -> Option<Priority> {
    s.parse().ok()
}

/// A booked ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// The unique ticket identifier.
    pub id: TicketId,
    /// The event the ticket is for. Several tickets may share an event.
    pub event_id: String,
    /// The name of the person holding the ticket.
    pub username: String,
    /// The date of the event.
    pub date: NaiveDate,
    /// The ticket priority.
    pub priority: Priority,
}
