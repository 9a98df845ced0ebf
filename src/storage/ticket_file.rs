//! The plain-text ticket file.
//!
//! One ticket per line, fields separated by `", "`:
//!
//! ```text
//! tick001, CONCERT, alice, 20240101, 5
//! ```
//!
//! Fields are not escaped. An event id or username is only written if
//! [`is_storable`] accepts it.

use std::{
    collections::HashSet,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::domain::{
    ticket::{parse_date, InvalidDate, InvalidPriority, DATE_FORMAT},
    Ticket, TicketId,
};

const SEPARATOR: &str = ", ";

/// Errors that can occur when loading the ticket file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The ticket file does not exist.
    #[error("tickets file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A line could not be parsed.
    #[error("line {line}: {reason}")]
    Malformed {
        /// The 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: MalformedLine,
    },

    /// Two lines share a ticket identifier.
    #[error("line {line}: duplicate ticket ID '{id}'")]
    DuplicateId {
        /// The 1-based line number of the second occurrence.
        line: usize,
        /// The repeated identifier.
        id: TicketId,
    },
}

/// The reason a line of the ticket file could not be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MalformedLine {
    /// The line did not have exactly five fields.
    #[error("expected 5 fields separated by \", \", found {0}")]
    FieldCount(usize),

    /// The date field was not a valid `YYYYMMDD` date.
    #[error(transparent)]
    Date(#[from] InvalidDate),

    /// The priority field was not a non-negative integer.
    #[error(transparent)]
    Priority(#[from] InvalidPriority),
}

/// A ticket file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketFile {
    path: PathBuf,
}

impl TicketFile {
    /// Refers to the ticket file at `path`. Nothing is read until
    /// [`TicketFile::load`] is called.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every ticket in the file, in file order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if the file does not exist, or another
    /// [`LoadError`] if it cannot be read or contains an invalid line.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Vec<Ticket>, LoadError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(self.path.clone()),
            _ => LoadError::Io(e),
        })?;

        let tickets = read_tickets(BufReader::new(file))?;
        tracing::debug!(count = tickets.len(), "loaded tickets");
        Ok(tickets)
    }

    /// Replaces the contents of the file with `tickets`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to.
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub fn save(&self, tickets: &[Ticket]) -> io::Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        write_tickets(&mut writer, tickets)?;
        writer.flush()?;
        tracing::debug!(count = tickets.len(), "saved tickets");
        Ok(())
    }
}

/// Reads tickets from a reader, one per line.
///
/// Blank lines are skipped.
///
/// # Errors
///
/// Returns an error if a line cannot be read or parsed, or if a ticket
/// identifier appears twice.
pub fn read_tickets<R: BufRead>(reader: R) -> Result<Vec<Ticket>, LoadError> {
    let mut tickets = Vec::new();
    let mut seen = HashSet::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let number = i + 1;
        if line.trim().is_empty() {
            continue;
        }

        let ticket = parse_line(&line).map_err(|reason| LoadError::Malformed {
            line: number,
            reason,
        })?;

        if !seen.insert(ticket.id.clone()) {
            return Err(LoadError::DuplicateId {
                line: number,
                id: ticket.id,
            });
        }
        tickets.push(ticket);
    }

    Ok(tickets)
}

/// Writes tickets to a writer, one per line.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_tickets<W: Write>(writer: &mut W, tickets: &[Ticket]) -> io::Result<()> {
    for ticket in tickets {
        writeln!(
            writer,
            "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
            ticket.id,
            ticket.event_id,
            ticket.username,
            ticket.date.format(DATE_FORMAT),
            ticket.priority,
        )?;
    }
    Ok(())
}

/// Returns `true` if `field` can be stored as an event id or username and read
/// back unchanged.
///
/// # Examples
///
/// ```
/// use ticketing::storage::is_storable;
///
/// assert!(is_storable("Rock Night"));
/// assert!(!is_storable("Rock, Live"));
/// ```
#[must_use]
pub fn is_storable(field: &str) -> bool {
    !field.contains(SEPARATOR) && !field.contains('\n')
}

fn parse_line(line: &str) -> Result<Ticket, MalformedLine> {
    let fields: Vec<&str> = line.trim().split(SEPARATOR).collect();
    let &[id, event_id, username, date, priority] = fields.as_slice() else {
        return Err(MalformedLine::FieldCount(fields.len()));
    };

    Ok(Ticket {
        id: TicketId::new(id),
        event_id: event_id.to_string(),
        username: username.to_string(),
        date: parse_date(date)?,
        priority: priority.parse()?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_case::test_case;

    use super::*;
    use crate::domain::Priority;

    fn ticket(id: &str, event_id: &str, date: (i32, u32, u32), priority: u64) -> Ticket {
        Ticket {
            id: TicketId::new(id),
            event_id: event_id.to_string(),
            username: "bob".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            priority: Priority::new(priority),
        }
    }

    fn setup_temp_file() -> (TempDir, TicketFile) {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let file = TicketFile::new(tmp.path().join("tickets.txt"));
        (tmp, file)
    }

    #[test]
    fn save_then_load_preserves_tickets_and_order() {
        let (_tmp, file) = setup_temp_file();
        let tickets = vec![
            ticket("tick002", "E2", (2024, 3, 9), 0),
            ticket("tick001", "E1", (2023, 12, 31), 17),
            ticket("custom", "E1", (2024, 2, 29), 4),
        ];

        file.save(&tickets).unwrap();

        assert_eq!(file.load().unwrap(), tickets);
    }

    #[test_case("Rock, Live"; "separator")]
    #[test_case(", "; "only separator")]
    #[test_case("two\nlines"; "newline")]
    fn unstorable_fields(field: &str) {
        assert!(!is_storable(field));
    }

    #[test]
    fn storable_fields_survive_save_and_load() {
        let (_tmp, file) = setup_temp_file();
        let tickets: Vec<_> = ["Rock,", " padded ", "a,b", ""]
            .into_iter()
            .enumerate()
            .map(|(i, event_id)| {
                assert!(is_storable(event_id));
                ticket(&format!("tick00{i}"), event_id, (2024, 1, 1), 1)
            })
            .collect();

        file.save(&tickets).unwrap();

        assert_eq!(file.load().unwrap(), tickets);
    }

    #[test]
    fn save_writes_one_line_per_ticket() {
        let (_tmp, file) = setup_temp_file();

        file.save(&[ticket("tick001", "CONCERT", (2024, 1, 1), 5)])
            .unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "tick001, CONCERT, bob, 20240101, 5\n");
    }

    #[test]
    fn save_replaces_previous_contents() {
        let (_tmp, file) = setup_temp_file();
        file.save(&[
            ticket("tick001", "E1", (2024, 1, 1), 1),
            ticket("tick002", "E2", (2024, 1, 1), 1),
        ])
        .unwrap();

        file.save(&[]).unwrap();

        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let (_tmp, file) = setup_temp_file();

        let error = file.load().unwrap_err();

        assert!(matches!(error, LoadError::NotFound(path) if path.as_path() == file.path()));
    }

    #[test]
    fn read_skips_blank_lines_and_trims() {
        let input = "tick001, E1, bob, 20240101, 5\r\n\n   \ntick002, E2, bob, 20240102, 6\n";

        let tickets = read_tickets(input.as_bytes()).unwrap();

        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[1].priority, Priority::new(6));
    }

    #[test]
    fn read_reports_line_of_wrong_field_count() {
        let input = "tick001, E1, bob, 20240101, 5\ntick002, E2, 20240102, 6\n";

        let error = read_tickets(input.as_bytes()).unwrap_err();

        assert!(matches!(
            error,
            LoadError::Malformed {
                line: 2,
                reason: MalformedLine::FieldCount(4)
            }
        ));
    }

    #[test]
    fn read_reports_invalid_date() {
        let input = "tick001, E1, bob, 20240230, 5\n";

        let error = read_tickets(input.as_bytes()).unwrap_err();

        assert!(matches!(
            error,
            LoadError::Malformed {
                line: 1,
                reason: MalformedLine::Date(_)
            }
        ));
    }

    #[test]
    fn read_reports_negative_priority() {
        let input = "tick001, E1, bob, 20240101, -3\n";

        let error = read_tickets(input.as_bytes()).unwrap_err();

        assert!(matches!(
            error,
            LoadError::Malformed {
                line: 1,
                reason: MalformedLine::Priority(_)
            }
        ));
    }

    #[test]
    fn read_rejects_duplicate_ids() {
        let input = "tick001, E1, bob, 20240101, 5\ntick001, E2, eve, 20240102, 1\n";

        let error = read_tickets(input.as_bytes()).unwrap_err();

        assert_eq!(error.to_string(), "line 2: duplicate ticket ID 'tick001'");
    }
}
