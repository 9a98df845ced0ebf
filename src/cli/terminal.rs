//! Colours for console messages.

use owo_colors::{OwoColorize, Style};

/// The kind of message being shown, which decides how it is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// A booking or change went through.
    Done,
    /// Input was rejected or something needs the user's attention.
    Problem,
    /// Admin access has been locked.
    Locked,
    /// A menu title or list heading.
    Heading,
    /// The goodbye after saving.
    Farewell,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Done => Style::new().green(),
            Self::Problem => Style::new().yellow(),
            Self::Locked => Style::new().red().bold(),
            Self::Heading => Style::new().bright_blue().bold(),
            Self::Farewell => Style::new().dimmed(),
        }
    }

    /// Renders `text` in this tone, or unchanged when stdout has no colour
    /// support.
    pub fn paint(self, text: &str) -> String {
        let colour = supports_color::on_cached(supports_color::Stream::Stdout).is_some();
        self.render(text, colour)
    }

    fn render(self, text: &str, colour: bool) -> String {
        if colour {
            text.style(self.style()).to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(Tone::Done)]
    #[test_case(Tone::Problem)]
    #[test_case(Tone::Locked)]
    #[test_case(Tone::Heading)]
    #[test_case(Tone::Farewell)]
    fn plain_text_without_colour(tone: Tone) {
        assert_eq!(
            tone.render("Ticket ID not found.", false),
            "Ticket ID not found."
        );
    }

    #[test]
    fn lockout_stands_out_from_problems() {
        let locked = Tone::Locked.render("locked", true);
        let problem = Tone::Problem.render("locked", true);

        assert!(locked.starts_with('\u{1b}'));
        assert!(locked.contains("locked"));
        assert_ne!(locked, problem);
    }
}
