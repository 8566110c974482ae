//! Terminal text styling
//!
//! The formatter is picked once at startup: colored output when the terminal
//! supports it, plain text otherwise.

use colored::Colorize;

/// Semantic styles used by the reporter
pub trait TerminalFormatter: Send + Sync {
    fn heading(&self, text: &str) -> String;
    fn success(&self, text: &str) -> String;
    fn error(&self, text: &str) -> String;
    fn command(&self, text: &str) -> String;
    fn link(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
}

/// Styles backed by the `colored` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ColoredFormatter;

impl TerminalFormatter for ColoredFormatter {
    fn heading(&self, text: &str) -> String {
        text.cyan().bold().to_string()
    }

    fn success(&self, text: &str) -> String {
        text.green().bold().to_string()
    }

    fn error(&self, text: &str) -> String {
        text.red().bold().to_string()
    }

    fn command(&self, text: &str) -> String {
        text.yellow().to_string()
    }

    fn link(&self, text: &str) -> String {
        text.blue().underline().to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.dimmed().to_string()
    }
}

/// Unstyled output
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl TerminalFormatter for PlainFormatter {
    fn heading(&self, text: &str) -> String {
        text.to_string()
    }

    fn success(&self, text: &str) -> String {
        text.to_string()
    }

    fn error(&self, text: &str) -> String {
        text.to_string()
    }

    fn command(&self, text: &str) -> String {
        text.to_string()
    }

    fn link(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Probe the environment (`NO_COLOR`, `CLICOLOR`, tty) and pick a formatter
pub fn detect_formatter() -> Box<dyn TerminalFormatter> {
    if colored::control::SHOULD_COLORIZE.should_colorize() {
        Box::new(ColoredFormatter)
    } else {
        Box::new(PlainFormatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_formatter_is_identity() {
        let f = PlainFormatter;
        assert_eq!(f.heading("Next steps"), "Next steps");
        assert_eq!(f.error("boom"), "boom");
        assert_eq!(f.command("npm run dev"), "npm run dev");
    }

    #[test]
    fn test_colored_formatter_keeps_text() {
        colored::control::set_override(true);
        let f = ColoredFormatter;
        let styled = f.success("done");
        colored::control::unset_override();

        assert!(styled.contains("done"));
        assert!(styled.starts_with("\u{1b}["));
    }
}
