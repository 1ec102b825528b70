//! Terminal implementation of the engine's console.

use std::io::{self, BufRead, IsTerminal, Write};

use owo_colors::OwoColorize;

use impara_core::traits::{Console, Tone};

/// Reads answers from stdin and prints to stdout.
///
/// Colors and screen clearing only apply when stdout is a terminal, so piped
/// output stays plain text.
pub struct TerminalConsole {
    clear_screen: bool,
    color: bool,
}

impl TerminalConsole {
    pub fn new(clear_screen: bool) -> Self {
        let tty = io::stdout().is_terminal();
        Self {
            clear_screen: clear_screen && tty,
            color: tty,
        }
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Plain => text.to_string(),
            Tone::Heading => text.bold().cyan().to_string(),
            Tone::Highlight => text.yellow().to_string(),
            Tone::Hint => text.dimmed().to_string(),
            Tone::Success => text.green().to_string(),
            Tone::Failure => text.red().to_string(),
        }
    }
}

impl Console for TerminalConsole {
    fn clear(&mut self) {
        if self.clear_screen {
            print!("\x1B[2J\x1B[H");
            let _ = io::stdout().flush();
        }
    }

    fn print(&mut self, text: &str, tone: Tone) {
        println!("{}", self.paint(text, tone));
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{}", self.paint(prompt, Tone::Highlight));
        let _ = io::stdout().flush();

        let answer = read_answer(&mut io::stdin().lock());
        if answer.is_none() {
            println!();
        }
        answer
    }
}

/// Read one trimmed line. Bytes that are not UTF-8 are replaced rather than
/// rejected, so only end of input (or a read error) yields `None`.
fn read_answer(reader: &mut impl BufRead) -> Option<String> {
    let mut bytes = Vec::new();
    match reader.read_until(b'\n', &mut bytes) {
        Ok(0) => None,
        Ok(_) => Some(String::from_utf8_lossy(&bytes).trim().to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read from stdin");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn answers_are_trimmed() {
        let mut input = Cursor::new(b"  parlo \r\nvai\n".to_vec());
        assert_eq!(read_answer(&mut input).as_deref(), Some("parlo"));
        assert_eq!(read_answer(&mut input).as_deref(), Some("vai"));
        assert_eq!(read_answer(&mut input), None);
    }

    #[test]
    fn invalid_utf8_is_an_answer_not_end_of_input() {
        let mut input = Cursor::new(b"caf\xe9\nparlo\n".to_vec());
        let first = read_answer(&mut input).unwrap();
        assert!(first.starts_with("caf"));
        assert!(first.contains('\u{FFFD}'));
        assert_eq!(read_answer(&mut input).as_deref(), Some("parlo"));
    }

    #[test]
    fn empty_line_is_empty_answer() {
        let mut input = Cursor::new(b"\n".to_vec());
        assert_eq!(read_answer(&mut input).as_deref(), Some(""));
    }
}
